use thiserror::Error;

/// Everything that can go wrong while building grids or picker options
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CalendarError {
    /// The calendar could not construct a date from the given components
    #[error("invalid calendar components: year {year}, month {month}, day {day}")]
    InvalidCalendarComponents { year: i32, month: u8, day: u8 },

    /// A month index outside of `0..=11` was supplied
    #[error("month index {0} is out of range (expected 0 through 11)")]
    InvalidMonthIndex(u8),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("failed to determine local UTC offset")]
    LocalOffset,
}
