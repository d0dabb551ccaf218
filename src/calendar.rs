use crate::error::CalendarError;
use time::{Date, Month, OffsetDateTime, UtcOffset, Weekday};

pub const DAYS_IN_WEEK: usize = 7;

static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static WEEKDAY_NAMES: [&str; DAYS_IN_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub(crate) trait WeekdayExt {
    /// 0 for Sunday through 6 for Saturday
    fn index0(&self) -> usize;

    /// Column of this weekday in a week row whose first column is `first`
    fn column_from(&self, first: Weekday) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }

    fn column_from(&self, first: Weekday) -> usize {
        (self.index0() + DAYS_IN_WEEK - first.index0()) % DAYS_IN_WEEK
    }
}

/// A calendar unit that can be extracted from a date
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Component {
    /// 1 for Sunday through 7 for Saturday
    Weekday,
    Day,
    /// 1 for January through 12 for December
    Month,
    Year,
}

/// A year, 1-based month, and day that have not yet been resolved to a date.
/// Nothing is normalized: month 13 is simply invalid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateComponents {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl DateComponents {
    pub fn new(year: i32, month: u8, day: u8) -> DateComponents {
        DateComponents { year, month, day }
    }

    pub(crate) fn invalid(self) -> CalendarError {
        CalendarError::InvalidCalendarComponents {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }
}

/// The calendar collaborator that all date arithmetic is delegated to.
///
/// Implementations fix a time zone, a first day of the week, and the names
/// used for months and weekdays, so that the grid and picker code never
/// consults process-wide state.
pub trait SystemCalendar {
    /// Returns the start of the given day in the calendar's time zone, or
    /// `None` if the components don't name a real date
    fn date_from_components(&self, components: DateComponents) -> Option<OffsetDateTime>;

    fn component(&self, unit: Component, date: OffsetDateTime) -> i32;

    /// Number of whole days from `start` to `end`, or `None` if either
    /// doesn't name a real date
    fn days_between(&self, start: DateComponents, end: DateComponents) -> Option<i64> {
        let start = self.date_from_components(start)?;
        let end = self.date_from_components(end)?;
        Some((end - start).whole_days())
    }

    fn is_same_day(&self, a: OffsetDateTime, b: OffsetDateTime) -> bool;

    fn now(&self) -> OffsetDateTime;

    fn is_today(&self, date: OffsetDateTime) -> bool {
        self.is_same_day(date, self.now())
    }

    fn first_weekday(&self) -> Weekday;

    /// Month names, January first
    fn month_symbols(&self) -> &[String; 12];

    /// Weekday names, Sunday first
    fn weekday_symbols(&self) -> &[String; DAYS_IN_WEEK];
}

impl<T: SystemCalendar + ?Sized> SystemCalendar for &T {
    fn date_from_components(&self, components: DateComponents) -> Option<OffsetDateTime> {
        (**self).date_from_components(components)
    }

    fn component(&self, unit: Component, date: OffsetDateTime) -> i32 {
        (**self).component(unit, date)
    }

    fn days_between(&self, start: DateComponents, end: DateComponents) -> Option<i64> {
        (**self).days_between(start, end)
    }

    fn is_same_day(&self, a: OffsetDateTime, b: OffsetDateTime) -> bool {
        (**self).is_same_day(a, b)
    }

    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }

    fn is_today(&self, date: OffsetDateTime) -> bool {
        (**self).is_today(date)
    }

    fn first_weekday(&self) -> Weekday {
        (**self).first_weekday()
    }

    fn month_symbols(&self) -> &[String; 12] {
        (**self).month_symbols()
    }

    fn weekday_symbols(&self) -> &[String; DAYS_IN_WEEK] {
        (**self).weekday_symbols()
    }
}

/// Proleptic Gregorian calendar pinned to a fixed UTC offset
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Gregorian {
    now: OffsetDateTime,
    offset: UtcOffset,
    first_weekday: Weekday,
    month_symbols: [String; 12],
    weekday_symbols: [String; DAYS_IN_WEEK],
}

impl Gregorian {
    /// Creates a calendar whose clock reads `now` and whose time zone is
    /// `now`'s offset.  Weeks start on Sunday and names are in English.
    pub fn new(now: OffsetDateTime) -> Gregorian {
        Gregorian {
            now,
            offset: now.offset(),
            first_weekday: Weekday::Sunday,
            month_symbols: MONTH_NAMES.map(String::from),
            weekday_symbols: WEEKDAY_NAMES.map(String::from),
        }
    }

    /// Creates a calendar from the system clock and local offset
    pub fn local() -> Result<Gregorian, CalendarError> {
        let now = OffsetDateTime::now_local().map_err(|_| CalendarError::LocalOffset)?;
        Ok(Gregorian::new(now))
    }

    pub fn with_first_weekday(mut self, first_weekday: Weekday) -> Gregorian {
        self.first_weekday = first_weekday;
        self
    }

    pub fn with_month_symbols(mut self, symbols: [String; 12]) -> Gregorian {
        self.month_symbols = symbols;
        self
    }

    pub fn with_weekday_symbols(mut self, symbols: [String; DAYS_IN_WEEK]) -> Gregorian {
        self.weekday_symbols = symbols;
        self
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl SystemCalendar for Gregorian {
    fn date_from_components(&self, components: DateComponents) -> Option<OffsetDateTime> {
        let month = Month::try_from(components.month).ok()?;
        let date = Date::from_calendar_date(components.year, month, components.day).ok()?;
        Some(date.midnight().assume_offset(self.offset))
    }

    fn component(&self, unit: Component, date: OffsetDateTime) -> i32 {
        let local = date.to_offset(self.offset);
        match unit {
            Component::Weekday => local.weekday().number_from_sunday().into(),
            Component::Day => local.day().into(),
            Component::Month => u8::from(local.month()).into(),
            Component::Year => local.year(),
        }
    }

    fn is_same_day(&self, a: OffsetDateTime, b: OffsetDateTime) -> bool {
        a.to_offset(self.offset).date() == b.to_offset(self.offset).date()
    }

    fn now(&self) -> OffsetDateTime {
        self.now
    }

    fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    fn month_symbols(&self) -> &[String; 12] {
        &self.month_symbols
    }

    fn weekday_symbols(&self) -> &[String; DAYS_IN_WEEK] {
        &self.weekday_symbols
    }
}
