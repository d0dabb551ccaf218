use crate::calendar::{Component, DateComponents, SystemCalendar};
use crate::error::CalendarError;
use std::fmt;
use time::OffsetDateTime;

/// A displayed month: a 0-based month index and a year
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MonthYear {
    // Field order matters for the derived Ord
    year: i32,
    month: u8,
}

impl MonthYear {
    /// `month` is 0-based and must be in `0..=11`
    pub fn new(month: u8, year: i32) -> Result<MonthYear, CalendarError> {
        if month < 12 {
            Ok(MonthYear { year, month })
        } else {
            Err(CalendarError::InvalidMonthIndex(month))
        }
    }

    /// Returns the month containing `date` as seen in the calendar's time
    /// zone
    pub fn containing<C: SystemCalendar>(
        calendar: &C,
        date: OffsetDateTime,
    ) -> Result<MonthYear, CalendarError> {
        let year = calendar.component(Component::Year, date);
        let month = calendar.component(Component::Month, date);
        match u8::try_from(month) {
            Ok(m @ 1..=12) => MonthYear::new(m - 1, year),
            _ => Err(CalendarError::InvalidCalendarComponents {
                year,
                month: u8::try_from(month).unwrap_or(u8::MAX),
                day: u8::try_from(calendar.component(Component::Day, date)).unwrap_or(u8::MAX),
            }),
        }
    }

    /// 0-based month index
    pub fn month(&self) -> u8 {
        self.month
    }

    /// 1-based month number, as used for date components
    pub fn number(&self) -> u8 {
        self.month + 1
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> DateComponents {
        DateComponents::new(self.year, self.number(), 1)
    }

    pub fn previous(&self) -> Result<MonthYear, CalendarError> {
        match self.month.checked_sub(1) {
            Some(month) => Ok(MonthYear {
                year: self.year,
                month,
            }),
            None => {
                let year = self
                    .year
                    .checked_sub(1)
                    .ok_or_else(|| DateComponents::new(self.year, 0, 1).invalid())?;
                Ok(MonthYear { year, month: 11 })
            }
        }
    }

    pub fn next(&self) -> Result<MonthYear, CalendarError> {
        if self.month < 11 {
            Ok(MonthYear {
                year: self.year,
                month: self.month + 1,
            })
        } else {
            let year = self
                .year
                .checked_add(1)
                .ok_or_else(|| DateComponents::new(self.year, 13, 1).invalid())?;
            Ok(MonthYear { year, month: 0 })
        }
    }

    /// "<month name> <year>", with the month named by the calendar
    pub fn title<C: SystemCalendar>(&self, calendar: &C) -> String {
        let symbols = calendar.month_symbols();
        let name = symbols.get(usize::from(self.month)).map_or("", String::as_str);
        format!("{name} {}", self.year)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.number())
    }
}
