use crate::calendar::{Component, SystemCalendar};
use crate::error::CalendarError;
use uuid::Uuid;

/// An entry in a month or year picker
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PickerOption<T> {
    id: Uuid,
    index: i32,
    title: String,
    value: T,
}

impl<T> PickerOption<T> {
    pub fn new(index: i32, title: String, value: T) -> PickerOption<T> {
        PickerOption {
            id: Uuid::new_v4(),
            index,
            title,
            value,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// How many years before and after the current year the year picker offers
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearWindow {
    before: i32,
    after: i32,
}

impl YearWindow {
    pub fn new(before: i32, after: i32) -> Result<YearWindow, CalendarError> {
        if before < 0 || after < 0 {
            return Err(CalendarError::Configuration(format!(
                "year offsets must not be negative (got {before} before, {after} after)"
            )));
        }
        Ok(YearWindow { before, after })
    }

    pub fn before(&self) -> i32 {
        self.before
    }

    pub fn after(&self) -> i32 {
        self.after
    }

    /// Returns the first and last year of the window around `current`
    fn bounds(&self, current: i32) -> Result<(i32, i32), CalendarError> {
        let overflow = || {
            CalendarError::Configuration(format!(
                "year window {}..{} around {current} overflows",
                self.before, self.after
            ))
        };
        let first = current.checked_sub(self.before).ok_or_else(overflow)?;
        let last = current.checked_add(self.after).ok_or_else(overflow)?;
        Ok((first, last))
    }
}

impl Default for YearWindow {
    fn default() -> YearWindow {
        YearWindow {
            before: 5,
            after: 10,
        }
    }
}

/// Returns the twelve month options in calendar order.  The index and value
/// of each option are the 0-based month index.
pub fn months<C: SystemCalendar>(calendar: &C) -> Vec<PickerOption<u8>> {
    calendar
        .month_symbols()
        .iter()
        .zip(0u8..)
        .map(|(title, i)| PickerOption::new(i.into(), title.clone(), i))
        .collect()
}

/// Returns the year options for `window` around the calendar's current year,
/// in ascending order
pub fn years<C: SystemCalendar>(
    calendar: &C,
    window: YearWindow,
) -> Result<Vec<PickerOption<i32>>, CalendarError> {
    let current = calendar.component(Component::Year, calendar.now());
    let (first, last) = window.bounds(current)?;
    Ok((first..current)
        .chain(current..=last)
        .map(|year| PickerOption::new(year, year.to_string(), year))
        .collect())
}

/// The option lists for a month/year picker, computed once
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthYearPicker {
    window: YearWindow,
    months: Vec<PickerOption<u8>>,
    years: Vec<PickerOption<i32>>,
}

impl MonthYearPicker {
    pub fn new<C: SystemCalendar>(
        calendar: &C,
        window: YearWindow,
    ) -> Result<MonthYearPicker, CalendarError> {
        let years = years(calendar, window)?;
        log::debug!(
            "Built year picker with {} options ({} before, {} after)",
            years.len(),
            window.before,
            window.after
        );
        Ok(MonthYearPicker {
            window,
            months: months(calendar),
            years,
        })
    }

    pub fn window(&self) -> YearWindow {
        self.window
    }

    pub fn months(&self) -> &[PickerOption<u8>] {
        &self.months
    }

    pub fn years(&self) -> &[PickerOption<i32>] {
        &self.years
    }
}
