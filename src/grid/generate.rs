use super::slots::{DaySlot, MonthGrid, WeekRow, MAX_ROWS};
use crate::calendar::{Component, DateComponents, SystemCalendar, WeekdayExt, DAYS_IN_WEEK};
use crate::error::CalendarError;
use crate::month_year::MonthYear;
use std::ops::RangeInclusive;
use time::{OffsetDateTime, Weekday};

const MAX_CELLS: usize = MAX_ROWS * DAYS_IN_WEEK;

/// Returns the weekday on which the given month starts
pub fn first_weekday_of_month<C: SystemCalendar>(
    calendar: &C,
    month_year: MonthYear,
) -> Result<Weekday, CalendarError> {
    let first = month_year.first_day();
    let start = calendar
        .date_from_components(first)
        .ok_or_else(|| first.invalid())?;
    // 1 = Sunday, ..., 7 = Saturday
    match u8::try_from(calendar.component(Component::Weekday, start)) {
        Ok(n @ 1..=7) => Ok(Weekday::Sunday.nth_next(n - 1)),
        _ => Err(first.invalid()),
    }
}

/// Returns `1..=n`, where `n` is the number of days in the given month
pub fn day_range<C: SystemCalendar>(
    calendar: &C,
    month_year: MonthYear,
) -> Result<RangeInclusive<u8>, CalendarError> {
    let first = month_year.first_day();
    let next_first = month_year.next()?.first_day();
    let count = calendar
        .days_between(first, next_first)
        .and_then(|n| u8::try_from(n).ok())
        .filter(|&n| n > 0)
        .ok_or_else(|| next_first.invalid())?;
    Ok(1..=count)
}

/// Returns the leading fillers for `month_year` followed by one slot per day
/// of the month.  Days falling on the same calendar day as `selected` are
/// marked selected.
///
/// Fails with [`CalendarError::InvalidCalendarComponents`] if the fillers and
/// days together don't fit in [`MAX_ROWS`] weeks.
pub fn generate_days<C: SystemCalendar>(
    calendar: &C,
    selected: Option<OffsetDateTime>,
    month_year: MonthYear,
) -> Result<Vec<DaySlot>, CalendarError> {
    let leading = first_weekday_of_month(calendar, month_year)?.column_from(calendar.first_weekday());
    let range = day_range(calendar, month_year)?;
    let last = *range.end();
    if leading + usize::from(last) > MAX_CELLS {
        return Err(DateComponents::new(month_year.year(), month_year.number(), last).invalid());
    }
    let mut days = Vec::with_capacity(MAX_CELLS);
    days.extend(std::iter::repeat_with(DaySlot::filler).take(leading));
    for number in range {
        let components = DateComponents::new(month_year.year(), month_year.number(), number);
        let date = calendar
            .date_from_components(components)
            .ok_or_else(|| components.invalid())?;
        let is_selected = selected.is_some_and(|sd| calendar.is_same_day(date, sd));
        days.push(DaySlot::day(date, number, is_selected));
    }
    Ok(days)
}

/// Splits `days` into rows of seven, padding the last row with fillers.
///
/// At most [`MAX_ROWS`] rows are returned; slots past the first
/// `MAX_ROWS * 7` are not included.  [`generate_days`] never produces that
/// many.
pub fn collect_into_rows(days: &[DaySlot]) -> Vec<WeekRow> {
    days.chunks(DAYS_IN_WEEK)
        .take(MAX_ROWS)
        .map(|chunk| {
            WeekRow::new(std::array::from_fn(|i| {
                chunk.get(i).copied().unwrap_or_else(DaySlot::filler)
            }))
        })
        .collect()
}

/// Builds the complete grid for `month_year`
pub fn month_grid<C: SystemCalendar>(
    calendar: &C,
    selected: Option<OffsetDateTime>,
    month_year: MonthYear,
) -> Result<MonthGrid, CalendarError> {
    let days = generate_days(calendar, selected, month_year)?;
    let rows = collect_into_rows(&days);
    log::debug!(
        "Built grid for {month_year}: {} days in {} rows",
        days.iter().filter(|slot| !slot.is_filler()).count(),
        rows.len()
    );
    Ok(MonthGrid::new(month_year, rows))
}
