//! View model for a month-grid date picker.
//!
//! [`CalendarModel`] holds the selected date and the displayed month, keeps
//! [`MonthGrid`]s for that month and its two neighbors, and offers the
//! option lists for a month/year picker.  All date arithmetic goes through an
//! injected [`SystemCalendar`], normally [`Gregorian`].
mod calendar;
mod error;
mod grid;
mod model;
mod month_year;
mod picker;
mod theme;
pub use crate::calendar::{Component, DateComponents, Gregorian, SystemCalendar, DAYS_IN_WEEK};
pub use crate::error::CalendarError;
pub use crate::grid::{
    collect_into_rows, day_range, first_weekday_of_month, generate_days, month_grid, DaySlot,
    MonthGrid, RowState, WeekRow, MAX_ROWS,
};
pub use crate::model::{CalendarModel, ModelChange};
pub use crate::month_year::MonthYear;
pub use crate::picker::{months, years, MonthYearPicker, PickerOption, YearWindow};
pub use crate::theme::{
    BASE_STYLE, FILLER_STYLE, REJECTED_ROW_STYLE, SELECTED_DAY_STYLE, TODAY_STYLE,
    WARNING_ROW_STYLE,
};
