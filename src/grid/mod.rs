mod generate;
mod slots;
pub use self::generate::{
    collect_into_rows, day_range, first_weekday_of_month, generate_days, month_grid,
};
pub use self::slots::{DaySlot, MonthGrid, RowState, WeekRow, MAX_ROWS};
