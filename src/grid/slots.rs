use crate::calendar::{SystemCalendar, DAYS_IN_WEEK};
use crate::month_year::MonthYear;
use time::OffsetDateTime;
use uuid::Uuid;

/// One cell of a month grid: either a real day or a filler used to line the
/// days up with their weekday columns
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DaySlot {
    id: Uuid,
    // `None` for fillers
    day: Option<(OffsetDateTime, u8)>,
    selected: bool,
}

impl DaySlot {
    pub fn filler() -> DaySlot {
        DaySlot {
            id: Uuid::new_v4(),
            day: None,
            selected: false,
        }
    }

    pub fn day(date: OffsetDateTime, number: u8, selected: bool) -> DaySlot {
        DaySlot {
            id: Uuid::new_v4(),
            day: Some((date, number)),
            selected,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> Option<OffsetDateTime> {
        self.day.map(|(date, _)| date)
    }

    /// Day of the month, 1 through 31; `None` for fillers
    pub fn number(&self) -> Option<u8> {
        self.day.map(|(_, number)| number)
    }

    pub fn is_filler(&self) -> bool {
        self.day.is_none()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_today<C: SystemCalendar>(&self, calendar: &C) -> bool {
        self.date().is_some_and(|date| calendar.is_today(date))
    }

    /// Returns a copy with the same id and the given selection flag.  Fillers
    /// stay unselected.
    pub fn with_selected(&self, selected: bool) -> DaySlot {
        DaySlot {
            selected: selected && !self.is_filler(),
            ..*self
        }
    }
}

/// Display tag attached to a week row.  It only affects styling.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RowState {
    #[default]
    Normal,
    Rejected,
    Warning,
}

/// Seven day slots, one per weekday column
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekRow {
    slots: [DaySlot; DAYS_IN_WEEK],
    state: RowState,
}

impl WeekRow {
    pub fn new(slots: [DaySlot; DAYS_IN_WEEK]) -> WeekRow {
        WeekRow {
            slots,
            state: RowState::Normal,
        }
    }

    pub fn with_state(mut self, state: RowState) -> WeekRow {
        self.state = state;
        self
    }

    pub fn slots(&self) -> &[DaySlot; DAYS_IN_WEEK] {
        &self.slots
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    /// True if any slot in the row is selected
    pub fn is_active(&self) -> bool {
        self.slots.iter().any(DaySlot::is_selected)
    }
}

/// The week rows covering one month, 1 to [`MAX_ROWS`] of them
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MonthGrid {
    month_year: MonthYear,
    rows: Vec<WeekRow>,
}

/// Maximum number of week rows in a month grid.  Six rows hold 42 cells,
/// and the longest layout is 6 leading fillers plus 31 days.
pub const MAX_ROWS: usize = 6;

impl MonthGrid {
    /// `rows` must come from [`collect_into_rows`](super::collect_into_rows)
    /// so that there are at most [`MAX_ROWS`] of them
    pub(crate) fn new(month_year: MonthYear, rows: Vec<WeekRow>) -> MonthGrid {
        MonthGrid { month_year, rows }
    }

    pub fn month_year(&self) -> MonthYear {
        self.month_year
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    pub fn slots(&self) -> impl Iterator<Item = &DaySlot> + '_ {
        self.rows.iter().flat_map(|row| row.slots.iter())
    }

    pub fn selected(&self) -> Option<&DaySlot> {
        self.slots().find(|slot| slot.is_selected())
    }

    pub fn find(&self, id: Uuid) -> Option<&DaySlot> {
        self.slots().find(|slot| slot.id == id)
    }

    /// Finds the slot for the given day of the month
    pub fn day(&self, number: u8) -> Option<&DaySlot> {
        self.slots().find(|slot| slot.number() == Some(number))
    }

    /// Returns a copy of the grid in which only `chosen` (matched by id) is
    /// selected.  Every row comes back as [`RowState::Normal`].
    pub fn with_selection(&self, chosen: &DaySlot) -> MonthGrid {
        let rows = self
            .rows
            .iter()
            .map(|row| WeekRow::new(row.slots.map(|slot| slot.with_selected(slot.id == chosen.id))))
            .collect();
        MonthGrid {
            month_year: self.month_year,
            rows,
        }
    }
}
