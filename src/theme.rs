use crate::calendar::SystemCalendar;
use crate::grid::{DaySlot, RowState};
use ratatui::style::{Color, Modifier, Style};

pub const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub const SELECTED_DAY_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);

pub const TODAY_STYLE: Style = BASE_STYLE.fg(Color::LightBlue).add_modifier(Modifier::BOLD);

pub const FILLER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub const WARNING_ROW_STYLE: Style = Style::new().bg(Color::Rgb(0xFF, 0xA5, 0x00));

pub const REJECTED_ROW_STYLE: Style = Style::new().bg(Color::Red);

impl RowState {
    /// Background applied behind a whole week row
    pub fn style(self) -> Style {
        match self {
            RowState::Normal => Style::new(),
            RowState::Rejected => REJECTED_ROW_STYLE,
            RowState::Warning => WARNING_ROW_STYLE,
        }
    }
}

impl DaySlot {
    pub fn style<C: SystemCalendar>(&self, calendar: &C) -> Style {
        if self.is_filler() {
            FILLER_STYLE
        } else if self.is_selected() {
            SELECTED_DAY_STYLE
        } else if self.is_today(calendar) {
            TODAY_STYLE
        } else {
            BASE_STYLE
        }
    }
}
