use crate::calendar::{Component, SystemCalendar};
use crate::error::CalendarError;
use crate::grid::{month_grid, DaySlot, MonthGrid};
use crate::month_year::MonthYear;
use crate::picker::{MonthYearPicker, YearWindow};
use std::fmt;
use time::OffsetDateTime;

/// What changed in a [`CalendarModel`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModelChange {
    /// A day was picked; carries the (possibly unchanged) selected date
    DateSelected(OffsetDateTime),
    /// A different month became the active month
    MonthShown(MonthYear),
}

type Listener = Box<dyn FnMut(&ModelChange)>;

/// The grids for the active month and its two neighbors
#[derive(Clone, Debug, Eq, PartialEq)]
struct Pages {
    previous: MonthGrid,
    current: MonthGrid,
    next: MonthGrid,
}

impl Pages {
    fn around<C: SystemCalendar>(
        calendar: &C,
        selected: OffsetDateTime,
        active: MonthYear,
    ) -> Result<Pages, CalendarError> {
        Ok(Pages {
            previous: month_grid(calendar, Some(selected), active.previous()?)?,
            current: month_grid(calendar, Some(selected), active)?,
            next: month_grid(calendar, Some(selected), active.next()?)?,
        })
    }
}

/// State behind a month-grid date picker: the selected date, the month being
/// shown, precomputed grids for that month and the months on either side,
/// and the month/year picker options.
///
/// Every mutation either succeeds completely or leaves the model untouched.
/// Subscribers registered with [`CalendarModel::subscribe`] are called after
/// each successful mutation.
pub struct CalendarModel<C> {
    calendar: C,
    date: OffsetDateTime,
    active: MonthYear,
    pages: Pages,
    picker: MonthYearPicker,
    listeners: Vec<Listener>,
}

impl<C: SystemCalendar> CalendarModel<C> {
    pub fn new(
        calendar: C,
        date: OffsetDateTime,
        window: YearWindow,
    ) -> Result<CalendarModel<C>, CalendarError> {
        let picker = MonthYearPicker::new(&calendar, window)?;
        let active = MonthYear::containing(&calendar, date)?;
        let pages = Pages::around(&calendar, date, active)?;
        Ok(CalendarModel {
            calendar,
            date,
            active,
            pages,
            picker,
            listeners: Vec::new(),
        })
    }

    /// Registers a callback to run after every successful change
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ModelChange) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, change: ModelChange) {
        for listener in &mut self.listeners {
            listener(&change);
        }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn selected_date(&self) -> OffsetDateTime {
        self.date
    }

    pub fn active_month(&self) -> MonthYear {
        self.active
    }

    /// "<month name> <year>" for the active month
    pub fn title(&self) -> String {
        self.active.title(&self.calendar)
    }

    /// The selected date written out in full, e.g. "Monday, January 1, 2024"
    pub fn selected_date_title(&self) -> String {
        let cal = &self.calendar;
        let weekday = cal
            .component(Component::Weekday, self.date)
            .checked_sub(1)
            .and_then(|n| usize::try_from(n).ok())
            .and_then(|i| cal.weekday_symbols().get(i))
            .map_or("", String::as_str);
        let month = cal
            .component(Component::Month, self.date)
            .checked_sub(1)
            .and_then(|n| usize::try_from(n).ok())
            .and_then(|i| cal.month_symbols().get(i))
            .map_or("", String::as_str);
        let day = cal.component(Component::Day, self.date);
        let year = cal.component(Component::Year, self.date);
        format!("{weekday}, {month} {day}, {year}")
    }

    pub fn previous_grid(&self) -> &MonthGrid {
        &self.pages.previous
    }

    pub fn current_grid(&self) -> &MonthGrid {
        &self.pages.current
    }

    pub fn next_grid(&self) -> &MonthGrid {
        &self.pages.next
    }

    pub fn picker(&self) -> &MonthYearPicker {
        &self.picker
    }

    /// Marks `slot` as the selected day of the current grid.  If `slot` is a
    /// real day, its date becomes the selected date.  The neighboring grids
    /// are left as they are.
    pub fn select_date(&mut self, slot: &DaySlot) {
        if let Some(date) = slot.date() {
            log::debug!(
                "Selected day {} of {}",
                slot.number().unwrap_or_default(),
                self.active
            );
            self.date = date;
        }
        self.pages.current = self.pages.current.with_selection(slot);
        self.notify(ModelChange::DateSelected(self.date));
    }

    /// Makes `target` the active month and rebuilds all three grids
    pub fn show_month(&mut self, target: MonthYear) -> Result<(), CalendarError> {
        match Pages::around(&self.calendar, self.date, target) {
            Ok(pages) => {
                log::debug!("Showing {target}");
                self.active = target;
                self.pages = pages;
                self.notify(ModelChange::MonthShown(target));
                Ok(())
            }
            Err(e) => {
                log::warn!("Could not show {target}: {e}");
                Err(e)
            }
        }
    }

    pub fn show_previous_month(&mut self) -> Result<(), CalendarError> {
        let target = self.active.previous()?;
        self.show_month(target)
    }

    pub fn show_next_month(&mut self) -> Result<(), CalendarError> {
        let target = self.active.next()?;
        self.show_month(target)
    }

    /// Shows the month containing the calendar's current date without
    /// changing the selection
    pub fn show_today(&mut self) -> Result<(), CalendarError> {
        let target = MonthYear::containing(&self.calendar, self.calendar.now())?;
        self.show_month(target)
    }
}

impl<C: fmt::Debug> fmt::Debug for CalendarModel<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarModel")
            .field("calendar", &self.calendar)
            .field("date", &self.date)
            .field("active", &self.active)
            .field("pages", &self.pages)
            .field("picker", &self.picker)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{DateComponents, Gregorian, DAYS_IN_WEEK};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use time::macros::datetime;
    use time::Weekday;

    fn model(date: OffsetDateTime) -> CalendarModel<Gregorian> {
        let cal = Gregorian::new(datetime!(2024-01-15 09:00 UTC));
        CalendarModel::new(cal, date, YearWindow::default()).unwrap()
    }

    fn recorder(model: &mut CalendarModel<Gregorian>) -> Rc<RefCell<Vec<ModelChange>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        model.subscribe(move |change| sink.borrow_mut().push(*change));
        changes
    }

    #[test]
    fn test_new() {
        let model = model(datetime!(2024-01-10 14:00 UTC));
        assert_eq!(model.active_month(), MonthYear::new(0, 2024).unwrap());
        assert_eq!(model.title(), "January 2024");
        assert_eq!(
            model.previous_grid().month_year(),
            MonthYear::new(11, 2023).unwrap()
        );
        assert_eq!(
            model.next_grid().month_year(),
            MonthYear::new(1, 2024).unwrap()
        );
        assert_eq!(
            model.current_grid().selected().and_then(DaySlot::number),
            Some(10)
        );
        assert!(model.previous_grid().selected().is_none());
        assert_eq!(model.picker().years().len(), 16);
        assert_eq!(model.picker().months().len(), 12);
    }

    #[test]
    fn test_new_in_december() {
        let model = model(datetime!(2023-12-25 00:00 UTC));
        assert_eq!(
            model.next_grid().month_year(),
            MonthYear::new(0, 2024).unwrap()
        );
        assert_eq!(
            model.previous_grid().month_year(),
            MonthYear::new(10, 2023).unwrap()
        );
    }

    #[test]
    fn test_new_rejects_out_of_range_date() {
        let cal = Gregorian::new(datetime!(2024-01-15 09:00 UTC));
        let r = CalendarModel::new(cal, datetime!(9999-12-05 00:00 UTC), YearWindow::default());
        assert_eq!(
            r.err(),
            Some(CalendarError::InvalidCalendarComponents {
                year: 10_000,
                month: 1,
                day: 1
            })
        );
    }

    #[test]
    fn test_selected_date_title() {
        let model = model(datetime!(2024-01-01 08:00 UTC));
        assert_eq!(model.selected_date_title(), "Monday, January 1, 2024");
    }

    #[test]
    fn test_selected_date_title_localized() {
        let cal = Gregorian::new(datetime!(2024-01-15 09:00 UTC))
            .with_weekday_symbols(
                [
                    "domingo",
                    "lunes",
                    "martes",
                    "miércoles",
                    "jueves",
                    "viernes",
                    "sábado",
                ]
                .map(String::from),
            )
            .with_month_symbols(
                [
                    "enero",
                    "febrero",
                    "marzo",
                    "abril",
                    "mayo",
                    "junio",
                    "julio",
                    "agosto",
                    "septiembre",
                    "octubre",
                    "noviembre",
                    "diciembre",
                ]
                .map(String::from),
            );
        let model =
            CalendarModel::new(cal, datetime!(2024-03-06 12:00 UTC), YearWindow::default())
                .unwrap();
        assert_eq!(model.selected_date_title(), "miércoles, marzo 6, 2024");
        assert_eq!(model.title(), "marzo 2024");
    }

    #[test]
    fn test_select_date() {
        let mut model = model(datetime!(2024-01-10 14:00 UTC));
        let changes = recorder(&mut model);
        let before = model.current_grid().clone();
        let slot = *model.current_grid().day(20).unwrap();
        model.select_date(&slot);
        assert_eq!(model.selected_date(), datetime!(2024-01-20 00:00 UTC));
        let grid = model.current_grid();
        assert_eq!(grid.selected().map(DaySlot::id), Some(slot.id()));
        assert_eq!(grid.slots().filter(|s| s.is_selected()).count(), 1);
        // Identity is preserved slot for slot
        let ids = grid.slots().map(DaySlot::id).collect::<Vec<_>>();
        let old_ids = before.slots().map(DaySlot::id).collect::<Vec<_>>();
        assert_eq!(ids, old_ids);
        assert_eq!(
            changes.borrow().as_slice(),
            [ModelChange::DateSelected(datetime!(2024-01-20 00:00 UTC))]
        );
    }

    #[test]
    fn test_select_date_is_idempotent() {
        let mut model = model(datetime!(2024-01-10 14:00 UTC));
        let slot = *model.current_grid().day(3).unwrap();
        model.select_date(&slot);
        let once = model.current_grid().clone();
        model.select_date(&slot);
        assert_eq!(model.current_grid(), &once);
    }

    #[test]
    fn test_select_filler() {
        let mut model = model(datetime!(2024-01-10 14:00 UTC));
        let filler = *model
            .current_grid()
            .slots()
            .find(|s| s.is_filler())
            .unwrap();
        model.select_date(&filler);
        assert_eq!(model.selected_date(), datetime!(2024-01-10 14:00 UTC));
        assert!(model.current_grid().selected().is_none());
    }

    #[test]
    fn test_select_leaves_neighbors_alone() {
        let mut model = model(datetime!(2024-01-31 14:00 UTC));
        let previous = model.previous_grid().clone();
        let next = model.next_grid().clone();
        let slot = *model.current_grid().day(1).unwrap();
        model.select_date(&slot);
        assert_eq!(model.previous_grid(), &previous);
        assert_eq!(model.next_grid(), &next);
    }

    #[test]
    fn test_navigation() {
        let mut model = model(datetime!(2024-01-10 14:00 UTC));
        let changes = recorder(&mut model);
        model.show_previous_month().unwrap();
        assert_eq!(model.active_month(), MonthYear::new(11, 2023).unwrap());
        assert_eq!(model.title(), "December 2023");
        assert!(model.current_grid().selected().is_none());
        assert_eq!(
            model.next_grid().selected().and_then(DaySlot::number),
            Some(10)
        );
        model.show_next_month().unwrap();
        model.show_next_month().unwrap();
        assert_eq!(model.active_month(), MonthYear::new(1, 2024).unwrap());
        assert_eq!(
            changes.borrow().as_slice(),
            [
                ModelChange::MonthShown(MonthYear::new(11, 2023).unwrap()),
                ModelChange::MonthShown(MonthYear::new(0, 2024).unwrap()),
                ModelChange::MonthShown(MonthYear::new(1, 2024).unwrap()),
            ]
        );
    }

    #[test]
    fn test_navigation_stays_in_range() {
        let mut model = model(datetime!(2024-06-10 14:00 UTC));
        let mut last = model.active_month();
        for _ in 0..30 {
            model.show_next_month().unwrap();
            let now = model.active_month();
            assert!(now.month() < 12);
            assert!((now.year() - last.year()).abs() <= 1);
            last = now;
        }
        for _ in 0..60 {
            model.show_previous_month().unwrap();
            let now = model.active_month();
            assert!(now.month() < 12);
            assert!((now.year() - last.year()).abs() <= 1);
            last = now;
        }
        assert_eq!(last, MonthYear::new(11, 2021).unwrap());
    }

    #[test]
    fn test_failed_navigation_changes_nothing() {
        let mut model = model(datetime!(2024-01-10 14:00 UTC));
        let changes = recorder(&mut model);
        let before = model.current_grid().clone();
        let r = model.show_month(MonthYear::new(11, 9999).unwrap());
        assert!(matches!(
            r,
            Err(CalendarError::InvalidCalendarComponents { year: 10_000, .. })
        ));
        assert_eq!(model.active_month(), MonthYear::new(0, 2024).unwrap());
        assert_eq!(model.current_grid(), &before);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_show_today() {
        let mut model = model(datetime!(2022-05-10 14:00 UTC));
        model.show_today().unwrap();
        assert_eq!(model.active_month(), MonthYear::new(0, 2024).unwrap());
        assert_eq!(model.selected_date(), datetime!(2022-05-10 14:00 UTC));
        let today = model.current_grid().day(15).unwrap();
        assert!(today.is_today(model.calendar()));
    }

    #[test]
    fn test_selection_survives_round_trip() {
        let mut model = model(datetime!(2024-01-10 14:00 UTC));
        model.show_next_month().unwrap();
        assert!(model.current_grid().selected().is_none());
        let slot = *model.current_grid().day(14).unwrap();
        model.select_date(&slot);
        model.show_previous_month().unwrap();
        assert!(model.current_grid().selected().is_none());
        assert_eq!(
            model.next_grid().selected().and_then(DaySlot::number),
            Some(14)
        );
    }

    /// A calendar whose weekday and month components can be switched to
    /// `i32::MIN`
    struct Garbled {
        inner: Gregorian,
        garbled: Cell<bool>,
    }

    impl SystemCalendar for Garbled {
        fn date_from_components(&self, components: DateComponents) -> Option<OffsetDateTime> {
            self.inner.date_from_components(components)
        }

        fn component(&self, unit: Component, date: OffsetDateTime) -> i32 {
            match unit {
                Component::Weekday | Component::Month if self.garbled.get() => i32::MIN,
                _ => self.inner.component(unit, date),
            }
        }

        fn is_same_day(&self, a: OffsetDateTime, b: OffsetDateTime) -> bool {
            self.inner.is_same_day(a, b)
        }

        fn now(&self) -> OffsetDateTime {
            self.inner.now()
        }

        fn first_weekday(&self) -> Weekday {
            self.inner.first_weekday()
        }

        fn month_symbols(&self) -> &[String; 12] {
            self.inner.month_symbols()
        }

        fn weekday_symbols(&self) -> &[String; DAYS_IN_WEEK] {
            self.inner.weekday_symbols()
        }
    }

    #[test]
    fn test_selected_date_title_with_bad_components() {
        let cal = Garbled {
            inner: Gregorian::new(datetime!(2024-01-15 09:00 UTC)),
            garbled: Cell::new(false),
        };
        let model =
            CalendarModel::new(cal, datetime!(2024-01-01 08:00 UTC), YearWindow::default())
                .unwrap();
        model.calendar().garbled.set(true);
        assert_eq!(model.selected_date_title(), ",  1, 2024");
    }
}
