use super::date::{CalendarDate, MonthKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavUnit {
    /// Month on the day grid, year on the month grid.
    #[default]
    Auto,
    Month,
    Year,
}

/// State behind one rendered calendar: the selected day and whether the
/// coarse month/year overlay replaces the day grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleDateField {
    selected: Option<CalendarDate>,
    show_coarse_picker: bool,
    month_only: bool,
    /// First day of the month the grid is showing.
    visible: CalendarDate,
}

impl SingleDateField {
    pub fn new(value: Option<CalendarDate>, month_only: bool, today: CalendarDate) -> Self {
        SingleDateField {
            selected: value,
            show_coarse_picker: false,
            month_only,
            visible: value.unwrap_or(today).first_of_month(),
        }
    }

    pub fn selected(&self) -> Option<CalendarDate> {
        self.selected
    }

    pub fn visible_month(&self) -> CalendarDate {
        self.visible
    }

    pub fn coarse_active(&self) -> bool {
        self.show_coarse_picker
    }

    /// True when the month grid is shown instead of days.
    pub fn shows_months(&self) -> bool {
        self.coarse_active() || self.month_only
    }

    /// Stores `date` and leaves coarse mode. Returns the date to report to the
    /// caller, or `None` when the pick was an intermediate coarse choice.
    pub fn select(&mut self, date: CalendarDate) -> Option<CalendarDate> {
        let was_coarse = self.show_coarse_picker;
        self.selected = Some(date);
        self.visible = date.first_of_month();
        self.show_coarse_picker = false;
        if was_coarse {
            log::trace!("coarse pick {} only moves the view", date.month_key());
            None
        } else {
            Some(date)
        }
    }

    /// A month cell click, as a selection of that month's first day.
    pub fn select_month(&mut self, key: MonthKey) -> Option<CalendarDate> {
        key.first_day().and_then(|date| self.select(date))
    }

    pub fn open_coarse_picker(&mut self) {
        self.show_coarse_picker = true;
    }

    pub fn close_coarse_picker(&mut self) {
        self.show_coarse_picker = false;
    }

    /// External value always wins over in-progress state.
    pub fn sync(&mut self, value: Option<CalendarDate>) {
        self.selected = value;
        if let Some(date) = value {
            self.visible = date.first_of_month();
        }
    }

    pub fn show_month_of(&mut self, date: CalendarDate) {
        self.visible = date.first_of_month();
    }

    pub fn navigate(&mut self, direction: NavDirection, unit: NavUnit) {
        let step = match direction {
            NavDirection::Prev => -1,
            NavDirection::Next => 1,
        };
        let by_year = match unit {
            NavUnit::Auto => self.shows_months(),
            NavUnit::Month => false,
            NavUnit::Year => true,
        };
        self.visible = if by_year {
            self.visible.add_years(step)
        } else {
            self.visible.add_months(step)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::date::d;

    #[test]
    fn test_new_shows_value_month() {
        let f = SingleDateField::new(Some(d(2024, 5, 17)), false, d(2025, 1, 1));
        assert_eq!(f.visible_month(), d(2024, 5, 1));
        assert_eq!(f.selected(), Some(d(2024, 5, 17)));
    }

    #[test]
    fn test_new_without_value_shows_today() {
        let f = SingleDateField::new(None, false, d(2025, 1, 20));
        assert_eq!(f.visible_month(), d(2025, 1, 1));
        assert_eq!(f.selected(), None);
    }

    #[test]
    fn test_select_reports_date() {
        let mut f = SingleDateField::new(None, false, d(2025, 1, 1));
        assert_eq!(f.select(d(2025, 2, 3)), Some(d(2025, 2, 3)));
        assert_eq!(f.selected(), Some(d(2025, 2, 3)));
        assert_eq!(f.visible_month(), d(2025, 2, 1));
    }

    #[test]
    fn test_coarse_select_is_suppressed_and_exits_coarse() {
        let mut f = SingleDateField::new(None, false, d(2025, 1, 1));
        f.open_coarse_picker();
        assert!(f.shows_months());
        assert_eq!(f.select_month(MonthKey { year: 2025, month: 7 }), None);
        assert!(!f.coarse_active());
        assert_eq!(f.visible_month(), d(2025, 7, 1));
        // next day pick goes through
        assert_eq!(f.select(d(2025, 7, 9)), Some(d(2025, 7, 9)));
    }

    #[test]
    fn test_month_only_select_month_reports() {
        let mut f = SingleDateField::new(None, true, d(2025, 1, 1));
        assert!(f.shows_months());
        assert_eq!(
            f.select_month(MonthKey { year: 2025, month: 3 }),
            Some(d(2025, 3, 1))
        );
    }

    #[test]
    fn test_navigate_auto_uses_month_on_day_grid() {
        let mut f = SingleDateField::new(None, false, d(2025, 1, 31));
        f.navigate(NavDirection::Next, NavUnit::Auto);
        assert_eq!(f.visible_month(), d(2025, 2, 1));
        f.navigate(NavDirection::Prev, NavUnit::Auto);
        f.navigate(NavDirection::Prev, NavUnit::Auto);
        assert_eq!(f.visible_month(), d(2024, 12, 1));
    }

    #[test]
    fn test_navigate_auto_uses_year_in_coarse_mode() {
        let mut f = SingleDateField::new(None, false, d(2025, 6, 1));
        f.open_coarse_picker();
        f.navigate(NavDirection::Next, NavUnit::Auto);
        assert_eq!(f.visible_month(), d(2026, 6, 1));
        f.navigate(NavDirection::Prev, NavUnit::Month);
        assert_eq!(f.visible_month(), d(2026, 5, 1));
    }

    #[test]
    fn test_sync_overwrites_selection() {
        let mut f = SingleDateField::new(None, false, d(2025, 1, 1));
        f.select(d(2025, 1, 4));
        f.sync(Some(d(2023, 9, 9)));
        assert_eq!(f.selected(), Some(d(2023, 9, 9)));
        assert_eq!(f.visible_month(), d(2023, 9, 1));
        f.sync(None);
        assert_eq!(f.selected(), None);
    }
}
