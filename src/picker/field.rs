use super::date::{CalendarDate, MonthKey};
use super::range::{
    ControllerOptions, DateRange, Endpoint, Phase, PickEvent, RangeEvent,
    RangeSelectionController, RangeSelectionState,
};
use super::single::{NavDirection, NavUnit, SingleDateField};

/// Two calendars, one per endpoint, driven by the range controller.
#[derive(Debug, Clone)]
pub struct RangeField {
    controller: RangeSelectionController,
    state: RangeSelectionState,
    start_cal: SingleDateField,
    end_cal: SingleDateField,
}

impl RangeField {
    pub fn new(options: ControllerOptions, value: Option<DateRange>, today: CalendarDate) -> Self {
        let state = RangeSelectionState::from_range(value);
        RangeField {
            controller: RangeSelectionController::new(options),
            state,
            start_cal: SingleDateField::new(state.start, options.month_only, today),
            end_cal: SingleDateField::new(state.end.or(state.start), options.month_only, today),
        }
    }

    pub fn state(&self) -> &RangeSelectionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The calendar for the endpoint being edited, or the start calendar when closed.
    pub fn calendar(&self) -> &SingleDateField {
        match self.state.active {
            Some(Endpoint::End) => &self.end_cal,
            _ => &self.start_cal,
        }
    }

    fn calendar_mut(&mut self) -> &mut SingleDateField {
        match self.state.active {
            Some(Endpoint::End) => &mut self.end_cal,
            _ => &mut self.start_cal,
        }
    }

    pub fn shows_months(&self) -> bool {
        let options = self.controller.options();
        if options.two_phase {
            self.state.phase == Phase::PickingMonth
        } else {
            self.calendar().shows_months()
        }
    }

    fn dispatch(&mut self, event: RangeEvent) -> Option<DateRange> {
        let before = self.state.active;
        let transition = self.controller.apply(self.state, event);
        self.state = transition.state;
        if self.state.active != before && self.state.active == Some(Endpoint::End) {
            if let Some(start) = self.state.start {
                self.end_cal.show_month_of(start);
            }
            self.end_cal.close_coarse_picker();
        }
        transition.committed
    }

    pub fn open(&mut self) {
        self.dispatch(RangeEvent::Open);
    }

    pub fn pick_day(&mut self, date: CalendarDate) -> Option<DateRange> {
        if !self.is_open() {
            return None;
        }
        let options = self.controller.options();
        if options.month_only {
            log::trace!("day {} clicked on a month-only range", date);
            return None;
        }
        if options.two_phase {
            let anchored = self.state.month_anchor.map(|a| a.month_key());
            if self.state.phase == Phase::PickingDay && anchored != Some(date.month_key()) {
                log::trace!("day {} is outside the anchored month", date);
                return None;
            }
            return self.dispatch(RangeEvent::Pick(PickEvent::Day(date.day())));
        }
        let picked = self.calendar_mut().select(date)?;
        self.dispatch(RangeEvent::Pick(PickEvent::Date(picked)))
    }

    pub fn pick_month(&mut self, key: MonthKey) -> Option<DateRange> {
        if !self.is_open() {
            return None;
        }
        let options = self.controller.options();
        if options.two_phase {
            let committed = self.dispatch(RangeEvent::Pick(PickEvent::Month(key)));
            if let Some(anchor) = self.state.month_anchor {
                self.calendar_mut().show_month_of(anchor);
            }
            return committed;
        }
        if !self.calendar().shows_months() {
            log::trace!("month {} clicked on a day grid", key);
            return None;
        }
        self.calendar_mut().select_month(key)?;
        self.dispatch(RangeEvent::Pick(PickEvent::Month(key)))
    }

    /// Clears the endpoint being edited and, on a day grid, opens the coarse overlay.
    pub fn header_click(&mut self) {
        if !self.is_open() {
            return;
        }
        let options = self.controller.options();
        if !options.two_phase && !options.month_only {
            self.calendar_mut().open_coarse_picker();
        }
        self.dispatch(RangeEvent::HeaderLabelClick);
    }

    pub fn click_outside(&mut self) {
        self.start_cal.close_coarse_picker();
        self.end_cal.close_coarse_picker();
        self.dispatch(RangeEvent::ClickOutside);
    }

    pub fn navigate(&mut self, direction: NavDirection, unit: NavUnit) {
        let unit = match unit {
            NavUnit::Auto if self.shows_months() => NavUnit::Year,
            other => other,
        };
        self.calendar_mut().navigate(direction, unit);
        // the anchor follows the day grid on display
        if self.state.phase == Phase::PickingDay {
            let key = self.calendar().visible_month().month_key();
            self.dispatch(RangeEvent::Pick(PickEvent::Month(key)));
        }
    }

    pub fn sync(&mut self, value: Option<DateRange>) {
        self.dispatch(RangeEvent::Sync(value));
        self.start_cal.sync(self.state.start);
        self.end_cal.sync(self.state.end);
    }
}
