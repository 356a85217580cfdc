use super::date::{CalendarDate, MonthKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Start,
    End,
}

/// Only meaningful in two-phase mode: a month must be anchored before a day is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    PickingMonth,
    PickingDay,
}

/// A committed range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateRange {
    /// Builds a range, swapping the endpoints if they arrive inverted.
    pub fn ordered(a: CalendarDate, b: CalendarDate) -> Self {
        if a <= b {
            DateRange { start: a, end: b }
        } else {
            DateRange { start: b, end: a }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeSelectionState {
    pub start: Option<CalendarDate>,
    pub end: Option<CalendarDate>,
    /// `None` means the picker is closed.
    pub active: Option<Endpoint>,
    pub month_anchor: Option<CalendarDate>,
    pub phase: Phase,
}

impl RangeSelectionState {
    pub fn from_range(range: Option<DateRange>) -> Self {
        RangeSelectionState {
            start: range.map(|r| r.start),
            end: range.map(|r| r.end),
            ..Default::default()
        }
    }

    pub fn range(&self) -> Option<DateRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    fn reset_phase(&mut self) {
        self.phase = Phase::PickingMonth;
        self.month_anchor = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickEvent {
    /// A concrete day, single-phase mode.
    Date(CalendarDate),
    /// A month cell click.
    Month(MonthKey),
    /// A day-of-month number, resolved against the anchored month in two-phase mode.
    Day(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEvent {
    Open,
    Pick(PickEvent),
    HeaderLabelClick,
    ClickOutside,
    /// External value; always wins over in-progress state.
    Sync(Option<DateRange>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: RangeSelectionState,
    pub committed: Option<DateRange>,
}

impl Transition {
    fn quiet(state: RangeSelectionState) -> Self {
        Transition {
            state,
            committed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerOptions {
    pub two_phase: bool,
    pub month_only: bool,
    pub stay_open: bool,
}

/// Pure transition function for the two-step range picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeSelectionController {
    options: ControllerOptions,
}

impl RangeSelectionController {
    pub fn new(options: ControllerOptions) -> Self {
        RangeSelectionController { options }
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn apply(&self, state: RangeSelectionState, event: RangeEvent) -> Transition {
        log::debug!("range event {:?} in {:?}", event, state);
        match event {
            RangeEvent::Open => Transition::quiet(self.on_open(state)),
            RangeEvent::Pick(pick) => self.on_pick(state, pick),
            RangeEvent::HeaderLabelClick => Transition::quiet(self.on_header_label_click(state)),
            RangeEvent::ClickOutside => Transition::quiet(self.on_click_outside(state)),
            RangeEvent::Sync(value) => Transition::quiet(self.on_sync(state, value)),
        }
    }

    pub fn on_open(&self, mut state: RangeSelectionState) -> RangeSelectionState {
        state.active = Some(Endpoint::Start);
        state.reset_phase();
        state
    }

    pub fn on_pick(&self, state: RangeSelectionState, pick: PickEvent) -> Transition {
        if state.active.is_none() {
            log::trace!("pick {:?} ignored, picker closed", pick);
            return Transition::quiet(state);
        }
        if self.options.two_phase {
            return self.on_two_phase_pick(state, pick);
        }
        match pick {
            PickEvent::Date(date) => self.assign(state, date),
            PickEvent::Month(key) if self.options.month_only => match key.first_day() {
                Some(date) => self.assign(state, date),
                None => Transition::quiet(state),
            },
            PickEvent::Month(_) | PickEvent::Day(_) => {
                log::trace!("pick {:?} ignored in single-phase mode", pick);
                Transition::quiet(state)
            }
        }
    }

    fn on_two_phase_pick(&self, mut state: RangeSelectionState, pick: PickEvent) -> Transition {
        match (pick, state.phase) {
            (PickEvent::Month(key), _) => {
                if let Some(first) = key.first_day() {
                    state.month_anchor = Some(first);
                    state.phase = Phase::PickingDay;
                }
                Transition::quiet(state)
            }
            (PickEvent::Day(_) | PickEvent::Date(_), Phase::PickingMonth) => {
                log::trace!("day pick ignored until a month is anchored");
                Transition::quiet(state)
            }
            (PickEvent::Day(day), Phase::PickingDay) => self.resolve_day(state, day),
            (PickEvent::Date(date), Phase::PickingDay) => self.resolve_day(state, date.day()),
        }
    }

    fn resolve_day(&self, mut state: RangeSelectionState, day: u32) -> Transition {
        let Some(anchor) = state.month_anchor else {
            panic!("day {day} picked in PickingDay phase with no anchored month");
        };
        let Some(date) = anchor.with_day(day) else {
            log::error!("day {} does not exist in {}", day, anchor.month_key());
            debug_assert!(false, "day {day} out of range for {}", anchor.month_key());
            return Transition::quiet(state);
        };
        state.reset_phase();
        self.assign(state, date)
    }

    /// Writes `date` into the active endpoint.
    fn assign(&self, mut state: RangeSelectionState, date: CalendarDate) -> Transition {
        let endpoint = match (state.active, state.start) {
            (Some(Endpoint::End), Some(start)) if date < start => {
                log::debug!("{} is before start {}, restarting range", date, start);
                Endpoint::Start
            }
            (Some(Endpoint::End), None) => Endpoint::Start,
            (Some(endpoint), _) => endpoint,
            (None, _) => return Transition::quiet(state),
        };

        match (endpoint, state.start) {
            (Endpoint::End, Some(start)) => {
                state.end = Some(date);
                state.active = if self.options.stay_open {
                    Some(Endpoint::Start)
                } else {
                    None
                };
                let range = DateRange { start, end: date };
                log::info!("range committed {} .. {}", range.start, range.end);
                Transition {
                    state,
                    committed: Some(range),
                }
            }
            _ => {
                state.start = Some(date);
                state.end = None;
                state.active = Some(Endpoint::End);
                Transition::quiet(state)
            }
        }
    }

    pub fn on_header_label_click(&self, mut state: RangeSelectionState) -> RangeSelectionState {
        match state.active {
            Some(Endpoint::Start) => state.start = None,
            Some(Endpoint::End) => state.end = None,
            None => return state,
        }
        state.reset_phase();
        state
    }

    pub fn on_click_outside(&self, mut state: RangeSelectionState) -> RangeSelectionState {
        state.active = None;
        state.reset_phase();
        state
    }

    pub fn on_sync(
        &self,
        mut state: RangeSelectionState,
        value: Option<DateRange>,
    ) -> RangeSelectionState {
        let value = value.map(|r| {
            if r.start > r.end {
                log::warn!("external range {} .. {} is inverted, swapping", r.start, r.end);
            }
            DateRange::ordered(r.start, r.end)
        });
        state.start = value.map(|r| r.start);
        state.end = value.map(|r| r.end);
        state.reset_phase();
        state
    }
}
