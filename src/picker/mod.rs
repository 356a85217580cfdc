pub mod classify;
pub mod date;
pub mod field;
pub mod format;
pub mod range;
pub mod render;
pub mod single;

use crate::data::config::{ConfigError, PickerConfig};
use classify::Highlight;
use date::{CalendarDate, MonthKey};
use field::RangeField;
use format::DateFormatter;
use range::{ControllerOptions, DateRange, Endpoint, RangeSelectionState};
use render::{CalendarView, Grid};
use serde::{Deserialize, Serialize};
use single::{NavDirection, NavUnit, SingleDateField};
use std::fmt;

/// The value reported to the caller once per committed pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Date(CalendarDate),
    Range(DateRange),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Date(date) => write!(f, "{}", date),
            Selection::Range(r) => write!(f, "{} {}", r.start, r.end),
        }
    }
}

/// One field of the input line: the formatted value, or the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabel {
    pub text: String,
    pub filled: bool,
    pub active: bool,
}

#[derive(Debug, Clone)]
enum Field {
    Single { cal: SingleDateField, open: bool },
    Range(RangeField),
}

/// A configured date, month or range picker.
#[derive(Debug, Clone)]
pub struct Picker {
    label: String,
    placeholders: Vec<String>,
    formatter: DateFormatter,
    day_header: DateFormatter,
    month_header: DateFormatter,
    disabled: bool,
    stay_open: bool,
    month_only: bool,
    error: Option<String>,
    field: Field,
}

impl Picker {
    pub fn new(config: &PickerConfig, today: CalendarDate) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = if config.range {
            let options = ControllerOptions {
                two_phase: config.two_phase,
                month_only: config.month_only,
                stay_open: config.stay_open,
            };
            Field::Range(RangeField::new(options, config.range_value, today))
        } else {
            Field::Single {
                cal: SingleDateField::new(config.value, config.month_only, today),
                open: false,
            }
        };
        let placeholders = if config.range {
            config.range_placeholder.to_vec()
        } else {
            vec![config.placeholder.clone()]
        };
        let mut picker = Picker {
            label: config.label.clone(),
            placeholders,
            formatter: DateFormatter::new(&config.format)?,
            day_header: DateFormatter::new("MMMM YYYY")?,
            month_header: DateFormatter::new("YYYY")?,
            disabled: config.disabled,
            stay_open: config.stay_open,
            month_only: config.month_only,
            error: config.error.clone().filter(|msg| !msg.trim().is_empty()),
            field,
        };
        if config.open {
            picker.click_field();
        }
        Ok(picker)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The caller's error message, if the field is in its error state.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        match &self.field {
            Field::Single { open, .. } => *open,
            Field::Range(range) => range.is_open(),
        }
    }

    pub fn range_state(&self) -> Option<&RangeSelectionState> {
        match &self.field {
            Field::Range(range) => Some(range.state()),
            Field::Single { .. } => None,
        }
    }

    pub fn active_endpoint(&self) -> Option<Endpoint> {
        self.range_state().and_then(|s| s.active)
    }

    fn calendar(&self) -> &SingleDateField {
        match &self.field {
            Field::Single { cal, .. } => cal,
            Field::Range(range) => range.calendar(),
        }
    }

    pub fn grid(&self) -> Grid {
        let months = match &self.field {
            Field::Single { cal, .. } => cal.shows_months(),
            Field::Range(range) => range.shows_months(),
        };
        if months { Grid::Months } else { Grid::Days }
    }

    pub fn visible_month(&self) -> CalendarDate {
        self.calendar().visible_month()
    }

    pub fn highlight(&self) -> Highlight {
        match &self.field {
            Field::Single { cal, .. } => Highlight::single(cal.selected()),
            Field::Range(range) => Highlight::range(range.state()),
        }
    }

    /// `YYYY` over a month grid, `MMMM YYYY` over a day grid.
    pub fn header_label(&self) -> String {
        match self.grid() {
            Grid::Months => self.month_header.format(self.visible_month()),
            Grid::Days => self.day_header.format(self.visible_month()),
        }
    }

    pub fn view(&self, today: CalendarDate, cursor: Option<CalendarDate>) -> CalendarView {
        CalendarView {
            grid: self.grid(),
            visible: self.visible_month(),
            header_label: self.header_label(),
            highlight: self.highlight(),
            today,
            cursor,
        }
    }

    pub fn field_labels(&self) -> Vec<FieldLabel> {
        let values: Vec<(Option<CalendarDate>, bool)> = match &self.field {
            Field::Single { cal, open } => vec![(cal.selected(), *open)],
            Field::Range(range) => {
                let s = range.state();
                vec![
                    (s.start, s.active == Some(Endpoint::Start)),
                    (s.end, s.active == Some(Endpoint::End)),
                ]
            }
        };
        values
            .into_iter()
            .zip(&self.placeholders)
            .map(|((value, active), placeholder)| match value {
                Some(date) => FieldLabel {
                    text: self.formatter.format(date),
                    filled: true,
                    active,
                },
                None => FieldLabel {
                    text: placeholder.clone(),
                    filled: false,
                    active,
                },
            })
            .collect()
    }

    pub fn selection(&self) -> Option<Selection> {
        match &self.field {
            Field::Single { cal, .. } => cal.selected().map(Selection::Date),
            Field::Range(range) => range.state().range().map(Selection::Range),
        }
    }

    /// Opens the picker, as a click on the input would.
    pub fn click_field(&mut self) {
        if self.disabled {
            log::trace!("picker disabled, ignoring open");
            return;
        }
        match &mut self.field {
            Field::Single { open, .. } => *open = true,
            Field::Range(range) => range.open(),
        }
    }

    pub fn pick_day(&mut self, date: CalendarDate) -> Option<Selection> {
        let stay_open = self.stay_open;
        match &mut self.field {
            Field::Single { cal, open } => {
                if !*open || cal.shows_months() {
                    return None;
                }
                let picked = cal.select(date)?;
                *open = stay_open;
                log::info!("date committed {}", picked);
                Some(Selection::Date(picked))
            }
            Field::Range(range) => range.pick_day(date).map(Selection::Range),
        }
    }

    pub fn pick_month(&mut self, key: MonthKey) -> Option<Selection> {
        let stay_open = self.stay_open;
        match &mut self.field {
            Field::Single { cal, open } => {
                if !*open || !cal.shows_months() {
                    return None;
                }
                let picked = cal.select_month(key)?;
                *open = stay_open;
                log::info!("month committed {}", key);
                Some(Selection::Date(picked))
            }
            Field::Range(range) => range.pick_month(key).map(Selection::Range),
        }
    }

    pub fn header_click(&mut self) {
        let month_only = self.month_only;
        match &mut self.field {
            Field::Single { cal, open } => {
                if *open && !month_only {
                    cal.open_coarse_picker();
                }
            }
            Field::Range(range) => range.header_click(),
        }
    }

    pub fn click_outside(&mut self) {
        match &mut self.field {
            Field::Single { cal, open } => {
                cal.close_coarse_picker();
                *open = false;
            }
            Field::Range(range) => range.click_outside(),
        }
    }

    pub fn navigate(&mut self, direction: NavDirection, unit: NavUnit) {
        match &mut self.field {
            Field::Single { cal, .. } => cal.navigate(direction, unit),
            Field::Range(range) => range.navigate(direction, unit),
        }
    }

    /// External value sync. The external value always wins; a value of the
    /// wrong kind for this picker is ignored.
    pub fn set_value(&mut self, value: Option<Selection>) {
        match (&mut self.field, value) {
            (Field::Single { cal, .. }, None) => cal.sync(None),
            (Field::Single { cal, .. }, Some(Selection::Date(date))) => cal.sync(Some(date)),
            (Field::Range(range), None) => range.sync(None),
            (Field::Range(range), Some(Selection::Range(r))) => range.sync(Some(r)),
            (_, Some(other)) => log::warn!("value {} does not fit this picker", other),
        }
    }
}
