use crate::data::persistence::Persistable;
use crate::picker::date::CalendarDate;
use crate::picker::format::{DateFormatter, FormatError};
use crate::picker::range::DateRange;
use serde::{Deserialize, Serialize};

/// Every option the picker recognises. Missing keys in a config file fall
/// back to these defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PickerConfig {
    pub label: String,
    pub placeholder: String,
    pub range_placeholder: [String; 2],
    /// Display pattern, e.g. `DD/MM/YYYY`.
    pub format: String,
    /// Initial value in single mode.
    pub value: Option<CalendarDate>,
    /// Initial value in range mode.
    pub range_value: Option<DateRange>,
    pub disabled: bool,
    pub month_only: bool,
    pub range: bool,
    /// Month must be chosen before a day is offered.
    pub two_phase: bool,
    /// Return to the start endpoint after a commit instead of closing.
    pub stay_open: bool,
    /// Start with the picker open.
    pub open: bool,
    /// Validation message from the caller; puts the field in its error state.
    pub error: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            label: "Label".to_string(),
            placeholder: "Select date".to_string(),
            range_placeholder: ["From".to_string(), "To".to_string()],
            format: "DD/MM/YYYY".to_string(),
            value: None,
            range_value: None,
            disabled: false,
            month_only: false,
            range: true,
            two_phase: false,
            stay_open: false,
            open: false,
            error: None,
        }
    }
}

impl Persistable for PickerConfig {}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid format: {0}")]
    Format(#[from] FormatError),
    #[error("two_phase and month_only cannot both be set")]
    TwoPhaseMonthOnly,
    #[error("two_phase requires range mode")]
    TwoPhaseSingle,
    #[error("range_value is set but range mode is off")]
    RangeValueInSingleMode,
    #[error("value is set but range mode is on, use range_value")]
    ValueInRangeMode,
    #[error("initial range starts at {start} after it ends at {end}")]
    InvertedRange {
        start: CalendarDate,
        end: CalendarDate,
    },
    #[error("placeholder text is empty")]
    EmptyPlaceholder,
}

impl PickerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        DateFormatter::new(&self.format)?;
        if self.two_phase && self.month_only {
            return Err(ConfigError::TwoPhaseMonthOnly);
        }
        if self.two_phase && !self.range {
            return Err(ConfigError::TwoPhaseSingle);
        }
        if self.range && self.value.is_some() {
            return Err(ConfigError::ValueInRangeMode);
        }
        if !self.range && self.range_value.is_some() {
            return Err(ConfigError::RangeValueInSingleMode);
        }
        if let Some(r) = self.range_value {
            if r.start > r.end {
                return Err(ConfigError::InvertedRange {
                    start: r.start,
                    end: r.end,
                });
            }
        }
        let placeholders: Vec<&String> = if self.range {
            self.range_placeholder.iter().collect()
        } else {
            vec![&self.placeholder]
        };
        if placeholders.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyPlaceholder);
        }
        Ok(())
    }
}
