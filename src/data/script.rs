use crate::data::config::PickerConfig;
use crate::picker::Selection;
use crate::picker::date::CalendarDate;
use crate::picker::range::DateRange;
use serde::{Deserialize, Serialize};

/// One host event fed to a picker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Click on the input field.
    Open,
    Pick { date: CalendarDate },
    Month { year: i32, month: u32 },
    /// A day-of-month cell; resolved against the month on display.
    Day { day: u32 },
    Header,
    Outside,
    Prev,
    Next,
    Sync {
        #[serde(default)]
        start: Option<CalendarDate>,
        #[serde(default)]
        end: Option<CalendarDate>,
    },
}

/// A replayable session: optional picker configuration plus the events.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Script {
    #[serde(default)]
    pub config: Option<PickerConfig>,
    /// Fixed "today" so replays are reproducible.
    #[serde(default)]
    pub today: Option<CalendarDate>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Turns the two optional dates of a `sync` step into a picker value.
pub fn sync_value(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Option<Selection> {
    match (start, end) {
        (Some(start), Some(end)) => Some(Selection::Range(DateRange::ordered(start, end))),
        (Some(date), None) | (None, Some(date)) => Some(Selection::Date(date)),
        (None, None) => None,
    }
}
