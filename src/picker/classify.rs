use super::date::{CalendarDate, MonthKey};
use super::range::{Endpoint, RangeSelectionState};

/// What a calendar needs to know about the current selection to paint a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlight {
    pub selected: Option<CalendarDate>,
    pub start: Option<CalendarDate>,
    pub end: Option<CalendarDate>,
}

impl Highlight {
    pub fn single(selected: Option<CalendarDate>) -> Self {
        Highlight {
            selected,
            ..Default::default()
        }
    }

    pub fn range(state: &RangeSelectionState) -> Self {
        Highlight {
            selected: None,
            start: state.start,
            end: state.end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none() && self.start.is_none() && self.end.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    /// Start, end, or the single selected value. `Some` names the range edge.
    Endpoint(Option<Endpoint>),
    InRange,
    Today,
    Outside,
}

impl CellClass {
    pub fn is_endpoint(&self) -> bool {
        matches!(self, CellClass::Endpoint(_))
    }
}

/// Classifies a day cell. Priority: endpoint, strictly inside the range,
/// today (only with nothing selected), then unstyled.
pub fn classify_day(h: &Highlight, cell: CalendarDate, today: CalendarDate) -> CellClass {
    classify_by(h, cell, today, |date| date)
}

/// Same rules as `classify_day` at month granularity.
pub fn classify_month(h: &Highlight, cell: MonthKey, today: CalendarDate) -> CellClass {
    classify_by(h, cell, today, |date| date.month_key())
}

fn classify_by<K: Ord + Copy>(
    h: &Highlight,
    cell: K,
    today: CalendarDate,
    key: impl Fn(CalendarDate) -> K,
) -> CellClass {
    let start = h.start.map(&key);
    let end = h.end.map(&key);

    if start == Some(cell) {
        return CellClass::Endpoint(Some(Endpoint::Start));
    }
    if end == Some(cell) {
        return CellClass::Endpoint(Some(Endpoint::End));
    }
    if h.selected.map(&key) == Some(cell) {
        return CellClass::Endpoint(None);
    }
    if let (Some(start), Some(end)) = (start, end) {
        if start < cell && cell < end {
            return CellClass::InRange;
        }
    }
    if h.is_empty() && key(today) == cell {
        return CellClass::Today;
    }
    CellClass::Outside
}
