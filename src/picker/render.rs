use super::classify::{CellClass, Highlight, classify_day, classify_month};
use super::date::{CalendarDate, MonthKey, days_in_month, short_month_name};
use std::fmt::Write;

pub const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
pub const MONTH_COLUMNS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grid {
    Days,
    Months,
}

/// Everything a surface needs to draw one calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub grid: Grid,
    /// Any day inside the month (or year, for the month grid) on display.
    pub visible: CalendarDate,
    pub header_label: String,
    pub highlight: Highlight,
    pub today: CalendarDate,
    pub cursor: Option<CalendarDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    pub class: CellClass,
    pub is_today: bool,
    pub is_cursor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    pub key: MonthKey,
    pub class: CellClass,
    pub is_current: bool,
    pub is_cursor: bool,
}

/// Receives calendar cells in reading order. Layout lives entirely in the
/// implementor.
pub trait CalendarSurface {
    fn header(&mut self, label: &str);
    fn weekdays(&mut self, labels: &[&str]);
    fn day(&mut self, cell: DayCell);
    fn month(&mut self, cell: MonthCell);
    /// An empty slot before the first day of the month.
    fn blank(&mut self);
    fn end_row(&mut self);
}

pub fn render_calendar<S: CalendarSurface + ?Sized>(view: &CalendarView, surface: &mut S) {
    surface.header(&view.header_label);
    match view.grid {
        Grid::Days => render_days(view, surface),
        Grid::Months => render_months(view, surface),
    }
}

fn render_days<S: CalendarSurface + ?Sized>(view: &CalendarView, surface: &mut S) {
    surface.weekdays(&WEEKDAYS);
    let first = view.visible.first_of_month();
    let total = days_in_month(first.year(), first.month());
    let lead = first.weekday_from_sunday();

    for _ in 0..lead {
        surface.blank();
    }
    let mut col = lead;
    for day in 1..=total {
        let Some(date) = first.with_day(day) else {
            break;
        };
        surface.day(DayCell {
            date,
            class: classify_day(&view.highlight, date, view.today),
            is_today: date == view.today,
            is_cursor: view.cursor == Some(date),
        });
        col += 1;
        if col == 7 {
            surface.end_row();
            col = 0;
        }
    }
    if col != 0 {
        surface.end_row();
    }
}

fn render_months<S: CalendarSurface + ?Sized>(view: &CalendarView, surface: &mut S) {
    let year = view.visible.year();
    let cursor = view.cursor.map(|c| c.month_key());
    for month in 1..=12 {
        let key = MonthKey { year, month };
        surface.month(MonthCell {
            key,
            class: classify_month(&view.highlight, key, view.today),
            is_current: key == view.today.month_key(),
            is_cursor: cursor == Some(key),
        });
        if month % MONTH_COLUMNS == 0 {
            surface.end_row();
        }
    }
}

/// Plain-text calendar: `[` `]` around endpoints, `·` inside a range,
/// `*` after today and `>` before the cursor.
#[derive(Debug, Default)]
pub struct TextSurface {
    out: String,
    row: String,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(mut self) -> String {
        if !self.row.is_empty() {
            self.end_row();
        }
        self.out
    }

    fn cell(&mut self, text: &str, class: CellClass, marked: bool, cursor: bool) {
        let (open, close) = if class.is_endpoint() {
            ('[', ']')
        } else if class == CellClass::InRange {
            ('·', '·')
        } else {
            (' ', ' ')
        };
        let lead = if cursor { '>' } else { open };
        let mark = if marked { '*' } else { close };
        let _ = write!(self.row, "{lead}{text}{mark}");
    }
}

impl CalendarSurface for TextSurface {
    fn header(&mut self, label: &str) {
        let _ = writeln!(self.out, "{:^28}", label);
    }

    fn weekdays(&mut self, labels: &[&str]) {
        for label in labels {
            let _ = write!(self.row, " {label} ");
        }
        self.end_row();
    }

    fn day(&mut self, cell: DayCell) {
        let text = format!("{:2}", cell.date.day());
        self.cell(&text, cell.class, cell.is_today, cell.is_cursor);
    }

    fn month(&mut self, cell: MonthCell) {
        let text = format!(" {} ", short_month_name(cell.key.month));
        self.cell(&text, cell.class, cell.is_current, cell.is_cursor);
    }

    fn blank(&mut self) {
        self.row.push_str("    ");
    }

    fn end_row(&mut self) {
        let _ = writeln!(self.out, "{}", self.row.trim_end());
        self.row.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::date::d;
    use crate::picker::range::Endpoint;

    #[derive(Default)]
    struct Recorder {
        days: Vec<DayCell>,
        months: Vec<MonthCell>,
        blanks: usize,
        rows: usize,
        header: String,
    }

    impl CalendarSurface for Recorder {
        fn header(&mut self, label: &str) {
            self.header = label.to_string();
        }
        fn weekdays(&mut self, _labels: &[&str]) {}
        fn day(&mut self, cell: DayCell) {
            self.days.push(cell);
        }
        fn month(&mut self, cell: MonthCell) {
            self.months.push(cell);
        }
        fn blank(&mut self) {
            self.blanks += 1;
        }
        fn end_row(&mut self) {
            self.rows += 1;
        }
    }

    fn view(grid: Grid, highlight: Highlight) -> CalendarView {
        CalendarView {
            grid,
            visible: d(2024, 3, 1),
            header_label: "March 2024".to_string(),
            highlight,
            today: d(2024, 3, 12),
            cursor: Some(d(2024, 3, 7)),
        }
    }

    #[test]
    fn test_day_grid_walks_whole_month() {
        let mut rec = Recorder::default();
        render_calendar(&view(Grid::Days, Highlight::default()), &mut rec);
        assert_eq!(rec.header, "March 2024");
        assert_eq!(rec.days.len(), 31);
        // 2024-03-01 was a Friday
        assert_eq!(rec.blanks, 5);
        assert_eq!(rec.rows, 6);
        assert!(rec.days[11].is_today);
        assert_eq!(rec.days[11].class, CellClass::Today);
        assert!(rec.days[6].is_cursor);
    }

    #[test]
    fn test_day_grid_classifies_range() {
        let h = Highlight {
            selected: None,
            start: Some(d(2024, 3, 5)),
            end: Some(d(2024, 3, 8)),
        };
        let mut rec = Recorder::default();
        render_calendar(&view(Grid::Days, h), &mut rec);
        let classes: Vec<_> = rec.days[3..9].iter().map(|c| c.class).collect();
        assert_eq!(
            classes,
            vec![
                CellClass::Outside,
                CellClass::Endpoint(Some(Endpoint::Start)),
                CellClass::InRange,
                CellClass::InRange,
                CellClass::Endpoint(Some(Endpoint::End)),
                CellClass::Outside,
            ]
        );
    }

    #[test]
    fn test_month_grid_is_three_rows_of_four() {
        let mut rec = Recorder::default();
        render_calendar(&view(Grid::Months, Highlight::default()), &mut rec);
        assert_eq!(rec.months.len(), 12);
        assert_eq!(rec.rows, 3);
        assert!(rec.months[2].is_current);
        assert!(rec.months[2].is_cursor);
        assert_eq!(rec.months[2].class, CellClass::Today);
    }

    #[test]
    fn test_text_surface_marks_cells() {
        let h = Highlight {
            selected: None,
            start: Some(d(2024, 3, 5)),
            end: Some(d(2024, 3, 8)),
        };
        let mut v = view(Grid::Days, h);
        v.cursor = None;
        let mut surface = TextSurface::new();
        render_calendar(&v, &mut surface);
        let text = surface.finish();
        assert!(text.contains("March 2024"));
        assert!(text.contains("[ 5]"));
        assert!(text.contains("· 6·"));
        assert!(text.contains("[ 8]"));
        assert!(text.contains(" 12*"));
    }

    #[test]
    fn test_text_surface_month_grid() {
        let mut v = view(Grid::Months, Highlight::single(Some(d(2024, 7, 4))));
        v.cursor = None;
        v.header_label = "2024".to_string();
        let mut surface = TextSurface::new();
        render_calendar(&v, &mut surface);
        let text = surface.finish();
        assert!(text.contains("[ Jul ]"));
        assert!(text.contains(" Mar *"));
        assert_eq!(text.lines().count(), 4);
    }
}
