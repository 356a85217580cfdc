use crate::picker::classify::Highlight;
use crate::picker::date::{CalendarDate, MonthKey};
use crate::picker::format::DateFormatter;
use crate::picker::render::{CalendarView, Grid, TextSurface, render_calendar};
use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, Default)]
pub struct ShowArgs {
    pub month: Option<MonthKey>,
    pub start: Option<CalendarDate>,
    pub end: Option<CalendarDate>,
    pub selected: Option<CalendarDate>,
    pub months: bool,
    pub today: Option<CalendarDate>,
}

pub fn run(args: &ShowArgs) -> Result<()> {
    write_calendar(args, &mut std::io::stdout())
}

pub(crate) fn write_calendar<W: std::io::Write>(args: &ShowArgs, out: &mut W) -> Result<()> {
    if let (Some(start), Some(end)) = (args.start, args.end) {
        if start > end {
            bail!("--start {} is after --end {}", start, end);
        }
    }
    let today = args.today.unwrap_or_else(CalendarDate::today);
    let visible = match args.month {
        Some(key) => key
            .first_day()
            .with_context(|| format!("month {} is out of range", key))?,
        None => args.selected.or(args.start).unwrap_or(today),
    };
    let (grid, pattern) = if args.months {
        (Grid::Months, "YYYY")
    } else {
        (Grid::Days, "MMMM YYYY")
    };
    let view = CalendarView {
        grid,
        visible,
        header_label: DateFormatter::new(pattern)?.format(visible),
        highlight: Highlight {
            selected: args.selected,
            start: args.start,
            end: args.end,
        },
        today,
        cursor: None,
    };

    let mut surface = TextSurface::new();
    render_calendar(&view, &mut surface);
    write!(out, "{}", surface.finish())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::date::d;

    fn render(args: ShowArgs) -> String {
        let mut buf = Vec::new();
        write_calendar(&args, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_show_range_month() {
        let out = render(ShowArgs {
            start: Some(d(2024, 3, 5)),
            end: Some(d(2024, 3, 20)),
            today: Some(d(2024, 1, 1)),
            ..Default::default()
        });
        assert!(out.contains("March 2024"));
        assert!(out.contains("[ 5]"));
        assert!(out.contains("·10·"));
        assert!(out.contains("[20]"));
    }

    #[test]
    fn test_show_defaults_to_today_with_marker() {
        let out = render(ShowArgs {
            today: Some(d(2024, 2, 29)),
            ..Default::default()
        });
        assert!(out.contains("February 2024"));
        assert!(out.contains(" 29*"));
    }

    #[test]
    fn test_show_month_grid() {
        let out = render(ShowArgs {
            month: Some(MonthKey { year: 2025, month: 1 }),
            selected: Some(d(2025, 4, 9)),
            months: true,
            today: Some(d(2024, 1, 1)),
            ..Default::default()
        });
        assert!(out.contains("2025"));
        assert!(out.contains("[ Apr ]"));
    }

    #[test]
    fn test_show_rejects_inverted_range() {
        let args = ShowArgs {
            start: Some(d(2024, 3, 20)),
            end: Some(d(2024, 3, 5)),
            ..Default::default()
        };
        let mut buf = Vec::new();
        assert!(write_calendar(&args, &mut buf).is_err());
    }
}
