use crate::picker::Picker;
use crate::picker::Selection;
use crate::picker::classify::CellClass;
use crate::picker::date::{CalendarDate, days_in_month, short_month_name};
use crate::picker::range::Endpoint;
use crate::picker::render::{CalendarSurface, DayCell, Grid, MonthCell, render_calendar};
use crate::picker::single::{NavDirection, NavUnit};
use crate::ui::Tui;
use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::time::Duration as StdDuration;

// Calendar cell colors
const ACCENT: Color = Color::Rgb(247, 39, 23);
const RANGE_TINT: Color = Color::Rgb(255, 246, 245);
const INK: Color = Color::Rgb(24, 25, 25);
const MUTED: Color = Color::Rgb(154, 158, 166);
const ERROR_BORDER: Color = Color::Rgb(255, 150, 145);

pub struct App {
    picker: Picker,
    today: CalendarDate,
    /// Keyboard focus inside the grid. On the month grid only year and month matter.
    cursor: CalendarDate,
    commits: Vec<Selection>,
}

impl App {
    pub fn new(picker: Picker, today: CalendarDate) -> Self {
        let mut app = App {
            picker,
            today,
            cursor: today,
            commits: Vec::new(),
        };
        app.sync_cursor();
        app
    }

    pub fn commits(&self) -> &[Selection] {
        &self.commits
    }

    /// The picker's value when the app exits.
    pub fn selection(&self) -> Option<Selection> {
        self.picker.selection()
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('o') | KeyCode::Tab => self.picker.click_field(),
            _ if !self.picker.is_open() => {}
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-self.row_step()),
            KeyCode::Down => self.move_cursor(self.row_step()),
            KeyCode::Enter | KeyCode::Char(' ') => self.pick_at_cursor(),
            KeyCode::Char('h') => self.picker.header_click(),
            KeyCode::Esc => self.picker.click_outside(),
            KeyCode::Char('n') => self.picker.navigate(NavDirection::Next, NavUnit::Auto),
            KeyCode::Char('p') => self.picker.navigate(NavDirection::Prev, NavUnit::Auto),
            KeyCode::Char('N') => self.picker.navigate(NavDirection::Next, NavUnit::Year),
            KeyCode::Char('P') => self.picker.navigate(NavDirection::Prev, NavUnit::Year),
            _ => {}
        }
        self.sync_cursor();
        false
    }

    fn row_step(&self) -> i64 {
        match self.picker.grid() {
            Grid::Days => 7,
            Grid::Months => 4,
        }
    }

    fn move_cursor(&mut self, step: i64) {
        let visible = self.picker.visible_month();
        match self.picker.grid() {
            Grid::Days => {
                self.cursor = self.cursor.add_days(step);
                let (c, v) = (self.cursor.month_key(), visible.month_key());
                if c > v {
                    self.picker.navigate(NavDirection::Next, NavUnit::Month);
                } else if c < v {
                    self.picker.navigate(NavDirection::Prev, NavUnit::Month);
                }
            }
            Grid::Months => {
                self.cursor = self.cursor.first_of_month().add_months(step as i32);
                if self.cursor.year() > visible.year() {
                    self.picker.navigate(NavDirection::Next, NavUnit::Year);
                } else if self.cursor.year() < visible.year() {
                    self.picker.navigate(NavDirection::Prev, NavUnit::Year);
                }
            }
        }
    }

    /// Pulls the cursor back onto the grid after the picker changed what it shows.
    fn sync_cursor(&mut self) {
        let visible = self.picker.visible_month();
        self.cursor = match self.picker.grid() {
            Grid::Days if self.cursor.month_key() != visible.month_key() => {
                let day = self
                    .cursor
                    .day()
                    .min(days_in_month(visible.year(), visible.month()));
                visible.with_day(day).unwrap_or(visible)
            }
            Grid::Months if self.cursor.year() != visible.year() => {
                CalendarDate::from_ymd(visible.year(), self.cursor.month(), 1).unwrap_or(visible)
            }
            _ => self.cursor,
        };
    }

    fn pick_at_cursor(&mut self) {
        let committed = match self.picker.grid() {
            Grid::Days => self.picker.pick_day(self.cursor),
            Grid::Months => self.picker.pick_month(self.cursor.month_key()),
        };
        if let Some(selection) = committed {
            self.commits.push(selection);
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // input field
                Constraint::Length(11), // header + weekdays + 6 weeks + borders
                Constraint::Min(8),     // status + help
            ])
            .split(f.area());

        self.render_field(f, chunks[0]);
        self.render_calendar(f, chunks[1]);
        self.render_help(f, chunks[2]);
    }

    fn render_field(&self, f: &mut Frame, area: Rect) {
        let labels = self.picker.field_labels();
        let mut spans = vec![Span::raw(" ")];
        for (i, label) in labels.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  │  ", Style::default().fg(MUTED)));
            }
            let mut style = if label.filled {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };
            if label.active {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!("{:<12}", label.text), style));
        }
        let arrow = if self.picker.is_open() { " ▾" } else { " ▸" };
        spans.push(Span::raw(arrow));

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.field_border())
            .title(self.picker.label().to_string());
        if let Some(msg) = self.picker.error().filter(|_| !self.picker.is_disabled()) {
            let msg = Span::styled(msg.to_string(), Style::default().fg(ERROR_BORDER));
            block = block.title_bottom(msg);
        }
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    /// Disabled wins over the error state, which wins over the filled state.
    fn field_border(&self) -> Style {
        if self.picker.is_disabled() {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else if self.picker.error().is_some() {
            Style::default().fg(ERROR_BORDER)
        } else if self.picker.selection().is_some() {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(MUTED)
        }
    }

    fn render_calendar(&self, f: &mut Frame, area: Rect) {
        if !self.picker.is_open() {
            let hint = Paragraph::new(Span::styled(
                "press o to open the picker",
                Style::default().fg(MUTED),
            ));
            f.render_widget(hint, area);
            return;
        }
        let view = self.picker.view(self.today, Some(self.cursor));
        let mut surface = LineSurface::default();
        render_calendar(&view, &mut surface);
        let calendar = Paragraph::new(surface.into_lines())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(calendar, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let picking = match self.picker.active_endpoint() {
            Some(Endpoint::Start) => "Picking start date. ",
            Some(Endpoint::End) => "Picking end date. ",
            None => "",
        };
        let status = match self.commits.last() {
            Some(selection) => format!("{}Last committed: {}", picking, selection),
            None => format!("{}Nothing committed yet", picking),
        };
        f.render_widget(Paragraph::new(status), chunks[0]);

        let help = [
            ("o / Tab", "open picker"),
            ("arrows", "move cursor"),
            ("Enter", "pick"),
            ("h", "header label (year view, clear endpoint)"),
            ("n / p", "next / previous page"),
            ("N / P", "next / previous year"),
            ("Esc", "close"),
            ("q", "quit"),
        ];
        let rows: Vec<Row> = help
            .iter()
            .map(|(key, desc)| {
                Row::new(vec![
                    Cell::from(*key).style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(*desc),
                ])
            })
            .collect();
        let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(0)])
            .block(Block::default().borders(Borders::TOP).title("Keys"));
        f.render_widget(table, chunks[1]);
    }
}

/// Builds ratatui lines from the calendar walk.
#[derive(Default)]
struct LineSurface {
    lines: Vec<Line<'static>>,
    row: Vec<Span<'static>>,
}

impl LineSurface {
    fn into_lines(mut self) -> Vec<Line<'static>> {
        if !self.row.is_empty() {
            self.end_row();
        }
        self.lines
    }
}

impl CalendarSurface for LineSurface {
    fn header(&mut self, label: &str) {
        self.lines.push(Line::from(vec![
            Span::styled(
                format!("{:<22}", label),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
            Span::styled("‹ ›", Style::default().fg(MUTED)),
        ]));
    }

    fn weekdays(&mut self, labels: &[&str]) {
        self.lines.push(Line::from(labels.join(" ")));
    }

    fn day(&mut self, cell: DayCell) {
        let style = cell_style(cell.class, cell.is_today, cell.is_cursor);
        self.row
            .push(Span::styled(format!("{:2}", cell.date.day()), style));
        self.row.push(Span::raw(" "));
    }

    fn month(&mut self, cell: MonthCell) {
        let style = cell_style(cell.class, cell.is_current, cell.is_cursor);
        self.row.push(Span::styled(
            format!(" {} ", short_month_name(cell.key.month)),
            style,
        ));
        self.row.push(Span::raw(" "));
    }

    fn blank(&mut self) {
        self.row.push(Span::raw("   "));
    }

    fn end_row(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.row)));
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Determines the ratatui `Style` for a calendar cell.
pub(crate) fn cell_style(class: CellClass, is_today: bool, is_cursor: bool) -> Style {
    let mut style = match class {
        CellClass::Endpoint(_) => Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
        CellClass::InRange => Style::default().fg(INK).bg(RANGE_TINT),
        CellClass::Today => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        CellClass::Outside => Style::default(),
    };
    if is_today && class != CellClass::Today {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}
