use crate::data::PickerConfig;
use crate::picker::Picker;
use crate::picker::date::CalendarDate;
use crate::ui::calendar_view::{App, run_app};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::{Context, Result};

pub fn run(config: &PickerConfig) -> Result<()> {
    let today = CalendarDate::today();
    let picker = Picker::new(config, today).context("invalid picker configuration")?;
    let mut app = App::new(picker, today);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result?;

    write_outcome(&app, &mut std::io::stdout())
}

/// Prints the final value so the picker can be used from shell scripts.
pub(crate) fn write_outcome<W: std::io::Write>(app: &App, out: &mut W) -> Result<()> {
    log::info!("{} selection(s) committed", app.commits().len());
    match app.selection() {
        Some(selection) => writeln!(out, "{}", selection)?,
        None => writeln!(out, "no selection")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::date::d;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn output(app: &App) -> String {
        let mut buf = Vec::new();
        write_outcome(app, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_outcome_without_selection() {
        let picker = Picker::new(&PickerConfig::default(), d(2024, 3, 12)).unwrap();
        let app = App::new(picker, d(2024, 3, 12));
        assert_eq!(output(&app), "no selection\n");
    }

    #[test]
    fn test_write_outcome_after_range() {
        let picker = Picker::new(&PickerConfig::default(), d(2024, 3, 12)).unwrap();
        let mut app = App::new(picker, d(2024, 3, 12));
        for code in [KeyCode::Char('o'), KeyCode::Enter, KeyCode::Right, KeyCode::Enter] {
            app.handle_key(code, KeyModifiers::empty());
        }
        assert_eq!(output(&app), "2024-03-12 2024-03-13\n");
    }

    #[test]
    fn test_write_outcome_initial_single_value() {
        let config = PickerConfig {
            range: false,
            value: Some(d(2023, 5, 1)),
            ..Default::default()
        };
        let picker = Picker::new(&config, d(2024, 3, 12)).unwrap();
        let app = App::new(picker, d(2024, 3, 12));
        assert_eq!(output(&app), "2023-05-01\n");
    }
}
