use crate::data::persistence::read_file;
use crate::data::script::sync_value;
use crate::data::{PickerConfig, Script, Step};
use crate::picker::date::{CalendarDate, MonthKey};
use crate::picker::single::{NavDirection, NavUnit};
use crate::picker::{Picker, Selection};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(script_path: &Path, fallback: &PickerConfig) -> Result<()> {
    let script: Script = read_file(script_path)?;
    replay(&script, fallback, &mut std::io::stdout())
}

/// Runs every step through a fresh picker, printing the field state after
/// each step and a line per committed selection.
pub(crate) fn replay<W: std::io::Write>(
    script: &Script,
    fallback: &PickerConfig,
    out: &mut W,
) -> Result<()> {
    let config = script.config.as_ref().unwrap_or(fallback);
    let today = script.today.unwrap_or_else(CalendarDate::today);
    let mut picker = Picker::new(config, today).context("invalid picker configuration")?;
    let mut commits = 0usize;

    for (i, step) in script.steps.iter().enumerate() {
        let committed = apply_step(&mut picker, step)
            .with_context(|| format!("step {} ({:?}) failed", i + 1, step))?;
        writeln!(out, "{:>3} {:<8} {}", i + 1, step_name(step), describe(&picker))?;
        if let Some(selection) = committed {
            commits += 1;
            writeln!(out, "    committed {}", selection)?;
        }
    }

    writeln!(out, "---")?;
    match picker.selection() {
        Some(selection) => writeln!(out, "final: {}", selection)?,
        None => writeln!(out, "final: none")?,
    }
    writeln!(out, "commits: {}", commits)?;
    Ok(())
}

fn apply_step(picker: &mut Picker, step: &Step) -> Result<Option<Selection>> {
    let committed = match *step {
        Step::Open => {
            picker.click_field();
            None
        }
        Step::Pick { date } => picker.pick_day(date),
        Step::Month { year, month } => {
            if !(1..=12).contains(&month) {
                anyhow::bail!("month {} is not between 1 and 12", month);
            }
            picker.pick_month(MonthKey { year, month })
        }
        Step::Day { day } => {
            let visible = picker.visible_month();
            let date = visible
                .with_day(day)
                .with_context(|| format!("day {} does not exist in {}", day, visible.month_key()))?;
            picker.pick_day(date)
        }
        Step::Header => {
            picker.header_click();
            None
        }
        Step::Outside => {
            picker.click_outside();
            None
        }
        Step::Prev => {
            picker.navigate(NavDirection::Prev, NavUnit::Auto);
            None
        }
        Step::Next => {
            picker.navigate(NavDirection::Next, NavUnit::Auto);
            None
        }
        Step::Sync { start, end } => {
            picker.set_value(sync_value(start, end));
            None
        }
    };
    Ok(committed)
}

fn step_name(step: &Step) -> &'static str {
    match step {
        Step::Open => "open",
        Step::Pick { .. } => "pick",
        Step::Month { .. } => "month",
        Step::Day { .. } => "day",
        Step::Header => "header",
        Step::Outside => "outside",
        Step::Prev => "prev",
        Step::Next => "next",
        Step::Sync { .. } => "sync",
    }
}

fn describe(picker: &Picker) -> String {
    let fields: Vec<String> = picker
        .field_labels()
        .into_iter()
        .map(|label| {
            if label.active {
                format!(">{}<", label.text)
            } else {
                label.text
            }
        })
        .collect();
    let view = if picker.is_open() {
        picker.header_label()
    } else {
        "closed".to_string()
    };
    format!("{} [{}]", fields.join(" | "), view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::date::d;
    use std::fs;
    use tempfile::TempDir;

    fn run_script(script: &Script) -> String {
        let mut buf = Vec::new();
        replay(script, &PickerConfig::default(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_single_phase_replay() {
        let script = Script {
            config: None,
            today: Some(d(2024, 3, 1)),
            steps: vec![
                Step::Open,
                Step::Pick { date: d(2024, 3, 10) },
                Step::Pick { date: d(2024, 3, 5) },
                Step::Pick { date: d(2024, 3, 20) },
            ],
        };
        let out = run_script(&script);
        assert!(out.contains("  2 pick     10/03/2024 | >To< [March 2024]"));
        assert!(out.contains("  3 pick     05/03/2024 | >To<"));
        assert!(out.contains("committed 2024-03-05 2024-03-20"));
        assert!(out.contains("final: 2024-03-05 2024-03-20"));
        assert!(out.contains("commits: 1"));
    }

    #[test]
    fn test_two_phase_replay() {
        let script = Script {
            config: Some(PickerConfig {
                two_phase: true,
                ..Default::default()
            }),
            today: Some(d(2024, 3, 1)),
            steps: vec![
                Step::Open,
                Step::Month { year: 2024, month: 6 },
                Step::Day { day: 12 },
                Step::Month { year: 2024, month: 7 },
                Step::Day { day: 3 },
            ],
        };
        let out = run_script(&script);
        assert!(out.contains("  2 month    >From< | To [June 2024]"));
        assert!(out.contains("committed 2024-06-12 2024-07-03"));
        assert!(out.contains("commits: 1"));
    }

    #[test]
    fn test_header_and_sync_steps() {
        let script = Script {
            config: None,
            today: Some(d(2024, 3, 1)),
            steps: vec![
                Step::Sync {
                    start: Some(d(2024, 1, 1)),
                    end: Some(d(2024, 1, 31)),
                },
                Step::Open,
                Step::Header,
                Step::Outside,
            ],
        };
        let out = run_script(&script);
        assert!(out.contains("  3 header   >From< | 31/01/2024 [2024]"));
        assert!(out.contains("final: none"));
        assert!(out.contains("commits: 0"));
    }

    #[test]
    fn test_invalid_day_is_an_error() {
        let script = Script {
            config: Some(PickerConfig {
                range: false,
                ..Default::default()
            }),
            today: Some(d(2024, 2, 1)),
            steps: vec![Step::Open, Step::Day { day: 30 }],
        };
        let mut buf = Vec::new();
        let err = replay(&script, &PickerConfig::default(), &mut buf).unwrap_err();
        assert!(err.to_string().contains("step 2"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let script = Script {
            config: Some(PickerConfig {
                format: String::new(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut buf = Vec::new();
        assert!(replay(&script, &PickerConfig::default(), &mut buf).is_err());
    }

    #[test]
    fn test_run_reads_yaml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.yaml");
        fs::write(
            &path,
            "today: 2024-03-01\nsteps:\n  - action: open\n  - action: pick\n    date: 2024-03-02\n",
        )
        .unwrap();
        let script: Script = read_file(&path).unwrap();
        let mut buf = Vec::new();
        replay(&script, &PickerConfig::default(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("02/03/2024"));
    }
}
