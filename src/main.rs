mod cmd;
mod data;
mod picker;
mod ui;

use clap::{Args, Parser, Subcommand};
use data::{Persistable, PickerConfig};
use picker::date::{CalendarDate, MonthKey};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rangepick", about = "date, month and date-range picker for the terminal")]
struct Cli {
    /// Picker configuration file, YAML or JSON (default: ./rangepick.yaml)
    #[arg(long, default_value = "./rangepick.yaml", global = true)]
    config: PathBuf,

    #[command(flatten)]
    flags: PickerFlags,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Command line overrides for values in the configuration file.
#[derive(Args, Debug, Default)]
struct PickerFlags {
    /// Pick a single date instead of a range
    #[arg(long)]
    single: bool,
    /// Pick months instead of days
    #[arg(long)]
    month_only: bool,
    /// Choose a month before each day
    #[arg(long)]
    two_phase: bool,
    /// Keep the picker open after a range is committed
    #[arg(long)]
    stay_open: bool,
    /// Start with the picker open
    #[arg(long)]
    open: bool,
    /// Render the field as disabled
    #[arg(long)]
    disabled: bool,
    /// Display pattern for picked dates (e.g. DD/MM/YYYY)
    #[arg(long)]
    format: Option<String>,
}

impl PickerFlags {
    fn apply(&self, config: &mut PickerConfig) {
        if self.single {
            config.range = false;
            if let Some(r) = config.range_value.take() {
                config.value = Some(r.start);
            }
        }
        config.month_only |= self.month_only;
        config.two_phase |= self.two_phase;
        config.stay_open |= self.stay_open;
        config.open |= self.open;
        config.disabled |= self.disabled;
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print a calendar with a selection highlighted
    Show {
        /// Month to display (e.g. 2024-03)
        #[arg(long)]
        month: Option<MonthKey>,
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        start: Option<CalendarDate>,
        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        end: Option<CalendarDate>,
        /// Single selected date (YYYY-MM-DD)
        #[arg(long)]
        selected: Option<CalendarDate>,
        /// Show the twelve-month grid instead of days
        #[arg(long)]
        months: bool,
    },
    /// Run a scripted list of picker events and print each commit
    Replay {
        /// Script file, YAML or JSON
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    run(Cli::parse())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Init { force }) => cmd::init::run(&cli.config, force),
        Some(Commands::Show {
            month,
            start,
            end,
            selected,
            months,
        }) => cmd::show::run(&cmd::show::ShowArgs {
            month,
            start,
            end,
            selected,
            months,
            today: None,
        }),
        Some(Commands::Replay { ref script }) => {
            let config = load_config(&cli)?;
            cmd::replay::run(script, &config)
        }
        None => {
            let config = load_config(&cli)?;
            cmd::root::run(&config)
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<PickerConfig> {
    let mut config = PickerConfig::load_from(&cli.config)?;
    cli.flags.apply(&mut config);
    log::debug!("picker configuration {:?}", config);
    Ok(config)
}
