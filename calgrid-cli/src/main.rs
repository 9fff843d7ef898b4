mod commands;
mod render;

use anyhow::{Context, Result};
use calgrid_core::calgrid_config::CalgridConfig;
use calgrid_core::event::EventId;
use calgrid_core::grid::Month;
use calgrid_core::session::Session;
use calgrid_core::state::ViewMode;
use calgrid_core::storage::FileStore;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Month calendar with local event storage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month as a grid or a day-by-day list
    Show {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month)]
        month: Option<Month>,

        /// Months to move from there, e.g. -1 for the previous month
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,

        /// Override the saved view mode for this run only
        #[arg(short, long)]
        view: Option<ViewMode>,
    },
    /// Show every event on a date
    Day {
        /// Date (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Create an event
    Add {
        title: String,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Start time (HH:MM, 24-hour). Omit for an all-day event
        #[arg(short, long, default_value = "")]
        time: String,

        #[arg(short, long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete an event by id
    Delete { id: EventId },
    /// Switch between light and dark theme
    Theme,
    /// Set the default view mode
    View { mode: ViewMode },
    /// Show resolved paths and settings
    Config,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = CalgridConfig::load().context("Failed to load configuration")?;

    match cli.command {
        Commands::Show {
            month,
            offset,
            view,
        } => {
            let mut session = open_session(&config);
            commands::show::run(&mut session, month, offset, view, config.preview_limit)
        }
        Commands::Day { date } => commands::day::run(&open_session(&config), date),
        Commands::Add {
            title,
            date,
            time,
            location,
            description,
        } => {
            let mut session = open_session(&config);
            commands::add::run(&mut session, title, date, time, location, description)
        }
        Commands::Delete { id } => commands::delete::run(&mut open_session(&config), id),
        Commands::Theme => commands::theme::run(&mut open_session(&config)),
        Commands::View { mode } => commands::view::run(&mut open_session(&config), mode),
        Commands::Config => commands::config::run(&config),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default of warnings only.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_session(config: &CalgridConfig) -> Session<FileStore> {
    let today = Local::now().date_naive();
    let store = config.open_store();
    debug!(data_dir = %store.dir().display(), %today, "Opening calendar");
    Session::open(store, today)
}

fn parse_month(s: &str) -> Result<Month, String> {
    Month::parse(s).ok_or_else(|| format!("Invalid month '{s}'. Expected YYYY-MM"))
}
