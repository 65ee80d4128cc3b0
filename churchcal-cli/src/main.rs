mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Datelike;
use churchcal_core::Month;
use churchcal_core::config::ChurchCalConfig;
use churchcal_core::store::FileStore;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "churchcal")]
#[command(about = "Plan and print your church's yearly and monthly event calendar")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Read and write events in this directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the twelve months of a year with their events
    Year {
        /// Defaults to `default_year` from the config, or the current year
        year: Option<i32>,

        /// Also print the full schedule for the year
        #[arg(short, long)]
        list: bool,
    },
    /// Show the calendar grid and schedule for a month
    Month {
        /// YYYY-MM (defaults to the current month)
        month: Option<String>,
    },
    /// Print the schedule table for a month
    Schedule {
        /// YYYY-MM (defaults to the current month)
        month: Option<String>,
    },
    /// Add an event (prompts for anything missing)
    Add {
        title: Option<String>,

        /// Day of the event (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Category id
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Change an existing event
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        /// Day of the event (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Category id
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List categories, or add one
    Categories {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Add a category
    Add {
        name: String,

        /// Colour used to tag its events, e.g. "#3b82f6"
        color: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = ChurchCalConfig::load()?;
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_path());
    tracing::debug!(
        data_dir = %data_dir.display(),
        week_start = ?config.week_start,
        "resolved data directory"
    );
    let store = FileStore::new(data_dir);
    let options = config.view_options();
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Year { year, list } => {
            let year = year
                .or(config.default_year)
                .unwrap_or_else(|| today.year());
            commands::year::run(&store, year, list, &options).await
        }
        Commands::Month { month } => {
            let month = resolve_month(month.as_deref())?;
            commands::month::run(&store, month, &options, today).await
        }
        Commands::Schedule { month } => {
            let month = resolve_month(month.as_deref())?;
            commands::schedule::run(&store, month, &options).await
        }
        Commands::Add {
            title,
            date,
            category,
        } => commands::add::run(&store, title, date, category).await,
        Commands::Edit {
            id,
            title,
            date,
            category,
        } => commands::edit::run(&store, &id, title, date, category).await,
        Commands::Delete { id, yes } => commands::delete::run(&store, &id, yes).await,
        Commands::Categories { action } => match action {
            None => commands::categories::list(&store).await,
            Some(CategoryAction::Add { name, color }) => {
                commands::categories::add(&store, &name, &color).await
            }
        },
    }
}

fn resolve_month(arg: Option<&str>) -> Result<Month> {
    match arg {
        Some(s) => Ok(s.parse()?),
        None => Ok(Month::of(chrono::Local::now().date_naive())),
    }
}
