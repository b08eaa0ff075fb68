mod add;
mod report;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::services::{Aggregator, Repository};
use crate::types::EntryFilter;

/// Personal screen-time logger
#[derive(Parser)]
#[command(name = "screenlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Daily alert threshold in hours
    #[arg(long, global = true)]
    threshold: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard (default)
    Tui,

    /// Create the database schema
    Init,

    /// Add one entry; prompts for anything not given as a flag
    Add {
        /// Entry date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Activity category, e.g. Study or Gaming
        #[arg(long)]
        category: Option<String>,
        /// Hours spent (fractional allowed)
        #[arg(long)]
        hours: Option<f64>,
        /// Optional note
        #[arg(long)]
        remarks: Option<String>,
    },

    /// List entries
    List {
        /// Start of date range (inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End of date range (inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the summary report
    Report {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete one entry by id
    Delete { id: i64 },

    /// Load demo records
    Seed,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.db, self.threshold)?;

        match self.command {
            None | Some(Commands::Tui) => crate::tui::run(config),
            Some(Commands::Init) => {
                let repo = Repository::open(&config.db_path)?;
                repo.init_schema()?;
                println!("Database initialized at {}", config.db_path.display());
                Ok(())
            }
            Some(Commands::Add {
                date,
                category,
                hours,
                remarks,
            }) => {
                let repo = open_initialized(&config)?;
                add::run(&repo, date, category, hours, remarks)
            }
            Some(Commands::List { from, to, json }) => {
                let repo = open_initialized(&config)?;
                let entries = repo.list(&EntryFilter { from, to })?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                } else if entries.is_empty() {
                    println!("No records found.");
                } else {
                    report::print_entries(&entries);
                    println!("\n{} record(s)", entries.len());
                }
                Ok(())
            }
            Some(Commands::Report { json }) => {
                let repo = open_initialized(&config)?;
                let entries = repo.list(&EntryFilter::all())?;
                let summary = Aggregator::summarize(&entries, config.threshold_hours);
                if json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    report::print_report(&entries, &summary);
                }
                Ok(())
            }
            Some(Commands::Delete { id }) => {
                let repo = open_initialized(&config)?;
                if repo.delete(id)? {
                    println!("Deleted entry {id}.");
                } else {
                    println!("Entry {id} not found.");
                }
                Ok(())
            }
            Some(Commands::Seed) => {
                let repo = open_initialized(&config)?;
                let n = repo.seed().context("run `screenlog init` first")?;
                println!("Inserted {n} sample entries.");
                Ok(())
            }
        }
    }
}

fn open_initialized(config: &Config) -> anyhow::Result<Repository> {
    Repository::open(&config.db_path)
        .with_context(|| format!("cannot open database at {}", config.db_path.display()))
}
