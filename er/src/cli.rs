//! CLI argument parsing for eventrisk

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "er")]
#[command(author, version, about = "Risk and budget decision engine for event planning", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for reports
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze risks for a plan snapshot
    Analyze {
        /// Snapshot file (YAML or JSON) with plan, selection, vendors and tasks
        #[arg(required = true)]
        snapshot: PathBuf,

        /// Weather signal file, overrides the snapshot's reading
        #[arg(short, long, conflicts_with = "fetch_weather")]
        weather: Option<PathBuf>,

        /// Fetch the weather for the plan date from the configured provider
        #[arg(long)]
        fetch_weather: bool,

        /// Calendar events file, overrides the snapshot's calendar
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// Also print advisories derived from the report
        #[arg(short, long)]
        advise: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Select the cheapest vendor per category within a budget
    Optimize {
        /// Vendor catalog file (YAML or JSON list)
        #[arg(required = true)]
        catalog: PathBuf,

        /// Total budget
        #[arg(short, long)]
        budget: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Fetch a weather signal (fallback when unavailable)
    Weather {
        /// Event date (YYYY-MM-DD); current conditions when omitted
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Print the effective configuration
    Config,
}
