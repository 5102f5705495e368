//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Renewals - See every SaaS renewal in the year at a glance
#[derive(Parser)]
#[command(name = "renewals")]
#[command(about = "SaaS subscription renewal dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Calendar year to generate renewals for (defaults to the current year)
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Seed for the dataset generator
    ///
    /// The same seed, year and day always produce the same dataset.
    /// Without a seed every run draws a fresh dataset.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Catalog config file (overrides ~/.local/share/renewals/config/catalog.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the year at a glance (renewals per month, next renewal)
    Calendar,

    /// List renewals for one month
    Month {
        /// Month number, 1-12
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        /// Only show applications whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort column: name, price, renewal-date, billing-cycle, usage, unassigned-licenses
        #[arg(long, default_value = "renewal-date")]
        sort: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show the next upcoming renewal
    Next,

    /// Show one renewal with usage and insights
    Show {
        /// Renewal ID (e.g. app-2-0) or application name
        id_or_name: String,
    },

    /// Budget impact: annual cost, savings, category split, projection
    Budget,

    /// Contracts that need optimization, most urgent first
    Optimize,

    /// Low-scoring renewals coming up soon
    Urgent {
        /// Look-ahead window in days (defaults to the configured window)
        #[arg(long)]
        days: Option<i64>,
    },

    /// Export the generated dataset
    Export {
        /// Output format: json or csv
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the applications in the catalog
    Catalog,
}
