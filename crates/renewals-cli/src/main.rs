//! Renewals CLI - SaaS subscription renewal dashboard
//!
//! Usage:
//!   renewals calendar              Year overview
//!   renewals month 3               March renewals table
//!   renewals budget                Budget impact analysis
//!   renewals export --format csv   Export the dataset

mod cli;
mod commands;


use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use renewals_core::EngineConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::Dashboard;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config =
        EngineConfig::load(cli.config.as_deref()).context("Failed to load catalog config")?;
    let now = Local::now().naive_local();
    let year = cli.year.unwrap_or_else(|| now.year());
    let mut dashboard = Dashboard::new(config, year, now, cli.seed);

    match cli.command {
        Commands::Calendar => commands::cmd_calendar(&dashboard, cli.json),
        Commands::Month {
            month,
            search,
            sort,
            desc,
        } => commands::cmd_month(&dashboard, month - 1, search.as_deref(), &sort, desc, cli.json),
        Commands::Next => commands::cmd_next(&dashboard, cli.json),
        Commands::Show { id_or_name } => commands::cmd_show(&dashboard, &id_or_name, cli.json),
        Commands::Budget => commands::cmd_budget(&mut dashboard, cli.json),
        Commands::Optimize => commands::cmd_optimize(&dashboard, cli.json),
        Commands::Urgent { days } => commands::cmd_urgent(&dashboard, days, cli.json),
        Commands::Export { format, output } => {
            commands::cmd_export(&dashboard, &format, output.as_deref())
        }
        Commands::Catalog => commands::cmd_catalog(&dashboard, cli.json),
    }
}
