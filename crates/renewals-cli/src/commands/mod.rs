//! CLI command implementations
//!
//! Commands are organized by view:
//! - `dashboard` - Shared dashboard state (dataset generation, record lookup)
//! - `calendar` - Year overview, month table, next renewal, record detail
//! - `insights` - Optimization candidates and urgent renewals
//! - `budget` - Budget impact analysis and spending projection
//! - `export` - Dataset export and catalog listing

pub mod budget;
pub mod calendar;
pub mod dashboard;
pub mod export;
pub mod insights;

// Re-export command functions for main.rs
pub use budget::*;
pub use calendar::*;
pub use dashboard::*;
pub use export::*;
pub use insights::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a cost rollup as US dollars
pub fn dollars(amount: u64) -> String {
    renewals_core::format::format_price(amount as f64)
}
