//! Optimization and urgency command implementations

use anyhow::{bail, Result};
use renewals_core::format::{format_price, format_renewal_date};
use renewals_core::metrics::{self, days_until};
use renewals_core::{RenewalRecord, UrgencyLevel};

use super::{dollars, truncate, Dashboard};

pub fn cmd_optimize(dashboard: &Dashboard, json: bool) -> Result<()> {
    let report = metrics::optimization_report(&dashboard.records);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("💡 Optimization Opportunities");
    println!("   ─────────────────────────────────────────────────────────────");

    if report.candidates.is_empty() {
        println!("   ✅ Every contract is well optimized.");
        return Ok(());
    }

    println!(
        "   {} contracts need attention, {} per year in potential savings",
        report.candidates.len(),
        dollars(report.annual_savings)
    );

    print_tier("🔴 Critical (score below 40)", &report.critical);
    print_tier("🟡 Needs attention (score 40-69)", &report.attention);

    Ok(())
}

fn print_tier(title: &str, records: &[&RenewalRecord]) {
    if records.is_empty() {
        return;
    }

    println!();
    println!("   {}", title);
    println!(
        "   {:20} │ {:>5} │ {:>10} │ {:>12} │ {}",
        "Application", "Score", "Savings", "Per Year", "Renews"
    );
    println!("   ─────────────────────┼───────┼────────────┼──────────────┼──────────────");
    for record in records {
        println!(
            "   {:20} │ {:>5} │ {:>10} │ {:>12} │ {}",
            truncate(&record.application_name, 20),
            record.optimization_score().unwrap_or(0),
            format_price(f64::from(record.savings_potential())),
            dollars(record.annual_savings()),
            format_renewal_date(record.renewal_date)
        );
    }
}

pub fn cmd_urgent(dashboard: &Dashboard, days: Option<i64>, json: bool) -> Result<()> {
    let window = days.unwrap_or(dashboard.config.analysis.urgent_window_days);
    if window < 0 {
        bail!("Look-ahead window must not be negative (got {})", window);
    }
    let urgent = metrics::urgent_renewals_within(&dashboard.records, dashboard.now, window);

    if json {
        let out: Vec<serde_json::Value> = urgent
            .iter()
            .map(|r| {
                let days = days_until(r.renewal_date, dashboard.now);
                serde_json::json!({
                    "daysUntil": days,
                    "urgency": UrgencyLevel::from_days(days),
                    "renewal": r,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("⏰ Urgent Renewals (next {} days)", window);
    println!("   ─────────────────────────────────────────────────────────────");

    if urgent.is_empty() {
        println!("   Nothing urgent. No low-scoring contracts renew in this window.");
        return Ok(());
    }

    for record in &urgent {
        let days = days_until(record.renewal_date, dashboard.now);
        let icon = match UrgencyLevel::from_days(days) {
            UrgencyLevel::Critical => "🔴",
            UrgencyLevel::Urgent => "🟠",
            UrgencyLevel::ComingUp => "🟡",
        };
        println!(
            "   {} {:20} in {:>2} days  score {:>2}  save {} ({})",
            icon,
            truncate(&record.application_name, 20),
            days,
            record.optimization_score().unwrap_or(0),
            format_price(f64::from(record.savings_potential())),
            format_renewal_date(record.renewal_date)
        );
    }

    Ok(())
}
