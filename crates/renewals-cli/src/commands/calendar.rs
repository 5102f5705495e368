//! Calendar command implementations

use anyhow::{anyhow, Context, Result};
use renewals_core::format::{format_price, format_renewal_date, month_name};
use renewals_core::metrics::{self, days_until};
use renewals_core::table::{search, sort_records};
use renewals_core::{RenewalRecord, SortDirection, SortField, UrgencyLevel, UsageBreakdown};

use super::{dollars, find_record, truncate, Dashboard};

pub fn cmd_calendar(dashboard: &Dashboard, json: bool) -> Result<()> {
    let overview = metrics::month_overview(&dashboard.records);
    let next = metrics::next_upcoming_renewal(&dashboard.records, dashboard.now);

    if json {
        let out = serde_json::json!({
            "year": dashboard.year,
            "months": overview,
            "next": next,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("📅 Renewal Calendar {}", dashboard.year);
    println!("   ─────────────────────────────────────────────");

    if dashboard.records.is_empty() {
        println!("   No renewals generated for this year.");
        return Ok(());
    }

    println!("   {:10} │ {:>8} │ {:>14}", "Month", "Renewals", "Annual Cost");
    println!("   ───────────┼──────────┼───────────────");
    for entry in &overview {
        let name = month_name(entry.month).unwrap_or("?");
        if entry.renewal_count == 0 {
            println!("   \x1b[2m{:10} │ {:>8} │ {:>14}\x1b[0m", name, "-", "-");
        } else {
            println!(
                "   {:10} │ {:>8} │ {:>14}",
                name,
                entry.renewal_count,
                dollars(entry.annual_cost)
            );
        }
    }
    println!("   ───────────┼──────────┼───────────────");
    println!(
        "   {:10} │ {:>8} │ {:>14}",
        "Total",
        dashboard.records.len(),
        dollars(metrics::calculate_annual_cost(&dashboard.records))
    );

    println!();
    match next {
        Some(record) => println!(
            "   ⏭️  Next renewal: {} on {} ({})",
            record.application_name,
            format_renewal_date(record.renewal_date),
            format_price(f64::from(record.price))
        ),
        None => println!("   ⏭️  No upcoming renewals this year."),
    }

    Ok(())
}

pub fn cmd_month(
    dashboard: &Dashboard,
    month: u32,
    term: Option<&str>,
    sort: &str,
    desc: bool,
    json: bool,
) -> Result<()> {
    let name = month_name(month).ok_or_else(|| anyhow!("Invalid month index: {}", month))?;
    let field: SortField = sort.parse().map_err(|e: String| anyhow!(e))?;
    let direction = if desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };

    let in_month = metrics::renewals_for_month(&dashboard.records, month);
    let mut rows = match term {
        Some(term) => search(&in_month, term),
        None => in_month,
    };
    sort_records(&mut rows, field, direction);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!();
    println!("📋 {} {} Renewals ({})", name, dashboard.year, rows.len());
    println!("   ─────────────────────────────────────────────────────────────────────────");

    if rows.is_empty() {
        match term {
            Some(term) => println!("   No renewals matching '{}'.", term),
            None => println!("   No renewals this month."),
        }
        return Ok(());
    }

    println!(
        "   {:8} │ {:20} │ {:>10} │ {:12} │ {:9} │ {:>6} │ {:>10}",
        "ID", "Application", "Price", "Renews", "Cycle", "Active", "Unassigned"
    );
    println!("   ─────────┼──────────────────────┼────────────┼──────────────┼───────────┼────────┼───────────");
    for record in &rows {
        let (active, unassigned) = match &record.usage_data {
            Some(usage) => {
                let breakdown = UsageBreakdown::from_usage(usage);
                (
                    format!("{:.0}%", breakdown.active),
                    breakdown.unassigned_licenses.to_string(),
                )
            }
            None => ("-".to_string(), "-".to_string()),
        };
        println!(
            "   {:8} │ {:20} │ {:>10} │ {:12} │ {:9} │ {:>6} │ {:>10}",
            record.id,
            truncate(&record.application_name, 20),
            format_price(f64::from(record.price)),
            record.renewal_date.format("%b %-d").to_string(),
            record.billing_cycle.as_str(),
            active,
            unassigned
        );
    }

    Ok(())
}

pub fn cmd_next(dashboard: &Dashboard, json: bool) -> Result<()> {
    let next = metrics::next_upcoming_renewal(&dashboard.records, dashboard.now);

    if json {
        println!("{}", serde_json::to_string_pretty(&next)?);
        return Ok(());
    }

    match next {
        Some(record) => {
            let days = days_until(record.renewal_date, dashboard.now);
            println!();
            println!("⏭️  Next Renewal");
            println!("   ─────────────────────────────────────────────");
            print_summary(record);
            println!("   In:       {} day{}", days, if days == 1 { "" } else { "s" });
        }
        None => println!("No upcoming renewals in {}.", dashboard.year),
    }

    Ok(())
}

pub fn cmd_show(dashboard: &Dashboard, id_or_name: &str, json: bool) -> Result<()> {
    let record = find_record(&dashboard.records, id_or_name)?;

    if json {
        let out = serde_json::to_string_pretty(record).context("Failed to serialize renewal")?;
        println!("{}", out);
        return Ok(());
    }

    println!();
    println!("🔎 {} ({})", record.application_name, record.id);
    println!("   ─────────────────────────────────────────────");
    print_summary(record);
    println!("   Annual:   {}", dollars(record.annual_cost()));
    println!("   Status:   {}", record.status);

    let days = days_until(record.renewal_date, dashboard.now);
    if days >= 0 {
        println!(
            "   Due in:   {} days ({})",
            days,
            UrgencyLevel::from_days(days)
        );
    }

    if let Some(usage) = &record.usage_data {
        let breakdown = UsageBreakdown::from_usage(usage);
        println!();
        println!("   👥 Seats ({} total)", usage.total_users);
        println!("      Active:      {:>3} ({:.0}%)", usage.active_users, breakdown.active);
        println!(
            "      Moderate:    {:>3} ({:.0}%)",
            usage.moderately_active_users, breakdown.moderate
        );
        println!("      Inactive:    {:>3} ({:.0}%)", usage.inactive_users, breakdown.inactive);
        println!(
            "      Unassigned:  {:>3} ({:.0}%)",
            breakdown.unassigned_licenses, breakdown.unassigned
        );
    }

    if let Some(insights) = &record.ai_insights {
        println!();
        println!("   💡 Optimization score: {}/100", insights.optimization_score);
        if let Some(savings) = insights.savings_potential {
            println!(
                "      Savings potential: {} per cycle ({} per year)",
                format_price(f64::from(savings)),
                dollars(record.annual_savings())
            );
        }
        if let Some(benchmark) = &insights.benchmark_data {
            println!(
                "      Industry average: {} ({}th percentile)",
                format_price(f64::from(benchmark.industry_avg_price)),
                benchmark.percentile_rank
            );
        }
        for rec in insights.recommendations.iter().flatten() {
            println!("      • {}", rec);
        }
        if let Some(tips) = &insights.negotiation_tips {
            println!();
            println!("   🤝 Negotiation tips");
            for tip in tips {
                println!("      • {}", tip);
            }
        }
    }

    Ok(())
}

fn print_summary(record: &RenewalRecord) {
    println!("   App:      {} ({})", record.application_name, record.category);
    println!("   Renews:   {}", format_renewal_date(record.renewal_date));
    println!(
        "   Price:    {} {}",
        format_price(f64::from(record.price)),
        record.billing_cycle
    );
}
