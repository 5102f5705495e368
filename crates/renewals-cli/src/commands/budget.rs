//! Budget impact command implementation

use anyhow::Result;
use chrono::Datelike;
use renewals_core::budget::{category_breakdown, cost_projection, top_apps_by_cost};
use renewals_core::BudgetSummary;

use super::{dollars, truncate, Dashboard};

pub fn cmd_budget(dashboard: &mut Dashboard, json: bool) -> Result<()> {
    let summary = BudgetSummary::from_records(&dashboard.records);
    let categories = category_breakdown(&dashboard.records);
    let top = top_apps_by_cost(&dashboard.records, dashboard.config.analysis.top_apps);
    let projection = cost_projection(
        &dashboard.records,
        dashboard.now.month0(),
        &mut dashboard.rng,
    );

    if json {
        let out = serde_json::json!({
            "summary": summary,
            "categories": categories,
            "topApps": top,
            "projection": projection,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("💰 Budget Impact {}", dashboard.year);
    println!("   ─────────────────────────────────────────────");

    if dashboard.records.is_empty() {
        println!("   No renewals generated for this year.");
        return Ok(());
    }

    println!("   Annual cost:        {:>14}", dollars(summary.annual_cost));
    println!(
        "   Potential savings:  {:>14}  ({}%)",
        dollars(summary.potential_savings),
        summary.savings_percentage
    );
    println!("   Optimized cost:     {:>14}", dollars(summary.optimized_cost));

    println!();
    println!("   {:24} │ {:>14} │ {:>6}", "Category", "Annual Cost", "%");
    println!("   ─────────────────────────┼────────────────┼────────");
    for entry in &categories {
        let share = entry.annual_cost as f64 / summary.annual_cost.max(1) as f64 * 100.0;
        println!(
            "   {:24} │ {:>14} │ {:>5.1}%",
            truncate(&entry.category, 24),
            dollars(entry.annual_cost),
            share
        );
    }

    if !top.is_empty() {
        println!();
        println!("   🏆 Top {} by annual cost", top.len());
        for (i, app) in top.iter().enumerate() {
            println!(
                "   {:>2}. {:20} {:>14}  score {:>3}",
                i + 1,
                truncate(&app.name, 20),
                dollars(app.annual_cost),
                app.optimization_score
            );
        }
    }

    println!();
    println!("   📈 12-month projection");
    println!("   {:5} │ {:>12} │ {:>12}", "Month", "Current", "Optimized");
    println!("   ──────┼──────────────┼──────────────");
    for point in &projection {
        println!(
            "   {:5} │ {:>12} │ {:>12}",
            point.label,
            dollars(point.actual),
            dollars(point.optimized)
        );
    }

    Ok(())
}
