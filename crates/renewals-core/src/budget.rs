//! Budget impact analysis
//!
//! Annualized cost rollups by category and application, the optimized-cost
//! summary, and a 12-month spending projection that phases savings in.

use rand::Rng;
use serde::Serialize;

use crate::format::month_abbrev;
use crate::metrics::{calculate_annual_cost, calculate_potential_savings};
use crate::models::RenewalRecord;

/// Annualized spend for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCost {
    pub category: String,
    pub annual_cost: u64,
}

/// Annualized cost per category, most expensive first
///
/// Categories with equal cost keep the order they first appear in.
pub fn category_breakdown(records: &[RenewalRecord]) -> Vec<CategoryCost> {
    let mut breakdown: Vec<CategoryCost> = Vec::new();
    for record in records {
        match breakdown.iter_mut().find(|c| c.category == record.category) {
            Some(entry) => entry.annual_cost += record.annual_cost(),
            None => breakdown.push(CategoryCost {
                category: record.category.clone(),
                annual_cost: record.annual_cost(),
            }),
        }
    }
    breakdown.sort_by(|a, b| b.annual_cost.cmp(&a.annual_cost));
    breakdown
}

/// An application ranked by annualized cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopApp {
    pub name: String,
    pub annual_cost: u64,
    /// 100 when the record carries no insights
    pub optimization_score: u8,
}

/// The `limit` most expensive applications by annualized cost
pub fn top_apps_by_cost(records: &[RenewalRecord], limit: usize) -> Vec<TopApp> {
    let mut ranked: Vec<&RenewalRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.annual_cost().cmp(&a.annual_cost()));
    ranked
        .into_iter()
        .take(limit)
        .map(|r| TopApp {
            name: r.application_name.clone(),
            annual_cost: r.annual_cost(),
            optimization_score: r.optimization_score().unwrap_or(100),
        })
        .collect()
}

/// Annual spend before and after applying every savings opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    pub annual_cost: u64,
    pub potential_savings: u64,
    pub optimized_cost: u64,
    /// Savings as a whole percentage of annual cost
    pub savings_percentage: u64,
}

impl BudgetSummary {
    pub fn from_records(records: &[RenewalRecord]) -> Self {
        let annual_cost = calculate_annual_cost(records);
        let potential_savings = calculate_potential_savings(records);
        let savings_percentage = if potential_savings > 0 && annual_cost > 0 {
            (potential_savings as f64 / annual_cost as f64 * 100.0).round() as u64
        } else {
            0
        };

        Self {
            annual_cost,
            potential_savings,
            optimized_cost: annual_cost.saturating_sub(potential_savings),
            savings_percentage,
        }
    }
}

/// One month of projected spend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionPoint {
    /// 0-11
    pub month: u32,
    pub label: String,
    pub actual: u64,
    pub optimized: u64,
}

/// Savings realized per projected month, as a share of the full amount
const SAVINGS_RAMP_PER_MONTH: f64 = 0.1;
const MONTHLY_VARIANCE: f64 = 0.05;

/// Project the next 12 months of spend starting at `start_month`
///
/// Each month is the annual cost spread evenly with +/-5% noise. Savings
/// start in the second month and ramp up by 10% of the monthly share each
/// month until fully realized.
pub fn cost_projection<R: Rng + ?Sized>(
    records: &[RenewalRecord],
    start_month: u32,
    rng: &mut R,
) -> Vec<ProjectionPoint> {
    let base_monthly = calculate_annual_cost(records) as f64 / 12.0;
    let monthly_savings = calculate_potential_savings(records) as f64 / 12.0;

    (0..12u32)
        .map(|index| {
            let month = (start_month % 12 + index) % 12;
            let variance = rng.gen_range(-MONTHLY_VARIANCE..MONTHLY_VARIANCE);
            let actual = base_monthly * (1.0 + variance);
            let ramp = (f64::from(index) * SAVINGS_RAMP_PER_MONTH).min(1.0);
            let optimized = if index >= 1 {
                actual - monthly_savings * ramp
            } else {
                actual
            };

            ProjectionPoint {
                month,
                label: month_abbrev(month).unwrap_or_default().to_string(),
                actual: actual.max(0.0).round() as u64,
                optimized: optimized.max(0.0).round() as u64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillingCycle;
    use crate::test_utils::RecordBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn portfolio() -> Vec<RenewalRecord> {
        vec![
            RecordBuilder::new("Slack")
                .category("Communication")
                .price(100)
                .cycle(BillingCycle::Monthly)
                .score(20, 30)
                .build(),
            RecordBuilder::new("Figma")
                .category("Design")
                .price(500)
                .cycle(BillingCycle::Quarterly)
                .score(85, 0)
                .build(),
            RecordBuilder::new("Zoom")
                .category("Communication")
                .price(900)
                .cycle(BillingCycle::Annual)
                .build(),
        ]
    }

    #[test]
    fn test_category_breakdown_sorted_desc() {
        let breakdown = category_breakdown(&portfolio());
        assert_eq!(
            breakdown,
            vec![
                CategoryCost {
                    category: "Communication".to_string(),
                    annual_cost: 2100,
                },
                CategoryCost {
                    category: "Design".to_string(),
                    annual_cost: 2000,
                },
            ]
        );
        assert!(category_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_top_apps_by_cost() {
        let top = top_apps_by_cost(&portfolio(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Figma");
        assert_eq!(top[0].annual_cost, 2000);
        assert_eq!(top[0].optimization_score, 85);
        assert_eq!(top[1].name, "Slack");
        assert_eq!(top[1].annual_cost, 1200);

        let all = top_apps_by_cost(&portfolio(), 10);
        assert_eq!(all[2].name, "Zoom");
        assert_eq!(all[2].optimization_score, 100);
    }

    #[test]
    fn test_budget_summary() {
        let summary = BudgetSummary::from_records(&portfolio());
        assert_eq!(summary.annual_cost, 4100);
        assert_eq!(summary.potential_savings, 360);
        assert_eq!(summary.optimized_cost, 3740);
        // 360 / 4100 = 8.78%
        assert_eq!(summary.savings_percentage, 9);

        let empty = BudgetSummary::from_records(&[]);
        assert_eq!(empty.annual_cost, 0);
        assert_eq!(empty.savings_percentage, 0);
    }

    #[test]
    fn test_cost_projection_shape() {
        let records = portfolio();
        let mut rng = StdRng::seed_from_u64(4);
        let projection = cost_projection(&records, 10, &mut rng);

        assert_eq!(projection.len(), 12);
        assert_eq!(projection[0].month, 10);
        assert_eq!(projection[0].label, "Nov");
        assert_eq!(projection[2].month, 0);
        assert_eq!(projection[0].actual, projection[0].optimized);

        // 4100 / 12 = 341.67, +/-5%
        for point in &projection {
            assert!((324..=359).contains(&point.actual), "actual {}", point.actual);
            assert!(point.optimized <= point.actual);
        }
        // fully ramped: 360 / 12 = 30 per month
        let last = &projection[11];
        assert!(last.actual - last.optimized >= 29 && last.actual - last.optimized <= 31);
    }

    #[test]
    fn test_cost_projection_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let projection = cost_projection(&[], 0, &mut rng);
        assert!(projection.iter().all(|p| p.actual == 0 && p.optimized == 0));
    }
}
