//! Derived metrics over a renewal dataset
//!
//! All functions are pure: they borrow the dataset and return new derived
//! structures. Empty input yields empty output (or `None`). Anything that
//! depends on "now" takes it as an explicit reference instant; renewal dates
//! are compared as the start of their day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::{RenewalRecord, RenewalStatus};

/// Scores strictly below this need optimization
pub const OPTIMIZATION_THRESHOLD: u8 = 70;

/// Scores strictly below this are critical
pub const CRITICAL_THRESHOLD: u8 = 40;

/// Window for urgent renewals, in days
pub const URGENT_WINDOW_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// Midnight at the start of `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Whole days from `now` until `date`, rounded up
///
/// A renewal dated today is 0 days away (for any time after midnight),
/// yesterday is -1.
pub fn days_until(date: NaiveDate, now: NaiveDateTime) -> i64 {
    let secs = (start_of_day(date) - now).num_seconds();
    let days = secs.div_euclid(SECONDS_PER_DAY);
    if secs.rem_euclid(SECONDS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Classify a renewal date relative to `now`
pub fn status_for(date: NaiveDate, now: NaiveDateTime, in_progress_days: i64) -> RenewalStatus {
    let days = days_until(date, now);
    if days < 0 {
        RenewalStatus::RecentlyDone
    } else if days < in_progress_days {
        RenewalStatus::InProgress
    } else {
        RenewalStatus::ComingUp
    }
}

/// Records renewing in `month` (0-11), input order preserved
pub fn renewals_for_month(records: &[RenewalRecord], month: u32) -> Vec<&RenewalRecord> {
    records
        .iter()
        .filter(|r| r.renewal_date.month0() == month)
        .collect()
}

/// Earliest record renewing at or after `now`; ties keep input order
pub fn next_upcoming_renewal(records: &[RenewalRecord], now: NaiveDateTime) -> Option<&RenewalRecord> {
    records
        .iter()
        .filter(|r| start_of_day(r.renewal_date) >= now)
        .min_by_key(|r| r.renewal_date)
}

/// Sum of prices annualized by billing cycle
pub fn calculate_annual_cost(records: &[RenewalRecord]) -> u64 {
    records.iter().map(RenewalRecord::annual_cost).sum()
}

/// Sum of savings potential annualized by billing cycle
pub fn calculate_potential_savings(records: &[RenewalRecord]) -> u64 {
    records.iter().map(RenewalRecord::annual_savings).sum()
}

fn needs_optimization(record: &RenewalRecord) -> bool {
    record
        .optimization_score()
        .is_some_and(|score| score < OPTIMIZATION_THRESHOLD)
}

/// Records scoring below 70, most urgent (lowest score) first
pub fn apps_needing_optimization(records: &[RenewalRecord]) -> Vec<&RenewalRecord> {
    let mut apps: Vec<&RenewalRecord> = records.iter().filter(|r| needs_optimization(r)).collect();
    apps.sort_by_key(|r| r.optimization_score());
    apps
}

/// Low-scoring records renewing within the next 30 days, soonest first
pub fn urgent_renewals(records: &[RenewalRecord], now: NaiveDateTime) -> Vec<&RenewalRecord> {
    urgent_renewals_within(records, now, URGENT_WINDOW_DAYS)
}

/// Low-scoring records renewing within `[now, now + window_days]`, soonest first
///
/// A window reaching past the last representable instant is open-ended.
pub fn urgent_renewals_within(
    records: &[RenewalRecord],
    now: NaiveDateTime,
    window_days: i64,
) -> Vec<&RenewalRecord> {
    let horizon = Duration::try_days(window_days)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(NaiveDateTime::MAX);
    let mut urgent: Vec<&RenewalRecord> = records
        .iter()
        .filter(|r| {
            let at = start_of_day(r.renewal_date);
            at >= now && at <= horizon && needs_optimization(r)
        })
        .collect();
    urgent.sort_by_key(|r| r.renewal_date);
    urgent
}

/// How soon an urgent renewal needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    /// A week or less away
    Critical,
    /// Two weeks or less away
    Urgent,
    ComingUp,
}

impl UrgencyLevel {
    pub fn from_days(days: i64) -> Self {
        if days <= 7 {
            Self::Critical
        } else if days <= 14 {
            Self::Urgent
        } else {
            Self::ComingUp
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Urgent => "urgent",
            Self::ComingUp => "coming_up",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optimization candidates split by severity
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport<'a> {
    /// All records scoring below 70, lowest score first
    pub candidates: Vec<&'a RenewalRecord>,
    /// Score below 40
    pub critical: Vec<&'a RenewalRecord>,
    /// Score 40-69
    pub attention: Vec<&'a RenewalRecord>,
    /// Savings per billing cycle, summed without annualizing
    pub total_savings: u64,
    pub annual_savings: u64,
}

pub fn optimization_report(records: &[RenewalRecord]) -> OptimizationReport<'_> {
    let candidates = apps_needing_optimization(records);
    let (critical, attention): (Vec<&RenewalRecord>, Vec<&RenewalRecord>) = candidates
        .iter()
        .copied()
        .partition(|r| r.optimization_score().unwrap_or(0) < CRITICAL_THRESHOLD);
    let total_savings: u64 = candidates
        .iter()
        .map(|r| u64::from(r.savings_potential()))
        .sum();
    let annual_savings: u64 = candidates.iter().map(|r| r.annual_savings()).sum();

    OptimizationReport {
        candidates,
        critical,
        attention,
        total_savings,
        annual_savings,
    }
}

/// Per-month summary for the calendar view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthOverview {
    /// 0-11
    pub month: u32,
    pub renewal_count: usize,
    pub annual_cost: u64,
}

/// One entry per month, including months with no renewals
pub fn month_overview(records: &[RenewalRecord]) -> Vec<MonthOverview> {
    (0..12)
        .map(|month| {
            let in_month = renewals_for_month(records, month);
            MonthOverview {
                month,
                renewal_count: in_month.len(),
                annual_cost: in_month.iter().map(|r| r.annual_cost()).sum(),
            }
        })
        .collect()
}
