//! Domain models for the renewal dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One subscription's renewal event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalRecord {
    /// Unique within one generated dataset (`app-{month}-{slot}`)
    pub id: String,
    pub application_name: String,
    /// Display icon URL, not validated
    pub icon_reference: String,
    /// Charge per billing cycle
    pub price: u32,
    pub renewal_date: NaiveDate,
    pub billing_cycle: BillingCycle,
    pub category: String,
    pub status: RenewalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_data: Option<UsageData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
}

impl RenewalRecord {
    /// Optimization score, if insights were generated for this record
    pub fn optimization_score(&self) -> Option<u8> {
        self.ai_insights.as_ref().map(|i| i.optimization_score)
    }

    /// Savings per billing cycle, zero when absent
    pub fn savings_potential(&self) -> u32 {
        self.ai_insights
            .as_ref()
            .and_then(|i| i.savings_potential)
            .unwrap_or(0)
    }

    /// Price annualized by billing cycle
    pub fn annual_cost(&self) -> u64 {
        u64::from(self.price) * u64::from(self.billing_cycle.multiplier())
    }

    /// Savings potential annualized by billing cycle
    pub fn annual_savings(&self) -> u64 {
        u64::from(self.savings_potential()) * u64::from(self.billing_cycle.multiplier())
    }
}

/// Periodicity of the charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Annual,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }

    /// Number of charges per year
    pub fn multiplier(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annual => 1,
        }
    }

    pub fn all() -> &'static [BillingCycle] {
        &[Self::Monthly, Self::Quarterly, Self::Annual]
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" | "yearly" => Ok(Self::Annual),
            _ => Err(format!("Unknown billing cycle: {}", s)),
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Renewal status relative to the reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenewalStatus {
    /// Renewal date already passed
    RecentlyDone,
    /// Renewal within the in-progress window (7 days by default)
    InProgress,
    ComingUp,
}

impl RenewalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecentlyDone => "recently-done",
            Self::InProgress => "in-progress",
            Self::ComingUp => "coming-up",
        }
    }
}

impl std::str::FromStr for RenewalStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "recently-done" => Ok(Self::RecentlyDone),
            "in-progress" => Ok(Self::InProgress),
            "coming-up" => Ok(Self::ComingUp),
            _ => Err(format!("Unknown renewal status: {}", s)),
        }
    }
}

impl std::fmt::Display for RenewalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Seat usage for an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageData {
    pub total_users: u32,
    pub active_users: u32,
    pub moderately_active_users: u32,
    pub inactive_users: u32,
}

impl UsageData {
    /// Build usage where every seat is assigned
    pub fn new(active_users: u32, moderately_active_users: u32, inactive_users: u32) -> Self {
        Self {
            total_users: active_users + moderately_active_users + inactive_users,
            active_users,
            moderately_active_users,
            inactive_users,
        }
    }

    pub fn assigned_users(&self) -> u32 {
        self.active_users + self.moderately_active_users + self.inactive_users
    }

    /// Licenses paid for but not assigned to anyone
    pub fn unassigned_licenses(&self) -> u32 {
        self.total_users.saturating_sub(self.assigned_users())
    }

    /// Share of seats that are actively used, 0.0 when there are no seats
    pub fn active_ratio(&self) -> f64 {
        if self.total_users == 0 {
            0.0
        } else {
            self.active_users as f64 / self.total_users as f64
        }
    }
}

/// Synthetic optimization analysis attached to a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsights {
    /// 0-100, lower means more room for optimization
    pub optimization_score: u8,
    /// Present only when `optimization_score` is below 70
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_potential: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark_data: Option<BenchmarkData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiation_tips: Option<Vec<String>>,
}

/// Industry price comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkData {
    /// Between 70% and 130% of the record's price
    pub industry_avg_price: u32,
    pub percentile_rank: u8,
}
