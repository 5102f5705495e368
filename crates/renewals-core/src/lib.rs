//! Renewals Core Library
//!
//! Engine behind the SaaS renewal dashboard:
//! - Application catalog and generator settings (TOML config with overrides)
//! - Synthetic yearly renewal dataset generation with an injectable RNG
//! - Derived metrics (monthly grouping, annual cost, savings, urgency)
//! - Budget impact analysis and optimization tiers
//! - Renewal table search/sort helpers
//! - Display formatting and dataset export

pub mod budget;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod generate;
pub mod metrics;
pub mod models;
pub mod table;

/// Record builders for tests
#[cfg(test)]
pub mod test_utils;

pub use budget::{BudgetSummary, CategoryCost, ProjectionPoint, TopApp};
pub use config::{AnalysisConfig, AppInfo, Catalog, EngineConfig, GeneratorConfig};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use generate::{generate_yearly_renewals, AppPool, RenewalGenerator};
pub use metrics::{MonthOverview, OptimizationReport, UrgencyLevel};
pub use models::{
    AiInsights, BenchmarkData, BillingCycle, RenewalRecord, RenewalStatus, UsageData,
};
pub use table::{SortDirection, SortField, UsageBreakdown};
