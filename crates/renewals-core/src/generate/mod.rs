//! Synthetic yearly renewal dataset generation
//!
//! For every month except the skipped one, draws 3-7 renewal slots and fills
//! each with an application taken from a shrinking pool of unused catalog
//! entries. Once the pool is empty, generation stops for the rest of the year.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rand::{rngs::StdRng, SeedableRng};
//! use renewals_core::{EngineConfig, RenewalGenerator};
//!
//! let config = EngineConfig::load(None)?;
//! let mut rng = StdRng::seed_from_u64(42);
//! let records = RenewalGenerator::new(&config).generate(2025, now, &mut rng);
//! ```

pub mod insights;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use tracing::{debug, info};

use crate::config::{AppInfo, Catalog, EngineConfig, GeneratorConfig};
use crate::error::Result;
use crate::metrics::status_for;
use crate::models::{BillingCycle, RenewalRecord};

pub use insights::{generate_ai_insights, generate_usage_data};

/// Unused catalog entries for one generation run
///
/// Shrinks monotonically: each `take` removes the drawn entry.
#[derive(Debug, Clone)]
pub struct AppPool<'a> {
    remaining: Vec<&'a AppInfo>,
}

impl<'a> AppPool<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            remaining: catalog.apps().iter().collect(),
        }
    }

    /// Draw an unused application uniformly at random
    pub fn take<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&'a AppInfo> {
        if self.remaining.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.remaining.len());
        Some(self.remaining.remove(idx))
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Generates renewal datasets from a catalog
#[derive(Debug, Clone, Copy)]
pub struct RenewalGenerator<'a> {
    settings: GeneratorConfig,
    catalog: &'a Catalog,
}

impl<'a> RenewalGenerator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            settings: config.generator,
            catalog: &config.catalog,
        }
    }

    /// Generator with custom settings, rejected if a draw range is invalid
    pub fn with_settings(settings: GeneratorConfig, catalog: &'a Catalog) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings, catalog })
    }

    /// Generate the renewals for `year`, classifying status against `now`
    ///
    /// Years chrono cannot represent yield an empty dataset.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        year: i32,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Vec<RenewalRecord> {
        let mut pool = AppPool::new(self.catalog);
        let mut records = Vec::new();

        'months: for month in 0..12u32 {
            if month == self.settings.skipped_month {
                continue;
            }
            if pool.is_empty() {
                break;
            }
            let Some((first_day, days_in_month)) = month_bounds(year, month) else {
                continue;
            };

            let count = rng.gen_range(self.settings.min_per_month..=self.settings.max_per_month);
            debug!("Generating {} renewals for {}-{:02}", count, year, month + 1);

            for slot in 0..count {
                let Some(app) = pool.take(rng) else {
                    info!(
                        "Application catalog exhausted after {} renewals",
                        records.len()
                    );
                    break 'months;
                };
                let offset = rng.gen_range(0..days_in_month);
                let renewal_date = first_day + Duration::days(offset);
                records.push(self.build_record(app, month, slot, renewal_date, now, rng));
            }
        }

        debug!("Generated {} renewals for {}", records.len(), year);
        records
    }

    fn build_record<R: Rng + ?Sized>(
        &self,
        app: &AppInfo,
        month: u32,
        slot: u32,
        renewal_date: NaiveDate,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> RenewalRecord {
        let price = rng.gen_range(self.settings.min_price..=self.settings.max_price);
        let cycles = BillingCycle::all();
        let billing_cycle = cycles[rng.gen_range(0..cycles.len())];
        let usage_data = generate_usage_data(rng);
        let ai_insights = generate_ai_insights(price, &app.name, &app.category, rng);

        RenewalRecord {
            id: format!("app-{}-{}", month, slot),
            application_name: app.name.clone(),
            icon_reference: app.icon.clone(),
            price,
            renewal_date,
            billing_cycle,
            category: app.category.clone(),
            status: status_for(renewal_date, now, self.settings.in_progress_days),
            usage_data: Some(usage_data),
            ai_insights: Some(ai_insights),
        }
    }
}

/// Generate a dataset from the embedded catalog and default settings
pub fn generate_yearly_renewals<R: Rng + ?Sized>(
    year: i32,
    now: NaiveDateTime,
    rng: &mut R,
) -> Vec<RenewalRecord> {
    RenewalGenerator::new(EngineConfig::builtin()).generate(year, now, rng)
}

/// First day of the month (0-11) and its length in days
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, i64)> {
    let first = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    let last = match NaiveDate::from_ymd_opt(year, month + 2, 1) {
        Some(next) => next.pred_opt()?,
        None if month == 11 => NaiveDate::from_ymd_opt(year, 12, 31)?,
        None => return None,
    };
    Some((first, (last - first).num_days() + 1))
}
