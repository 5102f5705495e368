//! Shared command state
//!
//! This module contains:
//! - `Dashboard` - the generated dataset plus the config and clock it was built with
//! - `find_record` - resolve a record by ID or application name

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use renewals_core::{EngineConfig, RenewalGenerator, RenewalRecord};
use tracing::debug;

/// Everything a command needs to render a view
pub struct Dashboard {
    pub config: EngineConfig,
    pub year: i32,
    pub now: NaiveDateTime,
    pub records: Vec<RenewalRecord>,
    /// Continues the generator's stream for views with their own noise
    pub rng: StdRng,
}

impl Dashboard {
    /// Generate the dataset for `year`, seeded when `seed` is given
    pub fn new(config: EngineConfig, year: i32, now: NaiveDateTime, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let records = RenewalGenerator::new(&config).generate(year, now, &mut rng);
        debug!(
            "Dashboard ready: {} renewals for {} from {} catalog apps",
            records.len(),
            year,
            config.catalog.len()
        );

        Self {
            config,
            year,
            now,
            records,
            rng,
        }
    }
}

/// Look up a record by exact ID, then by case-insensitive application name
pub fn find_record<'a>(records: &'a [RenewalRecord], id_or_name: &str) -> Result<&'a RenewalRecord> {
    if let Some(record) = records.iter().find(|r| r.id == id_or_name) {
        return Ok(record);
    }
    match records
        .iter()
        .find(|r| r.application_name.eq_ignore_ascii_case(id_or_name))
    {
        Some(record) => Ok(record),
        None => bail!("Renewal not found: {}", id_or_name),
    }
}
