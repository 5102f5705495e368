//! Dataset export
//!
//! Supports:
//! - JSON export of the full record model (camelCase, as consumed by the UI)
//! - CSV export with usage and insight columns flattened into one row

use std::io::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::RenewalRecord;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Csv,
    #[default]
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (use csv or json)", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One CSV row per renewal
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    application: &'a str,
    category: &'a str,
    price: u32,
    billing_cycle: &'static str,
    annual_cost: u64,
    renewal_date: String,
    status: &'static str,
    total_users: Option<u32>,
    active_users: Option<u32>,
    moderately_active_users: Option<u32>,
    inactive_users: Option<u32>,
    optimization_score: Option<u8>,
    savings_potential: Option<u32>,
    industry_avg_price: Option<u32>,
    percentile_rank: Option<u8>,
    recommendations: String,
    icon: &'a str,
}

impl<'a> From<&'a RenewalRecord> for CsvRow<'a> {
    fn from(r: &'a RenewalRecord) -> Self {
        let usage = r.usage_data.as_ref();
        let insights = r.ai_insights.as_ref();
        let benchmark = insights.and_then(|i| i.benchmark_data.as_ref());

        Self {
            id: &r.id,
            application: &r.application_name,
            category: &r.category,
            price: r.price,
            billing_cycle: r.billing_cycle.as_str(),
            annual_cost: r.annual_cost(),
            renewal_date: r.renewal_date.format("%Y-%m-%d").to_string(),
            status: r.status.as_str(),
            total_users: usage.map(|u| u.total_users),
            active_users: usage.map(|u| u.active_users),
            moderately_active_users: usage.map(|u| u.moderately_active_users),
            inactive_users: usage.map(|u| u.inactive_users),
            optimization_score: insights.map(|i| i.optimization_score),
            savings_potential: insights.and_then(|i| i.savings_potential),
            industry_avg_price: benchmark.map(|b| b.industry_avg_price),
            percentile_rank: benchmark.map(|b| b.percentile_rank),
            recommendations: insights
                .and_then(|i| i.recommendations.as_ref())
                .map(|recs| recs.join("; "))
                .unwrap_or_default(),
            icon: &r.icon_reference,
        }
    }
}

/// Pretty-printed JSON array of records
pub fn export_json(records: &[RenewalRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// CSV with a header row
pub fn export_csv(records: &[RenewalRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

/// Render `records` in `format`
pub fn export(records: &[RenewalRecord], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => export_csv(records),
        ExportFormat::Json => export_json(records),
    }
}

/// Render and write `records` to `out`
pub fn write_export<W: Write>(records: &[RenewalRecord], format: ExportFormat, out: &mut W) -> Result<()> {
    let content = export(records, format)?;
    out.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}
