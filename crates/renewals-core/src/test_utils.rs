//! Test utilities for building renewal records by hand

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{
    AiInsights, BenchmarkData, BillingCycle, RenewalRecord, RenewalStatus, UsageData,
};

/// Date shorthand for tests
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Instant at `hour:00` on the given date
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    date(year, month, day).and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
}

/// Builder for `RenewalRecord` with sensible defaults
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: RenewalRecord,
}

impl RecordBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            record: RenewalRecord {
                id: format!("test-{}", name.to_lowercase().replace(' ', "-")),
                application_name: name.to_string(),
                icon_reference: "https://example.com/icon.png".to_string(),
                price: 100,
                renewal_date: date(2025, 3, 5),
                billing_cycle: BillingCycle::Annual,
                category: "Productivity".to_string(),
                status: RenewalStatus::ComingUp,
                usage_data: None,
                ai_insights: None,
            },
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.record.id = id.to_string();
        self
    }

    pub fn price(mut self, price: u32) -> Self {
        self.record.price = price;
        self
    }

    pub fn cycle(mut self, cycle: BillingCycle) -> Self {
        self.record.billing_cycle = cycle;
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.record.category = category.to_string();
        self
    }

    pub fn on(mut self, renewal_date: NaiveDate) -> Self {
        self.record.renewal_date = renewal_date;
        self
    }

    pub fn usage(mut self, active: u32, moderate: u32, inactive: u32) -> Self {
        self.record.usage_data = Some(UsageData::new(active, moderate, inactive));
        self
    }

    pub fn usage_data(mut self, usage: UsageData) -> Self {
        self.record.usage_data = Some(usage);
        self
    }

    /// Attach insights with the given score; savings only below 70
    pub fn score(mut self, score: u8, savings: u32) -> Self {
        self.record.ai_insights = Some(AiInsights {
            optimization_score: score,
            savings_potential: (score < 70).then_some(savings),
            recommendations: None,
            benchmark_data: Some(BenchmarkData {
                industry_avg_price: self.record.price,
                percentile_rank: 50,
            }),
            negotiation_tips: None,
        });
        self
    }

    pub fn build(self) -> RenewalRecord {
        self.record
    }
}
