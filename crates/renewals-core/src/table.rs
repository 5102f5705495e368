//! Renewal table helpers: name search, column sorting and seat usage

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{RenewalRecord, UsageData};

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Price,
    #[default]
    RenewalDate,
    BillingCycle,
    /// Share of seats actively used
    Usage,
    UnassignedLicenses,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::RenewalDate => "renewal-date",
            Self::BillingCycle => "billing-cycle",
            Self::Usage => "usage",
            Self::UnassignedLicenses => "unassigned-licenses",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "renewal-date" | "date" => Ok(Self::RenewalDate),
            "billing-cycle" | "cycle" => Ok(Self::BillingCycle),
            "usage" => Ok(Self::Usage),
            "unassigned-licenses" | "unassigned" => Ok(Self::UnassignedLicenses),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Records whose name contains `term`, case-insensitively
pub fn search<'a>(records: &[&'a RenewalRecord], term: &str) -> Vec<&'a RenewalRecord> {
    let needle = term.trim().to_lowercase();
    records
        .iter()
        .copied()
        .filter(|r| needle.is_empty() || r.application_name.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort by a table column
///
/// Usage-based columns place records without usage data last in either
/// direction, keeping their relative order.
pub fn sort_records(records: &mut [&RenewalRecord], field: SortField, direction: SortDirection) {
    records.sort_by(|a, b| {
        lacks_key(a, field)
            .cmp(&lacks_key(b, field))
            .then_with(|| {
                let ordering = compare(a, b, field);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
    });
}

fn lacks_key(record: &RenewalRecord, field: SortField) -> bool {
    matches!(field, SortField::Usage | SortField::UnassignedLicenses) && record.usage_data.is_none()
}

fn compare(a: &RenewalRecord, b: &RenewalRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name => a
            .application_name
            .to_lowercase()
            .cmp(&b.application_name.to_lowercase()),
        SortField::Price => a.price.cmp(&b.price),
        SortField::RenewalDate => a.renewal_date.cmp(&b.renewal_date),
        SortField::BillingCycle => a.billing_cycle.as_str().cmp(b.billing_cycle.as_str()),
        SortField::Usage => {
            let ratio = |r: &RenewalRecord| r.usage_data.map(|u| u.active_ratio()).unwrap_or(0.0);
            ratio(a).total_cmp(&ratio(b))
        }
        SortField::UnassignedLicenses => {
            let unassigned = |r: &RenewalRecord| r.usage_data.map(|u| u.unassigned_licenses());
            unassigned(a).cmp(&unassigned(b))
        }
    }
}

/// Seat usage as percentages of total users
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageBreakdown {
    pub active: f64,
    pub moderate: f64,
    pub inactive: f64,
    pub unassigned: f64,
    pub unassigned_licenses: u32,
}

impl UsageBreakdown {
    pub fn from_usage(usage: &UsageData) -> Self {
        if usage.total_users == 0 {
            return Self {
                active: 0.0,
                moderate: 0.0,
                inactive: 0.0,
                unassigned: 0.0,
                unassigned_licenses: 0,
            };
        }

        let total = f64::from(usage.total_users);
        let unassigned_licenses = usage.unassigned_licenses();
        Self {
            active: f64::from(usage.active_users) / total * 100.0,
            moderate: f64::from(usage.moderately_active_users) / total * 100.0,
            inactive: f64::from(usage.inactive_users) / total * 100.0,
            unassigned: f64::from(unassigned_licenses) / total * 100.0,
            unassigned_licenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillingCycle;
    use crate::test_utils::{date, RecordBuilder};

    fn rows() -> Vec<RenewalRecord> {
        vec![
            RecordBuilder::new("Slack")
                .price(300)
                .on(date(2025, 3, 9))
                .cycle(BillingCycle::Monthly)
                .usage(8, 1, 1)
                .build(),
            RecordBuilder::new("asana")
                .price(120)
                .on(date(2025, 3, 2))
                .cycle(BillingCycle::Annual)
                .usage(2, 4, 2)
                .build(),
            RecordBuilder::new("Zoom")
                .price(700)
                .on(date(2025, 3, 20))
                .cycle(BillingCycle::Quarterly)
                .usage_data(UsageData {
                    total_users: 10,
                    active_users: 3,
                    moderately_active_users: 1,
                    inactive_users: 1,
                })
                .build(),
        ]
    }

    fn names(records: &[&RenewalRecord]) -> Vec<String> {
        records.iter().map(|r| r.application_name.clone()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let data = rows();
        let all: Vec<&RenewalRecord> = data.iter().collect();
        assert_eq!(names(&search(&all, "SLA")), vec!["Slack"]);
        assert_eq!(search(&all, "").len(), 3);
        assert_eq!(search(&all, "  ").len(), 3);
        assert!(search(&all, "figma").is_empty());
    }

    #[test]
    fn test_sort_by_each_field() {
        let data = rows();
        let mut view: Vec<&RenewalRecord> = data.iter().collect();

        sort_records(&mut view, SortField::Name, SortDirection::Asc);
        assert_eq!(names(&view), vec!["asana", "Slack", "Zoom"]);

        sort_records(&mut view, SortField::Price, SortDirection::Desc);
        assert_eq!(names(&view), vec!["Zoom", "Slack", "asana"]);

        sort_records(&mut view, SortField::RenewalDate, SortDirection::Asc);
        assert_eq!(names(&view), vec!["asana", "Slack", "Zoom"]);

        sort_records(&mut view, SortField::BillingCycle, SortDirection::Asc);
        assert_eq!(names(&view), vec!["asana", "Slack", "Zoom"]);

        sort_records(&mut view, SortField::Usage, SortDirection::Desc);
        assert_eq!(names(&view), vec!["Slack", "Zoom", "asana"]);

        sort_records(&mut view, SortField::UnassignedLicenses, SortDirection::Desc);
        assert_eq!(names(&view)[0], "Zoom");
    }

    #[test]
    fn test_sort_places_missing_usage_last() {
        let data = vec![
            RecordBuilder::new("High")
                .usage_data(UsageData {
                    total_users: 10,
                    active_users: 8,
                    moderately_active_users: 1,
                    inactive_users: 1,
                })
                .build(),
            RecordBuilder::new("NoUsage").build(),
            RecordBuilder::new("Low").usage(2, 4, 2).build(),
        ];
        let mut view: Vec<&RenewalRecord> = data.iter().collect();

        sort_records(&mut view, SortField::Usage, SortDirection::Asc);
        assert_eq!(names(&view), vec!["Low", "High", "NoUsage"]);

        sort_records(&mut view, SortField::Usage, SortDirection::Desc);
        assert_eq!(names(&view), vec!["High", "Low", "NoUsage"]);

        sort_records(&mut view, SortField::UnassignedLicenses, SortDirection::Desc);
        assert_eq!(names(&view)[2], "NoUsage");
    }

    #[test]
    fn test_sort_field_from_str() {
        assert_eq!("renewal_date".parse::<SortField>(), Ok(SortField::RenewalDate));
        assert_eq!("unassigned".parse::<SortField>(), Ok(SortField::UnassignedLicenses));
        assert!("color".parse::<SortField>().is_err());
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
    }

    #[test]
    fn test_usage_breakdown() {
        let usage = UsageData {
            total_users: 10,
            active_users: 3,
            moderately_active_users: 1,
            inactive_users: 1,
        };
        let breakdown = UsageBreakdown::from_usage(&usage);
        assert!((breakdown.active - 30.0).abs() < 1e-9);
        assert!((breakdown.unassigned - 50.0).abs() < 1e-9);
        assert_eq!(breakdown.unassigned_licenses, 5);

        let empty = UsageBreakdown::from_usage(&UsageData::new(0, 0, 0));
        assert_eq!(empty.active, 0.0);
    }
}
