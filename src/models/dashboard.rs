//! Dashboard statistics and revision info.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DisasterReport, DisasterStatus, Severity};

/// Aggregate counts over the report collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    /// Reports that are neither resolved nor closed
    pub active: usize,
    pub critical: usize,
    pub by_status: BTreeMap<DisasterStatus, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_type: BTreeMap<String, usize>,
}

impl DashboardStats {
    pub fn from_reports(reports: &[DisasterReport]) -> Self {
        let mut stats = DashboardStats {
            total: reports.len(),
            ..Default::default()
        };

        for status in DisasterStatus::ALL {
            stats.by_status.insert(status, 0);
        }
        for severity in Severity::ALL {
            stats.by_severity.insert(severity, 0);
        }

        for report in reports {
            if report.status.is_active() {
                stats.active += 1;
            }
            if report.severity == Severity::Critical {
                stats.critical += 1;
            }
            *stats.by_status.entry(report.status).or_default() += 1;
            *stats.by_severity.entry(report.severity).or_default() += 1;
            *stats
                .by_type
                .entry(report.disaster_type.as_str().to_string())
                .or_default() += 1;
        }

        stats
    }
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: DateTime<Utc>,
}
