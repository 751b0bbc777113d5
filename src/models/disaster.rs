//! Disaster report model and its enumerations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DisasterResponse;
use crate::errors::AppError;

/// Category of a reported emergency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DisasterType {
    Earthquake,
    Flood,
    Wildfire,
    Hurricane,
    Tornado,
    Tsunami,
    Landslide,
    Avalanche,
    VolcanicEruption,
    Drought,
    Epidemic,
    IndustrialAccident,
    Other,
}

impl DisasterType {
    pub const ALL: [DisasterType; 13] = [
        DisasterType::Earthquake,
        DisasterType::Flood,
        DisasterType::Wildfire,
        DisasterType::Hurricane,
        DisasterType::Tornado,
        DisasterType::Tsunami,
        DisasterType::Landslide,
        DisasterType::Avalanche,
        DisasterType::VolcanicEruption,
        DisasterType::Drought,
        DisasterType::Epidemic,
        DisasterType::IndustrialAccident,
        DisasterType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Earthquake => "earthquake",
            DisasterType::Flood => "flood",
            DisasterType::Wildfire => "wildfire",
            DisasterType::Hurricane => "hurricane",
            DisasterType::Tornado => "tornado",
            DisasterType::Tsunami => "tsunami",
            DisasterType::Landslide => "landslide",
            DisasterType::Avalanche => "avalanche",
            DisasterType::VolcanicEruption => "volcanic_eruption",
            DisasterType::Drought => "drought",
            DisasterType::Epidemic => "epidemic",
            DisasterType::IndustrialAccident => "industrial_accident",
            DisasterType::Other => "other",
        }
    }

    /// Human readable label shown in tables and exports.
    pub fn label(&self) -> &'static str {
        match self {
            DisasterType::Earthquake => "Earthquake",
            DisasterType::Flood => "Flood",
            DisasterType::Wildfire => "Wildfire",
            DisasterType::Hurricane => "Hurricane",
            DisasterType::Tornado => "Tornado",
            DisasterType::Tsunami => "Tsunami",
            DisasterType::Landslide => "Landslide",
            DisasterType::Avalanche => "Avalanche",
            DisasterType::VolcanicEruption => "Volcanic Eruption",
            DisasterType::Drought => "Drought",
            DisasterType::Epidemic => "Epidemic",
            DisasterType::IndustrialAccident => "Industrial Accident",
            DisasterType::Other => "Other",
        }
    }
}

impl FromStr for DisasterType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisasterType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown disaster type: {}", s)))
    }
}

impl fmt::Display for DisasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency classification, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl FromStr for Severity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown severity: {}", s)))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow stage of a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DisasterStatus {
    Reported,
    Reviewing,
    Responding,
    Resolved,
    Closed,
}

impl DisasterStatus {
    pub const ALL: [DisasterStatus; 5] = [
        DisasterStatus::Reported,
        DisasterStatus::Reviewing,
        DisasterStatus::Responding,
        DisasterStatus::Resolved,
        DisasterStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterStatus::Reported => "reported",
            DisasterStatus::Reviewing => "reviewing",
            DisasterStatus::Responding => "responding",
            DisasterStatus::Resolved => "resolved",
            DisasterStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisasterStatus::Reported => "Reported",
            DisasterStatus::Reviewing => "Reviewing",
            DisasterStatus::Responding => "Responding",
            DisasterStatus::Resolved => "Resolved",
            DisasterStatus::Closed => "Closed",
        }
    }

    /// Parse a status from its display label, as shown in the client and CSV export.
    pub fn from_label(label: &str) -> Option<Self> {
        DisasterStatus::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Resolved and closed reports no longer count as active emergencies.
    pub fn is_active(&self) -> bool {
        !matches!(self, DisasterStatus::Resolved | DisasterStatus::Closed)
    }
}

impl FromStr for DisasterStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisasterStatus::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .or_else(|| DisasterStatus::from_label(s))
            .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", s)))
    }
}

impl fmt::Display for DisasterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic position of an incident.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Contact details of the citizen who filed a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    pub name: String,
    pub contact: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

/// One recorded change of workflow state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub from: DisasterStatus,
    pub to: DisasterStatus,
    pub changed_at: DateTime<Utc>,
}

/// A submitted emergency tracked through the status workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterReport {
    pub id: String,
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub affected_area: String,
    pub severity: Severity,
    pub status: DisasterStatus,
    pub reported_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reporter: Reporter,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default)]
    pub responses: Vec<DisasterResponse>,
    #[serde(default)]
    pub status_history: Vec<StatusChange>,
    /// Internal version for optimistic concurrency control
    #[serde(default)]
    pub version: i64,
}

/// Request body for submitting a new report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub affected_area: String,
    pub severity: Severity,
    pub reporter: Reporter,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CreateReportRequest {
    /// Reject submissions with any required field left blank.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("Title", &self.title),
            ("Description", &self.description),
            ("Location", &self.location),
            ("Reporter name", &self.reporter.name),
            ("Reporter contact", &self.reporter.contact),
            ("Reporter email", &self.reporter.email),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Request body for changing a report's status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: DisasterStatus,
    /// Expected version for optimistic concurrency control
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// Request body for applying one status to several reports.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatusRequest {
    pub report_ids: Vec<String>,
    pub status: DisasterStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateReportRequest {
        serde_json::from_value(serde_json::json!({
            "type": "flood",
            "title": "River overflow",
            "description": "Water over the bank",
            "location": "Riverside",
            "severity": "high",
            "reporter": {
                "name": "Ana",
                "contact": "555-0100",
                "email": "ana@example.com"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_type_wire_names_and_labels() {
        let t: DisasterType = serde_json::from_str("\"volcanic_eruption\"").unwrap();
        assert_eq!(t, DisasterType::VolcanicEruption);
        assert_eq!(t.label(), "Volcanic Eruption");
        assert_eq!("industrial_accident".parse::<DisasterType>().unwrap().label(), "Industrial Accident");
        assert!("meteor".parse::<DisasterType>().is_err());
    }

    #[test]
    fn test_status_labels_round_trip() {
        for status in DisasterStatus::ALL {
            assert_eq!(DisasterStatus::from_label(status.label()), Some(status));
        }
        assert!(!DisasterStatus::Resolved.is_active());
        assert!(!DisasterStatus::Closed.is_active());
        assert!(DisasterStatus::Reviewing.is_active());
        assert_eq!("Responding".parse::<DisasterStatus>().unwrap(), DisasterStatus::Responding);
        assert_eq!("closed".parse::<DisasterStatus>().unwrap(), DisasterStatus::Closed);
        assert!("archived".parse::<DisasterStatus>().is_err());
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let mut req = request();
        req.title = "  ".to_string();
        req.reporter.email = String::new();

        match req.validate() {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("Title"));
                assert!(msg.contains("Reporter email"));
                assert!(!msg.contains("Location"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_type_fails_to_deserialize() {
        let result: Result<CreateReportRequest, _> = serde_json::from_value(serde_json::json!({
            "title": "x",
            "severity": "low",
            "reporter": { "name": "a", "contact": "b", "email": "c" }
        }));
        assert!(result.is_err());
    }
}
