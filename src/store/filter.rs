//! Query/filter layer: derives display subsets from the report collection.

use std::str::FromStr;

use crate::errors::AppError;
use crate::models::{DisasterReport, DisasterStatus, DisasterType, Severity};

/// Value that disables an enumerated filter.
pub const ALL_SENTINEL: &str = "all";

/// Combined report filter. Every set criterion must match.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Case-insensitive substring searched in title, location and description.
    pub text: Option<String>,
    pub disaster_type: Option<DisasterType>,
    pub severity: Option<Severity>,
    pub status: Option<DisasterStatus>,
    /// Also search the human label of the report type.
    pub match_type_label: bool,
}

impl ReportFilter {
    pub fn matches(&self, report: &DisasterReport) -> bool {
        if let Some(ref text) = self.text {
            let needle = text.to_lowercase();
            let hit = report.title.to_lowercase().contains(&needle)
                || report.location.to_lowercase().contains(&needle)
                || report.description.to_lowercase().contains(&needle)
                || (self.match_type_label
                    && report
                        .disaster_type
                        .label()
                        .to_lowercase()
                        .contains(&needle));
            if !hit {
                return false;
            }
        }

        self.disaster_type.map_or(true, |t| report.disaster_type == t)
            && self.severity.map_or(true, |s| report.severity == s)
            && self.status.map_or(true, |s| report.status == s)
    }

    /// Order-preserving subset of `reports`. The input is never modified.
    pub fn apply(&self, reports: &[DisasterReport]) -> Vec<DisasterReport> {
        reports
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

/// Parse an optional enumerated filter value; blank or `all` means no constraint.
pub fn parse_choice<T>(value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: FromStr<Err = AppError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case(ALL_SENTINEL) => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    fn reports() -> Vec<DisasterReport> {
        seed::demo_reports(chrono::Utc::now())
    }

    fn text(needle: &str) -> ReportFilter {
        ReportFilter {
            text: Some(needle.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let all = reports();
        let filtered = ReportFilter::default().apply(&all);
        let ids: Vec<_> = filtered.iter().map(|r| r.id.clone()).collect();
        let expected: Vec<_> = all.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_text_is_case_insensitive_over_text_fields() {
        let all = reports();
        let filtered = text("FLOOD").apply(&all);
        assert!(!filtered.is_empty());
        for r in &filtered {
            let haystack = format!("{} {} {}", r.title, r.location, r.description).to_lowercase();
            assert!(haystack.contains("flood"));
        }

        let by_city = text("miami").apply(&all);
        assert_eq!(by_city.len(), 1);
    }

    #[test]
    fn test_type_label_only_searched_when_enabled() {
        let all = reports();
        // "Industrial Accident" appears only as the type label of the chemical spill
        assert!(text("accident").apply(&all).is_empty());
        let with_label = ReportFilter {
            match_type_label: true,
            ..text("accident")
        }
        .apply(&all);
        assert_eq!(with_label.len(), 1);
        assert_eq!(with_label[0].disaster_type, DisasterType::IndustrialAccident);
    }

    #[test]
    fn test_severity_filter_is_exact() {
        let all = reports();
        let critical = ReportFilter {
            severity: Some(Severity::Critical),
            ..Default::default()
        }
        .apply(&all);
        let expected = all.iter().filter(|r| r.severity == Severity::Critical).count();
        assert_eq!(critical.len(), expected);
        assert!(critical.iter().all(|r| r.severity == Severity::Critical));
    }

    #[test]
    fn test_combined_filters_intersect() {
        let all = reports();
        let text_only = text("a").apply(&all);
        let severity_only = ReportFilter {
            severity: Some(Severity::High),
            ..Default::default()
        }
        .apply(&all);
        let both = ReportFilter {
            severity: Some(Severity::High),
            ..text("a")
        }
        .apply(&all);

        for r in &both {
            assert!(text_only.iter().any(|t| t.id == r.id));
            assert!(severity_only.iter().any(|s| s.id == r.id));
        }
        let intersection = text_only
            .iter()
            .filter(|t| severity_only.iter().any(|s| s.id == t.id))
            .count();
        assert_eq!(both.len(), intersection);
    }

    #[test]
    fn test_status_and_type_filters() {
        let all = reports();
        let responding = ReportFilter {
            status: Some(DisasterStatus::Responding),
            ..Default::default()
        }
        .apply(&all);
        assert_eq!(responding.len(), 2);

        let tornado = ReportFilter {
            disaster_type: Some(DisasterType::Tornado),
            ..Default::default()
        }
        .apply(&all);
        assert_eq!(tornado.len(), 1);
        assert_eq!(tornado[0].location, "Oklahoma City, OK");
    }

    #[test]
    fn test_parse_choice_sentinel() {
        assert_eq!(parse_choice::<Severity>(None).unwrap(), None);
        assert_eq!(parse_choice::<Severity>(Some("all")).unwrap(), None);
        assert_eq!(parse_choice::<Severity>(Some("")).unwrap(), None);
        assert_eq!(
            parse_choice::<Severity>(Some("critical")).unwrap(),
            Some(Severity::Critical)
        );
        assert!(parse_choice::<Severity>(Some("extreme")).is_err());
    }
}
