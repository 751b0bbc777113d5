//! CSV rendering of report lists.

use chrono::{DateTime, Utc};

use crate::models::DisasterReport;

pub const CSV_HEADERS: [&str; 12] = [
    "ID",
    "Type",
    "Title",
    "Description",
    "Location",
    "Affected Area",
    "Severity",
    "Status",
    "Reported At",
    "Reporter Name",
    "Reporter Contact",
    "Reporter Email",
];

/// Quote a free-text field, doubling embedded quotes.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn row(report: &DisasterReport) -> String {
    [
        report.id.clone(),
        report.disaster_type.label().to_string(),
        quote(&report.title),
        quote(&report.description),
        quote(&report.location),
        quote(&report.affected_area),
        report.severity.label().to_string(),
        report.status.label().to_string(),
        format_timestamp(&report.reported_at),
        quote(&report.reporter.name),
        quote(or_na(&report.reporter.contact)),
        quote(or_na(&report.reporter.email)),
    ]
    .join(",")
}

/// Header line followed by one line per report, joined by `\n`.
pub fn render_csv(reports: &[DisasterReport]) -> String {
    std::iter::once(CSV_HEADERS.join(","))
        .chain(reports.iter().map(row))
        .collect::<Vec<_>>()
        .join("\n")
}
