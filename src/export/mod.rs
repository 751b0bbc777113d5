//! Report exports for download.

mod csv;
mod pdf;

pub use self::csv::*;
pub use self::pdf::*;

use chrono::{DateTime, Utc};

use crate::models::DisasterReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// `disaster_reports_<YYYY-MM-DD>.<ext>`
    pub fn filename(&self, at: DateTime<Utc>) -> String {
        format!(
            "disaster_reports_{}.{}",
            at.format("%Y-%m-%d"),
            self.extension()
        )
    }

    pub fn render(&self, reports: &[DisasterReport], at: DateTime<Utc>) -> Vec<u8> {
        match self {
            ExportFormat::Csv => render_csv(reports).into_bytes(),
            ExportFormat::Pdf => render_pdf(&layout(reports, at)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_filenames() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
        assert_eq!(ExportFormat::Csv.filename(at), "disaster_reports_2024-03-09.csv");
        assert_eq!(ExportFormat::Pdf.filename(at), "disaster_reports_2024-03-09.pdf");
    }

    #[test]
    fn test_render_dispatch() {
        let at = Utc::now();
        let csv = ExportFormat::Csv.render(&[], at);
        assert!(csv.starts_with(b"ID,Type,Title"));
        let pdf = ExportFormat::Pdf.render(&[], at);
        assert!(pdf.starts_with(b"%PDF-1.4"));
    }
}
