//! PDF rendering of report lists.
//!
//! Layout is computed in millimetres with a top-left origin, then written as a
//! single PDF 1.4 file using the built-in Helvetica font.

use chrono::{DateTime, Utc};

use crate::models::DisasterReport;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MM_TO_PT: f32 = 72.0 / 25.4;

const MARGIN_X: f32 = 20.0;
const TABLE_WIDTH: f32 = 170.0;
const ROW_HEIGHT: f32 = 8.0;
const HEADER_Y: f32 = 40.0;
const PAGE_TOP_Y: f32 = 20.0;
/// Rows continue on a new page once the cursor passes this line.
const PAGE_BREAK_Y: f32 = 280.0;

const HEADER_GRAY: u8 = 211;
const STRIPE_GRAY: u8 = 240;

pub const PDF_COLUMNS: [&str; 6] = ["Type", "Title", "Location", "Severity", "Status", "Reported"];

/// One drawing instruction, in millimetres from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: u8,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub ops: Vec<DrawOp>,
}

/// Shorten `value` to `keep` characters plus an ellipsis when it exceeds `max`.
pub fn truncate(value: &str, max: usize, keep: usize) -> String {
    if value.chars().count() > max {
        let head: String = value.chars().take(keep).collect();
        format!("{}...", head)
    } else {
        value.to_string()
    }
}

fn column_x(index: usize) -> f32 {
    MARGIN_X + index as f32 * (TABLE_WIDTH / PDF_COLUMNS.len() as f32)
}

fn text_row(page: &mut PdfPage, cells: &[String], y: f32) {
    for (i, cell) in cells.iter().enumerate() {
        page.ops.push(DrawOp::Text {
            x: column_x(i),
            y,
            size: 10.0,
            text: cell.clone(),
        });
    }
}

fn band(page: &mut PdfPage, y: f32, gray: u8) {
    page.ops.push(DrawOp::FillRect {
        x: MARGIN_X,
        y: y - 5.0,
        width: TABLE_WIDTH,
        height: ROW_HEIGHT,
        gray,
    });
}

fn cells(report: &DisasterReport) -> Vec<String> {
    vec![
        report.disaster_type.label().to_string(),
        truncate(&report.title, 20, 17),
        truncate(&report.location, 15, 12),
        report.severity.label().to_string(),
        report.status.label().to_string(),
        report.reported_at.format("%Y-%m-%d").to_string(),
    ]
}

/// Lay out the report table across as many pages as needed.
pub fn layout(reports: &[DisasterReport], generated_at: DateTime<Utc>) -> Vec<PdfPage> {
    let mut first = PdfPage::default();
    first.ops.push(DrawOp::Text {
        x: MARGIN_X,
        y: 20.0,
        size: 18.0,
        text: "Disaster Management Report".to_string(),
    });
    first.ops.push(DrawOp::Text {
        x: MARGIN_X,
        y: 30.0,
        size: 12.0,
        text: format!(
            "Generated on: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    });

    band(&mut first, HEADER_Y, HEADER_GRAY);
    let header: Vec<String> = PDF_COLUMNS.iter().map(|c| c.to_string()).collect();
    text_row(&mut first, &header, HEADER_Y);

    let mut pages = Vec::new();
    let mut page = first;
    let mut y = HEADER_Y + 10.0;

    for (index, report) in reports.iter().enumerate() {
        if y > PAGE_BREAK_Y {
            pages.push(std::mem::take(&mut page));
            y = PAGE_TOP_Y;
        }

        if index % 2 == 0 {
            band(&mut page, y, STRIPE_GRAY);
        }
        text_row(&mut page, &cells(report), y);
        y += ROW_HEIGHT;
    }

    pages.push(page);
    pages
}

/// Escape a string for a PDF literal; characters outside printable ASCII become `?`.
fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

fn content_stream(page: &PdfPage) -> String {
    let mut stream = String::new();
    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                gray,
            } => {
                stream.push_str(&format!(
                    "{:.3} g\n{:.2} {:.2} {:.2} {:.2} re f\n",
                    *gray as f32 / 255.0,
                    x * MM_TO_PT,
                    (PAGE_HEIGHT_MM - y - height) * MM_TO_PT,
                    width * MM_TO_PT,
                    height * MM_TO_PT,
                ));
            }
            DrawOp::Text { x, y, size, text } => {
                stream.push_str(&format!(
                    "0 g\nBT /F1 {:.1} Tf {:.2} {:.2} Td {} Tj ET\n",
                    size,
                    x * MM_TO_PT,
                    (PAGE_HEIGHT_MM - y) * MM_TO_PT,
                    pdf_string(text),
                ));
            }
        }
    }
    stream
}

/// Serialize pages into a complete PDF document.
pub fn render_pdf(pages: &[PdfPage]) -> Vec<u8> {
    let page_count = pages.len();
    // catalog, page tree, font, then a page and its content stream per page
    let object_count = 3 + 2 * page_count;
    let page_id = |i: usize| 4 + 2 * i;

    let mut objects: Vec<String> = Vec::with_capacity(object_count);
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        page_count
    ));
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );

    for (i, page) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH_MM * MM_TO_PT,
            PAGE_HEIGHT_MM * MM_TO_PT,
            page_id(i) + 1
        ));
        let stream = content_stream(page);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    fn many_reports(n: usize) -> Vec<DisasterReport> {
        let template = seed::demo_reports(Utc::now()).remove(0);
        (0..n)
            .map(|i| DisasterReport {
                id: format!("r{}", i),
                ..template.clone()
            })
            .collect()
    }

    fn texts(page: &PdfPage) -> Vec<&str> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short title", 20, 17), "Short title");
        assert_eq!(truncate("Exactly twenty chars", 20, 17), "Exactly twenty chars");
        assert_eq!(
            truncate("Chemical Spill at Industrial Park", 20, 17),
            "Chemical Spill at..."
        );
        assert_eq!(truncate("Oklahoma City, OK", 15, 12), "Oklahoma Cit...");
    }

    #[test]
    fn test_first_page_has_title_and_header() {
        let pages = layout(&seed::demo_reports(Utc::now()), Utc::now());
        assert_eq!(pages.len(), 1);
        let page_texts = texts(&pages[0]);
        assert_eq!(page_texts[0], "Disaster Management Report");
        assert!(page_texts[1].starts_with("Generated on: "));
        assert_eq!(&page_texts[2..8], &PDF_COLUMNS);
        assert!(page_texts.contains(&"7.2 Magnitude Ear..."));
    }

    #[test]
    fn test_alternate_rows_are_shaded() {
        let pages = layout(&many_reports(4), Utc::now());
        let stripes = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect { gray, .. } if *gray == STRIPE_GRAY))
            .count();
        assert_eq!(stripes, 2);
    }

    #[test]
    fn test_paginates_past_bottom_bound() {
        // rows start at y=50 and break once y passes 280: 29 rows fit on page one
        let pages = layout(&many_reports(29), Utc::now());
        assert_eq!(pages.len(), 1);

        let pages = layout(&many_reports(30), Utc::now());
        assert_eq!(pages.len(), 2);
        assert_eq!(texts(&pages[1]).len(), 6);
        match &pages[1].ops[0] {
            DrawOp::FillRect { y, .. } => assert_eq!(*y, PAGE_TOP_Y - 5.0),
            DrawOp::Text { y, .. } => assert_eq!(*y, PAGE_TOP_Y),
        }
    }

    #[test]
    fn test_render_produces_well_formed_document() {
        let pages = layout(&many_reports(40), Utc::now());
        let bytes = render_pdf(&pages);
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("/Count 2"));

        let startxref: usize = text
            .rsplit("startxref\n")
            .next()
            .unwrap()
            .lines()
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert!(text[startxref..].starts_with("xref\n"));

        // every xref entry points at its object header
        let entries: Vec<usize> = text[startxref..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 3 + 2 * 2);
        for (i, offset) in entries.iter().enumerate() {
            assert!(text[*offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_pdf_string_escapes() {
        assert_eq!(pdf_string("a(b)c\\"), "(a\\(b\\)c\\\\)");
        assert_eq!(pdf_string("Zürich"), "(Z?rich)");
    }
}
