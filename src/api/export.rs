//! CSV and PDF download endpoints.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::{AppQuery, ReportQuery};
use crate::errors::AppErrorWithRevision;
use crate::export::ExportFormat;
use crate::AppState;

/// GET /api/reports/export/csv - Download the filtered reports as CSV.
pub async fn export_csv(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ReportQuery>,
) -> Result<Response, AppErrorWithRevision> {
    export_reports(state, params, ExportFormat::Csv).await
}

/// GET /api/reports/export/pdf - Download the filtered reports as PDF.
pub async fn export_pdf(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ReportQuery>,
) -> Result<Response, AppErrorWithRevision> {
    export_reports(state, params, ExportFormat::Pdf).await
}

async fn export_reports(
    state: AppState,
    params: ReportQuery,
    format: ExportFormat,
) -> Result<Response, AppErrorWithRevision> {
    let revision_id = state.store.get_revision_id().await;
    let filter = params
        .to_filter()
        .map_err(|error| AppErrorWithRevision { error, revision_id })?;

    let reports = state.store.filter_reports(&filter).await;
    let now = Utc::now();
    let body = format.render(&reports, now);

    tracing::info!(
        format = format.extension(),
        count = reports.len(),
        "Exported reports"
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.filename(now)),
            ),
        ],
        body,
    )
        .into_response())
}
