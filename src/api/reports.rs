//! Report and status workflow endpoints.

use axum::extract::{Path, State};
use serde::Deserialize;

use super::{error, success, ApiResult, AppJson, AppQuery};
use crate::errors::AppError;
use crate::models::{
    BatchStatusRequest, CreateReportRequest, DisasterReport, StatusChange, UpdateStatusRequest,
};
use crate::store::{parse_choice, ReportFilter};
use crate::AppState;

/// Report list query parameters. `all` or an empty value disables a filter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Free-text search.
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, rename = "type")]
    pub disaster_type: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Also match the type label in free-text search.
    #[serde(default)]
    pub match_type_label: bool,
}

impl ReportQuery {
    pub fn to_filter(&self) -> Result<ReportFilter, AppError> {
        Ok(ReportFilter {
            text: self.q.clone().filter(|q| !q.is_empty()),
            disaster_type: parse_choice(self.disaster_type.as_deref())?,
            severity: parse_choice(self.severity.as_deref())?,
            status: parse_choice(self.status.as_deref())?,
            match_type_label: self.match_type_label,
        })
    }
}

/// GET /api/reports - List reports, optionally filtered.
pub async fn list_reports(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ReportQuery>,
) -> ApiResult<Vec<DisasterReport>> {
    let revision_id = state.store.get_revision_id().await;

    match params.to_filter() {
        Ok(filter) => success(state.store.filter_reports(&filter).await, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/reports/:id - Get a single report.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DisasterReport> {
    let revision_id = state.store.get_revision_id().await;

    match state.store.get_report(&id).await {
        Some(report) => success(report, revision_id),
        None => error(
            AppError::NotFound(format!("Report {} not found", id)),
            revision_id,
        ),
    }
}

/// POST /api/reports - Submit a new report.
pub async fn create_report(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateReportRequest>,
) -> ApiResult<DisasterReport> {
    let revision_id = state.store.get_revision_id().await;

    match state.store.create_report(request).await {
        Ok(report) => success(report, state.store.get_revision_id().await),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/reports/:id/status - Change a report's status.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateStatusRequest>,
) -> ApiResult<DisasterReport> {
    let revision_id = state.store.get_revision_id().await;

    match state
        .store
        .set_status(&id, request.status, request.expected_version)
        .await
    {
        Ok(report) => success(report, state.store.get_revision_id().await),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/reports/batch/status - Apply one status to several reports.
pub async fn batch_update_status(
    State(state): State<AppState>,
    AppJson(request): AppJson<BatchStatusRequest>,
) -> ApiResult<Vec<DisasterReport>> {
    let revision_id = state.store.get_revision_id().await;

    match state
        .store
        .batch_set_status(&request.report_ids, request.status)
        .await
    {
        Ok(reports) => success(reports, state.store.get_revision_id().await),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/reports/:id/history - Status changes of a report.
pub async fn get_status_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<StatusChange>> {
    let revision_id = state.store.get_revision_id().await;

    match state.store.status_history(&id).await {
        Some(history) => success(history, revision_id),
        None => error(
            AppError::NotFound(format!("Report {} not found", id)),
            revision_id,
        ),
    }
}
