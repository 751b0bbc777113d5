//! Response log endpoints.

use axum::extract::{Path, State};

use super::{error, success, ApiResult, AppJson};
use crate::errors::AppError;
use crate::models::{CreateResponseRequest, DisasterResponse};
use crate::AppState;

/// GET /api/reports/:id/responses - Response feed of a report.
pub async fn list_responses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<DisasterResponse>> {
    let revision_id = state.store.get_revision_id().await;

    match state.store.list_responses(&id).await {
        Some(responses) => success(responses, revision_id),
        None => error(
            AppError::NotFound(format!("Report {} not found", id)),
            revision_id,
        ),
    }
}

/// POST /api/reports/:id/responses - Add a response to a report.
pub async fn add_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<CreateResponseRequest>,
) -> ApiResult<DisasterResponse> {
    let revision_id = state.store.get_revision_id().await;

    match state.store.add_response(&id, request).await {
        Ok(response) => success(response, state.store.get_revision_id().await),
        Err(e) => error(e, revision_id),
    }
}
