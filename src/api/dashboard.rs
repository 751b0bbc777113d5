//! Dashboard and revision endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::{DashboardStats, RevisionInfo};
use crate::AppState;

/// GET /api/dashboard - Aggregate counts for the admin dashboard.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let revision_id = state.store.get_revision_id().await;
    success(state.store.dashboard_stats().await, revision_id)
}

/// GET /api/revision - Get the current revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let revision_info = state.store.get_revision_info().await;
    let revision_id = revision_info.revision_id;
    success(revision_info, revision_id)
}
