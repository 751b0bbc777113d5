//! User endpoints.

use axum::extract::{Path, State};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{SessionView, User};
use crate::AppState;

/// GET /api/users - List known users.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let revision_id = state.store.get_revision_id().await;
    success(state.store.list_users().await, revision_id)
}

/// GET /api/users/:id/view - Resolve the citizen or admin view for a user.
pub async fn get_session_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SessionView> {
    let revision_id = state.store.get_revision_id().await;

    match state.store.session_view(&id).await {
        Some(view) => success(view, revision_id),
        None => error(
            AppError::NotFound(format!("User {} not found", id)),
            revision_id,
        ),
    }
}
