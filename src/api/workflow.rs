//! Workflow policy endpoint.

use std::collections::BTreeMap;

use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::models::DisasterStatus;
use crate::AppState;

/// Active policy and the targets reachable from every status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowInfo {
    pub policy: String,
    pub transitions: BTreeMap<DisasterStatus, Vec<DisasterStatus>>,
}

/// GET /api/workflow - Describe which status changes are accepted.
pub async fn get_workflow(State(state): State<AppState>) -> ApiResult<WorkflowInfo> {
    let revision_id = state.store.get_revision_id().await;
    let policy = state.store.policy();

    let transitions = DisasterStatus::ALL
        .into_iter()
        .map(|status| (status, policy.allowed_targets(status)))
        .collect();

    success(
        WorkflowInfo {
            policy: policy.to_string(),
            transitions,
        },
        revision_id,
    )
}
