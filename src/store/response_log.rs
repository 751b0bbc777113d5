//! Append-only response feed per report.

use super::repository::not_found;
use super::ReportStore;
use crate::errors::AppError;
use crate::models::{CreateResponseRequest, DisasterResponse};

impl ReportStore {
    /// Append a response to a report and refresh the report's `updatedAt`.
    pub async fn add_response(
        &self,
        disaster_id: &str,
        request: CreateResponseRequest,
    ) -> Result<DisasterResponse, AppError> {
        request.validate()?;
        let (action_taken, resources_allocated) = request.normalized();

        let mut state = self.state.write().await;
        if !state.reports.iter().any(|r| r.id == disaster_id) {
            return Err(not_found(disaster_id));
        }

        let now = state.tick();
        let response = DisasterResponse {
            id: uuid::Uuid::new_v4().to_string(),
            disaster_id: disaster_id.to_string(),
            responder: request.responder,
            message: request.message.trim().to_string(),
            action_taken,
            resources_allocated,
            created_at: now,
        };

        let report = state.report_mut(disaster_id)?;
        report.responses.push(response.clone());
        report.updated_at = now;
        report.version += 1;
        state.bump_revision(now);

        tracing::info!(
            report_id = %disaster_id,
            response_id = %response.id,
            responder = %response.responder.name,
            "Response added"
        );

        Ok(response)
    }

    /// Responses of a report in chronological order, or `None` for an unknown report.
    pub async fn list_responses(&self, disaster_id: &str) -> Option<Vec<DisasterResponse>> {
        self.get_report(disaster_id).await.map(|r| r.responses)
    }
}
