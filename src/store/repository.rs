//! In-memory report store.
//!
//! Every mutation holds the write lock for its whole read-modify-write, so each
//! call is atomic with respect to concurrent requests.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::{seed, ReportFilter, WorkflowPolicy};
use crate::errors::AppError;
use crate::models::{
    CreateReportRequest, DashboardStats, DisasterReport, DisasterStatus, Role, RevisionInfo,
    SessionView, StatusChange, User,
};

pub(super) struct StoreState {
    /// Most recent report first
    pub(super) reports: Vec<DisasterReport>,
    users: Vec<User>,
    revision_id: i64,
    generated_at: DateTime<Utc>,
    last_tick: DateTime<Utc>,
}

impl StoreState {
    /// Strictly increasing clock for mutation timestamps.
    pub(super) fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let at = if now > self.last_tick {
            now
        } else {
            self.last_tick + Duration::microseconds(1)
        };
        self.last_tick = at;
        at
    }

    pub(super) fn bump_revision(&mut self, at: DateTime<Utc>) -> i64 {
        self.revision_id += 1;
        self.generated_at = at;
        self.revision_id
    }

    pub(super) fn report_mut(&mut self, id: &str) -> Result<&mut DisasterReport, AppError> {
        self.reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))
    }
}

pub(super) fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Report {} not found", id))
}

/// Owns the canonical report collection for the lifetime of the process.
pub struct ReportStore {
    pub(super) state: RwLock<StoreState>,
    policy: WorkflowPolicy,
}

impl ReportStore {
    /// Create a store holding the given reports and users.
    pub fn new(policy: WorkflowPolicy, reports: Vec<DisasterReport>, users: Vec<User>) -> Self {
        let now = Utc::now();
        let last_tick = reports
            .iter()
            .flat_map(|r| {
                std::iter::once(r.updated_at).chain(r.responses.iter().map(|resp| resp.created_at))
            })
            .fold(now, |acc, t| acc.max(t));

        Self {
            state: RwLock::new(StoreState {
                reports,
                users,
                revision_id: 0,
                generated_at: now,
                last_tick,
            }),
            policy,
        }
    }

    /// Create a store preloaded with the demo reports and users.
    pub fn seeded(policy: WorkflowPolicy) -> Self {
        Self::new(policy, seed::demo_reports(Utc::now()), seed::demo_users())
    }

    pub fn policy(&self) -> WorkflowPolicy {
        self.policy
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> i64 {
        self.state.read().await.revision_id
    }

    /// Get revision info.
    pub async fn get_revision_info(&self) -> RevisionInfo {
        let state = self.state.read().await;
        RevisionInfo {
            revision_id: state.revision_id,
            generated_at: state.generated_at,
        }
    }

    // ==================== REPORT OPERATIONS ====================

    /// Submit a new report. It is placed first and starts in `reported`.
    pub async fn create_report(
        &self,
        request: CreateReportRequest,
    ) -> Result<DisasterReport, AppError> {
        request.validate()?;

        let mut state = self.state.write().await;
        let now = state.tick();

        let report = DisasterReport {
            id: uuid::Uuid::new_v4().to_string(),
            disaster_type: request.disaster_type,
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            location: request.location.trim().to_string(),
            coordinates: request.coordinates,
            affected_area: request.affected_area.trim().to_string(),
            severity: request.severity,
            status: DisasterStatus::Reported,
            reported_at: now,
            updated_at: now,
            reporter: request.reporter,
            images: request.images,
            responses: Vec::new(),
            status_history: Vec::new(),
            version: 1,
        };

        state.reports.insert(0, report.clone());
        state.bump_revision(now);

        tracing::info!(
            report_id = %report.id,
            disaster_type = %report.disaster_type,
            severity = %report.severity,
            "Report created"
        );

        Ok(report)
    }

    /// Snapshot of all reports, most recent first.
    pub async fn list_reports(&self) -> Vec<DisasterReport> {
        self.state.read().await.reports.clone()
    }

    /// Reports matching `filter`, in collection order.
    pub async fn filter_reports(&self, filter: &ReportFilter) -> Vec<DisasterReport> {
        filter.apply(&self.state.read().await.reports)
    }

    /// Get a report by ID.
    pub async fn get_report(&self, id: &str) -> Option<DisasterReport> {
        self.state
            .read()
            .await
            .reports
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    // ==================== STATUS WORKFLOW ====================

    /// Move a report to `status`, with an optional optimistic version check.
    pub async fn set_status(
        &self,
        id: &str,
        status: DisasterStatus,
        expected_version: Option<i64>,
    ) -> Result<DisasterReport, AppError> {
        let mut state = self.state.write().await;
        let policy = self.policy;

        let report = state.report_mut(id)?;

        if let Some(expected) = expected_version {
            if report.version != expected {
                tracing::warn!(
                    report_id = %id,
                    expected,
                    current = report.version,
                    "Rejected stale status update"
                );
                return Err(AppError::Conflict {
                    message: format!(
                        "Version mismatch: expected {}, current {}",
                        expected, report.version
                    ),
                    current_version: report.version,
                });
            }
        }

        policy.check(report.status, status).inspect_err(|_| {
            tracing::warn!(report_id = %id, from = %report.status, to = %status, "Rejected status transition");
        })?;

        let now = state.tick();
        let report = state.report_mut(id)?;
        apply_status(report, status, now);
        let updated = report.clone();
        state.bump_revision(now);

        Ok(updated)
    }

    /// Apply one status to several reports. Nothing changes unless every report
    /// exists and accepts the transition.
    pub async fn batch_set_status(
        &self,
        ids: &[String],
        status: DisasterStatus,
    ) -> Result<Vec<DisasterReport>, AppError> {
        if ids.is_empty() {
            return Err(AppError::Validation("No report ids provided".to_string()));
        }

        let mut state = self.state.write().await;

        for id in ids {
            let report = state
                .reports
                .iter()
                .find(|r| &r.id == id)
                .ok_or_else(|| not_found(id))?;
            self.policy.check(report.status, status)?;
        }

        let now = state.tick();
        let mut updated = Vec::with_capacity(ids.len());
        for id in ids {
            let report = state.report_mut(id)?;
            apply_status(report, status, now);
            updated.push(report.clone());
        }
        state.bump_revision(now);

        tracing::info!(count = updated.len(), to = %status, "Batch status update applied");

        Ok(updated)
    }

    /// Recorded status changes of a report, oldest first.
    pub async fn status_history(&self, id: &str) -> Option<Vec<StatusChange>> {
        self.get_report(id).await.map(|r| r.status_history)
    }

    // ==================== DASHBOARD & USERS ====================

    pub async fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::from_reports(&self.state.read().await.reports)
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.state.read().await.users.clone()
    }

    /// Resolve the view a user gets, or `None` for an unknown user.
    pub async fn session_view(&self, user_id: &str) -> Option<SessionView> {
        let state = self.state.read().await;
        let user = state.users.iter().find(|u| u.id == user_id)?.clone();

        let view = match user.role {
            Role::Admin => SessionView::Admin {
                stats: DashboardStats::from_reports(&state.reports),
                user,
            },
            Role::User => SessionView::Citizen {
                reports: state
                    .reports
                    .iter()
                    .filter(|r| r.reporter.email.eq_ignore_ascii_case(&user.email))
                    .cloned()
                    .collect(),
                user,
            },
        };

        Some(view)
    }
}

fn apply_status(report: &mut DisasterReport, to: DisasterStatus, at: DateTime<Utc>) {
    let from = report.status;
    if from != to {
        report.status_history.push(StatusChange {
            from,
            to,
            changed_at: at,
        });
        tracing::info!(report_id = %report.id, %from, %to, "Report status changed");
    }
    report.status = to;
    report.updated_at = at;
    report.version += 1;
}
