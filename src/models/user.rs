//! User identities and the role-resolved session view.

use serde::{Deserialize, Serialize};

use super::{DashboardStats, DisasterReport};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// A citizen or administrator known to the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

/// What a user sees, decided once from their role.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SessionView {
    /// Citizens see the reports they filed themselves.
    Citizen {
        user: User,
        reports: Vec<DisasterReport>,
    },
    /// Administrators see the triage dashboard.
    Admin { user: User, stats: DashboardStats },
}
