//! Administrative responses attached to a disaster report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The administrator who authored a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Responder {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// One entry in a report's append-only response feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisasterResponse {
    pub id: String,
    pub disaster_id: String,
    pub responder: Responder,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_allocated: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Request body for adding a response to a report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponseRequest {
    pub responder: Responder,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub action_taken: Option<String>,
    #[serde(default)]
    pub resources_allocated: Option<Vec<String>>,
}

impl CreateResponseRequest {
    /// Reject responses with a blank message or an unidentified responder.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("Message", &self.message),
            ("Responder id", &self.responder.id),
            ("Responder name", &self.responder.name),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Blank action text is dropped, resource names are trimmed and empty ones removed.
    pub fn normalized(&self) -> (Option<String>, Option<Vec<String>>) {
        let action_taken = self
            .action_taken
            .as_ref()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let resources = self
            .resources_allocated
            .as_ref()
            .map(|list| {
                list.iter()
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty());

        (action_taken, resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str) -> CreateResponseRequest {
        CreateResponseRequest {
            responder: Responder {
                id: "admin1".to_string(),
                name: "Sarah Johnson".to_string(),
                role: "Emergency Coordinator".to_string(),
            },
            message: message.to_string(),
            action_taken: Some("   ".to_string()),
            resources_allocated: Some(vec![" Boats ".to_string(), "".to_string()]),
        }
    }

    #[test]
    fn test_blank_message_rejected() {
        assert!(request("  ").validate().is_err());
        assert!(request("Teams dispatched").validate().is_ok());
    }

    #[test]
    fn test_blank_responder_rejected() {
        let mut req = request("Teams dispatched");
        req.responder.id = " ".to_string();
        req.responder.name = String::new();

        match req.validate() {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("Responder id"));
                assert!(msg.contains("Responder name"));
                assert!(!msg.contains("Message"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_normalized_drops_blank_values() {
        let (action, resources) = request("ok").normalized();
        assert_eq!(action, None);
        assert_eq!(resources, Some(vec!["Boats".to_string()]));
    }
}
