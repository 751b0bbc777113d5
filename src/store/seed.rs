//! Demo dataset loaded at startup.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{
    Coordinates, DisasterReport, DisasterResponse, DisasterStatus, DisasterType, Reporter,
    Responder, Role, Severity, User,
};

struct SeedReport {
    disaster_type: DisasterType,
    title: &'static str,
    description: &'static str,
    location: &'static str,
    coordinates: (f64, f64),
    affected_area: &'static str,
    severity: Severity,
    status: DisasterStatus,
    /// minutes before `now`
    reported_ago: i64,
    updated_ago: i64,
    reporter: (&'static str, &'static str, &'static str, Option<&'static str>),
    response: Option<SeedResponse>,
}

struct SeedResponse {
    responder: (&'static str, &'static str, &'static str),
    message: &'static str,
    action_taken: &'static str,
    resources: &'static [&'static str],
    created_ago: i64,
}

fn seed_reports() -> Vec<SeedReport> {
    vec![
        SeedReport {
            disaster_type: DisasterType::Earthquake,
            title: "7.2 Magnitude Earthquake",
            description: "Strong earthquake causing significant building damage and infrastructure disruption.",
            location: "San Francisco, CA",
            coordinates: (37.7749, -122.4194),
            affected_area: "Downtown and surrounding areas within 10-mile radius",
            severity: Severity::Critical,
            status: DisasterStatus::Responding,
            reported_ago: 120,
            updated_ago: 30,
            reporter: (
                "John Smith",
                "+1 (415) 555-1234",
                "john.smith@example.com",
                Some("City Emergency Services"),
            ),
            response: Some(SeedResponse {
                responder: ("admin1", "Sarah Johnson", "Emergency Coordinator"),
                message: "Dispatching search and rescue teams to the most affected areas.",
                action_taken: "Deployed 5 rescue teams, set up 2 emergency shelters",
                resources: &["Medical supplies", "Emergency shelter", "Rescue teams"],
                created_ago: 45,
            }),
        },
        SeedReport {
            disaster_type: DisasterType::Flood,
            title: "Severe Flooding on 5th Street",
            description: "Flash flooding after heavy rainfall. Multiple streets underwater and several homes affected.",
            location: "Miami, FL",
            coordinates: (25.7617, -80.1918),
            affected_area: "5th Street and surrounding neighborhoods",
            severity: Severity::High,
            status: DisasterStatus::Reviewing,
            reported_ago: 12 * 60,
            updated_ago: 3 * 60,
            reporter: ("Maria Rodriguez", "+1 (305) 555-2468", "maria.r@example.com", None),
            response: None,
        },
        SeedReport {
            disaster_type: DisasterType::Wildfire,
            title: "Hillside Wildfire",
            description: "Rapidly spreading wildfire moving towards residential areas. Immediate evacuation recommended.",
            location: "Los Angeles, CA",
            coordinates: (34.0522, -118.2437),
            affected_area: "Western hills, extending 15 miles",
            severity: Severity::Critical,
            status: DisasterStatus::Responding,
            reported_ago: 5 * 60,
            updated_ago: 60,
            reporter: (
                "David Chen",
                "+1 (213) 555-3690",
                "d.chen@example.com",
                Some("Local Fire Department"),
            ),
            response: None,
        },
        SeedReport {
            disaster_type: DisasterType::IndustrialAccident,
            title: "Chemical Spill at Industrial Park",
            description: "Hazardous chemical spill at the northern industrial complex. Air quality affected.",
            location: "Houston, TX",
            coordinates: (29.7604, -95.3698),
            affected_area: "2-mile radius around North Industrial Park",
            severity: Severity::Medium,
            status: DisasterStatus::Resolved,
            reported_ago: 8 * 60,
            updated_ago: 4 * 60,
            reporter: (
                "Robert Williams",
                "+1 (713) 555-7890",
                "r.williams@example.com",
                Some("Facility Management"),
            ),
            response: Some(SeedResponse {
                responder: ("admin3", "Michael Douglas", "Environmental Specialist"),
                message: "Containment teams have successfully contained the spill. Air quality returning to normal levels.",
                action_taken: "Chemical neutralization and containment procedures",
                resources: &["HazMat team", "Air quality monitoring", "Decontamination equipment"],
                created_ago: 4 * 60,
            }),
        },
        SeedReport {
            disaster_type: DisasterType::Tornado,
            title: "Tornado Sighting",
            description: "Tornado spotted moving northeast. Seeking confirmation and assessment of damage.",
            location: "Oklahoma City, OK",
            coordinates: (35.4676, -97.5164),
            affected_area: "Eastern suburbs",
            severity: Severity::High,
            status: DisasterStatus::Reported,
            reported_ago: 30,
            updated_ago: 15,
            reporter: ("Emily Johnson", "+1 (405) 555-1122", "emily.j@example.com", None),
            response: None,
        },
    ]
}

/// Five demo reports with timestamps relative to `now`, most recent listing first.
pub fn demo_reports(now: DateTime<Utc>) -> Vec<DisasterReport> {
    seed_reports()
        .into_iter()
        .map(|seed| {
            let id = Uuid::new_v4().to_string();
            let (name, contact, email, organization) = seed.reporter;

            let responses = seed
                .response
                .map(|r| {
                    let (responder_id, responder_name, role) = r.responder;
                    vec![DisasterResponse {
                        id: Uuid::new_v4().to_string(),
                        disaster_id: id.clone(),
                        responder: Responder {
                            id: responder_id.to_string(),
                            name: responder_name.to_string(),
                            role: role.to_string(),
                        },
                        message: r.message.to_string(),
                        action_taken: Some(r.action_taken.to_string()),
                        resources_allocated: Some(
                            r.resources.iter().map(|s| s.to_string()).collect(),
                        ),
                        created_at: now - Duration::minutes(r.created_ago),
                    }]
                })
                .unwrap_or_default();

            DisasterReport {
                id,
                disaster_type: seed.disaster_type,
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                location: seed.location.to_string(),
                coordinates: Some(Coordinates {
                    lat: seed.coordinates.0,
                    lng: seed.coordinates.1,
                }),
                affected_area: seed.affected_area.to_string(),
                severity: seed.severity,
                status: seed.status,
                reported_at: now - Duration::minutes(seed.reported_ago),
                updated_at: now - Duration::minutes(seed.updated_ago),
                reporter: Reporter {
                    name: name.to_string(),
                    contact: contact.to_string(),
                    email: email.to_string(),
                    organization: organization.map(str::to_string),
                },
                images: Vec::new(),
                responses,
                status_history: Vec::new(),
                version: 1,
            }
        })
        .collect()
}

/// Two citizens and two administrators.
pub fn demo_users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, role: Role, org: Option<&str>, contact: &str| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        organization: org.map(str::to_string),
        contact: Some(contact.to_string()),
    };

    vec![
        user(
            "user1",
            "John Smith",
            "john.smith@example.com",
            Role::User,
            Some("City Emergency Services"),
            "+1 (415) 555-1234",
        ),
        user(
            "user2",
            "Maria Rodriguez",
            "maria.r@example.com",
            Role::User,
            None,
            "+1 (305) 555-2468",
        ),
        user(
            "admin1",
            "Sarah Johnson",
            "sarah.j@emergencyresponse.gov",
            Role::Admin,
            Some("National Emergency Response Center"),
            "+1 (202) 555-9876",
        ),
        user(
            "admin2",
            "Thomas Wright",
            "t.wright@emergencyresponse.gov",
            Role::Admin,
            Some("National Emergency Response Center"),
            "+1 (202) 555-5432",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_reports_hold_invariants() {
        let now = Utc::now();
        let reports = demo_reports(now);
        assert_eq!(reports.len(), 5);

        for report in &reports {
            assert!(report.updated_at >= report.reported_at);
            assert!(report.updated_at <= now);
            for response in &report.responses {
                assert_eq!(response.disaster_id, report.id);
            }
        }

        let mut ids: Vec<_> = reports.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_demo_users_roles() {
        let users = demo_users();
        assert_eq!(users.iter().filter(|u| u.role == Role::Admin).count(), 2);
        assert_eq!(users.iter().filter(|u| u.role == Role::User).count(), 2);
    }
}
