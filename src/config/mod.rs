//! Configuration module for the disaster response backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

use crate::store::WorkflowPolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Load the demo reports and users at startup
    pub seed_demo_data: bool,
    /// Which status transitions are accepted
    pub workflow: WorkflowPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            seed_demo_data: true,
            workflow: WorkflowPolicy::Permissive,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("Invalid {}: {}", name, other)),
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("DISASTER_BIND_ADDR") {
            Some(addr) => addr
                .parse()
                .map_err(|e| format!("Invalid DISASTER_BIND_ADDR: {}", e))?,
            None => defaults.bind_addr,
        };

        let log_level = lookup("DISASTER_LOG_LEVEL").unwrap_or(defaults.log_level);

        let seed_demo_data = match lookup("DISASTER_SEED_DEMO_DATA") {
            Some(value) => parse_bool("DISASTER_SEED_DEMO_DATA", &value)?,
            None => defaults.seed_demo_data,
        };

        let workflow = match lookup("DISASTER_WORKFLOW") {
            Some(value) => value
                .parse()
                .map_err(|e| format!("Invalid DISASTER_WORKFLOW: {}", e))?,
            None => defaults.workflow,
        };

        Ok(Self {
            bind_addr,
            log_level,
            seed_demo_data,
            workflow,
        })
    }
}
