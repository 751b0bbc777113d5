//! Data models for the disaster response service.
//!
//! Field names serialize in camelCase to match the web client's interfaces.

mod dashboard;
mod disaster;
mod response;
mod user;

pub use dashboard::*;
pub use disaster::*;
pub use response::*;
pub use user::*;
