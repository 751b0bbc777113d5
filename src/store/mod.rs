//! Report store: the only stateful component of the service.
//!
//! Holds the report collection in memory for the lifetime of the process and
//! exposes the report, status workflow and response log operations.

mod filter;
mod repository;
mod response_log;
pub mod seed;
mod workflow;

pub use filter::*;
pub use repository::*;
pub use workflow::*;
