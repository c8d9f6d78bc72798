//! Data models for the travel listing application.
//!
//! All API-facing types serialize with camelCase field names for the frontend.

mod destination;
mod partner;
mod user;

pub use destination::*;
pub use partner::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Summary returned by delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    pub deleted_count: u64,
}
