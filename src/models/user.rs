//! User record consulted by the identity provider and by author resolution.

use serde::{Deserialize, Serialize};

/// A registered user.
///
/// The access token credential lives only in the users table and is never
/// part of this representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub admin: bool,
    pub created_at: String,
}
