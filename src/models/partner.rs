//! Partner entity model.

use serde::{Deserialize, Serialize};

/// A business partner listed alongside destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub image: String,
    pub featured: bool,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new partner.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerRequest {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    pub description: String,
}

/// Request body for updating an existing partner.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}
