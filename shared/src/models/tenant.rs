//! Tenant Model

use serde::{Deserialize, Serialize};

/// Tenant entity (one business account in the multi-tenant system)
///
/// A user session references exactly one active tenant at a time, by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    #[serde(default)]
    pub business_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<i64>,
}
