//! Staff Model

use serde::{Deserialize, Serialize};

use super::permission::PermissionsState;

/// Account role of an authenticated actor
///
/// Owners are the tenant's root identity and bypass every permission check;
/// staff capabilities are constrained by the schema on their record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Owner,
    Staff,
}

impl UserType {
    pub fn is_owner(&self) -> bool {
        matches!(self, UserType::Owner)
    }
}

/// Staff member entity (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    pub user_type: UserType,
    pub is_active: bool,
    /// Serialized permission schema blob (present only for non-owner staff
    /// granted login capability)
    pub permissions: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Staff {
    /// Decode the embedded permission blob
    pub fn permissions_state(&self) -> PermissionsState {
        PermissionsState::from_raw(self.permissions.as_deref())
    }
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub username: String,
    pub password: String,
    pub display_name: String,
    /// Serialized permission schema blob
    pub permissions: Option<String>,
}

/// Update staff payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub is_active: Option<bool>,
    /// Serialized permission schema blob (written back by the staff editor)
    pub permissions: Option<String>,
}
