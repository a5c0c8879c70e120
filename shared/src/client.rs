//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication. These types are
//! shared between the API server and the client surfaces.

use serde::{Deserialize, Serialize};

use crate::models::permission::PermissionsState;
use crate::models::staff::UserType;
use crate::models::tenant::Tenant;

// Re-export ApiResponse from response module
pub use crate::response::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
    /// The business the session is scoped to
    pub tenant: Tenant,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    pub user_type: UserType,
    /// Serialized permission schema blob (staff with login capability only)
    #[serde(default)]
    pub permissions: Option<String>,
}

impl UserInfo {
    /// Decode the embedded permission blob
    pub fn permissions_state(&self) -> PermissionsState {
        PermissionsState::from_raw(self.permissions.as_deref())
    }
}

/// Current user response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    pub user_type: UserType,
    #[serde(default)]
    pub permissions: Option<String>,
}
