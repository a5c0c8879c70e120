//! Shared types for the Lotus Salon suite
//!
//! Common types used across the client crates: data models, the staff
//! permission schema, error types and response structures.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::permission::{
    ActionSet, PageKey, PermissionsState, StaffPermissions, default_permissions,
    parse_permissions,
};
pub use response::ApiResponse;
