//! Lotus Client - HTTP client for the salon API server
//!
//! Provides network-based HTTP calls to the backend REST API.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, CurrentUserResponse, LoginResponse, UserInfo};
