//! SignMeUp event registration
//!
//! Organizers create events with a per-group size limit and an overall
//! participant cap; attendees register as groups of members. This library
//! provides the registration service (HTTP API, storage, capacity rules),
//! the typed REST client and headless view models for the client screens.

pub mod config;
pub mod client;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod validation;
pub mod views;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{SignMeUpError, Result};

// Re-export main components for easy access
pub use client::ApiClient;
pub use database::DatabaseService;
pub use handlers::create_router;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
