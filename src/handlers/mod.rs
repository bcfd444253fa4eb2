//! HTTP handlers module
//!
//! This module contains the REST handlers organized by resource:
//! - Event handlers for creating, reading and deleting events
//! - Group handlers for registering and maintaining groups
//! - Member handlers for single roster entries

pub mod events;
pub mod extract;
pub mod groups;
pub mod health;
pub mod members;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use crate::config::Settings;
use crate::services::ServiceFactory;

/// Build the API router, nested under the configured base path
pub fn create_router(services: ServiceFactory, settings: &Settings) -> Router {
    let api = api_routes().with_state(services);

    let base_path = settings.server.base_path.trim_end_matches('/');
    let router = if base_path.is_empty() {
        api
    } else {
        Router::new().nest(base_path, api)
    };

    router
        .layer(middleware::from_fn(crate::middleware::log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn api_routes() -> Router<ServiceFactory> {
    Router::new()
        // Event routes
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/:id", get(events::get_event).delete(events::delete_event))
        .route("/events/:id/groups", get(events::list_event_groups))
        // Group routes
        .route("/groups", post(groups::create_group))
        .route(
            "/groups/:id",
            get(groups::get_group).put(groups::update_group).delete(groups::delete_group),
        )
        .route("/groups/:id/members", get(groups::list_group_members))
        // Member routes
        .route("/members", post(members::add_member))
        .route("/members/:id", delete(members::remove_member))
        .route("/health", get(health::health))
}
