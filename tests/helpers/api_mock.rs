//! Mock registration API server for testing
//!
//! This module provides a mock HTTP server that simulates the registration
//! REST API. It uses wiremock to serve canned events, groups and error bodies.

use std::time::Duration;
use serde_json::json;
use signmeup::client::ApiClient;
use signmeup::models::{Event, GroupWithMembers};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock registration API server
pub struct ApiMockServer {
    pub server: MockServer,
}

impl ApiMockServer {
    /// Start a new mock server
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    /// Base URL the client should use, including the `/api` prefix
    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    /// Client pointed at this server
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url(), Duration::from_secs(5)).expect("mock base url is valid")
    }

    pub async fn mock_get_event(&self, event: &Event) {
        Mock::given(method("GET"))
            .and(path(format!("/api/events/{}", event.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(event))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get_groups(&self, event: &Event, groups: &[GroupWithMembers]) {
        Mock::given(method("GET"))
            .and(path(format!("/api/events/{}/groups", event.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(groups))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get_group(&self, group: &GroupWithMembers) {
        Mock::given(method("GET"))
            .and(path(format!("/api/groups/{}", group.id())))
            .respond_with(ResponseTemplate::new(200).set_body_json(group))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_create_group(&self, created: &GroupWithMembers) {
        Mock::given(method("POST"))
            .and(path("/api/groups"))
            .respond_with(ResponseTemplate::new(200).set_body_json(created))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_update_group(&self, updated: &GroupWithMembers) {
        Mock::given(method("PUT"))
            .and(path(format!("/api/groups/{}", updated.id())))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_delete_group(&self, group_id: i64) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/groups/{}", group_id)))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path` with the service's JSON error body
    pub async fn mock_error(&self, verb: &str, route: &str, status: u16, message: &str) {
        let body = json!({ "error": { "status": status, "message": message } });

        Mock::given(method(verb))
            .and(path(format!("/api{}", route)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer slower than the client timeout
    pub async fn mock_slow_event(&self, event: &Event, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(format!("/api/events/{}", event.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(event).set_delay(delay))
            .mount(&self.server)
            .await;
    }
}
