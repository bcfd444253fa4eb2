//! REST client for the registration API
//!
//! Typed async wrappers around the event and group resources. Every call is
//! a single request with the configured timeout; failures are not retried.
//! Non-success responses become [`SignMeUpError::Api`] carrying the status
//! and the message from the service's error body.

use std::time::Duration;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use crate::config::Settings;
use crate::models::{Event, CreateEventRequest, GroupWithMembers, CreateGroupRequest, UpdateGroupRequest};
use crate::utils::errors::{ApiErrorBody, SignMeUpError, Result};
use crate::utils::logging::log_api_error;

const API_NAME: &str = "registration";

/// Client for the registration API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for an absolute base URL such as `http://localhost:3000/api`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("SignMeUp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Create a client from application settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.api_base_url(),
            Duration::from_secs(settings.client.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an event
    pub async fn create_event(&self, request: &CreateEventRequest) -> Result<Event> {
        let response = self.request(Method::POST, "/events").json(request).send().await?;
        self.handle_json(response, "create_event").await
    }

    /// List events, one page at a time
    pub async fn list_events(&self, page: usize, limit: usize) -> Result<Vec<Event>> {
        let response = self
            .request(Method::GET, "/events")
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        self.handle_json(response, "list_events").await
    }

    /// Fetch one event
    pub async fn get_event(&self, event_id: &str) -> Result<Event> {
        let path = format!("/events/{}", urlencoding::encode(event_id));
        let response = self.request(Method::GET, &path).send().await?;
        self.handle_json(response, "get_event").await
    }

    /// Fetch all groups of an event with their members
    pub async fn get_groups(&self, event_id: &str) -> Result<Vec<GroupWithMembers>> {
        let path = format!("/events/{}/groups", urlencoding::encode(event_id));
        let response = self.request(Method::GET, &path).send().await?;
        self.handle_json(response, "get_groups").await
    }

    /// Register a group
    pub async fn create_group(&self, request: &CreateGroupRequest) -> Result<GroupWithMembers> {
        let response = self.request(Method::POST, "/groups").json(request).send().await?;
        self.handle_json(response, "create_group").await
    }

    /// Fetch one group
    pub async fn get_group(&self, group_id: i64) -> Result<GroupWithMembers> {
        let response = self
            .request(Method::GET, &format!("/groups/{}", group_id))
            .send()
            .await?;
        self.handle_json(response, "get_group").await
    }

    /// Apply a partial update to a group
    pub async fn update_group(&self, group_id: i64, request: &UpdateGroupRequest) -> Result<GroupWithMembers> {
        let response = self
            .request(Method::PUT, &format!("/groups/{}", group_id))
            .json(request)
            .send()
            .await?;
        self.handle_json(response, "update_group").await
    }

    /// Delete a group
    pub async fn delete_group(&self, group_id: i64) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/groups/{}", group_id))
            .send()
            .await?;
        self.check_status(response, "delete_group").await.map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "Sending API request");
        self.client.request(method, url)
    }

    async fn handle_json<T: DeserializeOwned>(&self, response: Response, operation: &str) -> Result<T> {
        let response = self.check_status(response, operation).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(&self, response: Response, operation: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status.as_u16(), &body);
        log_api_error(API_NAME, &message, Some(operation));

        Err(SignMeUpError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull the message out of an error body, falling back to the raw text or the status reason
fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.error.message;
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_body() {
        let body = r#"{"error":{"status":409,"message":"Group size limit of 3 exceeded"}}"#;
        assert_eq!(error_message(409, body), "Group size limit of 3 exceeded");
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(400, "plain failure"), "plain failure");
        assert_eq!(error_message(404, ""), "Not Found");
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:3000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        assert!(ApiClient::new("/api", Duration::from_secs(5)).is_err());
    }
}
