//! Logging middleware
//!
//! This module provides request logging for the HTTP API and a small
//! tracker for timing individual operations.

use std::time::Instant;
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{info, debug, warn, error, Span};

/// Log method, path, status and duration of every request
pub async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        error!(method = %method, path = %path, status = status.as_u16(), duration_ms = duration_ms, "Request failed");
    } else if status.is_client_error() {
        warn!(method = %method, path = %path, status = status.as_u16(), duration_ms = duration_ms, "Request rejected");
    } else {
        info!(method = %method, path = %path, status = status.as_u16(), duration_ms = duration_ms, "Request completed");
    }

    response
}

/// Performance tracker for measuring operation duration
pub struct PerformanceTracker {
    operation: String,
    start_time: Instant,
    completed: bool,
    _span: Span,
}

impl PerformanceTracker {
    pub fn new(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        let span = tracing::info_span!("performance", operation = %operation);

        Self {
            operation,
            start_time: Instant::now(),
            completed: false,
            _span: span,
        }
    }

    /// Complete the performance tracking and log the result
    pub fn complete(mut self, success: bool) -> u64 {
        self.completed = true;
        let duration_ms = self.start_time.elapsed().as_millis() as u64;

        if success {
            debug!(operation = %self.operation, duration_ms = duration_ms, "Operation completed successfully");
        } else {
            warn!(operation = %self.operation, duration_ms = duration_ms, "Operation failed");
        }

        duration_ms
    }
}

impl Drop for PerformanceTracker {
    fn drop(&mut self) {
        if !self.completed {
            debug!(
                operation = %self.operation,
                duration_ms = self.start_time.elapsed().as_millis() as u64,
                "Performance tracker dropped before completion"
            );
        }
    }
}
