//! Per-request logging for outbound API calls.

use reqwest::{Method, StatusCode};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tracks one outbound request from send to completion.
#[derive(Debug)]
pub struct RequestLog {
    pub request_id: String,
    method: Method,
    url: String,
    start: Instant,
}

impl RequestLog {
    pub fn start(method: &Method, url: &str) -> Self {
        let request_id = Uuid::new_v4().to_string();

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            url = %url,
            "outgoing request"
        );

        Self {
            request_id,
            method: method.clone(),
            url: url.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(&self, status: StatusCode) {
        let duration = self.start.elapsed();

        if status.is_server_error() {
            tracing::error!(
                request_id = %self.request_id,
                method = %self.method,
                url = %self.url,
                status = %status,
                duration_ms = %duration.as_millis(),
                "request completed with error"
            );
        } else if status.is_client_error() {
            tracing::warn!(
                request_id = %self.request_id,
                method = %self.method,
                url = %self.url,
                status = %status,
                duration_ms = %duration.as_millis(),
                "request completed with client error"
            );
        } else {
            tracing::info!(
                request_id = %self.request_id,
                method = %self.method,
                url = %self.url,
                status = %status,
                duration_ms = %duration.as_millis(),
                "request completed successfully"
            );
        }
    }

    pub fn failed(&self, error: &reqwest::Error) {
        tracing::error!(
            request_id = %self.request_id,
            method = %self.method,
            url = %self.url,
            error = %error,
            duration_ms = %self.start.elapsed().as_millis(),
            "request failed before a response arrived"
        );
    }
}
