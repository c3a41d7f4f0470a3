//! Error type shared by the client, forms and admin flows.
//!
//! Every failure ends up as a single user-facing string (`user_message`),
//! which is what the CLI prints and what the admin flows keep as their
//! inline error text.

use reqwest::StatusCode;
use thiserror::Error;

use crate::forms::ValidationError;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request failed with status {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("upload rejected: {0}")]
    Upload(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AdminError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        AdminError::NotFound {
            resource: resource.into(),
        }
    }

    /// Text shown to the admin user in place of the failed action.
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Network(e) if e.is_connect() => {
                "Could not reach the server. Please check your connection.".to_string()
            }
            AdminError::Network(e) if e.is_timeout() => "The request timed out.".to_string(),
            AdminError::Network(_) => "Network error. Please try again.".to_string(),
            AdminError::Http { message, .. } => message.clone(),
            AdminError::NotFound { resource } => format!("{} not found", capitalize(resource)),
            AdminError::Validation(v) => v.first_message().to_string(),
            AdminError::Decode(_) => "The server returned an unexpected response.".to_string(),
            AdminError::Upload(msg) => msg.clone(),
            AdminError::Io(e) => format!("Could not read file: {}", e),
            AdminError::Config(msg) => msg.clone(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AdminError::Http { status, .. } => Some(*status),
            AdminError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            AdminError::Network(e) => e.status(),
            _ => None,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub type Result<T, E = AdminError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldError;

    #[test]
    fn test_http_error_surfaces_server_message() {
        let err = AdminError::Http {
            status: StatusCode::CONFLICT,
            message: "Slug already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Slug already exists");
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn test_not_found_message_is_capitalized() {
        let err = AdminError::not_found("blog post");
        assert_eq!(err.user_message(), "Blog post not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_validation_error_uses_first_field_message() {
        let err: AdminError = ValidationError::new(vec![
            FieldError::new("title", "Title is required"),
            FieldError::new("slug", "Slug is required"),
        ])
        .into();
        assert_eq!(err.user_message(), "Title is required");
        assert!(err.status().is_none());
    }
}
