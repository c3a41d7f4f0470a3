use serde::Serialize;

use super::{non_blank, ValidationError, Validator};
use crate::client::ApiClient;
use crate::error::{AdminError, Result};
use crate::models::Message;

/// Public contact form, POST /api/messages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    pub message: String,
}

impl ContactDraft {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        Validator::new()
            .text("fullName", "Full name", &self.full_name, 2)
            .email("email", &self.email)
            .text("message", "Message", &self.message, 10)
            .finish()
    }

    /// Validate and send. The server fills in status and date.
    pub async fn submit(&self, client: &ApiClient) -> Result<Message> {
        self.validate().map_err(AdminError::Validation)?;

        let payload = ContactDraft {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            company: non_blank(self.company.clone()),
            service: non_blank(self.service.clone()),
            budget: non_blank(self.budget.clone()),
            message: self.message.trim().to_string(),
        };
        client.create::<Message, _>(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_validation() {
        let draft = ContactDraft {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            message: "We need a new landing page.".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        let bad = ContactDraft {
            email: "jane@".to_string(),
            message: "short".to_string(),
            ..draft
        };
        let err = bad.validate().unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.first_message(), "Please enter a valid email address");
        assert_eq!(
            err.for_field("message"),
            Some("Message must be at least 10 characters long")
        );
    }
}
