use serde::Serialize;

use super::{is_valid_email, non_blank, ValidationError, Validator};
use crate::client::ApiClient;
use crate::error::{AdminError, Result};
use crate::models::Review;

/// Product review form, POST /api/products/reviews
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub product_id: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub comment: String,
}

impl ReviewDraft {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let email_ok = self
            .email
            .as_deref()
            .map_or(true, |e| e.trim().is_empty() || is_valid_email(e));

        Validator::new()
            .text("productId", "Product", &self.product_id, 1)
            .text("userName", "Name", &self.user_name, 2)
            .check((1..=5).contains(&self.rating), "rating", "Rating must be between 1 and 5")
            .text("comment", "Comment", &self.comment, 5)
            .check(email_ok, "email", "Please enter a valid email address")
            .finish()
    }

    pub async fn submit(&self, client: &ApiClient) -> Result<Review> {
        self.validate().map_err(AdminError::Validation)?;

        let payload = ReviewDraft {
            email: non_blank(self.email.clone()),
            title: non_blank(self.title.clone()),
            comment: self.comment.trim().to_string(),
            ..self.clone()
        };
        client.create_review(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rating: u8) -> ReviewDraft {
        ReviewDraft {
            product_id: "p1".to_string(),
            user_name: "Sam".to_string(),
            rating,
            comment: "Loved the examples".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(draft(1).validate().is_ok());
        assert!(draft(5).validate().is_ok());
        for rating in [0, 6] {
            let err = draft(rating).validate().unwrap_err();
            assert_eq!(err.for_field("rating"), Some("Rating must be between 1 and 5"));
        }
    }

    #[test]
    fn test_optional_email_checked_when_present() {
        let mut review = draft(4);
        review.email = Some("".to_string());
        assert!(review.validate().is_ok());
        review.email = Some("sam@".to_string());
        assert!(review.validate().is_err());
    }
}
