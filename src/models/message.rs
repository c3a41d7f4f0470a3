use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::filter::Listable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Unread,
    Read,
    Replied,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Unread => "unread",
            MessageStatus::Read => "read",
            MessageStatus::Replied => "replied",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unread" => Ok(MessageStatus::Unread),
            "read" => Ok(MessageStatus::Read),
            "replied" => Ok(MessageStatus::Replied),
            other => Err(format!("unknown message status: {}", other)),
        }
    }
}

/// Contact form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Mongoose timestamp, sent alongside or instead of `date`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub status: MessageStatus,
    pub is_email_sent: bool,
}

impl Message {
    pub fn id(&self) -> &str {
        self.id
            .as_deref()
            .or(self.object_id.as_deref())
            .unwrap_or_default()
    }

    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.date.or(self.created_at)
    }
}

impl Listable for Message {
    fn key(&self) -> &str {
        self.id()
    }

    fn title(&self) -> &str {
        &self.full_name
    }

    fn description(&self) -> &str {
        &self.message
    }

    fn tags(&self) -> &[String] {
        &[]
    }

    fn categories(&self) -> Vec<&str> {
        self.service.as_deref().into_iter().collect()
    }

    fn status(&self) -> &str {
        self.status.as_str()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.received_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_date_and_timestamps() {
        let message: Message = serde_json::from_value(json!({
            "_id": "m1",
            "id": "m1",
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "message": "We need a new landing page.",
            "status": "unread",
            "date": "2024-04-01T10:00:00Z",
            "createdAt": "2024-04-01T10:00:01Z",
            "updatedAt": "2024-04-01T10:00:01Z"
        }))
        .unwrap();

        assert_eq!(message.id(), "m1");
        assert_eq!(
            Listable::created_at(&message),
            "2024-04-01T10:00:00Z".parse::<DateTime<Utc>>().ok()
        );
    }

    #[test]
    fn test_falls_back_to_created_at_and_mongo_id() {
        let message: Message = serde_json::from_value(json!({
            "_id": "m2",
            "fullName": "Lin",
            "email": "lin@example.com",
            "message": "Mobile app quote please",
            "createdAt": "2024-04-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(message.id(), "m2");
        assert_eq!(message.key(), "m2");
        assert!(message.date.is_none());
        assert_eq!(message.received_at(), message.created_at);
        assert_eq!(message.status, MessageStatus::Unread);
    }
}
