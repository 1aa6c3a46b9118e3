use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A persisted chat message as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creation time as local wall-clock `HH:MM:SS`
    pub fn local_time(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// Validated payload for creating a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMessage {
    pub content: String,
    pub sender: String,
}

/// Raw create payload; fields may be absent or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
}

impl CreateMessageRequest {
    /// Both fields present and non-empty, or `None`.
    ///
    /// Whitespace-only values are accepted; only the empty string is rejected.
    pub fn validate(self) -> Option<NewMessage> {
        match (self.content, self.sender) {
            (Some(content), Some(sender)) if !content.is_empty() && !sender.is_empty() => {
                Some(NewMessage { content, sender })
            }
            _ => None,
        }
    }
}

/// Error body shared by every failing API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_camel_case_timestamp() {
        let created_at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let message = Message {
            id: "abc".to_string(),
            content: "hi".to_string(),
            sender: "alice".to_string(),
            created_at,
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["content"], "hi");
        assert_eq!(value["sender"], "alice");
        assert_eq!(value["createdAt"], "2023-11-14T22:13:20.123Z");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn validate_requires_both_fields_non_empty() {
        let parse = |raw: &str| {
            serde_json::from_str::<CreateMessageRequest>(raw)
                .unwrap()
                .validate()
        };

        assert_eq!(
            parse(r#"{"content":"hi","sender":"alice"}"#),
            Some(NewMessage {
                content: "hi".to_string(),
                sender: "alice".to_string(),
            })
        );
        assert_eq!(parse(r#"{"content":"","sender":"alice"}"#), None);
        assert_eq!(parse(r#"{"content":"hi","sender":""}"#), None);
        assert_eq!(parse(r#"{"content":"hi"}"#), None);
        assert_eq!(parse(r#"{"sender":"alice","content":null}"#), None);
        assert_eq!(parse("{}"), None);
    }

    #[test]
    fn validate_keeps_whitespace_content_untouched() {
        let request = CreateMessageRequest {
            content: Some("  spaced  ".to_string()),
            sender: Some(" ".to_string()),
        };
        let message = request.validate().unwrap();
        assert_eq!(message.content, "  spaced  ");
        assert_eq!(message.sender, " ");
    }
}
