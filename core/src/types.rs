use serde::{Deserialize, Serialize};
use std::fmt;

/// Conversation thread on the assistant service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
}

/// Request body for appending a message to a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub role: String,
    pub content: String,
}

impl CreateMessageRequest {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for starting a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRunRequest {
    pub assistant_id: String,
}

/// A processing job that produces the assistant's reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
}

/// Lifecycle status of a run. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
            RunStatus::Other(status) => status,
        }
    }

    /// Whether polling stops at this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }
}

impl From<String> for RunStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "requires_action" => RunStatus::RequiresAction,
            "cancelling" => RunStatus::Cancelling,
            "cancelled" => RunStatus::Cancelled,
            "failed" => RunStatus::Failed,
            "completed" => RunStatus::Completed,
            "incomplete" => RunStatus::Incomplete,
            "expired" => RunStatus::Expired,
            _ => RunStatus::Other(status),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page of thread messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageList {
    pub data: Vec<ThreadMessage>,
}

/// A message stored in a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

impl ThreadMessage {
    pub fn is_assistant(&self) -> bool {
        self.role == "assistant"
    }

    /// Text segments joined by newlines; non-text segments are skipped
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|part| part.content_type == "text")
            .map(|part| part.text.as_ref().map(|t| t.value.as_str()).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One segment of message content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContent {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextValue>,
}

impl MessageContent {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: Some(TextValue {
                value: value.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
    pub value: String,
}

/// Outcome of a successful relay call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayReply {
    pub thread_id: String,
    pub response: String,
    pub message_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_round_trips_known_and_unknown_values() {
        let run: Run = serde_json::from_str(r#"{"id":"run_1","status":"in_progress"}"#).unwrap();
        assert_eq!(run.status, RunStatus::InProgress);
        assert!(!run.status.is_terminal());

        let run: Run = serde_json::from_str(r#"{"id":"run_2","status":"paused"}"#).unwrap();
        assert_eq!(run.status, RunStatus::Other("paused".to_string()));
        assert_eq!(serde_json::to_value(&run.status).unwrap(), "paused");
    }

    #[test]
    fn test_terminal_statuses() {
        for status in ["completed", "failed", "cancelled", "expired"] {
            assert!(RunStatus::from(status.to_string()).is_terminal(), "{}", status);
        }
        for status in ["queued", "in_progress", "requires_action", "cancelling", "incomplete"] {
            assert!(!RunStatus::from(status.to_string()).is_terminal(), "{}", status);
        }
    }

    #[test]
    fn test_message_text_joins_text_segments() {
        let message: ThreadMessage = serde_json::from_value(serde_json::json!({
            "id": "msg_1",
            "role": "assistant",
            "content": [
                {"type": "text", "text": {"value": "Primeira linha", "annotations": []}},
                {"type": "image_file", "image_file": {"file_id": "file_1"}},
                {"type": "text", "text": {"value": "Segunda linha"}},
                {"type": "text"}
            ]
        }))
        .unwrap();

        assert!(message.is_assistant());
        assert_eq!(message.text(), "Primeira linha\nSegunda linha\n");
    }

    #[test]
    fn test_reply_uses_camel_case() {
        let reply = RelayReply {
            thread_id: "thread_1".to_string(),
            response: "ok".to_string(),
            message_id: "msg_1".to_string(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["threadId"], "thread_1");
        assert_eq!(json["messageId"], "msg_1");
    }
}
