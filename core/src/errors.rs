use std::fmt;

use thiserror::Error;

use crate::types::RunStatus;

/// Step of a relay call an error is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ThreadCreate,
    MessageAppend,
    RunCreate,
    StatusCheck,
    MessageFetch,
    Timeout,
    NonCompleteStatus,
    NoAssistantReply,
}

impl Stage {
    /// Stable tag, e.g. `thread-create`
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ThreadCreate => "thread-create",
            Stage::MessageAppend => "message-append",
            Stage::RunCreate => "run-create",
            Stage::StatusCheck => "status-check",
            Stage::MessageFetch => "message-fetch",
            Stage::Timeout => "timeout",
            Stage::NonCompleteStatus => "non-complete-status",
            Stage::NoAssistantReply => "no-assistant-reply",
        }
    }

    /// What the relay was doing, phrased for error messages
    pub fn action(&self) -> &'static str {
        match self {
            Stage::ThreadCreate => "create thread",
            Stage::MessageAppend => "add message",
            Stage::RunCreate => "create run",
            Stage::StatusCheck => "check run status",
            Stage::MessageFetch => "retrieve messages",
            Stage::Timeout => "wait for run",
            Stage::NonCompleteStatus => "complete run",
            Stage::NoAssistantReply => "read assistant reply",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relay errors
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Configuration Error: {0}")]
    InvalidConfig(String),

    #[error("Message is required")]
    EmptyMessage,

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Failed to {}: {}", .stage.action(), upstream_reason(.status, .detail))]
    Upstream {
        stage: Stage,
        status: Option<u16>,
        detail: String,
    },

    #[error("Run timed out after {attempts} status checks")]
    Timeout { attempts: u32 },

    #[error("Run ended with status: {0}")]
    RunEnded(RunStatus),

    #[error("No assistant response found")]
    NoAssistantReply,
}

fn upstream_reason(status: &Option<u16>, detail: &str) -> String {
    match status {
        Some(code) => code.to_string(),
        None => detail.to_string(),
    }
}

impl RelayError {
    pub(crate) fn upstream(stage: Stage, status: Option<u16>, detail: impl Into<String>) -> Self {
        RelayError::Upstream {
            stage,
            status,
            detail: detail.into(),
        }
    }

    /// The relay step that failed; `None` for configuration and validation errors
    pub fn stage(&self) -> Option<Stage> {
        match self {
            RelayError::NotConfigured(_)
            | RelayError::InvalidConfig(_)
            | RelayError::EmptyMessage
            | RelayError::InvalidRequest(_) => None,
            RelayError::Upstream { stage, .. } => Some(*stage),
            RelayError::Timeout { .. } => Some(Stage::Timeout),
            RelayError::RunEnded(_) => Some(Stage::NonCompleteStatus),
            RelayError::NoAssistantReply => Some(Stage::NoAssistantReply),
        }
    }

    /// HTTP status reported by the assistant service, when there was one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            RelayError::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    /// True for errors caused by the caller's input rather than the relay
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RelayError::EmptyMessage | RelayError::InvalidRequest(_)
        )
    }
}

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
