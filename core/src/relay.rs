//! Conversation relay.
//!
//! One call walks an explicit state machine against the assistant service:
//!
//! ```text
//! NoThread -> ThreadReady -> MessageAppended -> RunCreated -> RunPolling -> RunCompleted
//!                                                                       \-> RunFailed
//! ```
//!
//! Each transition is a single method returning the next state or a
//! stage-tagged [`RelayError`]. All conversation state lives in the service;
//! the relay only passes the caller's thread id through.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::client::{AssistantApi, AssistantsClient};
use crate::config::{RelayConfig, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS};
use crate::errors::{RelayError, RelayResult};
use crate::types::{RelayReply, RunStatus};

/// Where a relay call currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayState {
    NoThread,
    ThreadReady {
        thread_id: String,
    },
    MessageAppended {
        thread_id: String,
    },
    RunCreated {
        thread_id: String,
        run_id: String,
        status: RunStatus,
    },
    RunPolling {
        thread_id: String,
        run_id: String,
        status: RunStatus,
        attempts: u32,
    },
    RunCompleted {
        thread_id: String,
    },
    RunFailed {
        thread_id: String,
        status: RunStatus,
    },
}

impl RelayState {
    /// Initial state for a call, reusing `thread_id` when given
    pub fn start(thread_id: Option<String>) -> Self {
        match thread_id {
            Some(thread_id) => RelayState::ThreadReady { thread_id },
            None => RelayState::NoThread,
        }
    }
}

/// Polling limits for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

impl From<&RelayConfig> for PollPolicy {
    fn from(config: &RelayConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            max_attempts: config.max_poll_attempts(),
        }
    }
}

/// Relays user turns to a fixed assistant and returns its replies
#[derive(Debug, Clone)]
pub struct Relay {
    api: Arc<dyn AssistantApi>,
    assistant_id: String,
    poll: PollPolicy,
}

impl Relay {
    pub fn new(
        api: Arc<dyn AssistantApi>,
        assistant_id: impl Into<String>,
        poll: PollPolicy,
    ) -> Self {
        Self {
            api,
            assistant_id: assistant_id.into(),
            poll,
        }
    }

    /// Builds a relay backed by [`AssistantsClient`]. Fails with a
    /// configuration error when a credential is missing.
    pub fn from_config(config: &RelayConfig) -> RelayResult<Self> {
        let credentials = config.require_credentials()?;
        let client = AssistantsClient::new(config)?;
        Ok(Self::new(
            Arc::new(client),
            credentials.assistant_id,
            PollPolicy::from(config),
        ))
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    /// Sends `message` on `thread_id` (or a new thread) and waits for the reply
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn send(
        &self,
        message: &str,
        thread_id: Option<String>,
    ) -> RelayResult<RelayReply> {
        if message.trim().is_empty() {
            return Err(RelayError::EmptyMessage);
        }

        let mut state = RelayState::start(thread_id);
        loop {
            state = match state {
                RelayState::NoThread => self.create_thread().await?,
                RelayState::ThreadReady { thread_id } => {
                    self.append_message(thread_id, message).await?
                }
                RelayState::MessageAppended { thread_id } => self.create_run(thread_id).await?,
                RelayState::RunCreated {
                    thread_id,
                    run_id,
                    status,
                } => Self::begin_polling(thread_id, run_id, status),
                RelayState::RunPolling {
                    thread_id,
                    run_id,
                    status,
                    attempts,
                } => self.poll_run(thread_id, run_id, status, attempts).await?,
                RelayState::RunCompleted { thread_id } => {
                    return self.fetch_reply(thread_id).await;
                }
                RelayState::RunFailed { status, .. } => {
                    return Err(RelayError::RunEnded(status));
                }
            };
        }
    }

    /// `NoThread -> ThreadReady`
    pub async fn create_thread(&self) -> RelayResult<RelayState> {
        info!("Creating new thread");
        let thread = self.api.create_thread().await?;
        info!(thread_id = %thread.id, "Thread created");
        Ok(RelayState::ThreadReady {
            thread_id: thread.id,
        })
    }

    /// `ThreadReady -> MessageAppended`
    pub async fn append_message(
        &self,
        thread_id: String,
        message: &str,
    ) -> RelayResult<RelayState> {
        debug!(thread_id = %thread_id, "Adding message to thread");
        self.api.append_message(&thread_id, message).await?;
        Ok(RelayState::MessageAppended { thread_id })
    }

    /// `MessageAppended -> RunCreated`
    pub async fn create_run(&self, thread_id: String) -> RelayResult<RelayState> {
        info!(assistant_id = %self.assistant_id, "Creating run");
        let run = self.api.create_run(&thread_id, &self.assistant_id).await?;
        info!(run_id = %run.id, status = %run.status, "Run created");
        Ok(RelayState::RunCreated {
            thread_id,
            run_id: run.id,
            status: run.status,
        })
    }

    /// `RunCreated -> RunPolling`, starting from the status reported at creation
    pub fn begin_polling(thread_id: String, run_id: String, status: RunStatus) -> RelayState {
        RelayState::RunPolling {
            thread_id,
            run_id,
            status,
            attempts: 0,
        }
    }

    /// One polling step. A terminal status ends polling; otherwise waits one
    /// interval and re-reads the run, failing once the attempt budget is spent.
    pub async fn poll_run(
        &self,
        thread_id: String,
        run_id: String,
        status: RunStatus,
        attempts: u32,
    ) -> RelayResult<RelayState> {
        match status {
            RunStatus::Completed => return Ok(RelayState::RunCompleted { thread_id }),
            status if status.is_terminal() => {
                warn!(run_id = %run_id, status = %status, "Run ended without completing");
                return Ok(RelayState::RunFailed { thread_id, status });
            }
            _ => {}
        }

        if attempts >= self.poll.max_attempts {
            warn!(run_id = %run_id, attempts, "Run timed out");
            return Err(RelayError::Timeout { attempts });
        }

        tokio::time::sleep(self.poll.interval).await;
        let attempts = attempts + 1;

        let run = self.api.retrieve_run(&thread_id, &run_id).await?;
        debug!(attempt = attempts, status = %run.status, "Run status");

        Ok(RelayState::RunPolling {
            thread_id,
            run_id,
            status: run.status,
            attempts,
        })
    }

    /// `RunCompleted -> reply`: text of the newest assistant message
    pub async fn fetch_reply(&self, thread_id: String) -> RelayResult<RelayReply> {
        debug!(thread_id = %thread_id, "Retrieving messages");
        let messages = self.api.latest_messages(&thread_id, 1).await?;

        let reply = messages
            .data
            .into_iter()
            .find(|message| message.is_assistant())
            .ok_or(RelayError::NoAssistantReply)?;

        info!(message_id = %reply.id, "Reply received");
        Ok(RelayReply {
            response: reply.text(),
            message_id: reply.id,
            thread_id,
        })
    }
}
