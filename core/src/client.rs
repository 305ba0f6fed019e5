use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, error};

use crate::config::RelayConfig;
use crate::errors::{RelayError, RelayResult, Stage};
use crate::types::*;

const ASSISTANTS_BETA: &str = "assistants=v2";

/// Operations the relay needs from the hosted assistant service
#[async_trait]
pub trait AssistantApi: Send + Sync + Debug {
    /// Create an empty conversation thread
    async fn create_thread(&self) -> RelayResult<Thread>;

    /// Append a user turn to a thread
    async fn append_message(&self, thread_id: &str, content: &str) -> RelayResult<()>;

    /// Start a run of the given assistant on a thread
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> RelayResult<Run>;

    /// Read the current state of a run
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> RelayResult<Run>;

    /// Most recent messages of a thread, newest first
    async fn latest_messages(&self, thread_id: &str, limit: u32) -> RelayResult<MessageList>;
}

/// Client for the OpenAI Assistants v2 REST API
#[derive(Debug, Clone)]
pub struct AssistantsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AssistantsClient {
    /// Create a new client. Fails when the API key is missing.
    pub fn new(config: &RelayConfig) -> RelayResult<Self> {
        let credentials = config.require_credentials()?;
        Ok(Self::with_client(
            Client::new(),
            credentials.api_key,
            config.base_url(),
        ))
    }

    pub fn with_client(client: Client, api_key: String, base_url: &str) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA)
    }

    /// Sends the request and decodes a successful JSON body
    async fn execute<T: DeserializeOwned>(
        &self,
        stage: Stage,
        request: RequestBuilder,
    ) -> RelayResult<T> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| RelayError::upstream(stage, None, format!("request failed: {}", e)))?;

        let response = check_status(stage, response).await?;

        response.json::<T>().await.map_err(|e| {
            RelayError::upstream(stage, None, format!("failed to parse response: {}", e))
        })
    }
}

async fn check_status(stage: Stage, response: Response) -> RelayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    error!(stage = %stage, status = status.as_u16(), body = %body, "Assistant API call failed");

    Err(RelayError::upstream(stage, Some(status.as_u16()), body))
}

#[async_trait]
impl AssistantApi for AssistantsClient {
    async fn create_thread(&self) -> RelayResult<Thread> {
        let request = self
            .client
            .post(self.url("/threads"))
            .json(&serde_json::json!({}));
        self.execute(Stage::ThreadCreate, request).await
    }

    async fn append_message(&self, thread_id: &str, content: &str) -> RelayResult<()> {
        let request = self
            .client
            .post(self.url(&format!("/threads/{}/messages", thread_id)))
            .json(&CreateMessageRequest::user(content));
        let message: ThreadMessage = self.execute(Stage::MessageAppend, request).await?;
        debug!(message_id = %message.id, "Message stored");
        Ok(())
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> RelayResult<Run> {
        let request = self
            .client
            .post(self.url(&format!("/threads/{}/runs", thread_id)))
            .json(&CreateRunRequest {
                assistant_id: assistant_id.to_string(),
            });
        self.execute(Stage::RunCreate, request).await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> RelayResult<Run> {
        let request = self
            .client
            .get(self.url(&format!("/threads/{}/runs/{}", thread_id, run_id)));
        self.execute(Stage::StatusCheck, request).await
    }

    async fn latest_messages(&self, thread_id: &str, limit: u32) -> RelayResult<MessageList> {
        let request = self
            .client
            .get(self.url(&format!("/threads/{}/messages", thread_id)))
            .query(&[("order", "desc".to_string()), ("limit", limit.to_string())]);
        self.execute(Stage::MessageFetch, request).await
    }
}
