use anyhow::{anyhow, Context, Result};
use autodiag_core::RelayReply;
use autodiag_diagnosis::DiagnosisRecord;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagnoseRequest<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the relay daemon's `/diagnose` endpoint
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends one conversation turn. `thread_id` continues an earlier
    /// conversation; the reply carries the handle to use next time.
    pub async fn diagnose(&self, message: &str, thread_id: Option<&str>) -> Result<RelayReply> {
        let url = format!("{}/diagnose", self.base_url);
        debug!("Sending {} bytes to {}", message.len(), url);

        let response = self
            .client
            .post(&url)
            .json(&DiagnoseRequest { message, thread_id })
            .send()
            .await
            .with_context(|| format!("Failed to reach relay at {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            return Err(anyhow!("Relay error ({}): {}", status.as_u16(), message));
        }

        let reply: RelayReply = response
            .json()
            .await
            .context("Failed to parse relay response")?;
        info!("Reply {} on thread {}", reply.message_id, reply.thread_id);
        Ok(reply)
    }
}

/// Message sent to the assistant: the structured prompt block of the local
/// diagnosis, when there is one, followed by the user's own words
pub fn compose_message(symptom: &str, record: Option<&DiagnosisRecord>) -> String {
    match record {
        Some(record) => format!(
            "{}\n\n{}",
            record.structured_prompt.to_prompt_block(),
            symptom.trim()
        ),
        None => symptom.trim().to_string(),
    }
}
