// OpenAI API role client
//
// Backs the coordinator and drafter bindings via the chat completions API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::constants::REQUEST_TIMEOUT_SECS;

use super::types::{Completion, Message};
use super::RoleClient;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat completions client for one model identity.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAIClient {
    pub fn new(api_key: String, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
        })
    }

    /// Build the request body: prior history followed by the new user turn.
    fn to_request(&self, input: &str, history: &[Message]) -> ChatRequest {
        let mut messages = history.to_vec();
        messages.push(Message::user(input));
        ChatRequest {
            model: self.model.clone(),
            messages,
        }
    }
}

#[async_trait]
impl RoleClient for OpenAIClient {
    async fn complete(&self, input: &str, history: &[Message]) -> Result<Completion> {
        let request = self.to_request(input, history);
        tracing::debug!(
            model = %self.model,
            turns = request.messages.len(),
            "Sending OpenAI chat completion request"
        );

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "OpenAI API request failed\n\nStatus: {}\nBody: {}",
                status,
                error_body
            );
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .context("OpenAI response contained no choices")?;

        Ok(Completion::new(input, text))
    }

    fn provider(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
