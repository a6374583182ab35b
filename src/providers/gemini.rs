// Gemini API role client
//
// Backs the critic binding via the generateContent API. The shared
// role/content history converts to Gemini `contents` entries, where the
// assistant role is spelled "model".

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::constants::REQUEST_TIMEOUT_SECS;

use super::types::{Completion, Message};
use super::RoleClient;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini generateContent client for one model identity.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
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

    fn to_request(&self, input: &str, history: &[Message]) -> GenerateRequest {
        let mut contents: Vec<GeminiContent> = history.iter().map(to_content).collect();
        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: input.to_string(),
            }],
        });
        GenerateRequest { contents }
    }
}

/// Convert a shared chat turn into Gemini's content shape.
fn to_content(message: &Message) -> GeminiContent {
    let role = if message.role == "assistant" {
        "model"
    } else {
        "user"
    };
    GeminiContent {
        role: role.to_string(),
        parts: vec![GeminiPart {
            text: message.content.clone(),
        }],
    }
}

#[async_trait]
impl RoleClient for GeminiClient {
    async fn complete(&self, input: &str, history: &[Message]) -> Result<Completion> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let request = self.to_request(input, history);
        tracing::debug!(
            model = %self.model,
            turns = request.contents.len(),
            "Sending Gemini generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Gemini API request failed\n\nStatus: {}\nBody: {}",
                status,
                error_body
            );
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .context("Gemini response contained no candidates")?;

        Ok(Completion::new(input, text))
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}
