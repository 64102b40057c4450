use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::message::ChatMessage;

/// Anything that can turn a chat history into one text reply.
pub trait ChatClient {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[derive(Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    pub content: Option<String>,
}

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
        })
    }
}

impl ChatClient for OpenAiClient {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let req = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        debug!(model = %self.model, messages = messages.len(), "Sending chat completion");

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .context("Chat completion request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(anyhow!("LLM API returned {status}: {body}"));
        }

        let resp = resp
            .json::<ChatCompletionResponse>()
            .context("Failed to decode chat completion response")?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| anyhow!("Empty response from LLM API"))
    }
}
