//! OpenAI Chat Completions backend for [`Completion`].

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::io::completion::{ChatMessage, Completion, CompletionError, CompletionRequest};
use crate::io::config::OpenAiConfig;
use crate::io::env::ApiKey;

/// Blocking client for `POST {api_base}/chat/completions`.
///
/// One HTTP request per [`Completion::complete`] call; no retries.
pub struct OpenAiClient {
    client: Client,
    api_key: ApiKey,
    api_base: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiClient {
    pub fn new(api_key: ApiKey, config: &OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl Completion for OpenAiClient {
    #[instrument(skip_all, fields(model = %request.model, messages = request.messages.len()))]
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
        };
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .map_err(|err| CompletionError::Network(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|err| CompletionError::Network(err.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "completion request failed");
            return Err(classify_failure(status.as_u16(), &text));
        }

        let content = parse_completion(&text)?;
        debug!(bytes = content.len(), "completion received");
        Ok(content)
    }
}

/// Map a non-success HTTP status and body to an error kind.
fn classify_failure(status: u16, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    match status {
        401 | 403 => CompletionError::Auth(message),
        429 => CompletionError::Quota(message),
        _ => CompletionError::Api { status, message },
    }
}

/// Extract the first choice's message text from a success body.
fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|err| CompletionError::Malformed(err.to_string()))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::Malformed("response contained no choices".to_string()))?;
    choice
        .message
        .content
        .ok_or_else(|| CompletionError::Malformed("first choice has no content".to_string()))
}
