//! Completion-service abstraction.
//!
//! The [`Completion`] trait decouples orchestration from the actual model
//! backend (currently the OpenAI Chat Completions API, see
//! [`crate::io::openai`]). Tests use scripted stand-ins that return
//! predetermined text without touching the network.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Parameters for a single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Model identifier (e.g. `gpt-3.5-turbo`).
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Request with a single user message.
    pub fn user_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
        }
    }

    /// Content of the last user message, if any.
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Why a completion call failed.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion service rejected credentials: {0}")]
    Auth(String),

    #[error("completion service quota or rate limit exceeded: {0}")]
    Quota(String),

    #[error("completion service unreachable: {0}")]
    Network(String),

    #[error("malformed completion response: {0}")]
    Malformed(String),

    #[error("completion service error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Abstraction over text-completion backends.
pub trait Completion {
    /// Send one request and return the generated text.
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let json = serde_json::to_value(vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("hello"),
        ])
        .expect("serialize");
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hello"}
            ])
        );
    }

    #[test]
    fn user_content_finds_last_user_message() {
        let request = CompletionRequest {
            model: "m".to_string(),
            messages: vec![
                ChatMessage::system("sys"),
                ChatMessage::user("first"),
                ChatMessage::user("second"),
            ],
        };
        assert_eq!(request.user_content(), Some("second"));
        assert_eq!(
            CompletionRequest::user_prompt("m", "only").user_content(),
            Some("only")
        );
    }

    #[test]
    fn error_messages_name_the_kind() {
        let err = CompletionError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "completion service error 500: boom");
        assert!(
            CompletionError::Quota("slow down".to_string())
                .to_string()
                .contains("quota")
        );
    }
}
