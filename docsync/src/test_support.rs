//! Test-only helpers: a scripted completion backend, a scratch workspace and a
//! wiremock stand-in for the Chat Completions endpoint.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::io::completion::{Completion, CompletionError, CompletionRequest};

/// One scripted reply.
#[derive(Debug)]
pub enum ScriptedReply {
    Text(String),
    Fail(CompletionError),
}

/// Completion backend that replays queued replies and records every request.
///
/// Calling it with an empty queue is a test bug and returns an `Api` error.
#[derive(Debug, Default)]
pub struct ScriptedCompletion {
    replies: RefCell<VecDeque<ScriptedReply>>,
    requests: RefCell<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that answers each call with the next text in `replies`.
    pub fn with_texts<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scripted = Self::new();
        for reply in replies {
            scripted.push_text(reply);
        }
        scripted
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.replies
            .borrow_mut()
            .push_back(ScriptedReply::Text(text.into()));
    }

    pub fn push_error(&self, error: CompletionError) {
        self.replies
            .borrow_mut()
            .push_back(ScriptedReply::Fail(error));
    }

    /// All requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Completion for ScriptedCompletion {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.borrow_mut().push(request.clone());
        match self.replies.borrow_mut().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Fail(error)) => Err(error),
            None => Err(CompletionError::Api {
                status: 500,
                message: "scripted completion exhausted".to_string(),
            }),
        }
    }
}

/// Temporary working root for filesystem-level tests.
pub struct TestWorkspace {
    temp: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir().context("create temp workspace")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    /// Write `contents` at `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.join(relative);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.join(relative).exists()
    }
}

/// Success body in the Chat Completions response shape.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// Path the client posts to under [`MockOpenAi::base_url`].
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// `wiremock` server standing in for the Chat Completions API.
///
/// Owns a current-thread runtime used only to drive wiremock's async setup
/// and inspection calls. The blocking client (or a spawned binary) talks to
/// the server from outside that runtime.
pub struct MockOpenAi {
    // Dropped before the runtime that started it.
    server: MockServer,
    runtime: Runtime,
}

/// One request the mock server received, reduced to what tests assert on.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    pub fn model(&self) -> Option<&str> {
        self.body["model"].as_str()
    }

    /// `(role, content)` pairs from the request's `messages` array.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.body["messages"]
            .as_array()
            .map(|messages| {
                messages
                    .iter()
                    .map(|m| {
                        (
                            m["role"].as_str().unwrap_or_default().to_string(),
                            m["content"].as_str().unwrap_or_default().to_string(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl MockOpenAi {
    pub fn start() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("build mock server runtime")?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self { server, runtime })
    }

    /// Value for `openai.api_base`.
    pub fn base_url(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// Answer the next chat-completions call with `status` and a JSON `body`.
    ///
    /// Each queued response is used once, in the order they were queued.
    pub fn respond(&self, status: u16, body: &str) {
        let mock = Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json"),
            )
            .up_to_n_times(1);
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Queue a successful completion whose message content is `content`.
    pub fn respond_with_completion(&self, content: &str) {
        self.respond(200, &completion_body(content));
    }

    /// Every request received so far, in arrival order.
    pub fn received(&self) -> Vec<RecordedRequest> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .into_iter()
            .map(|request| RecordedRequest {
                method: request.method.as_str().to_string(),
                path: request.url.path().to_string(),
                authorization: request
                    .headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_slice(&request.body).unwrap_or(serde_json::Value::Null),
            })
            .collect()
    }
}
