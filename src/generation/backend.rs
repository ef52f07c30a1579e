use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::generation::error::CompletionError;
use crate::history::version::ChatMessage;
use crate::library::profile::LibraryProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub profile: LibraryProfile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReply {
    pub code: String,
    /// `"length"` means the model stopped at its token ceiling.
    pub finish_reason: Option<String>,
}

impl CompletionReply {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into(), finish_reason: None }
    }
}

/// External completion collaborator: send a conversation, get markup back.
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, CompletionError>;
}

impl<T: CompletionBackend + ?Sized> CompletionBackend for Arc<T> {
    fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, CompletionError> {
        (**self).complete(request)
    }
}

fn client(timeout: Duration) -> Result<reqwest::blocking::Client, CompletionError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CompletionError::Transport(e.to_string()))
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Prefer the `{error}` field of a failed response, fall back to the raw body.
fn error_text(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

// ============================================================================
// Proxy Backend
// ============================================================================

/// `POST {messages, version} -> {code} | {error}`.
pub struct HttpProxyBackend {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for HttpProxyBackend {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/generate".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Serialize)]
struct ProxyRequest<'a> {
    messages: &'a [ChatMessage],
    version: &'static str,
}

#[derive(Deserialize)]
struct ProxyResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpProxyBackend {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            timeout,
        }
    }
}

impl CompletionBackend for HttpProxyBackend {
    fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, CompletionError> {
        let body = ProxyRequest {
            messages: &request.messages,
            version: request.profile.as_str(),
        };

        let response = client(self.timeout)?
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response.text().map_err(|e| CompletionError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(CompletionError::Rejected {
                status: status.as_u16(),
                message: error_text(&text),
            });
        }

        let parsed: ProxyResponse = serde_json::from_str(&text).map_err(|e| CompletionError::Decode(e.to_string()))?;
        if let Some(error) = parsed.error {
            return Err(CompletionError::Rejected { status: status.as_u16(), message: error });
        }
        Ok(CompletionReply::new(parsed.code.unwrap_or_default()))
    }
}

// ============================================================================
// Chat Completions Backend
// ============================================================================

/// OpenAI-compatible chat-completions endpoint called directly with a bearer
/// token. Adds its own system message naming the library version.
pub struct ChatCompletionsBackend {
    pub endpoint: String,
    pub model: String,
    pub api_token: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for ChatCompletionsBackend {
    fn default() -> Self {
        Self {
            endpoint: "https://router.huggingface.co/novita/v3/openai/chat/completions".to_string(),
            model: "deepseek/deepseek-v3-0324".to_string(),
            api_token: String::new(),
            max_tokens: 1000,
            temperature: 0.7,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub fn library_system_message(profile: LibraryProfile) -> ChatMessage {
    ChatMessage::system(format!(
        "You are a React code generator. ONLY return valid JSX code for forms using Ant Design version {}. \
         Each <Form.Item> with a `name` prop MUST have exactly one single child element. \
         Do NOT include explanations, comments, or markdown. Return ONLY clean, valid JSX code.",
        profile
    ))
}

impl CompletionBackend for ChatCompletionsBackend {
    fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, CompletionError> {
        let mut messages = vec![library_system_message(request.profile)];
        messages.extend(request.messages.iter().filter(|m| !m.content.is_empty()).cloned());

        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = client(self.timeout)?
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response.text().map_err(|e| CompletionError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(CompletionError::Rejected {
                status: status.as_u16(),
                message: error_text(&text),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| CompletionError::Decode(e.to_string()))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Decode("reply has no choices".to_string()))?;

        Ok(CompletionReply {
            code: choice.message.content.unwrap_or_default(),
            finish_reason: choice.finish_reason,
        })
    }
}

// ============================================================================
// Mock Backend (for testing without a completion service)
// ============================================================================

/// Replays queued results in order and records every request it receives.
/// With an empty queue it answers with an empty form.
#[derive(Default)]
pub struct MockCompletionBackend {
    replies: Mutex<VecDeque<Result<CompletionReply, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, code: impl Into<String>) -> Self {
        self.push(Ok(CompletionReply::new(code)))
    }

    pub fn with_error(self, status: u16, message: impl Into<String>) -> Self {
        self.push(Err(CompletionError::Rejected { status, message: message.into() }))
    }

    pub fn push(self, result: Result<CompletionReply, CompletionError>) -> Self {
        if let Ok(mut queue) = self.replies.lock() {
            queue.push_back(result);
        }
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl CompletionBackend for MockCompletionBackend {
    fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, CompletionError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }

        self.replies
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Ok(CompletionReply::new("<Form></Form>")))
    }
}
