use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};

use regex::Regex;

use crate::generation::backend::{CompletionBackend, CompletionReply, CompletionRequest};
use crate::generation::error::GenerationError;
use crate::history::version::{ChatMessage, VersionSnapshot};
use crate::library::profile::LibraryProfile;
use crate::markup::scan::find_open_tags;

pub const SYSTEM_INSTRUCTION: &str = "You generate React forms using Ant Design only. \
     Use <Form>, <Form.Item>, <Input>, <Button>, etc. \
     Return ONLY JSX markup: no explanations, no prose, no markdown code fences.";

/// Share of `max_tokens` at which a reply is assumed to have been cut off.
const NEAR_LIMIT_RATIO: f64 = 0.95;

/// Rough characters-per-token used for the length heuristic.
const CHARS_PER_TOKEN: usize = 4;

/// Tags whose opening without a matching close marks a cut-off reply.
const CONTAINER_TAGS: &[&str] = &[
    "Form",
    "Form.Item",
    "Select",
    "Radio.Group",
    "Checkbox.Group",
    "Steps",
    "Descriptions",
    "Watermark",
    "Space.Compact",
    "Upload",
    "Mentions",
];

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```(?:jsx|tsx|javascript|js|html)?\s*(.*?)```").unwrap());

static CONTAINER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<Form(?:\s[^>]*)?>(.*)</Form>").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub code: String,
    /// Prior transcript plus this turn's user and assistant messages.
    pub messages: Vec<ChatMessage>,
    pub new_version_id: u64,
}

/// Clears the in-flight flag when a generation ends, whatever the outcome.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct GenerationOrchestrator {
    backend: Box<dyn CompletionBackend>,
    max_tokens: u32,
    in_flight: AtomicBool,
}

impl GenerationOrchestrator {
    pub fn new(backend: Box<dyn CompletionBackend>) -> Self {
        Self::with_max_tokens(backend, 1000)
    }

    pub fn with_max_tokens(backend: Box<dyn CompletionBackend>, max_tokens: u32) -> Self {
        Self {
            backend,
            max_tokens,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run one generation turn. Session state is never touched here: callers
    /// apply the outcome only on success.
    pub fn generate(
        &self,
        prompt: &str,
        current_code: &str,
        active: Option<&VersionSnapshot>,
        versions: &[VersionSnapshot],
        profile: LibraryProfile,
    ) -> Result<GenerationOutcome, GenerationError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(GenerationError::Busy);
        }
        let _guard = InFlight(&self.in_flight);

        let user = ChatMessage::user(prompt);
        let mut messages = build_messages(current_code, active);
        messages.push(user.clone());

        tracing::info!(profile = %profile, turns = messages.len(), "requesting generation");
        let reply = self
            .backend
            .complete(&CompletionRequest { messages, profile })
            .map_err(|e| {
                tracing::warn!(error = %e, "completion collaborator failed");
                GenerationError::from(e)
            })?;

        if let Some(reason) = truncation_reason(&reply, self.max_tokens) {
            tracing::warn!(reason = %reason, "discarding truncated reply");
            return Err(GenerationError::Truncated { reason });
        }

        let code = clean_reply(&reply.code);
        let new_version_id = versions.iter().map(|v| v.id).max().unwrap_or(0) + 1;

        let mut transcript = active.map(|v| v.messages.clone()).unwrap_or_default();
        transcript.push(user);
        transcript.push(ChatMessage::assistant(reply.code));

        Ok(GenerationOutcome {
            code,
            messages: transcript,
            new_version_id,
        })
    }
}

/// System instruction, current-code context, then the active transcript.
pub fn build_messages(current_code: &str, active: Option<&VersionSnapshot>) -> Vec<ChatMessage> {
    let mut messages = vec![
        ChatMessage::system(SYSTEM_INSTRUCTION),
        ChatMessage::user(format!("Current form code:\n{}", current_code)),
    ];
    if let Some(version) = active {
        messages.extend(version.messages.iter().cloned());
    }
    messages
}

pub fn strip_fences(raw: &str) -> String {
    FENCE.replace_all(raw, "$1").trim().to_string()
}

/// Keep only the inner content of a wrapping `<Form>` container, if any.
pub fn unwrap_container(code: &str) -> String {
    match CONTAINER.captures(code).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim().to_string(),
        None => code.trim().to_string(),
    }
}

pub fn clean_reply(raw: &str) -> String {
    unwrap_container(&strip_fences(raw))
}

/// Why a reply looks cut off, or `None` when it looks complete.
pub fn truncation_reason(reply: &CompletionReply, max_tokens: u32) -> Option<String> {
    if reply.finish_reason.as_deref() == Some("length") {
        return Some("the model stopped at its token limit".to_string());
    }

    let estimated_tokens = reply.code.chars().count() / CHARS_PER_TOKEN;
    if max_tokens > 0 && estimated_tokens as f64 >= NEAR_LIMIT_RATIO * f64::from(max_tokens) {
        return Some(format!("about {} tokens, close to the {} token limit", estimated_tokens, max_tokens));
    }

    if reply.code.matches("```").count() % 2 == 1 {
        return Some("a code fence is never closed".to_string());
    }

    let code = strip_fences(&reply.code);
    CONTAINER_TAGS.iter().find_map(|tag| {
        let opened = find_open_tags(&code, tag).iter().filter(|t| !t.self_closing).count();
        let closed = code.matches(&format!("</{}>", tag)).count();
        (opened > closed).then(|| format!("<{}> is opened but never closed", tag))
    })
}
