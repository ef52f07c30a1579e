use crate::history::version::{ChatMessage, VersionSnapshot};

pub const MANUAL_EDIT_PROMPT: &str = "Manual edit";

/// Append-only list of snapshots plus a nullable active pointer.
#[derive(Debug, Default, Clone)]
pub struct VersionStore {
    versions: Vec<VersionSnapshot>,
    active: Option<u64>,
}

impl VersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `max(existing ids, 0) + 1`. Gaps are never refilled.
    pub fn next_id(&self) -> u64 {
        self.versions.iter().map(|v| v.id).max().unwrap_or(0) + 1
    }

    /// Append a snapshot. Does not move the active pointer.
    pub fn create_version(&mut self, prompt: impl Into<String>, code: impl Into<String>, messages: Vec<ChatMessage>) -> u64 {
        let id = self.next_id();
        self.versions.push(VersionSnapshot {
            id,
            prompt: prompt.into(),
            code: code.into(),
            messages,
        });
        tracing::info!(version = id, "created version");
        id
    }

    /// Point at `id`. A missing id leaves the pointer untouched and returns `None`.
    pub fn set_active(&mut self, id: u64) -> Option<&VersionSnapshot> {
        let found = self.versions.iter().position(|v| v.id == id)?;
        self.active = Some(id);
        self.versions.get(found)
    }

    pub fn active(&self) -> Option<&VersionSnapshot> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<u64> {
        self.active
    }

    pub fn get(&self, id: u64) -> Option<&VersionSnapshot> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Save `code` as a "Manual edit" version carrying the active transcript,
    /// and make it active.
    pub fn manual_save(&mut self, code: impl Into<String>) -> u64 {
        let messages = self.active().map(|v| v.messages.clone()).unwrap_or_default();
        let id = self.create_version(MANUAL_EDIT_PROMPT, code, messages);
        self.active = Some(id);
        id
    }

    pub fn versions(&self) -> &[VersionSnapshot] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
