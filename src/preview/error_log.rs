use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderErrorEntry {
    pub message: String,
    pub stack: String,
    pub timestamp: String,
}

impl RenderErrorEntry {
    pub fn now(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: stack.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Ring buffer of the most recent render failures, optionally mirrored to a
/// JSON file. File problems are logged and never fail the caller.
#[derive(Debug, Clone)]
pub struct RenderErrorLog {
    entries: VecDeque<RenderErrorEntry>,
    capacity: usize,
    path: Option<PathBuf>,
}

impl Default for RenderErrorLog {
    fn default() -> Self {
        Self::in_memory(DEFAULT_CAPACITY)
    }
}

impl RenderErrorLog {
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            path: None,
        }
    }

    /// Open a log persisted at `path`, keeping the newest `capacity` entries
    /// already stored there.
    pub fn persistent(path: impl AsRef<Path>, capacity: usize) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut log = Self::in_memory(capacity);

        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<RenderErrorEntry>>(&raw) {
                Ok(stored) => {
                    for entry in stored {
                        log.push_entry(entry);
                    }
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable render error log"),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not read render error log"),
        }

        log.path = Some(path);
        log
    }

    fn push_entry(&mut self, entry: RenderErrorEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn record(&mut self, entry: RenderErrorEntry) {
        self.push_entry(entry);
        self.flush();
    }

    pub fn entries(&self) -> impl Iterator<Item = &RenderErrorEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&RenderErrorEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry and remove the backing file.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Some(path) = &self.path {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "could not remove render error log");
                }
            }
        }
    }

    fn flush(&self) {
        let Some(path) = &self.path else {
            return;
        };

        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize render error log");
                return;
            }
        };

        if let Err(e) = fs::write(path, json) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write render error log");
        }
    }
}
