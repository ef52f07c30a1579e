use std::collections::{HashMap, HashSet};

use crate::identity::tracked_input::TrackedInput;
use crate::markup::block::FieldBlock;
use crate::markup::normalize::input_label;

/// Content-keyed identity for the blocks of one editing session.
///
/// Identity follows block text, not position: a pure reorder keeps every id,
/// and an edit keeps its id only when the editor calls [`IdentityTracker::rename`].
/// Two blocks with byte-identical text share one id.
#[derive(Debug, Default, Clone)]
pub struct IdentityTracker {
    by_content: HashMap<String, String>,
    by_id: HashMap<String, String>,
    issued: u64,
}

impl IdentityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> String {
        self.issued += 1;
        format!("i{}", self.issued)
    }

    /// Register unseen contents under fresh ids and forget contents that are
    /// no longer present.
    pub fn ensure_ids<'a, I>(&mut self, contents: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let current: Vec<&str> = contents.into_iter().collect();
        let live: HashSet<&str> = current.iter().copied().collect();

        let stale: Vec<String> = self
            .by_content
            .keys()
            .filter(|k| !live.contains(k.as_str()))
            .cloned()
            .collect();
        for content in stale {
            if let Some(id) = self.by_content.remove(&content) {
                self.by_id.remove(&id);
            }
        }

        for content in current {
            if !self.by_content.contains_key(content) {
                let id = self.fresh_id();
                self.by_content.insert(content.to_string(), id.clone());
                self.by_id.insert(id, content.to_string());
            }
        }
    }

    /// Move `id` from `old_content` to `new_content`. The old key is retired.
    pub fn rename(&mut self, old_content: &str, new_content: &str, id: &str) {
        self.by_content.remove(old_content);
        if let Some(previous) = self.by_id.remove(id) {
            self.by_content.remove(&previous);
        }
        if let Some(displaced) = self.by_content.insert(new_content.to_string(), id.to_string()) {
            if displaced != id {
                self.by_id.remove(&displaced);
            }
        }
        self.by_id.insert(id.to_string(), new_content.to_string());
    }

    pub fn id_for(&self, content: &str) -> Option<&str> {
        self.by_content.get(content).map(String::as_str)
    }

    pub fn content_for(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_content.is_empty()
    }

    /// Run [`IdentityTracker::ensure_ids`] over the blocks and pair each with its id.
    pub fn track(&mut self, blocks: &[FieldBlock]) -> Vec<TrackedInput> {
        self.ensure_ids(blocks.iter().map(|b| b.text.as_str()));

        blocks
            .iter()
            .filter_map(|block| {
                let id = self.id_for(&block.text)?.to_string();
                Some(TrackedInput {
                    id,
                    label: input_label(block),
                    widget: block.widget,
                    content: block.text.clone(),
                })
            })
            .collect()
    }
}
