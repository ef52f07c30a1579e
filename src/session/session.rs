use crate::editor::{EditorError, FieldEditor, StructuredFields};
use crate::generation::{GenerationError, GenerationOrchestrator};
use crate::history::store::VersionStore;
use crate::history::version::VersionSnapshot;
use crate::identity::tracked_input::TrackedInput;
use crate::identity::tracker::IdentityTracker;
use crate::library::catalog::find_entry;
use crate::library::profile::LibraryProfile;
use crate::markup::block::FieldBlock;
use crate::markup::normalize::{has_unsaved_changes, with_unique_name};
use crate::markup::reassemble::reassemble;
use crate::markup::segmenter::{RegexSegmenter, Segmenter};

/// One editing session: version history, the uncommitted draft and the block
/// identities of that draft.
pub struct FormSession {
    store: VersionStore,
    /// Code the draft is compared against when no version is active.
    base_code: String,
    local_code: String,
    tracker: IdentityTracker,
    profile: LibraryProfile,
    downgrade_warning: bool,
    segmenter: Box<dyn Segmenter + Send + Sync>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(LibraryProfile::default())
    }
}

impl FormSession {
    pub fn new(profile: LibraryProfile) -> Self {
        Self {
            store: VersionStore::new(),
            base_code: String::new(),
            local_code: String::new(),
            tracker: IdentityTracker::new(),
            profile,
            downgrade_warning: false,
            segmenter: Box::new(RegexSegmenter),
        }
    }

    /// Start from existing markup; it becomes both the base and the draft.
    pub fn with_code(profile: LibraryProfile, code: impl Into<String>) -> Self {
        let code = code.into();
        let mut session = Self::new(profile);
        session.base_code = code.clone();
        session.local_code = code;
        session
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn Segmenter + Send + Sync>) -> Self {
        self.segmenter = segmenter;
        self
    }

    // ------------------------------------------------------------------------
    // Draft state
    // ------------------------------------------------------------------------

    pub fn local_code(&self) -> &str {
        &self.local_code
    }

    pub fn set_local_code(&mut self, code: impl Into<String>) {
        self.local_code = code.into();
    }

    /// Active version's code, or the base code when there is none (or it is empty).
    pub fn committed_code(&self) -> &str {
        match self.store.active() {
            Some(version) if !version.code.is_empty() => &version.code,
            _ => &self.base_code,
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        has_unsaved_changes(&self.local_code, self.committed_code())
    }

    pub fn profile(&self) -> LibraryProfile {
        self.profile
    }

    /// Change the library profile. Moving to an older profile raises the
    /// downgrade warning until [`FormSession::dismiss_downgrade_warning`].
    pub fn set_profile(&mut self, profile: LibraryProfile) {
        if self.profile.is_downgrade_to(profile) {
            tracing::warn!(from = %self.profile, to = %profile, "library profile downgraded");
            self.downgrade_warning = true;
        }
        self.profile = profile;
    }

    pub fn downgrade_warning(&self) -> bool {
        self.downgrade_warning
    }

    pub fn dismiss_downgrade_warning(&mut self) {
        self.downgrade_warning = false;
    }

    // ------------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------------

    pub fn blocks(&self) -> Vec<FieldBlock> {
        self.segmenter.segment(&self.local_code)
    }

    /// Segment the draft and pair every block with its stable id.
    pub fn tracked_inputs(&mut self) -> Vec<TrackedInput> {
        let blocks = self.blocks();
        self.tracker.track(&blocks)
    }

    fn block_content(&mut self, id: &str) -> Result<String, EditorError> {
        self.tracked_inputs();
        self.tracker
            .content_for(id)
            .map(str::to_string)
            .ok_or_else(|| EditorError::BlockNotFound { id: id.to_string() })
    }

    fn block_texts(&self) -> Vec<String> {
        self.blocks().into_iter().map(|b| b.text).collect()
    }

    /// Append a snippet with its first `name` made unique within the draft.
    pub fn insert(&mut self, snippet: &str, label: &str) {
        let snippet = with_unique_name(&self.local_code, snippet, label);
        self.local_code.push('\n');
        self.local_code.push_str(&snippet);
    }

    /// Insert the catalog entry with this label. Returns false when the
    /// current profile has no such entry.
    pub fn insert_catalog_entry(&mut self, label: &str) -> bool {
        match find_entry(self.profile, label) {
            Some(entry) => {
                self.insert(entry.code, entry.label);
                true
            }
            None => false,
        }
    }

    /// Rebuild the draft in the given id order. Blocks whose ids are not listed
    /// keep their relative order after the listed ones.
    pub fn reorder<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<(), EditorError> {
        let inputs = self.tracked_inputs();
        let mut ordered: Vec<String> = Vec::with_capacity(inputs.len());
        for id in ids {
            let content = self
                .tracker
                .content_for(id.as_ref())
                .ok_or_else(|| EditorError::BlockNotFound { id: id.as_ref().to_string() })?;
            ordered.push(content.to_string());
        }

        let listed: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        ordered.extend(
            inputs
                .into_iter()
                .filter(|input| !listed.contains(&input.id.as_str()))
                .map(|input| input.content),
        );

        self.local_code = reassemble(&ordered);
        Ok(())
    }

    /// Replace a block's text, keeping its id.
    pub fn update_block(&mut self, id: &str, new_text: &str) -> Result<(), EditorError> {
        let old = self.block_content(id)?;
        let texts: Vec<String> = self
            .block_texts()
            .into_iter()
            .map(|t| if t == old { new_text.to_string() } else { t })
            .collect();

        self.tracker.rename(&old, new_text, id);
        self.local_code = reassemble(&texts);
        tracing::debug!(id, "block updated");
        Ok(())
    }

    pub fn delete_block(&mut self, id: &str) -> Result<(), EditorError> {
        let old = self.block_content(id)?;
        let texts: Vec<String> = self.block_texts().into_iter().filter(|t| *t != old).collect();
        self.local_code = reassemble(&texts);
        Ok(())
    }

    pub fn decode_block(&mut self, id: &str) -> Result<StructuredFields, EditorError> {
        let content = self.block_content(id)?;
        Ok(FieldEditor::for_block(&content)?.decode(&content))
    }

    /// Run the block through its structured editor with `field=value` changes.
    pub fn edit_block<K, V>(&mut self, id: &str, assignments: &[(K, V)]) -> Result<(), EditorError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let content = self.block_content(id)?;
        let encoded = FieldEditor::for_block(&content)?.apply(&content, assignments, self.profile)?;
        self.update_block(id, &encoded)
    }

    // ------------------------------------------------------------------------
    // Versions
    // ------------------------------------------------------------------------

    pub fn versions(&self) -> &[VersionSnapshot] {
        self.store.versions()
    }

    pub fn active_version(&self) -> Option<&VersionSnapshot> {
        self.store.active()
    }

    /// Commit the draft as a "Manual edit" version and make it active.
    pub fn save(&mut self) -> u64 {
        let id = self.store.manual_save(self.local_code.clone());
        self.base_code = self.local_code.clone();
        id
    }

    /// Throw away the draft.
    pub fn cancel(&mut self) {
        self.local_code = self.committed_code().to_string();
    }

    /// Empty the base and the draft. The active version is kept, so the
    /// cleared draft counts as unsaved when that version had content.
    pub fn clear(&mut self) {
        self.base_code.clear();
        self.local_code.clear();
    }

    /// Switch to version `id`, replacing the draft. Unknown ids change nothing.
    pub fn set_active(&mut self, id: u64) -> bool {
        match self.store.set_active(id).map(|v| v.code.clone()) {
            Some(code) => {
                self.base_code = code.clone();
                self.local_code = code;
                true
            }
            None => false,
        }
    }

    /// Generate from `prompt` against the current draft. On success the reply
    /// becomes a new active version; on failure nothing changes.
    pub fn generate(&mut self, orchestrator: &GenerationOrchestrator, prompt: &str) -> Result<u64, GenerationError> {
        let outcome = orchestrator.generate(
            prompt,
            &self.local_code,
            self.store.active(),
            self.store.versions(),
            self.profile,
        )?;

        let id = self.store.create_version(prompt.trim(), outcome.code.clone(), outcome.messages);
        debug_assert_eq!(id, outcome.new_version_id);
        self.store.set_active(id);
        self.base_code = outcome.code.clone();
        self.local_code = outcome.code;
        Ok(id)
    }
}
