mod common;

use common::{EMAIL_BLOCK, PASSWORD_BLOCK, SUBMIT_BLOCK, login_reply, mock_orchestrator};
use formsmith::editor::EditorError;
use formsmith::generation::{GenerationError, MockCompletionBackend};
use formsmith::history::store::MANUAL_EDIT_PROMPT;
use formsmith::library::profile::LibraryProfile;
use formsmith::markup::block::WidgetType;
use formsmith::markup::reassemble::reassemble;
use formsmith::preview::PreviewRenderer;
use formsmith::preview::error_log::RenderErrorLog;
use formsmith::FormSession;

fn session_with(blocks: &[&str]) -> FormSession {
    FormSession::with_code(LibraryProfile::V5, reassemble(blocks))
}

fn ids(session: &mut FormSession) -> Vec<String> {
    session.tracked_inputs().into_iter().map(|t| t.id).collect()
}

// ============================================================================
// Generation flow
// ============================================================================

#[test]
fn generate_login_form_end_to_end() {
    let (orchestrator, _mock) = mock_orchestrator(MockCompletionBackend::new().with_reply(login_reply()));
    let mut session = FormSession::new(LibraryProfile::V5);

    let id = session.generate(&orchestrator, "login form").unwrap();
    assert_eq!(id, 1);
    assert_eq!(session.active_version().unwrap().id, 1);
    assert_eq!(session.active_version().unwrap().prompt, "login form");
    assert!(!session.has_unsaved_changes());

    let inputs = session.tracked_inputs();
    assert_eq!(inputs.len(), 2);
    assert_eq!((inputs[0].id.as_str(), inputs[0].widget), ("i1", WidgetType::Text));
    assert_eq!((inputs[1].id.as_str(), inputs[1].widget), ("i2", WidgetType::Password));

    let mut renderer = PreviewRenderer::new(LibraryProfile::V5, RenderErrorLog::default());
    assert!(renderer.render(session.local_code()).is_clean());
}

#[test]
fn failed_generation_changes_nothing() {
    let (orchestrator, _mock) = mock_orchestrator(MockCompletionBackend::new().with_error(429, "rate limited"));
    let mut session = session_with(&[EMAIL_BLOCK]);

    let err = session.generate(&orchestrator, "login form").unwrap_err();
    assert_eq!(err.to_string(), "rate limited");
    assert!(session.versions().is_empty());
    assert_eq!(session.local_code(), EMAIL_BLOCK);
    assert!(!orchestrator.is_generating());
}

#[test]
fn empty_prompt_is_rejected_by_session() {
    let (orchestrator, mock) = mock_orchestrator(MockCompletionBackend::new());
    let mut session = FormSession::new(LibraryProfile::V5);

    assert_eq!(session.generate(&orchestrator, "").unwrap_err(), GenerationError::EmptyPrompt);
    assert!(mock.requests().is_empty());
}

#[test]
fn follow_up_generation_sends_current_draft() {
    let mock = MockCompletionBackend::new()
        .with_reply(login_reply())
        .with_reply(reassemble(&[EMAIL_BLOCK, PASSWORD_BLOCK, SUBMIT_BLOCK]));
    let (orchestrator, mock) = mock_orchestrator(mock);
    let mut session = FormSession::new(LibraryProfile::V4);

    session.generate(&orchestrator, "login form").unwrap();
    let second = session.generate(&orchestrator, "add a submit button").unwrap();
    assert_eq!(second, 2);
    assert_eq!(session.active_version().unwrap().messages.len(), 4);

    let requests = mock.requests();
    assert_eq!(requests[1].profile, LibraryProfile::V4);
    assert!(requests[1].messages[1].content.contains(r#"name="email""#));
}

// ============================================================================
// Manual edits
// ============================================================================

#[test]
fn manual_edit_then_save_creates_manual_version() {
    let (orchestrator, _mock) = mock_orchestrator(MockCompletionBackend::new().with_reply(login_reply()));
    let mut session = FormSession::new(LibraryProfile::V5);
    session.generate(&orchestrator, "login form").unwrap();

    session.set_local_code(EMAIL_BLOCK);
    assert!(session.has_unsaved_changes());

    let id = session.save();
    let active = session.active_version().unwrap();
    assert_eq!(id, 2);
    assert_eq!(active.prompt, MANUAL_EDIT_PROMPT);
    assert_eq!(active.code, EMAIL_BLOCK);
    assert_eq!(active.messages, session.versions()[0].messages);
    assert!(!session.has_unsaved_changes());
}

#[test]
fn cancel_restores_committed_code() {
    let mut session = session_with(&[EMAIL_BLOCK]);
    session.set_local_code(PASSWORD_BLOCK);
    assert!(session.has_unsaved_changes());

    session.cancel();
    assert_eq!(session.local_code(), EMAIL_BLOCK);
    assert!(!session.has_unsaved_changes());
}

#[test]
fn clear_empties_draft_but_keeps_active_version() {
    let (orchestrator, _mock) = mock_orchestrator(MockCompletionBackend::new().with_reply(login_reply()));
    let mut session = FormSession::new(LibraryProfile::V5);
    session.generate(&orchestrator, "login form").unwrap();

    session.clear();
    assert_eq!(session.local_code(), "");
    assert_eq!(session.active_version().unwrap().id, 1);
    assert!(session.has_unsaved_changes());
}

#[test]
fn switching_versions_replaces_draft() {
    let mut session = session_with(&[EMAIL_BLOCK]);
    session.save();
    session.set_local_code(PASSWORD_BLOCK);
    session.save();

    assert!(session.set_active(1));
    assert_eq!(session.local_code(), EMAIL_BLOCK);
    assert!(!session.set_active(9));
    assert_eq!(session.active_version().unwrap().id, 1);
}

// ============================================================================
// Block operations
// ============================================================================

#[test]
fn inserted_catalog_entries_get_unique_names() {
    let mut session = FormSession::new(LibraryProfile::V5);
    assert!(session.insert_catalog_entry("Text Input"));
    assert!(session.insert_catalog_entry("text input"));

    let names: Vec<Option<String>> = session.blocks().into_iter().map(|b| b.field_name).collect();
    assert_eq!(names, vec![Some("textinput1".to_string()), Some("textinput2".to_string())]);
}

#[test]
fn catalog_entries_follow_profile() {
    let mut session = FormSession::new(LibraryProfile::V3);
    assert!(!session.insert_catalog_entry("Steps"));
    assert!(session.local_code().is_empty());
}

#[test]
fn reorder_keeps_ids() {
    let mut session = session_with(&[EMAIL_BLOCK, PASSWORD_BLOCK, SUBMIT_BLOCK]);
    assert_eq!(ids(&mut session), vec!["i1", "i2", "i3"]);

    session.reorder(&["i3", "i1"]).unwrap();
    assert_eq!(session.local_code(), reassemble(&[SUBMIT_BLOCK, EMAIL_BLOCK, PASSWORD_BLOCK]));
    assert_eq!(ids(&mut session), vec!["i3", "i1", "i2"]);
}

#[test]
fn self_closing_steps_survives_block_edits() {
    let steps = r#"<Steps current={1} items={[{ title: 'One' }, { title: 'Two' }]} />"#;
    let mut session = session_with(&[steps, EMAIL_BLOCK, PASSWORD_BLOCK]);
    assert_eq!(ids(&mut session), vec!["i1", "i2", "i3"]);

    session.reorder(&["i3"]).unwrap();
    assert_eq!(session.local_code(), reassemble(&[PASSWORD_BLOCK, steps, EMAIL_BLOCK]));

    session.delete_block("i2").unwrap();
    assert_eq!(session.local_code(), reassemble(&[PASSWORD_BLOCK, steps]));
    assert_eq!(ids(&mut session), vec!["i3", "i1"]);
}

#[test]
fn reorder_with_unknown_id_fails() {
    let mut session = session_with(&[EMAIL_BLOCK]);
    assert_eq!(
        session.reorder(&["i7"]).unwrap_err(),
        EditorError::BlockNotFound { id: "i7".to_string() }
    );
    assert_eq!(session.local_code(), EMAIL_BLOCK);
}

#[test]
fn edited_block_keeps_its_id() {
    let mut session = session_with(&[EMAIL_BLOCK, PASSWORD_BLOCK]);
    ids(&mut session);

    session.edit_block("i1", &[("placeholder", "you@example.com")]).unwrap();
    let inputs = session.tracked_inputs();
    assert_eq!(inputs[0].id, "i1");
    assert!(inputs[0].content.contains(r#"placeholder="you@example.com""#));
    assert_eq!(inputs[1].id, "i2");
    assert_eq!(inputs[1].content, PASSWORD_BLOCK);
}

#[test]
fn updated_block_text_keeps_its_id() {
    let mut session = session_with(&[EMAIL_BLOCK, PASSWORD_BLOCK]);
    ids(&mut session);

    let replacement = r#"<Form.Item label="Mail" name="mail"><Input /></Form.Item>"#;
    session.update_block("i1", replacement).unwrap();
    assert_eq!(session.local_code(), reassemble(&[replacement, PASSWORD_BLOCK]));
    assert_eq!(ids(&mut session), vec!["i1", "i2"]);
}

#[test]
fn delete_block_removes_only_that_block() {
    let mut session = session_with(&[EMAIL_BLOCK, PASSWORD_BLOCK, SUBMIT_BLOCK]);
    ids(&mut session);

    session.delete_block("i2").unwrap();
    assert_eq!(session.local_code(), reassemble(&[EMAIL_BLOCK, SUBMIT_BLOCK]));
    assert_eq!(ids(&mut session), vec!["i1", "i3"]);
}

#[test]
fn decode_block_and_editor_errors() {
    let mut session = session_with(&[EMAIL_BLOCK, r#"<QRCode value="x" />"#]);
    ids(&mut session);

    assert_eq!(session.decode_block("i1").unwrap().text("name"), "email");
    assert_eq!(
        session.edit_block("i2", &[("value", "y")]).unwrap_err(),
        EditorError::NoEditor { widget: WidgetType::Other }
    );
    assert!(matches!(session.decode_block("i9"), Err(EditorError::BlockNotFound { .. })));
}

// ============================================================================
// Library profile
// ============================================================================

#[test]
fn downgrade_raises_warning_until_dismissed() {
    let mut session = FormSession::new(LibraryProfile::V5);
    session.set_profile(LibraryProfile::V5);
    assert!(!session.downgrade_warning());

    session.set_profile(LibraryProfile::V3);
    assert!(session.downgrade_warning());
    assert_eq!(session.profile(), LibraryProfile::V3);

    session.dismiss_downgrade_warning();
    assert!(!session.downgrade_warning());

    session.set_profile(LibraryProfile::V4);
    assert!(!session.downgrade_warning());
}

#[test]
fn edits_respect_session_profile() {
    let mut session = FormSession::with_code(LibraryProfile::V3, EMAIL_BLOCK);
    ids(&mut session);

    session.edit_block("i1", &[("allowClear", "true")]).unwrap();
    assert!(!session.local_code().contains("allowClear"));
}
