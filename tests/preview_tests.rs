mod common;

use common::{EMAIL_BLOCK, PASSWORD_BLOCK, catalog_document};
use formsmith::library::profile::LibraryProfile;
use formsmith::preview::error_log::{DEFAULT_CAPACITY, RenderErrorLog};
use formsmith::preview::interpreter::RenderNode;
use formsmith::preview::registry::ComponentRegistry;
use formsmith::preview::{PreviewOutcome, PreviewRenderer};

fn renderer(profile: LibraryProfile) -> PreviewRenderer {
    PreviewRenderer::new(profile, RenderErrorLog::in_memory(DEFAULT_CAPACITY))
}

const STEPS_BLOCK: &str = r#"<Steps current={1}><Steps.Step title="One" /></Steps>"#;

// ============================================================================
// Registry
// ============================================================================

#[test]
fn registry_grows_with_profile() {
    let v3 = ComponentRegistry::for_profile(LibraryProfile::V3);
    let v4 = ComponentRegistry::for_profile(LibraryProfile::V4);
    let v5 = ComponentRegistry::for_profile(LibraryProfile::V5);

    assert!(v3.len() < v4.len() && v4.len() < v5.len());
    assert!(!v3.contains("Steps"));
    assert!(v4.contains("Steps"));
    assert!(!v4.contains("ColorPicker"));
    assert!(v5.contains("ColorPicker"));
    for tag in v3.tags() {
        assert!(v5.contains(tag), "{}", tag);
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn empty_markup_renders_nothing() {
    let mut r = renderer(LibraryProfile::V5);
    assert_eq!(r.render(""), PreviewOutcome::Empty);
    assert_eq!(r.render("  \n "), PreviewOutcome::Empty);
    assert!(r.error_log().is_empty());
}

#[test]
fn catalog_renders_cleanly_for_each_profile() {
    for profile in LibraryProfile::ALL {
        let mut r = renderer(profile);
        let outcome = r.render(&catalog_document(profile));
        assert!(outcome.is_clean(), "{}:\n{}", profile, outcome.outline());
        assert!(r.error_log().is_empty());
    }
}

#[test]
fn outline_lists_components_and_props() {
    let mut r = renderer(LibraryProfile::V5);
    let outcome = r.render(EMAIL_BLOCK);
    assert_eq!(
        outcome.outline(),
        "Form.Item [label=\"Email\" name=\"email\"]\n  Input\n"
    );
}

#[test]
fn unknown_component_is_isolated_from_siblings() {
    let mut r = renderer(LibraryProfile::V3);
    let doc = format!("{}\n{}\n{}", EMAIL_BLOCK, STEPS_BLOCK, PASSWORD_BLOCK);

    let PreviewOutcome::Rendered(nodes) = r.render(&doc) else {
        panic!("expected a rendered preview");
    };
    assert_eq!(nodes.len(), 3);
    assert!(!nodes[0].is_error());
    assert_eq!(
        nodes[1],
        RenderNode::ErrorPanel { message: "Unknown component: <Steps>".to_string() }
    );
    assert!(!nodes[2].is_error());

    let entry = r.error_log().latest().unwrap();
    assert_eq!(entry.message, "Unknown component: <Steps>");
    assert!(entry.stack.starts_with("at <Steps>"));
}

#[test]
fn same_markup_renders_under_newer_profile() {
    let mut r = renderer(LibraryProfile::V3);
    assert_eq!(r.render(STEPS_BLOCK).error_count(), 1);

    r.set_profile(LibraryProfile::V4);
    assert!(r.render(STEPS_BLOCK).is_clean());
}

#[test]
fn named_form_item_must_wrap_one_element() {
    let mut r = renderer(LibraryProfile::V5);
    let outcome = r.render(r#"<Form.Item name="x"><Input /><Input /></Form.Item>"#);

    assert_eq!(outcome.error_count(), 1);
    assert!(outcome.outline().contains("found 2"));
}

#[test]
fn unnamed_form_item_may_wrap_several_elements() {
    let mut r = renderer(LibraryProfile::V5);
    let outcome = r.render(r#"<Form.Item label="Pair"><Input /><Input /></Form.Item>"#);
    assert!(outcome.is_clean());
}

#[test]
fn trace_runs_from_failure_to_top_level_element() {
    let mut r = renderer(LibraryProfile::V5);
    r.render(r#"<Form.Item label="a"><Input>bad</Input></Form.Item>"#);

    let entry = r.error_log().latest().unwrap();
    assert_eq!(entry.message, "Invalid props for <Input>: this component cannot have children");
    assert_eq!(entry.stack, "at <Input> (offset 21)\nat <Form.Item> (offset 0)");
}

#[test]
fn unsegmented_malformed_markup_fails_the_whole_preview() {
    let mut r = renderer(LibraryProfile::V5);
    let outcome = r.render(r#"<Form.Item name="a"><Input /></Form.Item"#);

    assert!(matches!(outcome, PreviewOutcome::Failed { .. }));
    assert!(outcome.outline().starts_with("[preview error] Malformed markup"));
    assert_eq!(r.error_log().latest().unwrap().stack, "at <document>");
}

#[test]
fn malformed_block_is_isolated_from_siblings() {
    let mut r = renderer(LibraryProfile::V5);
    let doc = format!("{}\n{}", EMAIL_BLOCK, r#"<Form.Item name="s"><Select></Form.Item>"#);

    let PreviewOutcome::Rendered(nodes) = r.render(&doc) else {
        panic!("expected a rendered preview");
    };
    assert_eq!(nodes.len(), 2);
    assert!(!nodes[0].is_error());
    assert_eq!(
        nodes[1],
        RenderNode::ErrorPanel {
            message: "Malformed markup at offset 88: expected </Select> but found </Form.Item>".to_string()
        }
    );
    assert_eq!(r.error_log().len(), 1);
    assert_eq!(r.error_log().latest().unwrap().stack, "at <document> (offset 60)");
}

#[test]
fn render_trace_offsets_stay_absolute_in_block_fallback() {
    let mut r = renderer(LibraryProfile::V5);
    let doc = format!(
        "{}\n{}\n{}",
        r#"<Form.Item name="s"><Select></Form.Item>"#, PASSWORD_BLOCK, r#"<Form.Item label="a"><Input>bad</Input></Form.Item>"#
    );

    let outcome = r.render(&doc);
    assert_eq!(outcome.error_count(), 2);

    let tail_start = doc.rfind("<Form.Item").unwrap();
    let entry = r.error_log().latest().unwrap();
    assert_eq!(
        entry.stack,
        format!("at <Input> (offset {})\nat <Form.Item> (offset {})", tail_start + 21, tail_start)
    );
}

#[test]
fn unclosed_element_is_reported_at_its_open_tag() {
    let mut r = renderer(LibraryProfile::V5);
    let outcome = r.render("<Input />\n<Form.Item label=\"x\"><Input />");
    assert_eq!(
        outcome,
        PreviewOutcome::Failed { message: "Malformed markup at offset 10: <Form.Item> is never closed".to_string() }
    );
}

#[test]
fn unchanged_markup_is_not_reinterpreted() {
    let mut r = renderer(LibraryProfile::V3);
    r.render(STEPS_BLOCK);
    r.render(STEPS_BLOCK);
    assert_eq!(r.error_log().len(), 1);

    r.render(&format!("{}\n", STEPS_BLOCK));
    assert_eq!(r.error_log().len(), 2);
}

// ============================================================================
// Error Log
// ============================================================================

#[test]
fn error_log_keeps_the_most_recent_entries() {
    let mut r = renderer(LibraryProfile::V5);
    for i in 0..12 {
        r.render(&format!("<Missing{} />", i));
    }

    let log = r.error_log();
    assert_eq!(log.len(), DEFAULT_CAPACITY);
    assert_eq!(log.latest().unwrap().message, "Unknown component: <Missing11>");
    assert_eq!(log.entries().next().unwrap().message, "Unknown component: <Missing2>");
}

#[test]
fn error_log_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("render-errors.json");

    let mut r = PreviewRenderer::new(LibraryProfile::V5, RenderErrorLog::persistent(&path, 5));
    r.render("<Nope />");
    assert!(path.exists());

    let reloaded = RenderErrorLog::persistent(&path, 5);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.latest().unwrap().message, "Unknown component: <Nope>");
    assert!(!reloaded.latest().unwrap().timestamp.is_empty());

    r.clear_error_log();
    assert!(r.error_log().is_empty());
    assert!(!path.exists());
}

#[test]
fn corrupt_error_log_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("render-errors.json");
    std::fs::write(&path, "not json").unwrap();

    let log = RenderErrorLog::persistent(&path, 5);
    assert!(log.is_empty());
    assert_eq!(log.capacity(), 5);
}
