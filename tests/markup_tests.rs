mod common;

use common::{EMAIL_BLOCK, PASSWORD_BLOCK, SUBMIT_BLOCK, catalog_document};
use formsmith::library::catalog::catalog;
use formsmith::library::profile::LibraryProfile;
use formsmith::markup::block::{BlockSpan, WidgetType};
use formsmith::markup::classifier::{classification_order, classify_block};
use formsmith::markup::normalize::{has_unsaved_changes, with_unique_name};
use formsmith::markup::reassemble::reassemble;
use formsmith::markup::segmenter::{resolve_overlaps, segment};

// ============================================================================
// Segmentation
// ============================================================================

#[test]
fn segment_empty_document() {
    assert!(segment("").is_empty());
    assert!(segment("   \n\t").is_empty());
}

#[test]
fn segment_three_blocks_in_order() {
    let doc = reassemble(&[EMAIL_BLOCK, PASSWORD_BLOCK, SUBMIT_BLOCK]);
    let blocks = segment(&doc);

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].text, EMAIL_BLOCK);
    assert_eq!(blocks[1].text, PASSWORD_BLOCK);
    assert_eq!(blocks[2].text, SUBMIT_BLOCK);
    assert_eq!(blocks[0].widget, WidgetType::Text);
    assert_eq!(blocks[1].widget, WidgetType::Password);
    assert_eq!(blocks[2].widget, WidgetType::Submit);
    assert_eq!(blocks[0].field_name.as_deref(), Some("email"));
    assert_eq!(blocks[2].field_name, None);
}

#[test]
fn segment_spans_are_sorted_and_disjoint() {
    let doc = catalog_document(LibraryProfile::V5);
    let blocks = segment(&doc);

    for pair in blocks.windows(2) {
        assert!(pair[0].end() <= pair[1].start());
    }
    for block in &blocks {
        assert_eq!(&doc[block.start()..block.end()], block.text);
    }
}

#[test]
fn segment_covers_every_catalog_snippet_exactly() {
    for profile in LibraryProfile::ALL {
        let entries = catalog(profile);
        let doc = catalog_document(profile);
        let texts: Vec<String> = segment(&doc).into_iter().map(|b| b.text).collect();
        let expected: Vec<&str> = entries.iter().map(|e| e.code).collect();
        assert_eq!(texts, expected, "profile {}", profile);
    }
}

#[test]
fn segment_keeps_transfer_with_its_hidden_store() {
    let transfer = catalog(LibraryProfile::V3)
        .into_iter()
        .find(|e| e.label == "Transfer")
        .unwrap();
    let doc = reassemble(&[EMAIL_BLOCK, transfer.code, SUBMIT_BLOCK]);
    let blocks = segment(&doc);

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[1].text, transfer.code);
    assert_eq!(blocks[1].widget, WidgetType::Transfer);
    assert_eq!(blocks[1].field_name.as_deref(), Some("transfer"));
}

#[test]
fn segment_self_closing_form_item() {
    let doc = format!("<Form.Item noStyle />\n{}", EMAIL_BLOCK);
    let blocks = segment(&doc);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].text, "<Form.Item noStyle />");
    assert_eq!(blocks[1].text, EMAIL_BLOCK);
}

#[test]
fn segment_self_closing_steps_with_item_props() {
    let steps = r#"<Steps current={1} items={[{ title: 'One' }, { title: 'Two' }]} />"#;
    let doc = format!("{}\n{}", steps, EMAIL_BLOCK);
    let blocks = segment(&doc);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].text, steps);
    assert_eq!(blocks[0].widget, WidgetType::Steps);
    assert_eq!(blocks[1].text, EMAIL_BLOCK);
}

#[test]
fn segment_self_closing_descriptions() {
    let descriptions = r#"<Descriptions title="Info" items={[{ label: 'Name', children: 'John' }]} />"#;
    let doc = format!("{}\n{}", EMAIL_BLOCK, descriptions);
    let blocks = segment(&doc);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1].text, descriptions);
    assert_eq!(blocks[1].widget, WidgetType::Descriptions);
}

#[test]
fn segment_self_closing_steps_does_not_swallow_paired_steps() {
    let paired = r#"<Steps current={1}><Steps.Step title="Step 1" /><Steps.Step title="Step 2" /></Steps>"#;
    let blocks = segment(paired);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text, paired);
}

#[test]
fn segment_ignores_text_between_blocks() {
    let doc = format!("{{/* header */}}\n{}\nsome stray text\n{}", EMAIL_BLOCK, PASSWORD_BLOCK);
    let blocks = segment(&doc);
    assert_eq!(blocks.len(), 2);
}

#[test]
fn segment_nested_form_items_split_at_first_close() {
    // Non-greedy matching: the outer block ends at the inner close tag and the
    // trailing close tag is left outside any block.
    let doc = r#"<Form.Item label="Outer"><Form.Item name="inner"><Input /></Form.Item></Form.Item>"#;
    let blocks = segment(doc);
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].text,
        r#"<Form.Item label="Outer"><Form.Item name="inner"><Input /></Form.Item>"#
    );
}

#[test]
fn segment_button_inside_form_item_is_not_a_separate_block() {
    let blocks = segment(SUBMIT_BLOCK);
    assert_eq!(blocks.len(), 1);
}

#[test]
fn segment_standalone_button() {
    let blocks = segment(r#"<Button onClick={reset}>Reset</Button>"#);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].widget, WidgetType::Submit);
}

// ============================================================================
// Overlap resolution
// ============================================================================

#[test]
fn overlaps_keep_earliest_start() {
    let spans = vec![
        BlockSpan { start: 10, end: 20 },
        BlockSpan { start: 0, end: 10 },
        BlockSpan { start: 5, end: 15 },
    ];
    assert_eq!(
        resolve_overlaps(spans),
        vec![BlockSpan { start: 0, end: 10 }, BlockSpan { start: 10, end: 20 }]
    );
}

#[test]
fn overlaps_tie_keeps_first_collected() {
    let spans = vec![BlockSpan { start: 0, end: 5 }, BlockSpan { start: 0, end: 30 }];
    assert_eq!(resolve_overlaps(spans), vec![BlockSpan { start: 0, end: 5 }]);
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn classify_catalog_entries() {
    let expected = [
        ("Text Input", WidgetType::Text),
        ("Password", WidgetType::Password),
        ("Textarea", WidgetType::Textarea),
        ("Select", WidgetType::Select),
        ("Date Picker", WidgetType::DatePicker),
        ("Time Picker", WidgetType::TimePicker),
        ("Range Picker", WidgetType::RangePicker),
        ("Checkbox", WidgetType::Checkbox),
        ("Checkbox Group", WidgetType::CheckboxGroup),
        ("Radio Group", WidgetType::RadioGroup),
        ("Switch", WidgetType::Switch),
        ("Upload", WidgetType::Upload),
        ("Slider", WidgetType::Slider),
        ("Rate", WidgetType::Rate),
        ("Cascader", WidgetType::Cascader),
        ("TreeSelect", WidgetType::TreeSelect),
        ("InputNumber", WidgetType::InputNumber),
        ("Mentions", WidgetType::Mentions),
        ("AutoComplete", WidgetType::AutoComplete),
        ("Transfer", WidgetType::Transfer),
        ("Search", WidgetType::Search),
        ("Submit", WidgetType::Submit),
        ("Form Item", WidgetType::Text),
        ("Input Group", WidgetType::InputGroup),
        ("Descriptions", WidgetType::Descriptions),
        ("Steps", WidgetType::Steps),
        ("Color Picker", WidgetType::ColorPicker),
        ("Segmented", WidgetType::Segmented),
        ("Tour", WidgetType::Tour),
        ("Float Button", WidgetType::FloatButton),
        ("Watermark", WidgetType::Watermark),
        ("QRCode", WidgetType::Other),
        ("Image Preview Group", WidgetType::Other),
    ];

    let entries = catalog(LibraryProfile::V5);
    assert_eq!(entries.len(), expected.len());
    for (label, widget) in expected {
        let entry = entries.iter().find(|e| e.label == label).unwrap();
        assert_eq!(classify_block(entry.code), widget, "{}", label);
    }
}

#[test]
fn classify_password_before_text() {
    assert_eq!(classify_block(PASSWORD_BLOCK), WidgetType::Password);
    assert_eq!(classify_block(EMAIL_BLOCK), WidgetType::Text);
}

#[test]
fn classify_range_picker_before_date_picker() {
    let block = r#"<Form.Item name="r"><DatePicker.RangePicker /></Form.Item>"#;
    assert_eq!(classify_block(block), WidgetType::RangePicker);
}

#[test]
fn classify_unknown_and_empty() {
    assert_eq!(classify_block(""), WidgetType::Other);
    assert_eq!(classify_block("<Divider />"), WidgetType::Other);
}

#[test]
fn classification_order_is_pinned() {
    use WidgetType::*;
    assert_eq!(
        classification_order(),
        vec![
            Password, Textarea, InputNumber, Select, RangePicker, DatePicker, TimePicker, CheckboxGroup, Checkbox,
            RadioGroup, Switch, Upload, Slider, Rate, Cascader, TreeSelect, Mentions, AutoComplete, Transfer, Search,
            Submit, Steps, ColorPicker, Tour, Segmented, FloatButton, Watermark, Descriptions, InputGroup, Text,
        ]
    );
}

// ============================================================================
// Reassembly and names
// ============================================================================

#[test]
fn reassemble_after_segment_reproduces_newline_joined_document() {
    let doc = reassemble(&[EMAIL_BLOCK, PASSWORD_BLOCK]);
    let texts: Vec<String> = segment(&doc).into_iter().map(|b| b.text).collect();
    assert_eq!(reassemble(&texts), doc);
}

#[test]
fn unique_name_replaces_first_name_only() {
    let snippet = r#"<Form.Item label="Text" name="text"><Input name="inner" /></Form.Item>"#;
    let renamed = with_unique_name("", snippet, "Text Input");
    assert_eq!(
        renamed,
        r#"<Form.Item label="Text" name="textinput1"><Input name="inner" /></Form.Item>"#
    );
}

#[test]
fn unsaved_changes_ignore_surrounding_whitespace() {
    assert!(!has_unsaved_changes("  <A />\n", "<A />"));
    assert!(has_unsaved_changes("<A />", "<B />"));
}
