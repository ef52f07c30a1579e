use std::sync::LazyLock;

use regex::Regex;

use crate::markup::block::FieldBlock;

static FIELD_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bname="([^"]+)""#).unwrap());

/// Any `name` attribute, empty ones included.
static NAME_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bname="[^"]*""#).unwrap());

/// Canonical form used for change detection: surrounding whitespace is not a change.
pub fn normalize_code(code: &str) -> &str {
    code.trim()
}

pub fn has_unsaved_changes(local: &str, committed: &str) -> bool {
    normalize_code(local) != normalize_code(committed)
}

/// The form-submission key of a block: the first `name="..."` attribute.
pub fn extract_field_name(text: &str) -> Option<String> {
    FIELD_NAME
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Label shown in the input list: the field name, or the widget's display name.
pub fn input_label(block: &FieldBlock) -> String {
    block
        .field_name
        .clone()
        .unwrap_or_else(|| block.widget.display_name().to_string())
}

/// Next free field name derived from a catalog label, e.g. "Text Input" ->
/// "textinput1", then "textinput2" once "textinput1" appears in the draft.
pub fn unique_field_name(draft: &str, label: &str) -> String {
    let base: String = label
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let pattern = format!(r"{}(\d*)", regex::escape(&base));
    let next_index = match Regex::new(&pattern) {
        Ok(re) => {
            re.captures_iter(draft)
                .map(|c| {
                    c.get(1)
                        .and_then(|m| m.as_str().parse::<u64>().ok())
                        .unwrap_or(0)
                })
                .max()
                .unwrap_or(0)
                + 1
        }
        Err(_) => 1,
    };

    format!("{}{}", base, next_index)
}

/// Rename the snippet's first `name="..."` to a name not yet used in the draft.
pub fn with_unique_name(draft: &str, snippet: &str, label: &str) -> String {
    let replacement = format!(r#"name="{}""#, unique_field_name(draft, label));
    NAME_ATTR
        .replace(snippet, regex::NoExpand(&replacement))
        .into_owned()
}

pub fn text_fingerprint(text: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
