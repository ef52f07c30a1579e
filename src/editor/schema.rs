use std::collections::BTreeMap;

use serde::Serialize;

use crate::editor::error::EditorError;
use crate::editor::js_literal;
use crate::library::profile::LibraryProfile;
use crate::markup::block::WidgetType;

/// Where a field's attribute lives in the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// On the wrapping `Form.Item`.
    Item,
    /// On the widget element itself.
    Widget,
    /// On the hidden `Form.Item` that stores a compound widget's value.
    Hidden,
}

/// One attribute carried by a repeated child element (`<Select.Option value="a">`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemKey {
    pub name: &'static str,
    /// Written as `{n}` instead of `"n"` when the value is numeric.
    pub numeric: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Quoted string attribute, default empty.
    Text,
    /// Boolean attribute. `true` is written bare, `false` as `attr={false}`.
    Flag { default: bool },
    /// Numeric expression attribute, default absent.
    Number,
    /// One of a fixed set of strings.
    Choice {
        choices: &'static [&'static str],
        default: &'static str,
    },
    /// Array or object literal expression, default absent.
    Literal,
    /// Text child of the widget (`<Checkbox>Agree</Checkbox>`).
    Content,
    /// Raw inner markup of the widget, kept verbatim.
    Markup,
    /// Repeated child elements, one entry per child.
    Items {
        child_tags: &'static [&'static str],
        keys: &'static [ItemKey],
        text_key: Option<&'static str>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Attribute name for attribute kinds, pseudo-field name otherwise.
    pub name: &'static str,
    pub kind: FieldKind,
    pub target: Target,
    /// Oldest library profile that knows the attribute.
    pub since: LibraryProfile,
}

impl FieldSpec {
    pub const fn item(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text, target: Target::Item, since: LibraryProfile::V3 }
    }

    pub const fn hidden(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text, target: Target::Hidden, since: LibraryProfile::V3 }
    }

    pub const fn widget(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, target: Target::Widget, since: LibraryProfile::V3 }
    }

    pub const fn since(mut self, profile: LibraryProfile) -> Self {
        self.since = profile;
        self
    }

    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Text | FieldKind::Content | FieldKind::Markup => FieldValue::Text(String::new()),
            FieldKind::Flag { default } => FieldValue::Flag(default),
            FieldKind::Number => FieldValue::Number(None),
            FieldKind::Choice { default, .. } => FieldValue::Text(default.to_string()),
            FieldKind::Literal => FieldValue::Literal(None),
            FieldKind::Items { .. } => FieldValue::Items(Vec::new()),
        }
    }

    /// Parse a `field=value` assignment coming from a text surface.
    pub fn parse_value(&self, raw: &str) -> Result<FieldValue, EditorError> {
        let invalid = |message: String| EditorError::InvalidValue {
            field: self.name.to_string(),
            message,
        };

        match self.kind {
            FieldKind::Text | FieldKind::Content | FieldKind::Markup => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Flag { .. } => match raw.trim() {
                "true" | "yes" | "on" | "1" => Ok(FieldValue::Flag(true)),
                "false" | "no" | "off" | "0" => Ok(FieldValue::Flag(false)),
                other => Err(invalid(format!("expected a boolean, got '{}'", other))),
            },
            FieldKind::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(FieldValue::Number(None));
                }
                trimmed
                    .parse::<f64>()
                    .map(|n| FieldValue::Number(Some(n)))
                    .map_err(|_| invalid(format!("expected a number, got '{}'", trimmed)))
            }
            FieldKind::Choice { choices, default } => {
                let trimmed = raw.trim();
                if trimmed == default || choices.contains(&trimmed) {
                    Ok(FieldValue::Text(trimmed.to_string()))
                } else {
                    Err(invalid(format!("expected one of {}", choices.join(", "))))
                }
            }
            FieldKind::Literal => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(FieldValue::Literal(None));
                }
                let parsed = serde_json::from_str(trimmed)
                    .or_else(|_| js_literal::parse(trimmed))
                    .map_err(|e| invalid(e.to_string()))?;
                Ok(FieldValue::Literal(Some(parsed)))
            }
            FieldKind::Items { .. } => {
                let entries: Vec<BTreeMap<String, String>> =
                    serde_json::from_str(raw).map_err(|e| invalid(format!("expected a JSON array of objects: {}", e)))?;
                Ok(FieldValue::Items(entries))
            }
        }
    }
}

/// How the widget is wrapped inside its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    /// Widget stands alone.
    Bare,
    /// `<Form.Item ...>` around the widget; `fixed` attributes are always written.
    FormItem { fixed: &'static [(&'static str, &'static str)] },
    /// `Form.Item` only when one of its fields is set.
    OptionalFormItem,
    /// Visible item with the widget followed by a hidden item that stores the value.
    FormItemWithHiddenStore,
}

/// Declarative description of one widget type's editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSchema {
    pub widget: WidgetType,
    pub tag: &'static str,
    pub wrapper: Wrapper,
    /// Widget attributes emitted verbatim after the declared fields.
    pub fixed: &'static [(&'static str, &'static str)],
    pub fields: &'static [FieldSpec],
}

impl EditorSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The field rendered as the widget's children, if any.
    pub fn body_field(&self) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| matches!(f.kind, FieldKind::Content | FieldKind::Markup | FieldKind::Items { .. }))
    }

    pub fn defaults(&self) -> StructuredFields {
        StructuredFields {
            widget: self.widget,
            values: self
                .fields
                .iter()
                .map(|f| (f.name.to_string(), f.default_value()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Number(Option<f64>),
    Literal(Option<serde_json::Value>),
    Items(Vec<BTreeMap<String, String>>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => *n,
            _ => None,
        }
    }
}

/// Decoded editor state for one block: every schema field with a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredFields {
    pub widget: WidgetType,
    pub values: BTreeMap<String, FieldValue>,
}

impl StructuredFields {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn flag(&self, field: &str) -> bool {
        self.get(field).and_then(FieldValue::as_flag).unwrap_or(false)
    }

    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<(), EditorError> {
        match self.values.get_mut(field) {
            Some(slot) => {
                if std::mem::discriminant(slot) != std::mem::discriminant(&value) {
                    return Err(EditorError::InvalidValue {
                        field: field.to_string(),
                        message: "value has the wrong kind for this field".to_string(),
                    });
                }
                *slot = value;
                Ok(())
            }
            None => Err(EditorError::UnknownField { field: field.to_string() }),
        }
    }
}
