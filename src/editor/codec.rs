//! Decode and encode engine shared by every widget schema.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::editor::js_literal;
use crate::editor::schema::{EditorSchema, FieldKind, FieldSpec, FieldValue, ItemKey, StructuredFields, Target, Wrapper};
use crate::library::profile::LibraryProfile;
use crate::markup::scan::{AttrValue, OpenTag, find_open_tag, find_open_tags, matching_close};

/// Attributes checked for an inline list when a widget has no child elements.
const INLINE_ITEM_ATTRS: &[&str] = &["options", "items"];

// ============================================================================
// Decode
// ============================================================================

struct Located<'a> {
    text: &'a str,
    item: Option<OpenTag>,
    hidden: Option<OpenTag>,
    widget: Option<OpenTag>,
}

impl<'a> Located<'a> {
    fn new(schema: &EditorSchema, text: &'a str) -> Self {
        let items = find_open_tags(text, "Form.Item");
        let item = items.iter().find(|t| t.attr("hidden").is_none()).cloned();
        let hidden = items.into_iter().find(|t| t.attr("hidden").is_some());
        Self { text, item, hidden, widget: find_open_tag(text, schema.tag) }
    }

    fn tag_for(&self, target: Target) -> Option<&OpenTag> {
        match target {
            Target::Item => self.item.as_ref(),
            Target::Hidden => self.hidden.as_ref(),
            Target::Widget => self.widget.as_ref(),
        }
    }

    fn widget_inner(&self) -> Option<&'a str> {
        let open = self.widget.as_ref()?;
        let (start, end, _) = matching_close(self.text, open)?;
        Some(&self.text[start..end])
    }
}

/// Read a quoted JS string from an expression (`{'Email'}`).
fn unquote(expr: &str) -> Option<String> {
    match js_literal::parse(expr) {
        Ok(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn attr_text(value: &AttrValue) -> Option<String> {
    match value {
        AttrValue::Str(s) => Some(s.clone()),
        AttrValue::Expr(e) => unquote(e),
        AttrValue::Flag => None,
    }
}

fn decode_attr(kind: FieldKind, value: &AttrValue) -> Option<FieldValue> {
    match kind {
        FieldKind::Text => attr_text(value).map(FieldValue::Text),
        FieldKind::Flag { .. } => match value {
            AttrValue::Flag => Some(FieldValue::Flag(true)),
            AttrValue::Str(s) | AttrValue::Expr(s) => match s.trim() {
                "true" => Some(FieldValue::Flag(true)),
                "false" => Some(FieldValue::Flag(false)),
                _ => None,
            },
        },
        FieldKind::Number => match value {
            AttrValue::Str(s) | AttrValue::Expr(s) => s.trim().parse::<f64>().ok().map(|n| FieldValue::Number(Some(n))),
            AttrValue::Flag => None,
        },
        FieldKind::Choice { choices, default } => {
            attr_text(value).filter(|s| s == default || choices.contains(&s.as_str())).map(FieldValue::Text)
        }
        FieldKind::Literal => match value {
            AttrValue::Expr(e) => js_literal::parse(e).ok().map(|v| FieldValue::Literal(Some(v))),
            _ => None,
        },
        FieldKind::Content | FieldKind::Markup | FieldKind::Items { .. } => None,
    }
}

fn json_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn decode_inline_items(
    tag: &OpenTag,
    keys: &[ItemKey],
    text_key: Option<&'static str>,
) -> Vec<BTreeMap<String, String>> {
    let Some(Value::Array(list)) = INLINE_ITEM_ATTRS
        .iter()
        .find_map(|name| match tag.attr(name) {
            Some(AttrValue::Expr(e)) => js_literal::parse(e).ok(),
            _ => None,
        })
    else {
        return Vec::new();
    };

    let names: Vec<&'static str> = keys.iter().map(|k| k.name).chain(text_key).collect();
    list.iter()
        .filter_map(|entry| match entry {
            Value::Object(map) => {
                let mut out = BTreeMap::new();
                for name in &names {
                    if let Some(v) = map.get(*name).and_then(json_to_text) {
                        out.insert(name.to_string(), v);
                    }
                }
                Some(out)
            }
            other => {
                let v = json_to_text(other)?;
                Some(names.iter().map(|n| (n.to_string(), v.clone())).collect())
            }
        })
        .collect()
}

fn decode_items(
    located: &Located<'_>,
    child_tags: &[&str],
    keys: &[ItemKey],
    text_key: Option<&'static str>,
) -> Vec<BTreeMap<String, String>> {
    let scope = match &located.widget {
        Some(_) => located.widget_inner().unwrap_or(""),
        None => located.text,
    };

    let mut children: Vec<OpenTag> = child_tags.iter().flat_map(|tag| find_open_tags(scope, tag)).collect();
    children.sort_by_key(|t| t.start);

    if children.is_empty() {
        return match &located.widget {
            Some(widget) => decode_inline_items(widget, keys, text_key),
            None => Vec::new(),
        };
    }

    children
        .iter()
        .map(|child| {
            let mut entry = BTreeMap::new();
            for key in keys {
                let value = match child.attr(key.name) {
                    Some(AttrValue::Str(s)) => Some(s.clone()),
                    Some(AttrValue::Expr(e)) => Some(unquote(e).unwrap_or_else(|| e.clone())),
                    _ => None,
                };
                if let Some(v) = value {
                    entry.insert(key.name.to_string(), v);
                }
            }
            if let Some(text_key) = text_key {
                if let Some((start, end, _)) = matching_close(scope, child) {
                    let inner = scope[start..end].trim();
                    if !inner.is_empty() {
                        entry.insert(text_key.to_string(), inner.to_string());
                    }
                }
            }
            entry
        })
        .collect()
}

/// Decode a block into the schema's structured fields. Missing or unreadable
/// attributes take the field default.
pub fn decode(schema: &EditorSchema, text: &str) -> StructuredFields {
    let located = Located::new(schema, text);
    let mut fields = schema.defaults();

    for spec in schema.fields {
        let value = match spec.kind {
            FieldKind::Content | FieldKind::Markup => located
                .widget_inner()
                .map(|inner| FieldValue::Text(inner.trim().to_string())),
            FieldKind::Items { child_tags, keys, text_key } => {
                Some(FieldValue::Items(decode_items(&located, child_tags, keys, text_key)))
            }
            kind => located
                .tag_for(spec.target)
                .and_then(|tag| tag.attr(spec.name))
                .and_then(|value| decode_attr(kind, value)),
        };

        if let Some(value) = value {
            fields.values.insert(spec.name.to_string(), value);
        }
    }

    fields
}

// ============================================================================
// Encode
// ============================================================================

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn string_attr(name: &str, value: &str) -> String {
    if value.contains('"') {
        format!("{}={{{}}}", name, js_literal::to_js(&Value::String(value.to_string())))
    } else {
        format!(r#"{}="{}""#, name, value)
    }
}

/// Render one attribute, or `None` when it equals its default or the profile
/// predates it.
fn encode_attr(spec: &FieldSpec, value: &FieldValue, profile: LibraryProfile) -> Option<String> {
    if spec.since > profile {
        return None;
    }

    match (spec.kind, value) {
        (FieldKind::Text, FieldValue::Text(s)) if !s.is_empty() => Some(string_attr(spec.name, s)),
        (FieldKind::Flag { default }, FieldValue::Flag(b)) if *b != default => Some(if *b {
            spec.name.to_string()
        } else {
            format!("{}={{false}}", spec.name)
        }),
        (FieldKind::Number, FieldValue::Number(Some(n))) => Some(format!("{}={{{}}}", spec.name, format_number(*n))),
        (FieldKind::Choice { default, .. }, FieldValue::Text(s)) if !s.is_empty() && s != default => {
            Some(string_attr(spec.name, s))
        }
        (FieldKind::Literal, FieldValue::Literal(Some(v))) => Some(format!("{}={{{}}}", spec.name, js_literal::to_js(v))),
        _ => None,
    }
}

fn attrs_for(schema: &EditorSchema, fields: &StructuredFields, target: Target, profile: LibraryProfile) -> Vec<String> {
    schema
        .fields
        .iter()
        .filter(|spec| spec.target == target)
        .filter_map(|spec| {
            let value = fields.get(spec.name)?;
            encode_attr(spec, value, profile)
        })
        .collect()
}

fn open_tag(tag: &str, attrs: &[String], self_closing: bool) -> String {
    let mut out = format!("<{}", tag);
    for attr in attrs {
        out.push(' ');
        out.push_str(attr);
    }
    out.push_str(if self_closing { " />" } else { ">" });
    out
}

fn encode_item_entry(
    tag: &str,
    entry: &BTreeMap<String, String>,
    keys: &[ItemKey],
    text_key: Option<&str>,
) -> String {
    let attrs: Vec<String> = keys
        .iter()
        .filter_map(|key| {
            let v = entry.get(key.name).filter(|v| !v.is_empty())?;
            if key.numeric && v.parse::<f64>().is_ok() {
                Some(format!("{}={{{}}}", key.name, v))
            } else {
                Some(string_attr(key.name, v))
            }
        })
        .collect();

    match text_key.and_then(|k| entry.get(k)).filter(|t| !t.is_empty()) {
        Some(text) => format!("{}{}</{}>", open_tag(tag, &attrs, false), text, tag),
        None => open_tag(tag, &attrs, true),
    }
}

fn encode_widget(schema: &EditorSchema, fields: &StructuredFields, profile: LibraryProfile, indent: &str) -> String {
    let mut attrs = attrs_for(schema, fields, Target::Widget, profile);
    attrs.extend(schema.fixed.iter().map(|(k, v)| format!("{}={}", k, v)));

    let body = schema.body_field().and_then(|spec| Some((spec, fields.get(spec.name)?)));
    let Some((spec, value)) = body else {
        return format!("{}{}", indent, open_tag(schema.tag, &attrs, true));
    };

    let open = open_tag(schema.tag, &attrs, false);
    let close = format!("</{}>", schema.tag);
    match (spec.kind, value) {
        (FieldKind::Content, FieldValue::Text(text)) if !text.is_empty() => {
            format!("{}{}{}{}", indent, open, text, close)
        }
        (FieldKind::Markup, FieldValue::Text(markup)) if !markup.is_empty() => {
            format!("{indent}{open}\n{indent}  {markup}\n{indent}{close}")
        }
        (FieldKind::Items { child_tags, keys, text_key }, FieldValue::Items(entries)) if !entries.is_empty() => {
            let child_tag = child_tags.first().copied().unwrap_or("Option");
            let mut out = format!("{}{}\n", indent, open);
            for entry in entries {
                out.push_str(&format!("{}  {}\n", indent, encode_item_entry(child_tag, entry, keys, text_key)));
            }
            out.push_str(indent);
            out.push_str(&close);
            out
        }
        _ => format!("{}{}", indent, open_tag(schema.tag, &attrs, true)),
    }
}

fn wrap_in_item(attrs: &[String], fixed: &[(&str, &str)], widget: &str) -> String {
    let mut all: Vec<String> = attrs.to_vec();
    all.extend(fixed.iter().map(|(k, v)| format!(r#"{}="{}""#, k, v)));
    format!("{}\n{}\n</Form.Item>", open_tag("Form.Item", &all, false), widget)
}

/// Encode structured fields back to block markup. Attribute order follows the
/// schema's field order; default-valued attributes are omitted.
pub fn encode(schema: &EditorSchema, fields: &StructuredFields, profile: LibraryProfile) -> String {
    let item_attrs = attrs_for(schema, fields, Target::Item, profile);

    match schema.wrapper {
        Wrapper::Bare => encode_widget(schema, fields, profile, ""),
        Wrapper::FormItem { fixed } => wrap_in_item(&item_attrs, fixed, &encode_widget(schema, fields, profile, "  ")),
        Wrapper::OptionalFormItem if item_attrs.is_empty() => encode_widget(schema, fields, profile, ""),
        Wrapper::OptionalFormItem => wrap_in_item(&item_attrs, &[], &encode_widget(schema, fields, profile, "  ")),
        Wrapper::FormItemWithHiddenStore => {
            let visible = wrap_in_item(&item_attrs, &[], &encode_widget(schema, fields, profile, "  "));
            let mut hidden_attrs = attrs_for(schema, fields, Target::Hidden, profile);
            hidden_attrs.push("hidden".to_string());
            format!("{}\n{}\n  <Input />\n</Form.Item>", visible, open_tag("Form.Item", &hidden_attrs, false))
        }
    }
}
