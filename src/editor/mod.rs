//! Structured field editors.
//!
//! One engine ([`codec`]) driven by a declaration per widget type ([`schemas`]).
//! An editor decodes a block into [`StructuredFields`], the caller changes
//! values, and the editor encodes the result back into block markup.

pub mod codec;
pub mod error;
pub mod js_literal;
pub mod schema;
pub mod schemas;

pub use error::EditorError;
pub use schema::{EditorSchema, FieldKind, FieldSpec, FieldValue, StructuredFields};

use crate::library::profile::LibraryProfile;
use crate::markup::block::WidgetType;
use crate::markup::classifier::classify_block;

/// The editor for one widget type.
#[derive(Debug, Clone, Copy)]
pub struct FieldEditor {
    schema: &'static EditorSchema,
}

impl FieldEditor {
    pub fn for_widget(widget: WidgetType) -> Result<Self, EditorError> {
        schemas::schema_for(widget)
            .map(|schema| Self { schema })
            .ok_or(EditorError::NoEditor { widget })
    }

    /// Editor chosen by classifying the block text.
    pub fn for_block(text: &str) -> Result<Self, EditorError> {
        Self::for_widget(classify_block(text))
    }

    pub fn schema(&self) -> &'static EditorSchema {
        self.schema
    }

    pub fn decode(&self, text: &str) -> StructuredFields {
        codec::decode(self.schema, text)
    }

    pub fn encode(&self, fields: &StructuredFields, profile: LibraryProfile) -> String {
        codec::encode(self.schema, fields, profile)
    }

    /// Decode, apply `field=value` assignments, encode.
    pub fn apply<K, V>(&self, text: &str, assignments: &[(K, V)], profile: LibraryProfile) -> Result<String, EditorError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut fields = self.decode(text);
        for (field, raw) in assignments {
            let spec = self
                .schema
                .field(field.as_ref())
                .ok_or_else(|| EditorError::UnknownField { field: field.as_ref().to_string() })?;
            fields.set(spec.name, spec.parse_value(raw.as_ref())?)?;
        }
        Ok(self.encode(&fields, profile))
    }
}

/// Split `field=value` into its parts.
pub fn parse_assignment(raw: &str) -> Result<(String, String), EditorError> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim().to_string(), value.to_string())),
        _ => Err(EditorError::InvalidValue {
            field: raw.to_string(),
            message: "expected field=value".to_string(),
        }),
    }
}
