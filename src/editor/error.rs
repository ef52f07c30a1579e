use thiserror::Error;

use crate::markup::block::WidgetType;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditorError {
    #[error("no structured editor for '{widget}' blocks; edit the raw code instead")]
    NoEditor { widget: WidgetType },

    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("no block with id '{id}'")]
    BlockNotFound { id: String },
}
