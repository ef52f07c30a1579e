use serde::Serialize;

use crate::markup::block::WidgetType;

/// A block as surfaced to the reorder/edit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedInput {
    pub id: String,
    pub label: String,
    pub widget: WidgetType,
    pub content: String,
}
