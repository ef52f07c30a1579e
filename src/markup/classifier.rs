use crate::markup::block::WidgetType;

/// Ordered substring checks, most specific first. The first hit wins, so moving
/// an entry changes results: `<Input.Password` must precede `<Input`,
/// `<DatePicker.RangePicker` must precede `<DatePicker `, and `<Checkbox.Group`
/// must precede `<Checkbox`.
const CHECKS: &[(&str, WidgetType)] = &[
    ("<Input.Password", WidgetType::Password),
    ("<Input.TextArea", WidgetType::Textarea),
    ("<InputNumber", WidgetType::InputNumber),
    ("<Select", WidgetType::Select),
    ("<DatePicker.RangePicker", WidgetType::RangePicker),
    ("<DatePicker ", WidgetType::DatePicker),
    ("<TimePicker", WidgetType::TimePicker),
    ("<Checkbox.Group", WidgetType::CheckboxGroup),
    ("<Checkbox", WidgetType::Checkbox),
    ("<Radio.Group", WidgetType::RadioGroup),
    ("<Switch", WidgetType::Switch),
    ("<Upload", WidgetType::Upload),
    ("<Slider", WidgetType::Slider),
    ("<Rate", WidgetType::Rate),
    ("<Cascader", WidgetType::Cascader),
    ("<TreeSelect", WidgetType::TreeSelect),
    ("<Mentions", WidgetType::Mentions),
    ("<AutoComplete", WidgetType::AutoComplete),
    ("<Transfer", WidgetType::Transfer),
    ("<Input.Search", WidgetType::Search),
    ("<Button", WidgetType::Submit),
    ("<Steps", WidgetType::Steps),
    ("<ColorPicker", WidgetType::ColorPicker),
    ("<Tour", WidgetType::Tour),
    ("<Segmented", WidgetType::Segmented),
    ("<FloatButton", WidgetType::FloatButton),
    ("<Watermark", WidgetType::Watermark),
    ("<Descriptions", WidgetType::Descriptions),
    ("<Space.Compact", WidgetType::InputGroup),
    ("<Input", WidgetType::Text),
];

/// Classify one block's text. Unrecognised text yields `WidgetType::Other`.
pub fn classify_block(text: &str) -> WidgetType {
    if text.is_empty() {
        return WidgetType::Other;
    }

    CHECKS
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, widget)| *widget)
        .unwrap_or(WidgetType::Other)
}

/// The check order, exposed so tests can pin it.
pub fn classification_order() -> Vec<WidgetType> {
    CHECKS.iter().map(|(_, widget)| *widget).collect()
}
