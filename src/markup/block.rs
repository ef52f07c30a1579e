use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of widget tags a block can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    Text,
    Password,
    InputNumber,
    Textarea,
    Select,
    DatePicker,
    TimePicker,
    RangePicker,
    Checkbox,
    CheckboxGroup,
    RadioGroup,
    Switch,
    Upload,
    Slider,
    Rate,
    Cascader,
    TreeSelect,
    Mentions,
    AutoComplete,
    Transfer,
    Search,
    Submit,
    Steps,
    ColorPicker,
    Tour,
    Segmented,
    FloatButton,
    Watermark,
    Descriptions,
    InputGroup,
    Other,
}

impl WidgetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::Text => "text",
            WidgetType::Password => "password",
            WidgetType::InputNumber => "inputnumber",
            WidgetType::Textarea => "textarea",
            WidgetType::Select => "select",
            WidgetType::DatePicker => "datepicker",
            WidgetType::TimePicker => "timepicker",
            WidgetType::RangePicker => "rangepicker",
            WidgetType::Checkbox => "checkbox",
            WidgetType::CheckboxGroup => "checkboxgroup",
            WidgetType::RadioGroup => "radiogroup",
            WidgetType::Switch => "switch",
            WidgetType::Upload => "upload",
            WidgetType::Slider => "slider",
            WidgetType::Rate => "rate",
            WidgetType::Cascader => "cascader",
            WidgetType::TreeSelect => "treeselect",
            WidgetType::Mentions => "mentions",
            WidgetType::AutoComplete => "autocomplete",
            WidgetType::Transfer => "transfer",
            WidgetType::Search => "search",
            WidgetType::Submit => "submit",
            WidgetType::Steps => "steps",
            WidgetType::ColorPicker => "colorpicker",
            WidgetType::Tour => "tour",
            WidgetType::Segmented => "segmented",
            WidgetType::FloatButton => "floatbutton",
            WidgetType::Watermark => "watermark",
            WidgetType::Descriptions => "descriptions",
            WidgetType::InputGroup => "inputgroup",
            WidgetType::Other => "other",
        }
    }

    /// Human label used when a block carries no field name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WidgetType::Text => "Text input",
            WidgetType::Password => "Password",
            WidgetType::InputNumber => "Number",
            WidgetType::Textarea => "Textarea",
            WidgetType::Select => "Select",
            WidgetType::DatePicker => "Date picker",
            WidgetType::TimePicker => "Time picker",
            WidgetType::RangePicker => "Range picker",
            WidgetType::Checkbox => "Checkbox",
            WidgetType::CheckboxGroup => "Checkbox group",
            WidgetType::RadioGroup => "Radio group",
            WidgetType::Switch => "Switch",
            WidgetType::Upload => "Upload",
            WidgetType::Slider => "Slider",
            WidgetType::Rate => "Rate",
            WidgetType::Cascader => "Cascader",
            WidgetType::TreeSelect => "Tree select",
            WidgetType::Mentions => "Mentions",
            WidgetType::AutoComplete => "Autocomplete",
            WidgetType::Transfer => "Transfer",
            WidgetType::Search => "Search",
            WidgetType::Submit => "Submit button",
            WidgetType::Steps => "Steps",
            WidgetType::ColorPicker => "Color picker",
            WidgetType::Tour => "Tour",
            WidgetType::Segmented => "Segmented",
            WidgetType::FloatButton => "Float button",
            WidgetType::Watermark => "Watermark",
            WidgetType::Descriptions => "Descriptions",
            WidgetType::InputGroup => "Input group",
            WidgetType::Other => "Block",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte range of one block inside a markup document. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: usize,
    pub end: usize,
}

/// One segmented unit of a markup document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBlock {
    pub span: BlockSpan,
    pub text: String,
    pub widget: WidgetType,
    pub field_name: Option<String>,
}

impl FieldBlock {
    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}
