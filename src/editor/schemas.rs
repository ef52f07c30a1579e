//! Per-widget editor declarations. Field order is the canonical attribute order.

use crate::editor::schema::{EditorSchema, FieldKind, FieldSpec, ItemKey, Wrapper};
use crate::library::profile::LibraryProfile::{V4, V5};
use crate::markup::block::WidgetType;

const SIZES: FieldKind = FieldKind::Choice { choices: &["small", "middle", "large"], default: "middle" };
const SMALL_OR_DEFAULT: FieldKind = FieldKind::Choice { choices: &["default", "small"], default: "default" };
const STATUS: FieldKind = FieldKind::Choice { choices: &["error", "warning"], default: "" };
const DIRECTION: FieldKind = FieldKind::Choice { choices: &["horizontal", "vertical"], default: "horizontal" };

const TEXT: FieldKind = FieldKind::Text;
const NUMBER: FieldKind = FieldKind::Number;
const LITERAL: FieldKind = FieldKind::Literal;
const OFF: FieldKind = FieldKind::Flag { default: false };
const ON: FieldKind = FieldKind::Flag { default: true };

const VALUE_KEY: &[ItemKey] = &[ItemKey { name: "value", numeric: false }];

const LABEL: FieldSpec = FieldSpec::item("label");
const NAME: FieldSpec = FieldSpec::item("name");

const fn w(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec::widget(name, kind)
}

const CHECKED: Wrapper = Wrapper::FormItem { fixed: &[("valuePropName", "checked")] };
const ITEM: Wrapper = Wrapper::FormItem { fixed: &[] };

static SCHEMAS: &[EditorSchema] = &[
    EditorSchema {
        widget: WidgetType::Text,
        tag: "Input",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("maxLength", NUMBER),
            w("disabled", OFF),
            w("allowClear", OFF).since(V4),
            w("showCount", OFF).since(V4),
            w("status", STATUS).since(V4),
            w("size", SIZES),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Password,
        tag: "Input.Password",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("maxLength", NUMBER),
            w("disabled", OFF),
            w("visibilityToggle", ON),
            w("status", STATUS).since(V4),
            w("size", SIZES),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Textarea,
        tag: "Input.TextArea",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("rows", NUMBER),
            w("maxLength", NUMBER),
            w("disabled", OFF),
            w("allowClear", OFF).since(V4),
            w("showCount", OFF).since(V4),
            w("autoSize", OFF).since(V4),
            w("status", STATUS).since(V4),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::InputNumber,
        tag: "InputNumber",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("min", NUMBER),
            w("max", NUMBER),
            w("step", NUMBER),
            w("precision", NUMBER),
            w("disabled", OFF),
            w("readOnly", OFF),
            w("autoFocus", OFF),
            w("keyboard", ON),
            w("controls", ON),
            w("size", SIZES),
            w("status", STATUS).since(V4),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Select,
        tag: "Select",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("mode", FieldKind::Choice { choices: &["multiple", "tags"], default: "" }),
            w("allowClear", OFF),
            w("showSearch", OFF),
            w("optionFilterProp", TEXT),
            w("maxTagCount", NUMBER),
            w("disabled", OFF),
            w("loading", OFF),
            w("autoFocus", OFF),
            w("size", SIZES),
            w("status", STATUS).since(V4),
            w("id", TEXT),
            w(
                "options",
                FieldKind::Items { child_tags: &["Select.Option", "Option"], keys: VALUE_KEY, text_key: Some("label") },
            ),
        ],
    },
    EditorSchema {
        widget: WidgetType::DatePicker,
        tag: "DatePicker",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("picker", FieldKind::Choice { choices: &["date", "week", "month", "quarter", "year"], default: "date" }),
            w("format", TEXT),
            w("showTime", OFF),
            w("allowClear", ON),
            w("disabled", OFF),
            w("size", SIZES),
            w("status", STATUS).since(V4),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::TimePicker,
        tag: "TimePicker",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("format", TEXT),
            w("use12Hours", OFF),
            w("hourStep", NUMBER),
            w("minuteStep", NUMBER),
            w("secondStep", NUMBER),
            w("allowClear", ON),
            w("disabled", OFF),
            w("autoFocus", OFF),
            w("status", STATUS).since(V4),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::RangePicker,
        tag: "DatePicker.RangePicker",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("picker", FieldKind::Choice { choices: &["date", "week", "month", "quarter", "year"], default: "date" }),
            w("format", TEXT),
            w("showTime", OFF),
            w("allowClear", ON),
            w("disabled", OFF),
            w("autoFocus", OFF),
            w("status", STATUS).since(V4),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Checkbox,
        tag: "Checkbox",
        wrapper: CHECKED,
        fixed: &[],
        fields: &[
            NAME,
            w("disabled", OFF),
            w("indeterminate", OFF),
            w("autoFocus", OFF),
            w("id", TEXT),
            w("text", FieldKind::Content),
        ],
    },
    EditorSchema {
        widget: WidgetType::CheckboxGroup,
        tag: "Checkbox.Group",
        wrapper: ITEM,
        fixed: &[],
        fields: &[LABEL, NAME, w("options", LITERAL), w("disabled", OFF), w("id", TEXT)],
    },
    EditorSchema {
        widget: WidgetType::RadioGroup,
        tag: "Radio.Group",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("optionType", FieldKind::Choice { choices: &["default", "button"], default: "default" }),
            w("buttonStyle", FieldKind::Choice { choices: &["outline", "solid"], default: "outline" }),
            w("size", SIZES),
            w("disabled", OFF),
            w("id", TEXT),
            w(
                "options",
                FieldKind::Items { child_tags: &["Radio", "Radio.Button"], keys: VALUE_KEY, text_key: Some("label") },
            ),
        ],
    },
    EditorSchema {
        widget: WidgetType::Switch,
        tag: "Switch",
        wrapper: CHECKED,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("checkedChildren", TEXT),
            w("unCheckedChildren", TEXT),
            w("disabled", OFF),
            w("loading", OFF),
            w("size", SMALL_OR_DEFAULT),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Upload,
        tag: "Upload",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("action", TEXT),
            w("accept", TEXT),
            w(
                "listType",
                FieldKind::Choice { choices: &["text", "picture", "picture-card", "picture-circle"], default: "text" },
            ),
            w("multiple", OFF),
            w("maxCount", NUMBER),
            w("showUploadList", ON),
            w("disabled", OFF),
            w("fileList", LITERAL),
            w("id", TEXT),
            w("children", FieldKind::Markup),
        ],
    },
    EditorSchema {
        widget: WidgetType::Slider,
        tag: "Slider",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("min", NUMBER),
            w("max", NUMBER),
            w("step", NUMBER),
            w("range", OFF),
            w("dots", OFF),
            w("vertical", OFF),
            w("disabled", OFF),
            w("marks", LITERAL),
            w("tooltip", LITERAL).since(V5),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Rate,
        tag: "Rate",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("count", NUMBER),
            w("allowHalf", OFF),
            w("allowClear", ON),
            w("disabled", OFF),
            w("autoFocus", OFF),
            w("tooltips", LITERAL),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Cascader,
        tag: "Cascader",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("expandTrigger", FieldKind::Choice { choices: &["click", "hover"], default: "click" }),
            w("changeOnSelect", OFF),
            w("multiple", OFF),
            w("maxTagCount", NUMBER),
            w("showSearch", OFF),
            w("allowClear", ON),
            w("bordered", ON),
            w("disabled", OFF),
            w("loading", OFF),
            w("size", SIZES),
            w("status", STATUS).since(V4),
            w("options", LITERAL),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::TreeSelect,
        tag: "TreeSelect",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("multiple", OFF),
            w("treeCheckable", OFF),
            w("treeCheckStrictly", OFF),
            w("treeDefaultExpandAll", OFF),
            w("showSearch", OFF),
            w("allowClear", ON),
            w("bordered", ON),
            w("disabled", OFF),
            w("loading", OFF),
            w("size", SIZES),
            w("status", STATUS).since(V4),
            w("treeData", LITERAL),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Mentions,
        tag: "Mentions",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("prefix", TEXT),
            w("autoFocus", OFF),
            w("readOnly", OFF),
            w("disabled", OFF),
            w("status", STATUS).since(V4),
            w("id", TEXT),
            w(
                "options",
                FieldKind::Items { child_tags: &["Mentions.Option"], keys: VALUE_KEY, text_key: Some("label") },
            ),
        ],
    },
    EditorSchema {
        widget: WidgetType::AutoComplete,
        tag: "AutoComplete",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("allowClear", OFF),
            w("autoFocus", OFF),
            w("disabled", OFF),
            w("status", STATUS).since(V4),
            w("options", LITERAL),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Transfer,
        tag: "Transfer",
        wrapper: Wrapper::FormItemWithHiddenStore,
        fixed: &[("targetKeys", "{[]}"), ("render", "{item => item.title}")],
        fields: &[
            LABEL,
            FieldSpec::hidden("name"),
            w("dataSource", LITERAL),
            w("titles", LITERAL),
            w("oneWay", OFF),
            w("showSearch", OFF),
            w("disabled", OFF),
            w("status", STATUS).since(V4),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Search,
        tag: "Input.Search",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("placeholder", TEXT),
            w("enterButton", OFF),
            w("allowClear", OFF),
            w("loading", OFF),
            w("disabled", OFF),
            w("size", SIZES),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Submit,
        tag: "Button",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            w("type", FieldKind::Choice { choices: &["primary", "dashed", "link", "text", "default"], default: "default" }),
            w("htmlType", FieldKind::Choice { choices: &["submit", "button", "reset"], default: "" }),
            w("size", SIZES),
            w("block", OFF),
            w("danger", OFF),
            w("loading", OFF),
            w("disabled", OFF),
            w("id", TEXT),
            w("text", FieldKind::Content),
        ],
    },
    EditorSchema {
        widget: WidgetType::Steps,
        tag: "Steps",
        wrapper: Wrapper::OptionalFormItem,
        fixed: &[],
        fields: &[
            LABEL,
            w("current", NUMBER),
            w("direction", DIRECTION),
            w("size", SMALL_OR_DEFAULT),
            w("progressDot", OFF),
            w("id", TEXT),
            w(
                "steps",
                FieldKind::Items {
                    child_tags: &["Steps.Step"],
                    keys: &[
                        ItemKey { name: "title", numeric: false },
                        ItemKey { name: "subTitle", numeric: false },
                        ItemKey { name: "description", numeric: false },
                    ],
                    text_key: None,
                },
            ),
        ],
    },
    EditorSchema {
        widget: WidgetType::ColorPicker,
        tag: "ColorPicker",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("format", FieldKind::Choice { choices: &["hex", "rgb", "hsb"], default: "hex" }),
            w("showText", OFF),
            w("allowClear", OFF),
            w("disabled", OFF),
            w("size", SIZES),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Tour,
        tag: "Tour",
        wrapper: Wrapper::Bare,
        fixed: &[],
        fields: &[
            w("open", OFF),
            w("type", FieldKind::Choice { choices: &["default", "primary"], default: "default" }),
            w("arrow", ON),
            w("mask", ON),
            w("steps", LITERAL),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Segmented,
        tag: "Segmented",
        wrapper: ITEM,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("block", OFF),
            w("disabled", OFF),
            w("size", SIZES),
            w("options", LITERAL),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::FloatButton,
        tag: "FloatButton",
        wrapper: Wrapper::Bare,
        fixed: &[],
        fields: &[
            w("type", FieldKind::Choice { choices: &["default", "primary"], default: "default" }),
            w("shape", FieldKind::Choice { choices: &["circle", "square"], default: "circle" }),
            w("tooltip", TEXT),
            w("description", TEXT),
            w("href", TEXT),
            w("badge", LITERAL),
            w("id", TEXT),
        ],
    },
    EditorSchema {
        widget: WidgetType::Watermark,
        tag: "Watermark",
        wrapper: Wrapper::Bare,
        fixed: &[],
        fields: &[
            w("content", TEXT),
            w("width", NUMBER),
            w("height", NUMBER),
            w("rotate", NUMBER),
            w("zIndex", NUMBER),
            w("gap", LITERAL),
            w("font", LITERAL),
            w("id", TEXT),
            w("children", FieldKind::Markup),
        ],
    },
    EditorSchema {
        widget: WidgetType::Descriptions,
        tag: "Descriptions",
        wrapper: Wrapper::Bare,
        fixed: &[],
        fields: &[
            w("title", TEXT),
            w("bordered", OFF),
            w("column", NUMBER),
            w("layout", DIRECTION),
            w("size", FieldKind::Choice { choices: &["default", "middle", "small"], default: "default" }),
            w("id", TEXT),
            w(
                "items",
                FieldKind::Items {
                    child_tags: &["Descriptions.Item"],
                    keys: &[ItemKey { name: "label", numeric: false }, ItemKey { name: "span", numeric: true }],
                    text_key: Some("content"),
                },
            ),
        ],
    },
    EditorSchema {
        widget: WidgetType::InputGroup,
        tag: "Space.Compact",
        wrapper: Wrapper::OptionalFormItem,
        fixed: &[],
        fields: &[
            LABEL,
            NAME,
            w("direction", DIRECTION),
            w("size", SIZES),
            w("block", OFF),
            w("id", TEXT),
            w("children", FieldKind::Markup),
        ],
    },
];

/// Editor schema for a widget type. `Other` has none.
pub fn schema_for(widget: WidgetType) -> Option<&'static EditorSchema> {
    SCHEMAS.iter().find(|s| s.widget == widget)
}

pub fn all_schemas() -> &'static [EditorSchema] {
    SCHEMAS
}
