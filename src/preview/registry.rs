use std::collections::BTreeMap;

use crate::library::profile::LibraryProfile;

/// Render behaviour a registered tag dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// `Form`: accepts any children.
    Form,
    /// `Form.Item`: a named item wraps exactly one element.
    FormItem,
    /// Renders a native input; children are not allowed.
    VoidField,
    /// Interactive widget that may carry children (options, upload trigger).
    Field,
    /// Child entry of a field (`Select.Option`, `Steps.Step`).
    Entry,
    /// Layout wrapper (`Space`, `Watermark`, `Descriptions`).
    Layout,
    /// Clickable element (`Button`, `FloatButton`).
    Action,
    /// Display-only element (`Divider`, `QRCode`, `Image`).
    Display,
    /// Lower-case HTML element.
    Intrinsic,
}

impl ComponentKind {
    pub fn accepts_children(&self) -> bool {
        !matches!(self, ComponentKind::VoidField)
    }
}

const V3_COMPONENTS: &[(&str, ComponentKind)] = &[
    ("Form", ComponentKind::Form),
    ("Form.Item", ComponentKind::FormItem),
    ("Input", ComponentKind::VoidField),
    ("Input.Password", ComponentKind::VoidField),
    ("Input.TextArea", ComponentKind::VoidField),
    ("Input.Search", ComponentKind::VoidField),
    ("InputNumber", ComponentKind::VoidField),
    ("Button", ComponentKind::Action),
    ("DatePicker", ComponentKind::Field),
    ("DatePicker.RangePicker", ComponentKind::Field),
    ("TimePicker", ComponentKind::Field),
    ("Upload", ComponentKind::Field),
    ("Checkbox", ComponentKind::Field),
    ("Checkbox.Group", ComponentKind::Field),
    ("Radio", ComponentKind::Entry),
    ("Radio.Button", ComponentKind::Entry),
    ("Radio.Group", ComponentKind::Field),
    ("Select", ComponentKind::Field),
    ("Select.Option", ComponentKind::Entry),
    ("Option", ComponentKind::Entry),
    ("Slider", ComponentKind::Field),
    ("Rate", ComponentKind::Field),
    ("Cascader", ComponentKind::Field),
    ("TreeSelect", ComponentKind::Field),
    ("Mentions", ComponentKind::Field),
    ("Mentions.Option", ComponentKind::Entry),
    ("AutoComplete", ComponentKind::Field),
    ("Transfer", ComponentKind::Field),
    ("Switch", ComponentKind::Field),
];

const V4_COMPONENTS: &[(&str, ComponentKind)] = &[
    ("Descriptions", ComponentKind::Layout),
    ("Descriptions.Item", ComponentKind::Entry),
    ("Steps", ComponentKind::Layout),
    ("Steps.Step", ComponentKind::Entry),
    ("Space", ComponentKind::Layout),
    ("Space.Compact", ComponentKind::Layout),
    ("Divider", ComponentKind::Display),
];

const V5_COMPONENTS: &[(&str, ComponentKind)] = &[
    ("Image", ComponentKind::Display),
    ("Image.PreviewGroup", ComponentKind::Layout),
    ("ColorPicker", ComponentKind::Field),
    ("Segmented", ComponentKind::Field),
    ("Tour", ComponentKind::Action),
    ("FloatButton", ComponentKind::Action),
    ("Watermark", ComponentKind::Layout),
    ("QRCode", ComponentKind::Display),
];

const INTRINSIC_TAGS: &[&str] = &["div", "span", "p", "br", "strong"];

/// Tag-name lookup table for one library profile.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    profile: LibraryProfile,
    components: BTreeMap<&'static str, ComponentKind>,
}

impl ComponentRegistry {
    pub fn for_profile(profile: LibraryProfile) -> Self {
        let mut components = BTreeMap::new();
        let mut add = |list: &[(&'static str, ComponentKind)]| {
            for (tag, kind) in list {
                components.insert(*tag, *kind);
            }
        };

        add(V3_COMPONENTS);
        if profile >= LibraryProfile::V4 {
            add(V4_COMPONENTS);
        }
        if profile >= LibraryProfile::V5 {
            add(V5_COMPONENTS);
        }

        Self { profile, components }
    }

    pub fn profile(&self) -> LibraryProfile {
        self.profile
    }

    pub fn lookup(&self, tag: &str) -> Option<ComponentKind> {
        if INTRINSIC_TAGS.contains(&tag) {
            return Some(ComponentKind::Intrinsic);
        }
        self.components.get(tag).copied()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.lookup(tag).is_some()
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
