//! Markup interpretation: a lenient JSX reader and the render pass that turns
//! its tree into component nodes through the registry.

use crate::markup::scan::{Attr, AttrValue, find_brace_end, find_tag_end, parse_attributes, split_start_tag};
use crate::preview::error::RenderError;
use crate::preview::registry::{ComponentKind, ComponentRegistry};

// ============================================================================
// Syntax tree
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// `{...}` child expression, braces stripped.
    Expr(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<Attr>,
    pub children: Vec<Node>,
    /// Byte offset of `<` in the source.
    pub offset: usize,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }
}

/// Move every element offset in `nodes` forward by `base`, for trees parsed
/// from a slice of a larger document.
pub fn rebase(nodes: &mut [Node], base: usize) {
    for node in nodes {
        if let Node::Element(element) = node {
            element.offset += base;
            rebase(&mut element.children, base);
        }
    }
}

/// Parse markup into top-level nodes. Whitespace-only text is dropped.
pub fn parse(markup: &str) -> Result<Vec<Node>, RenderError> {
    let bytes = markup.as_bytes();
    let mut stack: Vec<Element> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();
    let mut i = 0usize;

    fn push(stack: &mut [Element], roots: &mut Vec<Node>, node: Node) {
        match stack.last_mut() {
            Some(open) => open.children.push(node),
            None => roots.push(node),
        }
    }

    while i < bytes.len() {
        match bytes[i] {
            b'<' => {
                let Some(gt) = find_tag_end(markup, i) else {
                    return Err(RenderError::Malformed { message: "unterminated tag".to_string(), offset: i });
                };
                let inside = &markup[i + 1..gt];

                if let Some(close_name) = inside.strip_prefix('/') {
                    let close_name = close_name.trim();
                    let Some(open) = stack.pop() else {
                        return Err(RenderError::Malformed {
                            message: format!("unexpected closing tag </{}>", close_name),
                            offset: i,
                        });
                    };
                    if open.tag != close_name {
                        return Err(RenderError::Malformed {
                            message: format!(
                                "expected </{}> but found </{}>",
                                open.tag, close_name
                            ),
                            offset: i,
                        });
                    }
                    push(&mut stack, &mut roots, Node::Element(open));
                    i = gt + 1;
                    continue;
                }

                let (name, attrs_src, self_closing) = split_start_tag(inside);
                if name.is_empty() {
                    return Err(RenderError::Malformed { message: "fragments are not supported".to_string(), offset: i });
                }
                let element = Element {
                    tag: name.to_string(),
                    attrs: parse_attributes(attrs_src),
                    children: Vec::new(),
                    offset: i,
                };
                if self_closing {
                    push(&mut stack, &mut roots, Node::Element(element));
                } else {
                    stack.push(element);
                }
                i = gt + 1;
            }
            b'{' => {
                let Some(close) = find_brace_end(markup, i) else {
                    return Err(RenderError::Malformed { message: "unterminated expression".to_string(), offset: i });
                };
                let expr = markup[i + 1..close].trim();
                if !(expr.is_empty() || expr.starts_with("/*")) {
                    push(&mut stack, &mut roots, Node::Expr(expr.to_string()));
                }
                i = close + 1;
            }
            _ => {
                let start = i;
                while i < bytes.len() && bytes[i] != b'<' && bytes[i] != b'{' {
                    i += 1;
                }
                let text = markup[start..i].trim();
                if !text.is_empty() {
                    push(&mut stack, &mut roots, Node::Text(text.to_string()));
                }
            }
        }
    }

    if let Some(open) = stack.pop() {
        return Err(RenderError::Malformed {
            message: format!("<{}> is never closed", open.tag),
            offset: open.offset,
        });
    }

    Ok(roots)
}

// ============================================================================
// Render pass
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    Component {
        tag: String,
        kind: ComponentKind,
        props: Vec<(String, String)>,
        children: Vec<RenderNode>,
    },
    Text(String),
    /// Recoverable failure shown in place of one top-level element.
    ErrorPanel { message: String },
}

impl RenderNode {
    pub fn is_error(&self) -> bool {
        matches!(self, RenderNode::ErrorPanel { .. })
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        let pad = "  ".repeat(depth);
        match self {
            RenderNode::Component { tag, props, children, .. } => {
                out.push_str(&pad);
                out.push_str(tag);
                if !props.is_empty() {
                    let rendered: Vec<String> = props.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                    out.push_str(&format!(" [{}]", rendered.join(" ")));
                }
                out.push('\n');
                for child in children {
                    child.write_outline(depth + 1, out);
                }
            }
            RenderNode::Text(text) => {
                out.push_str(&format!("{}\"{}\"\n", pad, text));
            }
            RenderNode::ErrorPanel { message } => {
                out.push_str(&format!("{}[render error] {}\n", pad, message));
            }
        }
    }
}

/// Indented text outline of rendered nodes.
pub fn outline(nodes: &[RenderNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_outline(0, &mut out);
    }
    out
}

fn display_attr(value: &AttrValue) -> String {
    match value {
        AttrValue::Flag => "true".to_string(),
        AttrValue::Str(s) => format!("\"{}\"", s),
        AttrValue::Expr(e) => format!("{{{}}}", e),
    }
}

/// Element chain from the top-level element down to the failure point,
/// innermost first.
pub type RenderTrace = Vec<String>;

pub struct Interpreter<'r> {
    registry: &'r ComponentRegistry,
}

impl<'r> Interpreter<'r> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self { registry }
    }

    pub fn render_element(&self, element: &Element) -> Result<RenderNode, (RenderError, RenderTrace)> {
        let kind = self.registry.lookup(&element.tag).ok_or_else(|| {
            (
                RenderError::UnknownComponent { tag: element.tag.clone() },
                vec![frame(element)],
            )
        })?;

        self.validate(kind, element).map_err(|e| (e, vec![frame(element)]))?;

        let mut children = Vec::with_capacity(element.children.len());
        for child in &element.children {
            match child {
                Node::Element(inner) => match self.render_element(inner) {
                    Ok(node) => children.push(node),
                    Err((err, mut trace)) => {
                        trace.push(frame(element));
                        return Err((err, trace));
                    }
                },
                Node::Text(text) => children.push(RenderNode::Text(text.clone())),
                Node::Expr(expr) => children.push(RenderNode::Text(format!("{{{}}}", expr))),
            }
        }

        Ok(RenderNode::Component {
            tag: element.tag.clone(),
            kind,
            props: element.attrs.iter().map(|a| (a.name.clone(), display_attr(&a.value))).collect(),
            children,
        })
    }

    fn validate(&self, kind: ComponentKind, element: &Element) -> Result<(), RenderError> {
        if !kind.accepts_children() && !element.children.is_empty() {
            return Err(RenderError::InvalidProps {
                component: element.tag.clone(),
                message: "this component cannot have children".to_string(),
            });
        }

        if kind == ComponentKind::FormItem && element.attr("name").is_some() {
            let count = element.element_children().count();
            if count != 1 {
                return Err(RenderError::InvalidProps {
                    component: element.tag.clone(),
                    message: format!("a named Form.Item must wrap exactly one element, found {}", count),
                });
            }
        }

        Ok(())
    }
}

fn frame(element: &Element) -> String {
    format!("at <{}> (offset {})", element.tag, element.offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_text() {
        let nodes = parse(r#"<Form.Item label="A"><Checkbox>Agree</Checkbox></Form.Item>"#).unwrap();
        assert_eq!(nodes.len(), 1);
        let Node::Element(item) = &nodes[0] else { panic!("expected element") };
        let Node::Element(checkbox) = &item.children[0] else { panic!("expected element") };
        assert_eq!(checkbox.children, vec![Node::Text("Agree".into())]);
    }

    #[test]
    fn mismatched_close_is_malformed() {
        let err = parse("<Form.Item><Input></Form.Item>").unwrap_err();
        assert!(matches!(err, RenderError::Malformed { .. }));
    }

    #[test]
    fn unclosed_element_reports_its_offset() {
        let err = parse("<div>\n<Select>").unwrap_err();
        assert_eq!(err, RenderError::Malformed { message: "<Select> is never closed".into(), offset: 6 });
    }
}
