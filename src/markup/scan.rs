//! Lenient tag and attribute scanning.
//!
//! These helpers never fail on malformed input: unterminated quotes, braces or
//! tags simply end the scan. Callers decide what a missing piece means.

/// Value carried by a JSX attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Bare attribute (`disabled`).
    Flag,
    /// Quoted string (`label="Email"`).
    Str(String),
    /// Braced expression, braces stripped (`rows={4}` -> `4`).
    Expr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: AttrValue,
}

/// An opening tag located in a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    /// Byte offset of `<`.
    pub start: usize,
    /// Byte offset just past `>`.
    pub end: usize,
    pub attrs: Vec<Attr>,
    pub self_closing: bool,
}

impl OpenTag {
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|a| a.name == name).map(|a| &a.value)
    }
}

/// Offset of the `>` closing the tag that starts at `lt_idx`, skipping quoted
/// strings and braced expressions.
pub fn find_tag_end(input: &str, lt_idx: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut i = lt_idx + 1;
    let mut quote: Option<u8> = None;
    let mut depth = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' | b'\'' => quote = Some(b),
            b'`' if depth > 0 => quote = Some(b),
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            b'>' if depth == 0 => return Some(i),
            _ => {}
        }
        i += 1;
    }

    None
}

/// Offset of the `}` matching the `{` at `open_idx`.
pub fn find_brace_end(input: &str, open_idx: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut i = open_idx;
    let mut quote: Option<u8> = None;
    let mut depth = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Split the inside of a start tag (`<` and `>` excluded) into name, attribute
/// source and the self-closing flag.
pub fn split_start_tag(inside: &str) -> (&str, &str, bool) {
    let trimmed = inside.trim();
    let self_closing = trimmed.ends_with('/');
    let core = if self_closing {
        trimmed[..trimmed.len().saturating_sub(1)].trim_end()
    } else {
        trimmed
    };

    let name_end = core
        .char_indices()
        .find(|(_, ch)| ch.is_whitespace())
        .map(|(idx, _)| idx)
        .unwrap_or(core.len());

    (&core[..name_end], core[name_end..].trim_start(), self_closing)
}

pub fn parse_attributes(input: &str) -> Vec<Attr> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        // Spread props and stray expressions are skipped whole.
        if bytes[i] == b'{' {
            i = find_brace_end(input, i).map(|e| e + 1).unwrap_or(bytes.len());
            continue;
        }

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
            && bytes[i] != b'/'
            && bytes[i] != b'{'
        {
            i += 1;
        }
        if i == name_start {
            i += 1;
            continue;
        }
        let name = input[name_start..i].to_string();

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= bytes.len() || bytes[j] != b'=' {
            out.push(Attr { name, value: AttrValue::Flag });
            continue;
        }

        i = j + 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            out.push(Attr { name, value: AttrValue::Str(String::new()) });
            break;
        }

        let value = match bytes[i] {
            b'"' | b'\'' => {
                let quote = bytes[i];
                i += 1;
                let val_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                let v = input[val_start..i].to_string();
                if i < bytes.len() {
                    i += 1;
                }
                AttrValue::Str(v)
            }
            b'{' => {
                let open = i;
                let close = find_brace_end(input, open).unwrap_or(bytes.len());
                let inner = input[open + 1..close.min(bytes.len())].trim().to_string();
                i = (close + 1).min(bytes.len());
                AttrValue::Expr(inner)
            }
            _ => {
                let val_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                AttrValue::Str(input[val_start..i].to_string())
            }
        };

        out.push(Attr { name, value });
    }

    out
}

fn is_tag_boundary(b: Option<&u8>) -> bool {
    match b {
        None => true,
        Some(c) => c.is_ascii_whitespace() || *c == b'/' || *c == b'>',
    }
}

/// Locate every opening tag named exactly `tag` (`Form.Item` does not match
/// `Form.ItemGroup`).
pub fn find_open_tags(text: &str, tag: &str) -> Vec<OpenTag> {
    let needle = format!("<{}", tag);
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut from = 0usize;

    while let Some(rel) = text[from..].find(&needle) {
        let start = from + rel;
        let after = start + needle.len();
        from = after;

        if !is_tag_boundary(bytes.get(after)) {
            continue;
        }

        let Some(gt) = find_tag_end(text, start) else {
            break;
        };
        let (name, attrs_src, self_closing) = split_start_tag(&text[start + 1..gt]);
        out.push(OpenTag {
            name: name.to_string(),
            start,
            end: gt + 1,
            attrs: parse_attributes(attrs_src),
            self_closing,
        });
        from = gt + 1;
    }

    out
}

pub fn find_open_tag(text: &str, tag: &str) -> Option<OpenTag> {
    find_open_tags(text, tag).into_iter().next()
}

/// Offset range `(inner_start, close_start, close_end)` of the element whose
/// opening tag is `open`, counting nested elements with the same name.
pub fn matching_close(text: &str, open: &OpenTag) -> Option<(usize, usize, usize)> {
    if open.self_closing {
        return None;
    }

    let open_needle = format!("<{}", open.name);
    let close_needle = format!("</{}>", open.name);
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut i = open.end;

    while i < text.len() {
        let rest = &text[i..];
        if rest.starts_with(&close_needle) {
            depth -= 1;
            if depth == 0 {
                return Some((open.end, i, i + close_needle.len()));
            }
            i += close_needle.len();
            continue;
        }
        if rest.starts_with(&open_needle) && is_tag_boundary(bytes.get(i + open_needle.len())) {
            let gt = find_tag_end(text, i)?;
            let (_, _, self_closing) = split_start_tag(&text[i + 1..gt]);
            if !self_closing {
                depth += 1;
            }
            i = gt + 1;
            continue;
        }
        i += rest.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
    }

    None
}

/// Inner markup of the first `tag` element, or `None` when the tag is absent,
/// self-closing or never closed.
pub fn element_inner<'a>(text: &'a str, tag: &str) -> Option<(OpenTag, &'a str)> {
    let open = find_open_tag(text, tag)?;
    let (inner_start, inner_end, _) = matching_close(text, &open)?;
    Some((open, &text[inner_start..inner_end]))
}
