use std::sync::LazyLock;

use regex::Regex;

use crate::markup::block::{BlockSpan, FieldBlock};
use crate::markup::classifier::classify_block;
use crate::markup::normalize::extract_field_name;

/// Splits a markup document into ordered, non-overlapping blocks.
///
/// The regex strategy is lenient on purpose: generated markup is not guaranteed
/// to be well formed, and callers rely on how it splits partially invalid text.
pub trait Segmenter {
    fn segment(&self, markup: &str) -> Vec<FieldBlock>;
}

// ============================================================================
// Patterns
// ============================================================================

/// Field block plus the hidden storage item that carries its form value.
/// Must be extracted before the generic `Form.Item` pattern splits it in two.
static COMPOUND_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r#"(?s)<Form\.Item\b[^>]*>\s*<Transfer\b.*?</Form\.Item>\s*<Form\.Item\b[^>]*\bhidden\b[^>]*>.*?</Form\.Item>"#,
        )
        .unwrap(),
    ]
});

/// One pattern per recognised outer tag. Self-closing forms come before the
/// paired forms so that a tie on the start offset keeps the shorter match.
/// The self-closing `Steps` and `Descriptions` forms skip over `{...}` props,
/// which may hold `=>` and nested literals.
static GENERIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"<Form\.Item\b[^>]*/>"#,
        r#"(?s)<Form\.Item(?:\s[^>]*[^/>])?>.*?</Form\.Item>"#,
        r#"<Steps\s(?:[^>{]|\{[^}]*\})*/>"#,
        r#"(?s)<Steps[\s>].*?</Steps>"#,
        r#"<Descriptions\s(?:[^>{]|\{[^}]*\})*/>"#,
        r#"(?s)<Descriptions[\s>].*?</Descriptions>"#,
        r#"(?s)<Watermark[\s>].*?</Watermark>"#,
        r#"(?s)<Image\.PreviewGroup[\s>].*?</Image\.PreviewGroup>"#,
        r#"<Divider\b[^>]*/>"#,
        r#"(?s)<Divider(?:\s[^>]*[^/>])?>.*?</Divider>"#,
        r#"(?s)<Tour\b.*?/>"#,
        r#"<FloatButton\b[^>]*/>"#,
        r#"<QRCode\b[^>]*/>"#,
        r#"(?s)<Button\b.*?</Button>"#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

// ============================================================================
// Overlap resolution
// ============================================================================

/// Sort by start offset and keep a span only if it begins at or after the end of
/// the last kept span. Ties keep the span that was collected first.
pub fn resolve_overlaps(mut spans: Vec<BlockSpan>) -> Vec<BlockSpan> {
    spans.sort_by_key(|s| s.start);

    let mut kept: Vec<BlockSpan> = Vec::with_capacity(spans.len());
    let mut last_end = 0usize;
    for span in spans {
        if span.start >= last_end {
            last_end = span.end;
            kept.push(span);
        }
    }
    kept
}

// ============================================================================
// Regex strategy
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct RegexSegmenter;

impl RegexSegmenter {
    /// Raw spans in collection order: compound matches first, then generic
    /// matches found in the text left after masking the compounds.
    pub fn collect_spans(&self, markup: &str) -> Vec<BlockSpan> {
        let mut spans = Vec::new();
        let mut masked = markup.to_string();

        for pattern in COMPOUND_PATTERNS.iter() {
            for m in pattern.find_iter(markup) {
                spans.push(BlockSpan { start: m.start(), end: m.end() });
                masked.replace_range(m.start()..m.end(), &" ".repeat(m.end() - m.start()));
            }
        }

        for pattern in GENERIC_PATTERNS.iter() {
            for m in pattern.find_iter(&masked) {
                spans.push(BlockSpan { start: m.start(), end: m.end() });
            }
        }

        spans
    }
}

impl Segmenter for RegexSegmenter {
    fn segment(&self, markup: &str) -> Vec<FieldBlock> {
        let spans = resolve_overlaps(self.collect_spans(markup));

        let blocks: Vec<FieldBlock> = spans
            .into_iter()
            .map(|span| {
                let text = markup[span.start..span.end].to_string();
                FieldBlock {
                    span,
                    widget: classify_block(&text),
                    field_name: extract_field_name(&text),
                    text,
                }
            })
            .collect();

        tracing::debug!(blocks = blocks.len(), bytes = markup.len(), "segmented markup");
        blocks
    }
}

/// Segment with the default strategy.
pub fn segment(markup: &str) -> Vec<FieldBlock> {
    RegexSegmenter.segment(markup)
}
