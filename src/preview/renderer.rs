use std::ops::Range;

use crate::library::profile::LibraryProfile;
use crate::markup::normalize::text_fingerprint;
use crate::markup::segmenter::segment;
use crate::preview::error_log::{RenderErrorEntry, RenderErrorLog};
use crate::preview::interpreter::{Interpreter, Node, RenderNode, outline, parse, rebase};
use crate::preview::registry::ComponentRegistry;

/// Result of interpreting one markup document.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewOutcome {
    /// Nothing to render.
    Empty,
    /// Top-level nodes in order. A failing element is replaced by an
    /// [`RenderNode::ErrorPanel`] and its siblings still render.
    Rendered(Vec<RenderNode>),
    /// The document could not be read and has no recognisable blocks to fall
    /// back on; the whole preview shows one panel.
    Failed { message: String },
}

impl PreviewOutcome {
    pub fn error_count(&self) -> usize {
        match self {
            PreviewOutcome::Empty => 0,
            PreviewOutcome::Rendered(nodes) => nodes.iter().filter(|n| n.is_error()).count(),
            PreviewOutcome::Failed { .. } => 1,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }

    pub fn outline(&self) -> String {
        match self {
            PreviewOutcome::Empty => String::new(),
            PreviewOutcome::Rendered(nodes) => outline(nodes),
            PreviewOutcome::Failed { message } => format!("[preview error] {}\n", message),
        }
    }
}

/// Interprets markup against a profile's registry, one isolating boundary per
/// top-level element. Re-interprets from scratch whenever the markup changes.
#[derive(Debug)]
pub struct PreviewRenderer {
    registry: ComponentRegistry,
    log: RenderErrorLog,
    last: Option<(String, PreviewOutcome)>,
}

impl PreviewRenderer {
    pub fn new(profile: LibraryProfile, log: RenderErrorLog) -> Self {
        Self {
            registry: ComponentRegistry::for_profile(profile),
            log,
            last: None,
        }
    }

    pub fn profile(&self) -> LibraryProfile {
        self.registry.profile()
    }

    /// Switch the registry. The cached outcome is discarded.
    pub fn set_profile(&mut self, profile: LibraryProfile) {
        if profile != self.registry.profile() {
            self.registry = ComponentRegistry::for_profile(profile);
            self.last = None;
        }
    }

    pub fn error_log(&self) -> &RenderErrorLog {
        &self.log
    }

    pub fn clear_error_log(&mut self) {
        self.log.clear();
    }

    pub fn render(&mut self, markup: &str) -> PreviewOutcome {
        let fingerprint = text_fingerprint(markup);
        if let Some((seen, outcome)) = &self.last {
            if *seen == fingerprint {
                return outcome.clone();
            }
        }

        let outcome = self.interpret(markup);
        self.last = Some((fingerprint, outcome.clone()));
        outcome
    }

    /// Parse the whole document. When that fails, fall back to parsing each
    /// segmented block and each gap between blocks on its own, so one broken
    /// block only replaces itself with an error panel.
    fn interpret(&mut self, markup: &str) -> PreviewOutcome {
        if markup.trim().is_empty() {
            return PreviewOutcome::Empty;
        }

        let err = match parse(markup) {
            Ok(roots) => {
                let mut nodes = Vec::with_capacity(roots.len());
                self.render_roots(&roots, &mut nodes);
                tracing::debug!(nodes = nodes.len(), profile = %self.registry.profile(), "preview rendered");
                return PreviewOutcome::Rendered(nodes);
            }
            Err(err) => err,
        };

        let blocks = segment(markup);
        if blocks.is_empty() {
            tracing::warn!(error = %err, "preview could not parse markup");
            self.log.record(RenderErrorEntry::now(err.to_string(), "at <document>"));
            return PreviewOutcome::Failed { message: err.to_string() };
        }

        tracing::debug!(error = %err, blocks = blocks.len(), "document unreadable, rendering block by block");
        let mut nodes = Vec::new();
        let mut cursor = 0;
        for block in &blocks {
            self.render_chunk(markup, cursor..block.start(), &mut nodes);
            self.render_chunk(markup, block.start()..block.end(), &mut nodes);
            cursor = block.end();
        }
        self.render_chunk(markup, cursor..markup.len(), &mut nodes);

        tracing::debug!(nodes = nodes.len(), profile = %self.registry.profile(), "preview rendered");
        PreviewOutcome::Rendered(nodes)
    }

    fn render_chunk(&mut self, markup: &str, range: Range<usize>, nodes: &mut Vec<RenderNode>) {
        let chunk = &markup[range.clone()];
        if chunk.trim().is_empty() {
            return;
        }

        match parse(chunk) {
            Ok(mut roots) => {
                rebase(&mut roots, range.start);
                self.render_roots(&roots, nodes);
            }
            Err(err) => {
                let err = err.shifted(range.start);
                tracing::warn!(offset = range.start, error = %err, "malformed block isolated");
                self.log
                    .record(RenderErrorEntry::now(err.to_string(), format!("at <document> (offset {})", range.start)));
                nodes.push(RenderNode::ErrorPanel { message: err.to_string() });
            }
        }
    }

    fn render_roots(&mut self, roots: &[Node], nodes: &mut Vec<RenderNode>) {
        let interpreter = Interpreter::new(&self.registry);
        for root in roots {
            match root {
                Node::Element(element) => match interpreter.render_element(element) {
                    Ok(node) => nodes.push(node),
                    Err((err, trace)) => {
                        tracing::warn!(tag = %element.tag, error = %err, "render failure isolated");
                        self.log.record(RenderErrorEntry::now(err.to_string(), trace.join("\n")));
                        nodes.push(RenderNode::ErrorPanel { message: err.to_string() });
                    }
                },
                Node::Text(text) => nodes.push(RenderNode::Text(text.clone())),
                Node::Expr(expr) => nodes.push(RenderNode::Text(format!("{{{}}}", expr))),
            }
        }
    }
}
