//! Inline span rendering.

use std::fmt::Write;

use crate::model::{InlineNode, Link, Reference};
use crate::options::{DEFAULT_MAX_INLINE_DEPTH, INLINE_DEPTH_SENTINEL};
use crate::references::{References, title_from_identifier};

/// Renders inline spans to a single line of Markdown.
///
/// Nesting depth is an explicit argument; spans nested deeper than
/// `max_depth` are replaced by [`INLINE_DEPTH_SENTINEL`] while their
/// shallower siblings keep rendering.
#[derive(Clone, Copy, Debug)]
pub struct InlineRenderer<'a> {
    refs: References<'a>,
    max_depth: usize,
}

impl<'a> InlineRenderer<'a> {
    pub fn new(refs: References<'a>, max_depth: usize) -> Self {
        Self { refs, max_depth }
    }

    pub fn references(&self) -> References<'a> {
        self.refs
    }

    /// Render spans at the given nesting depth. Output has no trailing newline.
    pub fn render(&self, nodes: &[InlineNode], depth: usize) -> String {
        if depth > self.max_depth {
            tracing::warn!(depth, limit = self.max_depth, "Inline content too deeply nested");
            return INLINE_DEPTH_SENTINEL.to_owned();
        }

        let mut out = String::new();
        for node in nodes {
            self.render_node(node, depth, &mut out);
        }
        out
    }

    /// Text content of spans without any Markdown markup.
    ///
    /// Reference spans use their resolved titles. Spans nested deeper than
    /// `max_depth` read as [`INLINE_DEPTH_SENTINEL`].
    pub fn plain_text(&self, nodes: &[InlineNode]) -> String {
        bounded_plain_text(nodes, self.max_depth, Some(&self.refs))
    }

    fn render_node(&self, node: &InlineNode, depth: usize, out: &mut String) {
        match node {
            InlineNode::Text(text) => out.push_str(text),
            InlineNode::CodeVoice(code) => {
                let _ = write!(out, "`{code}`");
            }
            InlineNode::Reference(reference) => self.render_reference(reference, out),
            InlineNode::Emphasis(children) | InlineNode::NewTerm(children) => {
                self.wrap(children, depth, "*", "*", out);
            }
            InlineNode::Strong(children) => self.wrap(children, depth, "**", "**", out),
            InlineNode::Strikethrough(children) => self.wrap(children, depth, "~~", "~~", out),
            InlineNode::Superscript(children) => {
                self.wrap(children, depth, "<sup>", "</sup>", out);
            }
            InlineNode::Subscript(children) => self.wrap(children, depth, "<sub>", "</sub>", out),
            InlineNode::Link(link) => render_link(link, out),
            InlineNode::Image(image) => {
                let Some(id) = image.identifier.as_deref() else {
                    return;
                };
                let entry = self.refs.entry(id);
                let alt = entry
                    .and_then(|e| e.alt.as_deref().or(e.title.as_deref()))
                    .unwrap_or(id);
                let _ = write!(out, "![{alt}]({})", self.refs.resolve_url(id));
            }
            InlineNode::Unknown { kind, text } => {
                tracing::trace!(kind = %kind, "Unknown inline kind");
                if let Some(text) = text {
                    out.push_str(text);
                }
            }
        }
    }

    fn wrap(
        &self,
        children: &[InlineNode],
        depth: usize,
        open: &str,
        close: &str,
        out: &mut String,
    ) {
        out.push_str(open);
        out.push_str(&self.render(children, depth + 1));
        out.push_str(close);
    }

    fn render_reference(&self, reference: &Reference, out: &mut String) {
        match reference.identifier.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => {
                let title = self.refs.resolve_title(id, reference.title_override());
                let _ = write!(out, "[{title}]({})", self.refs.resolve_url(id));
            }
            None => out.push_str(reference.title_override().unwrap_or_default()),
        }
    }
}

fn render_link(link: &Link, out: &mut String) {
    let title = link.title.as_deref().filter(|t| !t.is_empty());
    match (link.destination.as_deref(), title) {
        (Some(destination), title) => {
            let _ = write!(out, "[{}]({destination})", title.unwrap_or(destination));
        }
        (None, Some(title)) => out.push_str(title),
        (None, None) => {}
    }
}

/// Text content of spans without markup or reference lookups.
pub fn plain_text(nodes: &[InlineNode]) -> String {
    bounded_plain_text(nodes, DEFAULT_MAX_INLINE_DEPTH, None)
}

pub(crate) fn bounded_plain_text(
    nodes: &[InlineNode],
    max_depth: usize,
    refs: Option<&References<'_>>,
) -> String {
    let mut out = String::new();
    collect_text(nodes, 0, max_depth, refs, &mut out);
    out
}

fn collect_text(
    nodes: &[InlineNode],
    depth: usize,
    max_depth: usize,
    refs: Option<&References<'_>>,
    out: &mut String,
) {
    if depth > max_depth {
        out.push_str(INLINE_DEPTH_SENTINEL);
        return;
    }
    for node in nodes {
        match node {
            InlineNode::Text(text) => out.push_str(text),
            InlineNode::CodeVoice(code) => out.push_str(code),
            InlineNode::Reference(reference) => {
                let id = reference.identifier.as_deref().unwrap_or_default();
                let title = match refs {
                    Some(refs) if !id.is_empty() => refs.resolve_title(id, reference.title_override()),
                    _ => reference
                        .title_override()
                        .map_or_else(|| title_from_identifier(id), str::to_owned),
                };
                out.push_str(&title);
            }
            InlineNode::Emphasis(children)
            | InlineNode::Strong(children)
            | InlineNode::NewTerm(children)
            | InlineNode::Strikethrough(children)
            | InlineNode::Superscript(children)
            | InlineNode::Subscript(children) => {
                collect_text(children, depth + 1, max_depth, refs, out);
            }
            InlineNode::Link(link) => {
                if let Some(text) = link.title.as_deref().or(link.destination.as_deref()) {
                    out.push_str(text);
                }
            }
            InlineNode::Image(_) => {}
            InlineNode::Unknown { text, .. } => {
                if let Some(text) = text {
                    out.push_str(text);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Image, ReferenceEntry, VariantEntry};

    fn render(nodes: &[InlineNode]) -> String {
        render_with(&HashMap::new(), nodes)
    }

    fn render_with(entries: &HashMap<String, ReferenceEntry>, nodes: &[InlineNode]) -> String {
        let variants = HashMap::<String, VariantEntry>::new();
        let refs = References::new(entries, &variants);
        InlineRenderer::new(refs, DEFAULT_MAX_INLINE_DEPTH).render(nodes, 0)
    }

    fn nested_emphasis(levels: usize) -> InlineNode {
        let mut node = InlineNode::text("core");
        for level in 0..levels {
            node = if level % 2 == 0 {
                InlineNode::Emphasis(vec![node])
            } else {
                InlineNode::Strong(vec![node])
            };
        }
        node
    }

    #[test]
    fn test_text_and_code_voice() {
        let result = render(&[
            InlineNode::text("Call "),
            InlineNode::code_voice("run()"),
            InlineNode::text(" now."),
        ]);
        assert_eq!(result, "Call `run()` now.");
    }

    #[test]
    fn test_emphasis_and_strong() {
        let result = render(&[
            InlineNode::Emphasis(vec![InlineNode::text("a")]),
            InlineNode::text(" "),
            InlineNode::Strong(vec![InlineNode::text("b")]),
        ]);
        assert_eq!(result, "*a* **b**");
    }

    #[test]
    fn test_empty_emphasis_keeps_markers() {
        assert_eq!(render(&[InlineNode::Emphasis(Vec::new())]), "**");
        assert_eq!(render(&[InlineNode::Strong(Vec::new())]), "****");
    }

    #[test]
    fn test_reference_from_table() {
        let entries = HashMap::from([(
            "doc://x/documentation/kit/view".to_owned(),
            ReferenceEntry {
                title: Some("View".to_owned()),
                url: Some("/documentation/kit/view".to_owned()),
                ..ReferenceEntry::default()
            },
        )]);
        let result = render_with(&entries, &[InlineNode::reference("doc://x/documentation/kit/view")]);
        assert_eq!(result, "[View](/documentation/kit/view)");
    }

    #[test]
    fn test_reference_without_entry_uses_heuristic() {
        let result = render(&[InlineNode::reference("doc://x/documentation/kit/someValue")]);
        assert_eq!(result, "[some Value](/documentation/kit/someValue)");
    }

    #[test]
    fn test_reference_override_wins() {
        let node = InlineNode::Reference(Reference {
            identifier: Some("doc://x/documentation/kit/view".to_owned()),
            overriding_title: Some("the view".to_owned()),
            ..Reference::default()
        });
        assert_eq!(render(&[node]), "[the view](/documentation/kit/view)");
    }

    #[test]
    fn test_reference_without_identifier() {
        let node = InlineNode::Reference(Reference {
            text: Some("orphan".to_owned()),
            ..Reference::default()
        });
        assert_eq!(render(&[node]), "orphan");
    }

    #[test]
    fn test_link_and_image() {
        let entries = HashMap::from([(
            "diagram.png".to_owned(),
            ReferenceEntry {
                alt: Some("A diagram".to_owned()),
                url: Some("https://cdn.test/diagram.png".to_owned()),
                ..ReferenceEntry::default()
            },
        )]);
        let result = render_with(
            &entries,
            &[
                InlineNode::Link(Link {
                    destination: Some("https://swift.org".to_owned()),
                    title: None,
                }),
                InlineNode::text(" "),
                InlineNode::Image(Image {
                    identifier: Some("diagram.png".to_owned()),
                }),
            ],
        );
        assert_eq!(
            result,
            "[https://swift.org](https://swift.org) ![A diagram](https://cdn.test/diagram.png)"
        );
    }

    #[test]
    fn test_unknown_kind_falls_back_to_text() {
        let result = render(&[
            InlineNode::Unknown {
                kind: "sparkle".to_owned(),
                text: Some("shiny".to_owned()),
            },
            InlineNode::Unknown {
                kind: "void".to_owned(),
                text: None,
            },
        ]);
        assert_eq!(result, "shiny");
    }

    #[test]
    fn test_realistic_nesting_renders_fully() {
        let result = render(&[nested_emphasis(5)]);
        assert!(result.contains("core"));
        assert!(!result.contains(INLINE_DEPTH_SENTINEL));
    }

    #[test]
    fn test_deep_nesting_emits_sentinel() {
        let result = render(&[nested_emphasis(DEFAULT_MAX_INLINE_DEPTH + 5)]);
        assert!(result.contains(INLINE_DEPTH_SENTINEL));
        assert!(!result.contains("core"));
    }

    #[test]
    fn test_deep_nesting_keeps_siblings() {
        let result = render(&[
            InlineNode::text("before "),
            nested_emphasis(DEFAULT_MAX_INLINE_DEPTH * 3),
            InlineNode::text(" after"),
        ]);
        assert!(result.starts_with("before "));
        assert!(result.ends_with(" after"));
        assert_eq!(result.matches(INLINE_DEPTH_SENTINEL).count(), 1);
    }

    #[test]
    fn test_plain_text() {
        let nodes = [
            InlineNode::text("Use "),
            InlineNode::code_voice("map"),
            InlineNode::text(" with "),
            InlineNode::Strong(vec![InlineNode::reference("doc://x/documentation/kit/someValue")]),
            InlineNode::text("."),
        ];
        assert_eq!(plain_text(&nodes), "Use map with some Value.");
    }

    #[test]
    fn test_plain_text_uses_configured_limit() {
        let entries = HashMap::new();
        let variants = HashMap::new();
        let refs = References::new(&entries, &variants);
        let nodes = [InlineNode::text("lead "), nested_emphasis(4)];

        let shallow = InlineRenderer::new(refs, 2).plain_text(&nodes);
        assert_eq!(shallow, format!("lead {INLINE_DEPTH_SENTINEL}"));

        let deep = InlineRenderer::new(refs, DEFAULT_MAX_INLINE_DEPTH).plain_text(&nodes);
        assert_eq!(deep, "lead core");
    }

    #[test]
    fn test_plain_text_marks_truncated_spans() {
        let result = plain_text(&[nested_emphasis(DEFAULT_MAX_INLINE_DEPTH + 3)]);
        assert_eq!(result, INLINE_DEPTH_SENTINEL);
    }
}
