//! Document orchestration.

use chrono::{DateTime, Utc};

use crate::blocks::BlockRenderer;
use crate::frontmatter::{breadcrumbs, footer, front_matter};
use crate::inline::InlineRenderer;
use crate::model::{ContentSection, Document};
use crate::options::RenderOptions;
use crate::references::References;
use crate::sections::{
    render_declarations, render_index_tree, render_link_section, render_parameters,
    render_platforms,
};

/// Heading level of top-level index tree groups.
const INDEX_TREE_LEVEL: usize = 2;

/// Renders DocC documents to Markdown.
///
/// The renderer holds only its options; every call to [`render`](Self::render)
/// works on its own borrowed view of the document, so one renderer can serve
/// concurrent calls from many threads.
///
/// # Example
///
/// ```
/// use docc_renderer::{Document, DocumentRenderer};
///
/// let doc = Document::from_json(
///     r#"{"metadata":{"title":"Foo"},"abstract":[{"type":"text","text":"Bar."}]}"#,
/// )
/// .unwrap();
/// let markdown = DocumentRenderer::new().render(&doc, "https://developer.apple.com/documentation");
///
/// assert!(markdown.starts_with("---\ntitle: Foo\ndescription: Bar.\n"));
/// assert!(markdown.contains("\n> Bar.\n"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DocumentRenderer {
    options: RenderOptions,
}

impl DocumentRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a document fetched from `source_url`, stamped with the current time.
    pub fn render(&self, doc: &Document, source_url: &str) -> String {
        self.render_at(doc, source_url, Utc::now())
    }

    /// Render a document with an explicit front matter timestamp.
    ///
    /// Output is fully determined by the arguments.
    pub fn render_at(&self, doc: &Document, source_url: &str, timestamp: DateTime<Utc>) -> String {
        let refs =
            References::from_document(doc).with_max_inline_depth(self.options.max_inline_depth);
        let inline = InlineRenderer::new(refs, self.options.max_inline_depth);
        let blocks = BlockRenderer::new(
            inline,
            self.options.max_block_depth,
            &self.options.default_code_language,
        );

        let title = page_title(doc);
        let description = fold_whitespace(&inline.plain_text(&doc.abstract_spans));
        let description = (!description.is_empty()).then_some(description);

        let mut body = String::new();
        self.render_body(doc, source_url, title, &blocks, &mut body);

        let mut out = front_matter(title, description.as_deref(), source_url, timestamp);
        let body = body.trim();
        if !body.is_empty() {
            out.push_str(body);
            out.push_str("\n\n");
        }
        out.push_str(&footer(&self.options));

        tracing::debug!(
            source = %source_url,
            length = out.len(),
            references = doc.references.len(),
            "Rendered document"
        );
        out
    }

    fn render_body(
        &self,
        doc: &Document,
        source_url: &str,
        title: Option<&str>,
        blocks: &BlockRenderer<'_>,
        out: &mut String,
    ) {
        let refs = blocks.inline().references();

        if let Some(crumbs) = breadcrumbs(source_url) {
            out.push_str(&crumbs);
            out.push_str("\n\n");
        }
        if let Some(role) = non_empty(doc.metadata.role_heading.as_deref()) {
            out.push_str(&format!("**{role}**\n\n"));
        }
        if let Some(title) = title {
            out.push_str(&format!("# {title}\n\n"));
        }
        render_platforms(&doc.metadata.platforms, out);

        let summary = blocks.inline().render(&doc.abstract_spans, 0);
        if !summary.trim().is_empty() {
            for line in summary.trim().lines() {
                out.push_str(if line.is_empty() { ">" } else { "> " });
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }

        for section in &doc.primary_content_sections {
            if let ContentSection::Declarations(declarations) = section {
                render_declarations(declarations, &self.options.default_code_language, out);
            }
        }
        for section in &doc.primary_content_sections {
            if let ContentSection::Parameters(parameters) = section {
                render_parameters(parameters, blocks, out);
            }
        }
        for section in &doc.primary_content_sections {
            match section {
                ContentSection::Content(content) => out.push_str(&blocks.render(content, 0)),
                ContentSection::Unknown(kind) => {
                    tracing::trace!(kind = %kind, "Skipping unknown content section");
                }
                ContentSection::Declarations(_) | ContentSection::Parameters(_) => {}
            }
        }

        for section in &doc.relationships_sections {
            render_link_section(section, &refs, out);
        }
        for section in &doc.topic_sections {
            render_link_section(section, &refs, out);
        }
        render_index_tree(doc.index_tree(), INDEX_TREE_LEVEL, out);
        for section in &doc.see_also_sections {
            render_link_section(section, &refs, out);
        }
    }
}

/// Page title from metadata, falling back to the first titled index node.
fn page_title(doc: &Document) -> Option<&str> {
    non_empty(doc.metadata.title.as_deref()).or_else(|| {
        doc.index_tree()
            .iter()
            .filter(|node| !node.is_group_marker())
            .find_map(|node| non_empty(node.title.as_deref()))
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn fold_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
