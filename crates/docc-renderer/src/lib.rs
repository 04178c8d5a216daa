//! Converts DocC render trees into Markdown.
//!
//! The input is the loosely-typed JSON tree that documentation sites serve
//! for each page: metadata, an abstract, content sections made of block and
//! inline nodes, topic and relationship lists, and a flat table of
//! cross-references. [`DocumentRenderer`] turns one such [`Document`] into a
//! single Markdown string with front matter, a breadcrumb and a fixed footer.
//!
//! # Architecture
//!
//! Rendering is layered, leaves first:
//! - [`References`]: flat identifier lookups (title, URL, abstract)
//! - [`InlineRenderer`]: inline spans, bounded by an inline depth limit
//! - [`BlockRenderer`]: block nodes, bounded by a block depth limit
//! - [`sections`]: declarations, parameters, link lists and index trees
//! - [`DocumentRenderer`]: front matter and section order
//!
//! Rendering never fails. Missing or malformed fields are omitted, and
//! subtrees nested past a depth limit are replaced by
//! [`BLOCK_DEPTH_SENTINEL`] or [`INLINE_DEPTH_SENTINEL`].
//!
//! # Example
//!
//! ```
//! use docc_renderer::{Document, DocumentRenderer};
//!
//! let doc = Document::from_json(r#"{"metadata": {"title": "View"}}"#).unwrap();
//! let markdown = DocumentRenderer::new()
//!     .render(&doc, "https://developer.apple.com/documentation/swiftui/view");
//!
//! assert!(markdown.contains("**Navigation:** [Swiftui](/documentation/swiftui)"));
//! ```

mod blocks;
mod frontmatter;
mod inline;
pub mod model;
mod options;
mod references;
mod renderer;
pub mod sections;

pub use blocks::{BlockRenderer, callout_severity};
pub use frontmatter::{breadcrumbs, footer, front_matter};
pub use inline::{InlineRenderer, plain_text};
pub use model::{BlockNode, Document, DocumentError, InlineNode};
pub use options::{
    BLOCK_DEPTH_SENTINEL, DEFAULT_ATTRIBUTION, DEFAULT_CODE_LANGUAGE, DEFAULT_DISCLAIMER,
    DEFAULT_MAX_BLOCK_DEPTH, DEFAULT_MAX_INLINE_DEPTH, INLINE_DEPTH_SENTINEL, RenderOptions,
};
pub use references::{References, title_from_identifier};
pub use renderer::DocumentRenderer;
