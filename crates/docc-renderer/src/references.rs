//! Cross-reference resolution.
//!
//! Every lookup is a single read of the flat reference (or variant) table.
//! Entries are never followed into the pages they describe, so identifiers
//! that reference each other in a cycle cannot cause unbounded work.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::inline::bounded_plain_text;
use crate::model::{Document, InlineNode, ReferenceEntry, VariantEntry};
use crate::options::DEFAULT_MAX_INLINE_DEPTH;

/// `doc://<reverse-domain>/documentation/<rest>`
static DOC_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^doc://[^/]+/documentation/(.+)$").unwrap());

static DISAMBIGUATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-\w+$").unwrap());

static CASE_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Read-only view over a document's reference and variant tables.
#[derive(Clone, Copy, Debug)]
pub struct References<'a> {
    entries: &'a HashMap<String, ReferenceEntry>,
    variants: &'a HashMap<String, VariantEntry>,
    max_inline_depth: usize,
}

impl<'a> References<'a> {
    pub fn new(
        entries: &'a HashMap<String, ReferenceEntry>,
        variants: &'a HashMap<String, VariantEntry>,
    ) -> Self {
        Self {
            entries,
            variants,
            max_inline_depth: DEFAULT_MAX_INLINE_DEPTH,
        }
    }

    /// Nesting limit applied when flattening abstracts to plain text.
    #[must_use]
    pub fn with_max_inline_depth(mut self, max_inline_depth: usize) -> Self {
        self.max_inline_depth = max_inline_depth;
        self
    }

    pub fn from_document(doc: &'a Document) -> Self {
        Self::new(&doc.references, &doc.variants)
    }

    pub fn entry(&self, id: &str) -> Option<&'a ReferenceEntry> {
        self.entries.get(id)
    }

    /// Link target for an identifier.
    ///
    /// A URL from the reference table wins and is returned verbatim. Otherwise
    /// `doc://` identifiers are rewritten to site-relative documentation paths,
    /// and anything else is returned unchanged.
    pub fn resolve_url(&self, id: &str) -> String {
        if let Some(url) = self.entry(id).and_then(|entry| entry.url.as_deref()) {
            return url.to_owned();
        }
        match DOC_URL_RE.captures(id) {
            Some(caps) => format!("/documentation/{}", &caps[1]),
            None => id.to_owned(),
        }
    }

    /// Display title for an identifier.
    ///
    /// Precedence: the span's own override, the reference table, the variant
    /// table, then [`title_from_identifier`].
    pub fn resolve_title(&self, id: &str, title_override: Option<&str>) -> String {
        title_override
            .filter(non_empty)
            .or_else(|| {
                self.entry(id)
                    .and_then(|entry| entry.title.as_deref())
                    .filter(non_empty)
            })
            .or_else(|| {
                self.variants
                    .get(id)
                    .and_then(|variant| variant.title.as_deref())
                    .filter(non_empty)
            })
            .map_or_else(|| title_from_identifier(id), str::to_owned)
    }

    /// Plain-text abstract for an identifier, if either table has one.
    pub fn resolve_abstract(&self, id: &str) -> Option<String> {
        let flatten = |spans: &[InlineNode]| bounded_plain_text(spans, self.max_inline_depth, None);
        let from_entry = self
            .entry(id)
            .map(|entry| flatten(&entry.abstract_spans))
            .filter(|text| !text.is_empty());
        from_entry.or_else(|| {
            self.variants
                .get(id)
                .map(|variant| flatten(&variant.abstract_spans))
                .filter(|text| !text.is_empty())
        })
    }
}

fn non_empty(title: &&str) -> bool {
    !title.trim().is_empty()
}

/// Best-effort label derived from an identifier's last path segment.
///
/// A trailing `-<disambiguator>` is removed. Symbol signatures (anything with
/// a parenthesis pair) are kept as is; other names are split at
/// lowercase-to-uppercase boundaries.
///
/// # Examples
///
/// ```
/// use docc_renderer::title_from_identifier;
///
/// assert_eq!(title_from_identifier("init(exactly:)-63925"), "init(exactly:)");
/// assert_eq!(title_from_identifier("somePropertyName"), "some Property Name");
/// assert_eq!(title_from_identifier("XMLHttpRequest"), "XMLHttp Request");
/// ```
pub fn title_from_identifier(id: &str) -> String {
    let segment = id.rsplit('/').next().unwrap_or(id);
    let name = DISAMBIGUATOR_RE.replace(segment, "");

    if let (Some(open), Some(close)) = (name.find('('), name.rfind(')'))
        && open < close
    {
        return name.into_owned();
    }

    let spaced = CASE_BOUNDARY_RE.replace_all(&name, "$1 $2");
    WHITESPACE_RE.replace_all(&spaced, " ").trim().to_owned()
}
