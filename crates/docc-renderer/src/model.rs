//! Typed DocC render tree.
//!
//! The upstream JSON carries no contractual shape guarantee, so every type here
//! deserializes tolerantly: a field with the wrong JSON type reads as absent,
//! a list element that cannot be read is dropped, and a node whose `type` tag
//! is unknown (or whose payload is unreadable) becomes an `Unknown` variant
//! that renderers skip.
//!
//! The only hard failures are malformed JSON and input whose root is not a
//! JSON object; see [`Document::from_json`].

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Error returned when raw input cannot be read as a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Input is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Input is valid JSON but its root is not an object.
    #[error("Document root must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// One documentation page as delivered by the retrieval client.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    #[serde(deserialize_with = "lenient::or_default")]
    pub metadata: Metadata,
    #[serde(rename = "abstract", deserialize_with = "lenient::vec")]
    pub abstract_spans: Vec<InlineNode>,
    #[serde(deserialize_with = "lenient::vec")]
    pub primary_content_sections: Vec<ContentSection>,
    #[serde(deserialize_with = "lenient::vec")]
    pub topic_sections: Vec<LinkSection>,
    #[serde(deserialize_with = "lenient::vec")]
    pub see_also_sections: Vec<LinkSection>,
    #[serde(deserialize_with = "lenient::vec")]
    pub relationships_sections: Vec<LinkSection>,
    #[serde(deserialize_with = "lenient::map")]
    pub references: HashMap<String, ReferenceEntry>,
    #[serde(deserialize_with = "lenient::map")]
    pub variants: HashMap<String, VariantEntry>,
    /// Index tree per interface language (collection and framework roots only).
    #[serde(deserialize_with = "lenient::vec_per_key")]
    pub interface_languages: BTreeMap<String, Vec<IndexNode>>,
}

/// JSON nesting kept by [`Document::from_json`].
///
/// Containers opening deeper than this read as `null`. Every block kind costs
/// at most five JSON levels per nesting level, so content reaches the default
/// block limit long before it is cut here.
pub const MAX_JSON_NESTING: usize = 384;

impl Document {
    /// Parse a document from JSON text.
    ///
    /// Arrays and objects nested deeper than [`MAX_JSON_NESTING`] are
    /// replaced by `null` before parsing, so arbitrarily deep input still
    /// loads and the renderer's depth limits decide what is shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or its root is not an object.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let json = truncate_nesting(json, MAX_JSON_NESTING);
        if let Cow::Owned(_) = json {
            tracing::debug!(limit = MAX_JSON_NESTING, "Truncated deeply nested JSON");
        }

        let mut deserializer = serde_json::Deserializer::from_str(&json);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Self::from_value(value)
    }

    /// Build a document from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnObject`] if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        if !value.is_object() {
            return Err(DocumentError::NotAnObject(json_type_name(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Index tree for the page, preferring the Swift language tree.
    pub fn index_tree(&self) -> &[IndexNode] {
        self.interface_languages
            .get("swift")
            .or_else(|| self.interface_languages.values().next())
            .map_or(&[], Vec::as_slice)
    }
}

/// Replace every array or object that opens at `max_depth` with `null`.
///
/// Works on the raw text so the parser never recurses past `max_depth`.
/// Unbalanced input is left for the parser to reject.
fn truncate_nesting(json: &str, max_depth: usize) -> Cow<'_, str> {
    let bytes = json.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut depth = 0usize;
    let mut strings = StringScanner::default();
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if strings.consume(byte) {
            i += 1;
            continue;
        }
        match byte {
            b'{' | b'[' if depth >= max_depth => {
                let end = container_end(bytes, i);
                let buf = out.get_or_insert_with(|| String::with_capacity(json.len()));
                buf.push_str(&json[copied..i]);
                buf.push_str("null");
                copied = end;
                i = end;
                continue;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&json[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(json),
    }
}

/// Offset just past the container opening at `start`, or the input length if it never closes.
fn container_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut strings = StringScanner::default();
    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if strings.consume(byte) {
            continue;
        }
        match byte {
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return start + offset + 1;
                }
            }
            _ => {}
        }
    }
    bytes.len()
}

/// Tracks whether a byte stream is inside a JSON string literal.
#[derive(Default)]
struct StringScanner {
    in_string: bool,
    escaped: bool,
}

impl StringScanner {
    /// Feed one byte; true if it belongs to a string literal (quotes included).
    fn consume(&mut self, byte: u8) -> bool {
        if !self.in_string {
            self.in_string = byte == b'"';
            return self.in_string;
        }
        if self.escaped {
            self.escaped = false;
        } else if byte == b'\\' {
            self.escaped = true;
        } else if byte == b'"' {
            self.in_string = false;
        }
        true
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Page metadata.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    #[serde(deserialize_with = "lenient::option")]
    pub title: Option<String>,
    /// Symbol kind label shown above the title (e.g. "Structure").
    #[serde(deserialize_with = "lenient::option")]
    pub role_heading: Option<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub platforms: Vec<Platform>,
}

/// Platform availability entry.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Platform {
    #[serde(deserialize_with = "lenient::option")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub introduced_at: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub beta: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub deprecated: bool,
}

/// Shallow metadata about a cross-referenced page.
///
/// Only the entry's own fields are ever read; an abstract that contains
/// further references is rendered as plain text and never followed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReferenceEntry {
    #[serde(deserialize_with = "lenient::option")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub url: Option<String>,
    #[serde(rename = "abstract", deserialize_with = "lenient::vec")]
    pub abstract_spans: Vec<InlineNode>,
    /// Alternate text for image references.
    #[serde(deserialize_with = "lenient::option")]
    pub alt: Option<String>,
}

/// Enrichment used when the reference table has nothing for an identifier.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VariantEntry {
    #[serde(deserialize_with = "lenient::option")]
    pub title: Option<String>,
    #[serde(rename = "abstract", deserialize_with = "lenient::vec")]
    pub abstract_spans: Vec<InlineNode>,
}

/// Titled list of cross-reference identifiers (topics, see also, relationships).
///
/// Identifiers keep their source order, duplicates included.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkSection {
    #[serde(deserialize_with = "lenient::option")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub identifiers: Vec<String>,
}

/// Node of the hierarchical index served for framework and collection roots.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IndexNode {
    #[serde(deserialize_with = "lenient::option")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub path: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::option")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub beta: bool,
    #[serde(deserialize_with = "lenient::vec")]
    pub children: Vec<IndexNode>,
}

impl IndexNode {
    /// Whether the node only groups its siblings under a heading.
    pub fn is_group_marker(&self) -> bool {
        self.kind.as_deref() == Some("groupMarker")
    }
}

/// Primary content section, tagged by `kind`.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentSection {
    Declarations(Vec<Declaration>),
    Parameters(Vec<Parameter>),
    Content(Vec<BlockNode>),
    Unknown(String),
}

impl<'de> Deserialize<'de> for ContentSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Default, Deserialize)]
        #[serde(default)]
        struct Raw {
            #[serde(deserialize_with = "lenient::option")]
            kind: Option<String>,
            #[serde(deserialize_with = "lenient::vec")]
            declarations: Vec<Declaration>,
            #[serde(deserialize_with = "lenient::vec")]
            parameters: Vec<Parameter>,
            #[serde(deserialize_with = "lenient::vec")]
            content: Vec<BlockNode>,
        }

        let raw: Raw = lenient::or_default(deserializer)?;
        let kind = raw.kind.unwrap_or_default();
        Ok(match kind.as_str() {
            "declarations" => Self::Declarations(raw.declarations),
            "parameters" => Self::Parameters(raw.parameters),
            "content" => Self::Content(raw.content),
            _ => Self::Unknown(kind),
        })
    }
}

/// Symbol declaration made of syntax tokens.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Declaration {
    #[serde(deserialize_with = "lenient::vec")]
    pub tokens: Vec<DeclarationToken>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeclarationToken {
    #[serde(deserialize_with = "lenient::option")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Parameter {
    #[serde(deserialize_with = "lenient::option")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub content: Vec<BlockNode>,
}

/// Block-level node.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockNode {
    Heading(Heading),
    Paragraph(Paragraph),
    CodeListing(CodeListing),
    UnorderedList(List),
    OrderedList(List),
    Aside(Aside),
    Table(Table),
    TermList(TermList),
    ThematicBreak,
    /// Node with an unrecognized or unreadable `type` tag.
    Unknown(String),
}

impl BlockNode {
    /// Paragraph made of the given spans.
    pub fn paragraph(inline_content: Vec<InlineNode>) -> Self {
        Self::Paragraph(Paragraph { inline_content })
    }

    /// Callout with an optional style tag.
    pub fn aside(style: Option<&str>, content: Vec<BlockNode>) -> Self {
        Self::Aside(Aside {
            style: style.map(str::to_owned),
            name: None,
            content,
        })
    }

    /// Bulleted list, one item per block list.
    pub fn unordered_list(items: Vec<Vec<BlockNode>>) -> Self {
        Self::UnorderedList(List::from_items(items))
    }

    /// Numbered list, one item per block list.
    pub fn ordered_list(items: Vec<Vec<BlockNode>>) -> Self {
        Self::OrderedList(List::from_items(items))
    }

    fn from_value(value: Value) -> Self {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let parsed = match kind.as_str() {
            "heading" => serde_json::from_value(value).map(Self::Heading),
            "paragraph" => serde_json::from_value(value).map(Self::Paragraph),
            "codeListing" => serde_json::from_value(value).map(Self::CodeListing),
            "unorderedList" => serde_json::from_value(value).map(Self::UnorderedList),
            "orderedList" => serde_json::from_value(value).map(Self::OrderedList),
            "aside" => serde_json::from_value(value).map(Self::Aside),
            "table" => serde_json::from_value(value).map(Self::Table),
            "termList" => serde_json::from_value(value).map(Self::TermList),
            "thematicBreak" => Ok(Self::ThematicBreak),
            _ => return Self::Unknown(kind),
        };
        parsed.unwrap_or(Self::Unknown(kind))
    }
}

impl<'de> Deserialize<'de> for BlockNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Heading {
    #[serde(deserialize_with = "lenient::option")]
    pub level: Option<i64>,
    #[serde(deserialize_with = "lenient::option")]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(deserialize_with = "lenient::vec")]
    pub inline_content: Vec<InlineNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CodeListing {
    #[serde(deserialize_with = "lenient::option")]
    pub syntax: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub code: Option<Code>,
}

/// Code listing body: a single string or one string per line.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Text(String),
    Lines(Vec<String>),
}

impl Code {
    /// Source text with lines joined by newlines.
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Lines(lines) => lines.join("\n"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct List {
    #[serde(deserialize_with = "lenient::vec")]
    pub items: Vec<ListItem>,
}

impl List {
    fn from_items(items: Vec<Vec<BlockNode>>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|content| ListItem { content })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListItem {
    #[serde(deserialize_with = "lenient::vec")]
    pub content: Vec<BlockNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Aside {
    #[serde(deserialize_with = "lenient::option")]
    pub style: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub content: Vec<BlockNode>,
}

/// Table whose cells are block lists.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Table {
    /// `"row"` when the first row is a header row.
    #[serde(deserialize_with = "lenient::option")]
    pub header: Option<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub rows: Vec<Vec<Vec<BlockNode>>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TermList {
    #[serde(deserialize_with = "lenient::vec")]
    pub items: Vec<TermListItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TermListItem {
    #[serde(deserialize_with = "lenient::or_default")]
    pub term: Term,
    #[serde(deserialize_with = "lenient::or_default")]
    pub definition: Definition,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Term {
    #[serde(deserialize_with = "lenient::vec")]
    pub inline_content: Vec<InlineNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Definition {
    #[serde(deserialize_with = "lenient::vec")]
    pub content: Vec<BlockNode>,
}

/// Inline span.
#[derive(Clone, Debug, PartialEq)]
pub enum InlineNode {
    Text(String),
    CodeVoice(String),
    Reference(Reference),
    Emphasis(Vec<InlineNode>),
    Strong(Vec<InlineNode>),
    NewTerm(Vec<InlineNode>),
    Strikethrough(Vec<InlineNode>),
    Superscript(Vec<InlineNode>),
    Subscript(Vec<InlineNode>),
    Link(Link),
    Image(Image),
    /// Span with an unrecognized `type` tag; keeps its literal `text` if any.
    Unknown {
        kind: String,
        text: Option<String>,
    },
}

impl InlineNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn code_voice(code: impl Into<String>) -> Self {
        Self::CodeVoice(code.into())
    }

    /// Reference span without a title override.
    pub fn reference(identifier: impl Into<String>) -> Self {
        Self::Reference(Reference {
            identifier: Some(identifier.into()),
            ..Reference::default()
        })
    }

    fn from_value(value: Value) -> Self {
        #[derive(Default, Deserialize)]
        #[serde(default)]
        struct Literal {
            #[serde(deserialize_with = "lenient::option")]
            text: Option<String>,
            #[serde(deserialize_with = "lenient::option")]
            code: Option<String>,
        }

        #[derive(Default, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        struct Children {
            #[serde(deserialize_with = "lenient::vec")]
            inline_content: Vec<InlineNode>,
        }

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let children = |value: Value| -> Vec<InlineNode> {
            serde_json::from_value::<Children>(value)
                .map(|c| c.inline_content)
                .unwrap_or_default()
        };
        match kind.as_str() {
            "text" | "codeVoice" => {
                let literal: Literal = serde_json::from_value(value).unwrap_or_default();
                if kind == "text" {
                    Self::Text(literal.text.unwrap_or_default())
                } else {
                    Self::CodeVoice(literal.code.or(literal.text).unwrap_or_default())
                }
            }
            "reference" => Self::Reference(serde_json::from_value(value).unwrap_or_default()),
            "link" => Self::Link(serde_json::from_value(value).unwrap_or_default()),
            "image" => Self::Image(serde_json::from_value(value).unwrap_or_default()),
            "emphasis" => Self::Emphasis(children(value)),
            "strong" => Self::Strong(children(value)),
            "newTerm" => Self::NewTerm(children(value)),
            "strikethrough" => Self::Strikethrough(children(value)),
            "superscript" => Self::Superscript(children(value)),
            "subscript" => Self::Subscript(children(value)),
            _ => {
                let literal: Literal = serde_json::from_value(value).unwrap_or_default();
                Self::Unknown {
                    kind,
                    text: literal.text,
                }
            }
        }
    }
}

impl<'de> Deserialize<'de> for InlineNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Cross-reference span.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reference {
    #[serde(deserialize_with = "lenient::option")]
    pub identifier: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub overriding_title: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub text: Option<String>,
}

impl Reference {
    /// First non-empty explicit title carried by the span itself.
    pub fn title_override(&self) -> Option<&str> {
        [&self.overriding_title, &self.title, &self.text]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|title| !title.trim().is_empty())
    }
}

/// External hyperlink span.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "lenient::option")]
    pub destination: Option<String>,
    #[serde(deserialize_with = "lenient::option")]
    pub title: Option<String>,
}

/// Image span pointing at an image reference.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(deserialize_with = "lenient::option")]
    pub identifier: Option<String>,
}

/// Deserializers that read a wrong-shaped value as absent instead of failing.
mod lenient {
    use std::collections::{BTreeMap, HashMap};

    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    pub(super) fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }

    /// Keeps the readable elements of an array; anything else is empty.
    pub(super) fn vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Value::deserialize(deserializer).map(readable_elements)
    }

    /// Object of arrays, each read like [`vec`]; a non-object is empty.
    pub(super) fn vec_per_key<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let entries = match Value::deserialize(deserializer)? {
            Value::Object(entries) => entries,
            _ => return Ok(BTreeMap::new()),
        };
        Ok(entries
            .into_iter()
            .map(|(key, value)| (key, readable_elements(value)))
            .collect())
    }

    fn readable_elements<T: DeserializeOwned>(value: Value) -> Vec<T> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Keeps the readable entries of an object; anything else is empty.
    pub(super) fn map<'de, D, T>(deserializer: D) -> Result<HashMap<String, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let entries = match Value::deserialize(deserializer)? {
            Value::Object(entries) => entries,
            _ => return Ok(HashMap::new()),
        };
        Ok(entries
            .into_iter()
            .filter_map(|(key, value)| Some((key, serde_json::from_value(value).ok()?)))
            .collect())
    }
}
