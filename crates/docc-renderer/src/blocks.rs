//! Block-level rendering.

use std::fmt::Write;

use crate::inline::InlineRenderer;
use crate::model::{Aside, BlockNode, Code, CodeListing, Heading, List, Table, TermList};
use crate::options::BLOCK_DEPTH_SENTINEL;

/// Callout severity for an aside style tag.
///
/// # Examples
///
/// ```
/// use docc_renderer::callout_severity;
///
/// assert_eq!(callout_severity(Some("deprecated")), "WARNING");
/// assert_eq!(callout_severity(None), "NOTE");
/// ```
pub fn callout_severity(style: Option<&str>) -> &'static str {
    match style.map(str::to_ascii_lowercase).as_deref() {
        Some("warning" | "deprecated") => "WARNING",
        Some("important") => "IMPORTANT",
        Some("caution") => "CAUTION",
        Some("tip") => "TIP",
        _ => "NOTE",
    }
}

/// Renders block nodes to Markdown, each block followed by a blank line.
///
/// Block nesting depth is an explicit argument. A subtree deeper than
/// `max_depth` is replaced by [`BLOCK_DEPTH_SENTINEL`]; content rendered
/// before the limit tripped is kept. Paragraphs start a fresh inline depth.
#[derive(Clone, Copy, Debug)]
pub struct BlockRenderer<'a> {
    inline: InlineRenderer<'a>,
    max_depth: usize,
    default_language: &'a str,
}

impl<'a> BlockRenderer<'a> {
    pub fn new(inline: InlineRenderer<'a>, max_depth: usize, default_language: &'a str) -> Self {
        Self {
            inline,
            max_depth,
            default_language,
        }
    }

    pub fn inline(&self) -> &InlineRenderer<'a> {
        &self.inline
    }

    pub fn default_language(&self) -> &'a str {
        self.default_language
    }

    pub fn render(&self, nodes: &[BlockNode], depth: usize) -> String {
        if depth > self.max_depth {
            tracing::warn!(depth, limit = self.max_depth, "Block content too deeply nested");
            return format!("{BLOCK_DEPTH_SENTINEL}\n\n");
        }

        let mut out = String::new();
        for node in nodes {
            self.render_node(node, depth, &mut out);
        }
        out
    }

    fn render_node(&self, node: &BlockNode, depth: usize, out: &mut String) {
        match node {
            BlockNode::Heading(heading) => render_heading(heading, out),
            BlockNode::Paragraph(paragraph) => {
                let text = self.inline.render(&paragraph.inline_content, 0);
                if !text.trim().is_empty() {
                    out.push_str(&text);
                    out.push_str("\n\n");
                }
            }
            BlockNode::CodeListing(listing) => self.render_code_listing(listing, out),
            BlockNode::UnorderedList(list) => self.render_list(list, false, depth, out),
            BlockNode::OrderedList(list) => self.render_list(list, true, depth, out),
            BlockNode::Aside(aside) => self.render_aside(aside, depth, out),
            BlockNode::Table(table) => self.render_table(table, depth, out),
            BlockNode::TermList(terms) => self.render_term_list(terms, depth, out),
            BlockNode::ThematicBreak => out.push_str("---\n\n"),
            BlockNode::Unknown(kind) => {
                tracing::trace!(kind = %kind, "Skipping unknown block kind");
            }
        }
    }

    fn render_code_listing(&self, listing: &CodeListing, out: &mut String) {
        let language = listing
            .syntax
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(self.default_language);
        let code = listing.code.as_ref().map(Code::text).unwrap_or_default();
        push_fenced(&code, language, out);
    }

    fn render_list(&self, list: &List, ordered: bool, depth: usize, out: &mut String) {
        if list.items.is_empty() {
            return;
        }
        for (index, item) in list.items.iter().enumerate() {
            let marker = if ordered {
                format!("{}. ", index + 1)
            } else {
                "- ".to_owned()
            };
            let body = self.render(&item.content, depth + 1);
            push_list_item(&marker, body.trim_end(), out);
        }
        out.push('\n');
    }

    fn render_aside(&self, aside: &Aside, depth: usize, out: &mut String) {
        let severity = callout_severity(aside.style.as_deref());
        let _ = writeln!(out, "> [!{severity}]");

        let style = aside.style.as_deref().unwrap_or_default();
        if let Some(name) = aside
            .name
            .as_deref()
            .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(style))
        {
            let _ = writeln!(out, "> **{name}**");
        }

        let body = self.render(&aside.content, depth + 1);
        for line in body.trim_end().lines() {
            if line.is_empty() {
                out.push_str(">\n");
            } else {
                let _ = writeln!(out, "> {line}");
            }
        }
        out.push('\n');
    }

    fn render_table(&self, table: &Table, depth: usize, out: &mut String) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return;
        }

        let mut rows = table.rows.iter().map(|row| {
            let mut cells: Vec<String> = row
                .iter()
                .map(|cell| table_cell(&self.render(cell, depth + 1)))
                .collect();
            cells.resize(columns, String::new());
            cells
        });

        let header = if table.header.as_deref() == Some("row") {
            rows.next().unwrap_or_else(|| vec![String::new(); columns])
        } else {
            vec![String::new(); columns]
        };
        push_table_row(&header, out);
        push_table_row(&vec!["---".to_owned(); columns], out);
        for row in rows {
            push_table_row(&row, out);
        }
        out.push('\n');
    }

    fn render_term_list(&self, terms: &TermList, depth: usize, out: &mut String) {
        for item in &terms.items {
            let term = self.inline.render(&item.term.inline_content, 0);
            if !term.trim().is_empty() {
                let _ = write!(out, "**{}**\n\n", term.trim());
            }
            let definition = self.render(&item.definition.content, depth + 1);
            if !definition.trim().is_empty() {
                out.push_str(definition.trim_end());
                out.push_str("\n\n");
            }
        }
    }
}

fn render_heading(heading: &Heading, out: &mut String) {
    let Some(text) = heading.text.as_deref().filter(|t| !t.trim().is_empty()) else {
        return;
    };
    let level = usize::try_from(heading.level.unwrap_or(2).clamp(1, 6)).unwrap_or(2);
    let _ = write!(out, "{} {}\n\n", "#".repeat(level), text.trim());
}

/// Write a fenced code block, lengthening the fence past any backtick run in the code.
pub(crate) fn push_fenced(code: &str, language: &str, out: &mut String) {
    let fence = "`".repeat(fence_length(code));
    let _ = write!(out, "{fence}{language}\n{code}\n{fence}\n\n");
}

fn fence_length(code: &str) -> usize {
    let longest = code
        .lines()
        .map(|line| line.trim_start().chars().take_while(|&c| c == '`').count())
        .max()
        .unwrap_or(0);
    (longest + 1).max(3)
}

/// Prefix the first line with the marker and indent the rest to match it.
fn push_list_item(marker: &str, body: &str, out: &mut String) {
    let indent = " ".repeat(marker.len());
    let mut lines = body.lines();
    out.push_str(marker.trim_end());
    if let Some(first) = lines.next().filter(|line| !line.is_empty()) {
        out.push(' ');
        out.push_str(first);
    }
    out.push('\n');
    for line in lines {
        if !line.is_empty() {
            out.push_str(&indent);
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn table_cell(rendered: &str) -> String {
    rendered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn push_table_row(cells: &[String], out: &mut String) {
    out.push('|');
    for cell in cells {
        if cell.is_empty() {
            out.push_str("  |");
        } else {
            let _ = write!(out, " {cell} |");
        }
    }
    out.push('\n');
}
