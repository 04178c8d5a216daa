//! Renderers for the page-level sections around the main content.

use std::fmt::Write;

use crate::blocks::{BlockRenderer, push_fenced};
use crate::model::{BlockNode, Declaration, IndexNode, LinkSection, Parameter, Platform};
use crate::references::References;

/// Render a titled list of cross-references.
///
/// Identifiers are listed in source order; duplicates are kept.
pub fn render_link_section(section: &LinkSection, refs: &References<'_>, out: &mut String) {
    let title = section.title.as_deref().filter(|t| !t.trim().is_empty());
    if title.is_none() && section.identifiers.is_empty() {
        return;
    }
    if let Some(title) = title {
        let _ = write!(out, "## {}\n\n", title.trim());
    }
    for id in &section.identifiers {
        let _ = write!(
            out,
            "- [{}]({})",
            refs.resolve_title(id, None),
            refs.resolve_url(id)
        );
        if let Some(summary) = refs.resolve_abstract(id) {
            let _ = write!(out, " - {}", summary.trim());
        }
        out.push('\n');
    }
    if !section.identifiers.is_empty() {
        out.push('\n');
    }
}

/// Render the index tree of a framework or collection root.
///
/// Group markers become headings at `level` (capped at 6); titled nodes with
/// a path become list items. Children render one level deeper.
///
/// Unlike the block and inline walkers this recursion has no depth limit:
/// the index comes from a trusted, size-bounded source.
pub fn render_index_tree(nodes: &[IndexNode], level: usize, out: &mut String) {
    for node in nodes {
        if node.is_group_marker() {
            if let Some(title) = node.title.as_deref().filter(|t| !t.is_empty()) {
                ensure_blank_line(out);
                let _ = write!(out, "{} {title}\n\n", "#".repeat(level.clamp(1, 6)));
            }
        } else if let (Some(path), Some(title)) = (node.path.as_deref(), node.title.as_deref()) {
            let _ = write!(out, "- [{title}]({path})");
            if node.beta {
                out.push_str(" **Beta**");
            }
            out.push('\n');
        }

        if !node.children.is_empty() {
            out.push('\n');
            render_index_tree(&node.children, level + 1, out);
        }
    }
}

/// Render each declaration as a fenced code block.
pub fn render_declarations(declarations: &[Declaration], language: &str, out: &mut String) {
    for declaration in declarations {
        let source: String = declaration
            .tokens
            .iter()
            .filter_map(|token| token.text.as_deref())
            .collect();
        let source = source.trim();
        if !source.is_empty() {
            push_fenced(source, language, out);
        }
    }
}

/// Render a `## Parameters` section.
pub fn render_parameters(parameters: &[Parameter], blocks: &BlockRenderer<'_>, out: &mut String) {
    if parameters.is_empty() {
        return;
    }
    out.push_str("## Parameters\n\n");
    for parameter in parameters {
        let name = parameter.name.as_deref().unwrap_or_default();
        let content = blocks.render(&parameter.content, 0);
        let content = content.trim();
        let inline_first = matches!(parameter.content.first(), Some(BlockNode::Paragraph(_)));

        match (name.is_empty(), content.is_empty()) {
            (true, true) => {}
            (true, false) => {
                let _ = write!(out, "{content}\n\n");
            }
            (false, true) => {
                let _ = write!(out, "**{name}**\n\n");
            }
            (false, false) if inline_first => {
                let _ = write!(out, "**{name}**: {content}\n\n");
            }
            (false, false) => {
                let _ = write!(out, "**{name}**\n\n{content}\n\n");
            }
        }
    }
}

/// Render the platform availability line.
pub fn render_platforms(platforms: &[Platform], out: &mut String) {
    let entries: Vec<String> = platforms
        .iter()
        .filter_map(|platform| {
            let name = platform.name.as_deref().filter(|n| !n.is_empty())?;
            let mut entry = name.to_owned();
            if let Some(version) = platform.introduced_at.as_deref().filter(|v| !v.is_empty()) {
                let _ = write!(entry, " {version}+");
            }
            if platform.beta {
                entry.push_str(" Beta");
            }
            if platform.deprecated {
                entry.push_str(" Deprecated");
            }
            Some(entry)
        })
        .collect();

    if !entries.is_empty() {
        let _ = write!(out, "**Available on:** {}\n\n", entries.join(", "));
    }
}

fn ensure_blank_line(out: &mut String) {
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    out.push_str(if out.ends_with('\n') { "\n" } else { "\n\n" });
}
