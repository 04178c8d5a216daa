//! Front matter, breadcrumb and footer.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::options::RenderOptions;

#[derive(Serialize)]
struct FrontMatter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    source: &'a str,
    timestamp: String,
}

/// Render the YAML front matter block.
///
/// `title` and `description` lines are omitted when absent. Values that YAML
/// would read as something other than a string (`null`, `true`, `1.0`) are
/// quoted.
pub fn front_matter(
    title: Option<&str>,
    description: Option<&str>,
    source_url: &str,
    timestamp: DateTime<Utc>,
) -> String {
    let fields = FrontMatter {
        title,
        description,
        source: source_url,
        timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    let yaml = serde_yaml::to_string(&fields).unwrap_or_else(|e| {
        tracing::warn!(error = %e, source = %source_url, "Failed to serialize front matter");
        String::new()
    });
    format!("---\n{yaml}---\n\n")
}

/// Render the navigation breadcrumb for a documentation URL.
///
/// Returns `None` unless the URL path has at least three segments
/// (`/documentation/<framework>/<page>`). The framework links to its root;
/// every segment between the framework and the current page gets its own link.
///
/// # Examples
///
/// ```
/// use docc_renderer::breadcrumbs;
///
/// assert_eq!(
///     breadcrumbs("https://developer.apple.com/documentation/swift/array/append").as_deref(),
///     Some("**Navigation:** [Swift](/documentation/swift) › [array](/documentation/swift/array)")
/// );
/// assert_eq!(breadcrumbs("https://developer.apple.com/documentation/swiftui"), None);
/// ```
pub fn breadcrumbs(source_url: &str) -> Option<String> {
    let segments: Vec<&str> = url_path(source_url)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if segments.len() < 3 {
        return None;
    }

    let mut href = format!("/{}/{}", segments[0], segments[1]);
    let mut crumbs = vec![format!("[{}]({href})", capitalize(segments[1]))];
    for segment in &segments[2..segments.len() - 1] {
        href.push('/');
        href.push_str(segment);
        crumbs.push(format!("[{segment}]({href})"));
    }
    Some(format!("**Navigation:** {}", crumbs.join(" › ")))
}

/// Render the fixed footer.
pub fn footer(options: &RenderOptions) -> String {
    format!("---\n\n{}\n{}\n", options.attribution, options.disclaimer)
}

/// Path component of a URL, without query or fragment.
///
/// Input without a scheme is treated as a path when it starts with `/`, and
/// as `host/path` otherwise.
fn url_path(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = if rest.starts_with('/') {
        rest
    } else {
        rest.find('/').map_or("", |i| &rest[i..])
    };
    path.split(['?', '#']).next().unwrap_or_default()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
