//! Rendering options.

/// Sentinel emitted in place of block content nested deeper than the limit.
pub const BLOCK_DEPTH_SENTINEL: &str = "[Content too deeply nested]";

/// Sentinel emitted in place of inline content nested deeper than the limit.
pub const INLINE_DEPTH_SENTINEL: &str = "[Inline content too deeply nested]";

pub const DEFAULT_MAX_BLOCK_DEPTH: usize = 50;
pub const DEFAULT_MAX_INLINE_DEPTH: usize = 20;
pub const DEFAULT_CODE_LANGUAGE: &str = "swift";

pub const DEFAULT_ATTRIBUTION: &str =
    "*Extracted by docc-renderer - Making documentation readable for humans and machines.*";
pub const DEFAULT_DISCLAIMER: &str =
    "*This is unofficial content. All documentation belongs to its original publisher.*";

/// Options controlling a [`DocumentRenderer`](crate::DocumentRenderer).
///
/// Realistic pages rarely nest deeper than five levels, so the default limits
/// only trip on malformed or adversarial input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Deepest block nesting rendered before the block sentinel is emitted.
    pub max_block_depth: usize,
    /// Deepest inline nesting rendered before the inline sentinel is emitted.
    pub max_inline_depth: usize,
    /// Fence language for declarations and listings without a `syntax` tag.
    pub default_code_language: String,
    /// First footer line.
    pub attribution: String,
    /// Second footer line.
    pub disclaimer: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_block_depth: DEFAULT_MAX_BLOCK_DEPTH,
            max_inline_depth: DEFAULT_MAX_INLINE_DEPTH,
            default_code_language: DEFAULT_CODE_LANGUAGE.to_owned(),
            attribution: DEFAULT_ATTRIBUTION.to_owned(),
            disclaimer: DEFAULT_DISCLAIMER.to_owned(),
        }
    }
}
