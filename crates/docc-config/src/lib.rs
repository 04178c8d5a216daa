//! Configuration management for docc-renderer.
//!
//! Parses `docc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [render]
//! max_block_depth = 50
//! max_inline_depth = 20
//! default_code_language = "swift"
//!
//! [footer]
//! attribution = "*Mirrored by ${ORG_NAME:-us}.*"
//! disclaimer = "*Unofficial copy.*"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.default_code_language`
//! - `footer.attribution`
//! - `footer.disclaimer`

mod expand;

use std::path::{Path, PathBuf};

use docc_renderer::{
    DEFAULT_ATTRIBUTION, DEFAULT_CODE_LANGUAGE, DEFAULT_DISCLAIMER, DEFAULT_MAX_BLOCK_DEPTH,
    DEFAULT_MAX_INLINE_DEPTH, RenderOptions,
};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docc.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering limits and defaults.
    pub render: RenderConfig,
    /// Footer text.
    pub footer: FooterConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[render]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Deepest block nesting rendered before the subtree is replaced.
    pub max_block_depth: usize,
    /// Deepest inline nesting rendered before the span is replaced.
    pub max_inline_depth: usize,
    /// Fence language for declarations and untagged code listings.
    pub default_code_language: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_block_depth: DEFAULT_MAX_BLOCK_DEPTH,
            max_inline_depth: DEFAULT_MAX_INLINE_DEPTH,
            default_code_language: DEFAULT_CODE_LANGUAGE.to_owned(),
        }
    }
}

/// `[footer]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub attribution: String,
    pub disclaimer: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            attribution: DEFAULT_ATTRIBUTION.to_owned(),
            disclaimer: DEFAULT_DISCLAIMER.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`footer.attribution`").
        field: String,
        /// Error message (e.g., "${`ORG_NAME`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `docc.toml` in the current directory and its parents, falling back
    /// to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Search for `docc.toml` in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or if expansion or
    /// validation fails.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let render = &self.render;
        if render.max_block_depth == 0 {
            return Err(ConfigError::Validation(
                "render.max_block_depth must be greater than 0".to_owned(),
            ));
        }
        if render.max_inline_depth == 0 {
            return Err(ConfigError::Validation(
                "render.max_inline_depth must be greater than 0".to_owned(),
            ));
        }
        if render.max_block_depth <= render.max_inline_depth {
            return Err(ConfigError::Validation(format!(
                "render.max_block_depth ({}) must exceed render.max_inline_depth ({})",
                render.max_block_depth, render.max_inline_depth
            )));
        }
        if render.default_code_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "render.default_code_language cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Renderer options built from this configuration.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            max_block_depth: self.render.max_block_depth,
            max_inline_depth: self.render.max_inline_depth,
            default_code_language: self.render.default_code_language.trim().to_owned(),
            attribution: self.footer.attribution.clone(),
            disclaimer: self.footer.disclaimer.clone(),
        }
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.render.default_code_language = expand::expand_env(
            &self.render.default_code_language,
            "render.default_code_language",
        )?;
        self.footer.attribution = expand::expand_env(&self.footer.attribution, "footer.attribution")?;
        self.footer.disclaimer = expand::expand_env(&self.footer.disclaimer, "footer.disclaimer")?;
        Ok(())
    }
}
