//! Per-session configuration

use serde::Deserialize;

/// Options for one map-building session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceMapOptions {
    /// Name of the generated file the map describes
    pub file: String,
    /// Prefix consumers prepend to each entry of `sources`
    pub source_root: Option<String>,
    /// Record symbol names. When false, names passed to `add_mapping` are dropped
    pub include_names: bool,
    /// Embed source text as `sourcesContent`
    pub include_sources_content: bool,
}

impl Default for SourceMapOptions {
    fn default() -> Self {
        SourceMapOptions {
            file: String::new(),
            source_root: None,
            include_names: true,
            include_sources_content: false,
        }
    }
}

impl SourceMapOptions {
    pub fn new(file: impl Into<String>) -> Self {
        SourceMapOptions {
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn with_source_root(mut self, root: impl Into<String>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    pub fn with_names(mut self, include: bool) -> Self {
        self.include_names = include;
        self
    }

    pub fn with_sources_content(mut self, include: bool) -> Self {
        self.include_sources_content = include;
        self
    }
}
