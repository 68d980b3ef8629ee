//! Map options from a TOML file merged with command-line overrides

use std::path::Path;

use anyhow::{Context, Result};
use emitmap_core::SourceMapOptions;

/// Command-line values that take precedence over the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub file: Option<String>,
    pub source_root: Option<String>,
    pub sources_content: bool,
    pub no_names: bool,
}

/// Load options from `path` (if any) and apply `overrides` on top
///
/// `default_file` is used when neither the file nor the overrides name the
/// generated file.
pub fn load_options(
    path: Option<&Path>,
    overrides: Overrides,
    default_file: &str,
) -> Result<SourceMapOptions> {
    let mut options = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            parse_options(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => SourceMapOptions::default(),
    };

    if let Some(file) = overrides.file {
        options.file = file;
    }
    if options.file.is_empty() {
        options.file = default_file.to_string();
    }
    if let Some(root) = overrides.source_root {
        options.source_root = Some(root);
    }
    if overrides.sources_content {
        options.include_sources_content = true;
    }
    if overrides.no_names {
        options.include_names = false;
    }
    Ok(options)
}

fn parse_options(text: &str) -> Result<SourceMapOptions> {
    Ok(toml::from_str(text)?)
}
