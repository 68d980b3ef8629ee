//! Decode command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use emitmap_core::{MapArtifact, ResolvedMapping};

/// Execute the decode command
pub fn execute(map_path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(map_path)
        .with_context(|| format!("Failed to read source map {}", map_path.display()))?;
    let map = MapArtifact::from_json(&text)
        .with_context(|| format!("Invalid source map {}", map_path.display()))?;

    for mapping in map.decode()? {
        println!("{}", format_mapping(&mapping));
    }
    Ok(())
}

fn format_mapping(mapping: &ResolvedMapping<'_>) -> String {
    let mut line = format!(
        "{}:{} -> {}:{}:{}",
        mapping.generated.line,
        mapping.generated.column,
        mapping.source,
        mapping.source_line,
        mapping.source_column
    );
    if let Some(name) = mapping.name {
        line.push(' ');
        line.push_str(name);
    }
    line
}
