//! Build command implementation.
//!
//! Replays a recorded emission stream through an [`EmissionConsumer`] and
//! writes the resulting map. The stream is a JSON document:
//!
//! ```json
//! {
//!   "sources": [{ "path": "Main.kt", "content": "fun main() {}" }],
//!   "events": [
//!     { "line": 0, "column": 9, "source": { "file": 0, "offset": 4 }, "name": "main" },
//!     { "line": 0, "column": 13, "source": null }
//!   ]
//! }
//! ```
//!
//! Sources without `content` are read from disk. Events with a null source
//! are synthetic output and produce no mapping.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use emitmap_core::{EmissionConsumer, FileId, GeneratedPosition, MapArtifact, SourceContext, SourceInfo};

use crate::config::{self, Overrides};

/// Arguments for the build command
#[derive(Debug)]
pub struct BuildArgs {
    pub events: PathBuf,
    pub out: PathBuf,
    pub file: Option<String>,
    pub source_root: Option<String>,
    pub config: Option<PathBuf>,
    pub sources_content: bool,
    pub no_names: bool,
    pub pretty: bool,
    pub append_comment: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct EventStream {
    sources: Vec<SourceEntry>,
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    path: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Event {
    line: u32,
    column: u32,
    #[serde(default)]
    source: Option<EventSource>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventSource {
    file: usize,
    offset: usize,
}

impl Event {
    fn token(&self) -> SourceInfo {
        match &self.source {
            Some(src) => SourceInfo::original(FileId(src.file), src.offset),
            None => SourceInfo::Synthetic,
        }
    }
}

/// Execute the build command
pub fn execute(args: BuildArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.events)
        .with_context(|| format!("Failed to read event stream {}", args.events.display()))?;
    let stream: EventStream = serde_json::from_str(&text)
        .with_context(|| format!("Invalid event stream {}", args.events.display()))?;

    let options = config::load_options(
        args.config.as_deref(),
        Overrides {
            file: args.file.clone(),
            source_root: args.source_root.clone(),
            sources_content: args.sources_content,
            no_names: args.no_names,
        },
        &default_file_name(&args.out),
    )?;

    let mut ctx = SourceContext::new();
    for source in stream.sources {
        ctx.add_file(source.path, source.content);
    }

    let mut consumer = EmissionConsumer::open(&ctx, options)?;
    for event in &stream.events {
        consumer.notify_named(
            GeneratedPosition::new(event.line, event.column),
            &event.token(),
            event.name.as_deref(),
        )?;
    }
    let map = consumer.finish()?;

    let json = if args.pretty {
        map.to_json_pretty()?
    } else {
        map.to_json()?
    };
    std::fs::write(&args.out, json)
        .with_context(|| format!("Failed to write source map {}", args.out.display()))?;

    info!(
        "Wrote {} ({} events, {} sources)",
        args.out.display(),
        stream.events.len(),
        map.sources().len()
    );

    if let Some(generated) = &args.append_comment {
        append_url_comment(generated, &args.out)?;
        debug!("Appended sourceMappingURL comment to {}", generated.display());
    }

    Ok(())
}

/// `app.js.map` describes `app.js`; anything else describes itself minus its extension
fn default_file_name(out: &Path) -> String {
    let name = out
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    match name.strip_suffix(".map") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

fn append_url_comment(generated: &Path, map_path: &Path) -> Result<()> {
    let existing = std::fs::read_to_string(generated)
        .with_context(|| format!("Failed to read generated file {}", generated.display()))?;
    let url = map_path
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned());

    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(generated)
        .with_context(|| format!("Failed to open generated file {}", generated.display()))?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "{}", MapArtifact::source_mapping_url_comment(&url))?;
    Ok(())
}
