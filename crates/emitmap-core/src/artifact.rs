//! The finished source map and its JSON form

use serde::{Deserialize, Serialize};

use crate::decoder::{self, MappingEntry};
use crate::error::{IndexTable, Result, SourceMapError};
use crate::options::SourceMapOptions;
use crate::types::GeneratedPosition;

/// Format version written to every map
pub const SOURCE_MAP_VERSION: u32 = 3;

/// A finished, immutable source map
///
/// `sources` and `names` are in interning order; the indices inside
/// `mappings` refer to positions in those lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapArtifact {
    version: u32,
    file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_root: Option<String>,
    sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sources_content: Option<Vec<Option<String>>>,
    names: Vec<String>,
    mappings: String,
}

/// A decoded mapping with its indices resolved to paths and names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMapping<'a> {
    pub generated: GeneratedPosition,
    pub source: &'a str,
    pub source_line: u32,
    pub source_column: u32,
    pub name: Option<&'a str>,
}

impl MapArtifact {
    pub(crate) fn new(
        options: &SourceMapOptions,
        sources: Vec<String>,
        names: Vec<String>,
        mappings: String,
    ) -> Self {
        MapArtifact {
            version: SOURCE_MAP_VERSION,
            file: options.file.clone(),
            source_root: options.source_root.clone(),
            sources,
            sources_content: None,
            names,
            mappings,
        }
    }

    /// Attach `sourcesContent`, looking up each entry of `sources` in order
    pub(crate) fn with_sources_content<'c>(
        mut self,
        lookup: impl Fn(&str) -> Option<&'c str>,
    ) -> Self {
        let content = self
            .sources
            .iter()
            .map(|path| lookup(path).map(str::to_owned))
            .collect();
        self.sources_content = Some(content);
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn source_root(&self) -> Option<&str> {
        self.source_root.as_deref()
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn sources_content(&self) -> Option<&[Option<String>]> {
        self.sources_content.as_deref()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn mappings(&self) -> &str {
        &self.mappings
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a map from JSON. Only version 3 maps are accepted.
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: MapArtifact = serde_json::from_str(json)?;
        if artifact.version != SOURCE_MAP_VERSION {
            return Err(SourceMapError::UnsupportedVersion(artifact.version));
        }
        Ok(artifact)
    }

    /// Trailing comment linking generated output to its map
    ///
    /// # Example
    ///
    /// ```
    /// use emitmap_core::MapArtifact;
    ///
    /// assert_eq!(
    ///     MapArtifact::source_mapping_url_comment("app.js.map"),
    ///     "//# sourceMappingURL=app.js.map"
    /// );
    /// ```
    pub fn source_mapping_url_comment(url: &str) -> String {
        format!("//# sourceMappingURL={}", url)
    }

    /// Decode `mappings` into absolute entries with raw indices
    pub fn entries(&self) -> Result<Vec<MappingEntry>> {
        decoder::decode_mappings(&self.mappings)
    }

    /// Decode `mappings` and resolve every index against `sources` and `names`
    pub fn decode<'a>(&'a self) -> Result<Vec<ResolvedMapping<'a>>> {
        self.entries()?
            .into_iter()
            .map(|entry| -> Result<ResolvedMapping<'a>> {
                let source = lookup(&self.sources, IndexTable::Sources, entry.source_index)?;
                let name = entry
                    .name_index
                    .map(|index| lookup(&self.names, IndexTable::Names, index))
                    .transpose()?;
                Ok(ResolvedMapping {
                    generated: entry.generated,
                    source,
                    source_line: entry.source_line,
                    source_column: entry.source_column,
                    name,
                })
            })
            .collect()
    }
}

fn lookup(table: &[String], kind: IndexTable, index: u32) -> Result<&str> {
    table
        .get(index as usize)
        .map(String::as_str)
        .ok_or(SourceMapError::DanglingIndex {
            table: kind,
            index,
            len: table.len(),
        })
}
