//! The mapping accumulator
//!
//! A [`SourceMapBuilder`] owns one session: [`open`](SourceMapBuilder::open),
//! any number of [`add_mapping`](SourceMapBuilder::add_mapping) calls in
//! emission order, then a single [`finish`](SourceMapBuilder::finish) that
//! encodes everything into a [`MapArtifact`]. Sessions share nothing, so
//! builders for different output files can run on different threads.

use std::collections::BTreeMap;

use crate::artifact::MapArtifact;
use crate::encoder;
use crate::error::{IndexTable, Result, SourceMapError};
use crate::interner::Interner;
use crate::options::SourceMapOptions;
use crate::types::{GeneratedPosition, Segment, SourcePosition};

#[derive(Debug)]
enum State {
    Idle,
    Open(Session),
    Closed,
}

#[derive(Debug, Default)]
struct Session {
    sources: Interner,
    names: Interner,
    /// Line groups keyed by generated line; created on first segment
    lines: BTreeMap<u32, Vec<Segment>>,
}

#[derive(Debug)]
pub struct SourceMapBuilder {
    options: SourceMapOptions,
    state: State,
}

impl SourceMapBuilder {
    pub fn new(options: SourceMapOptions) -> Self {
        SourceMapBuilder {
            options,
            state: State::Idle,
        }
    }

    pub fn options(&self) -> &SourceMapOptions {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Begin the session with empty interners and no line groups
    ///
    /// A builder produces one artifact: opening again after `finish` fails
    /// with [`SourceMapError::SessionClosed`].
    pub fn open(&mut self) -> Result<()> {
        match self.state {
            State::Idle => {
                tracing::debug!(file = %self.options.file, "Opening source map session");
                self.state = State::Open(Session::default());
                Ok(())
            }
            State::Open(_) => Err(SourceMapError::AlreadyOpen),
            State::Closed => Err(SourceMapError::SessionClosed),
        }
    }

    /// Record that `generated` was emitted from `source`
    ///
    /// Segments are appended to their line group in call order. Lines may
    /// arrive in any order, and repeated or overlapping columns are kept
    /// as-is.
    pub fn add_mapping(
        &mut self,
        generated: GeneratedPosition,
        source: &SourcePosition,
        name: Option<&str>,
    ) -> Result<()> {
        let session = match &mut self.state {
            State::Open(session) => session,
            State::Idle => return Err(SourceMapError::NotOpen),
            State::Closed => return Err(SourceMapError::SessionClosed),
        };

        let name = name.filter(|_| self.options.include_names);

        // Check both tables first so a full one leaves neither changed
        if !session.sources.has_room_for(&source.file) {
            return Err(SourceMapError::IndexOverflow {
                table: IndexTable::Sources,
            });
        }
        if name.is_some_and(|name| !session.names.has_room_for(name)) {
            return Err(SourceMapError::IndexOverflow {
                table: IndexTable::Names,
            });
        }

        let source_index = session
            .sources
            .intern(&source.file)
            .ok_or(SourceMapError::IndexOverflow {
                table: IndexTable::Sources,
            })?;
        let name_index = name
            .map(|name| {
                session.names.intern(name).ok_or(SourceMapError::IndexOverflow {
                    table: IndexTable::Names,
                })
            })
            .transpose()?;

        session
            .lines
            .entry(generated.line)
            .or_default()
            .push(Segment {
                generated_column: generated.column,
                source_index,
                source_line: source.line,
                source_column: source.column,
                name_index,
            });
        Ok(())
    }

    /// Encode the session into its artifact and close the builder
    ///
    /// The builder is closed even when encoding fails; no partial artifact is
    /// ever returned.
    pub fn finish(&mut self) -> Result<MapArtifact> {
        let session = match std::mem::replace(&mut self.state, State::Closed) {
            State::Open(session) => session,
            State::Idle => {
                self.state = State::Idle;
                return Err(SourceMapError::NotOpen);
            }
            State::Closed => return Err(SourceMapError::SessionClosed),
        };

        let mappings =
            encoder::encode_mappings(&session.lines, session.sources.len(), session.names.len())?;

        tracing::debug!(
            file = %self.options.file,
            lines = session.lines.len(),
            segments = session.lines.values().map(Vec::len).sum::<usize>(),
            sources = session.sources.len(),
            names = session.names.len(),
            "Finished source map session"
        );

        Ok(MapArtifact::new(
            &self.options,
            session.sources.into_vec(),
            session.names.into_vec(),
            mappings,
        ))
    }
}
