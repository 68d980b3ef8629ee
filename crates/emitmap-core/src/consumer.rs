//! Glue between a code generator and the mapping accumulator

use crate::artifact::MapArtifact;
use crate::builder::SourceMapBuilder;
use crate::error::Result;
use crate::options::SourceMapOptions;
use crate::resolve::SourceResolver;
use crate::types::GeneratedPosition;

/// Receives one notification per emitted unit and records a mapping for
/// every token the resolver can place in the original source
///
/// Tokens that do not resolve are skipped silently: most generated output has
/// no source-backed origin.
pub struct EmissionConsumer<'r, R: SourceResolver + ?Sized> {
    resolver: &'r R,
    builder: SourceMapBuilder,
}

impl<'r, R: SourceResolver + ?Sized> EmissionConsumer<'r, R> {
    /// Create a consumer with an already opened session
    pub fn open(resolver: &'r R, options: SourceMapOptions) -> Result<Self> {
        let mut builder = SourceMapBuilder::new(options);
        builder.open()?;
        Ok(EmissionConsumer { resolver, builder })
    }

    pub fn notify(&mut self, generated: GeneratedPosition, token: &R::Token) -> Result<()> {
        self.notify_named(generated, token, None)
    }

    /// Like [`notify`](Self::notify), also recording the symbol name emitted
    /// at `generated`
    pub fn notify_named(
        &mut self,
        generated: GeneratedPosition,
        token: &R::Token,
        name: Option<&str>,
    ) -> Result<()> {
        match self.resolver.resolve(token) {
            Some(source) => self.builder.add_mapping(generated, &source, name),
            None => Ok(()),
        }
    }

    pub fn builder(&self) -> &SourceMapBuilder {
        &self.builder
    }

    /// Finish the session, embedding source text from the resolver when the
    /// options ask for it
    pub fn finish(mut self) -> Result<MapArtifact> {
        let artifact = self.builder.finish()?;
        if !self.builder.options().include_sources_content {
            return Ok(artifact);
        }
        let resolver = self.resolver;
        Ok(artifact.with_sources_content(|path| resolver.content(path)))
    }
}
