//! Resolving opaque source tokens to concrete positions

use crate::context::SourceContext;
use crate::source_info::SourceInfo;
use crate::types::SourcePosition;

/// Capability to turn a generator's source token into a source position
///
/// Implementations must not fail loudly: a token that is not source-backed
/// resolves to None and the emission is simply not mapped. Resolving must not
/// change observable state; caching lookup tables is fine.
pub trait SourceResolver {
    type Token: ?Sized;

    fn resolve(&self, token: &Self::Token) -> Option<SourcePosition>;

    /// Text of the source file at `path`, for embedding as `sourcesContent`
    fn content(&self, path: &str) -> Option<&str> {
        let _ = path;
        None
    }
}

impl SourceResolver for SourceContext {
    type Token = SourceInfo;

    fn resolve(&self, token: &SourceInfo) -> Option<SourcePosition> {
        let (file_id, offset) = token.original_offset()?;
        let file = self.get_file(file_id)?;
        let (line, column) = file.line_column(offset)?;

        Some(SourcePosition {
            file: file.path.clone(),
            line,
            column,
        })
    }

    fn content(&self, path: &str) -> Option<&str> {
        self.content_for_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileId;

    fn context() -> SourceContext {
        let mut ctx = SourceContext::new();
        ctx.add_file("a.kt".to_string(), Some("val x = 1\nfun f() = x\n".to_string()));
        ctx
    }

    #[test]
    fn test_resolve_original() {
        let ctx = context();
        let pos = ctx.resolve(&SourceInfo::original(FileId(0), 14)).unwrap();
        assert_eq!(pos, SourcePosition::new("a.kt", 1, 4));
    }

    #[test]
    fn test_resolve_through_substring() {
        let ctx = context();
        let decl = SourceInfo::original(FileId(0), 10);
        let body = SourceInfo::substring(decl, 10);

        let pos = ctx.resolve(&body).unwrap();
        assert_eq!(pos, SourcePosition::new("a.kt", 1, 10));
    }

    #[test]
    fn test_content_by_path() {
        let ctx = context();
        assert_eq!(ctx.content("a.kt"), Some("val x = 1\nfun f() = x\n"));
        assert_eq!(ctx.content("b.kt"), None);
    }

    #[test]
    fn test_resolve_misses() {
        let ctx = context();
        assert!(ctx.resolve(&SourceInfo::Synthetic).is_none());
        assert!(ctx.resolve(&SourceInfo::original(FileId(7), 0)).is_none());
        assert!(ctx.resolve(&SourceInfo::original(FileId(0), 500)).is_none());
    }
}
