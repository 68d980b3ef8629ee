//! Command implementations for the emitmap CLI
//!
//! Each command module handles the CLI interface and delegates to
//! emitmap-core for the actual work.

pub mod build;
pub mod decode;
