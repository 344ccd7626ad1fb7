//! Compile-and-package support for the jar workflow.

mod archive;
mod compile;

pub use archive::{manifest, write_archive, ArchiveError, MANIFEST_PATH};
pub use compile::{CompileError, CompileRequest, Compiler, Javac};
