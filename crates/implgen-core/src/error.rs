//! Top-level error type.

use crate::jar::{ArchiveError, CompileError};
use crate::provider::ResolutionError;
use crate::render::RenderError;
use crate::sink::DestinationError;
use crate::validation::InvalidTargetError;

/// Any failure of a generation request.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ImplError {
    /// The request or the target type was rejected.
    #[error(transparent)]
    #[diagnostic(
        code(implgen::invalid_target),
        help("only interfaces and non-final, non-private classes with a non-private constructor can be implemented")
    )]
    InvalidTarget(#[from] InvalidTargetError),

    /// The source could not be rendered.
    #[error(transparent)]
    #[diagnostic(code(implgen::render))]
    Render(#[from] RenderError),

    /// The type or one of its supertypes could not be resolved.
    #[error(transparent)]
    #[diagnostic(
        code(implgen::resolution),
        help("add the type's class directory or jar with --classpath, or declare it in a catalog")
    )]
    Resolution(#[from] ResolutionError),

    /// The output could not be written.
    #[error(transparent)]
    #[diagnostic(code(implgen::destination))]
    Destination(#[from] DestinationError),

    /// The generated source did not compile.
    #[error(transparent)]
    #[diagnostic(
        code(implgen::compile),
        help("check that a JDK is installed and `compiler.program` points at javac")
    )]
    Compile(#[from] CompileError),

    /// The archive could not be written.
    #[error(transparent)]
    #[diagnostic(code(implgen::archive))]
    Archive(#[from] ArchiveError),
}
