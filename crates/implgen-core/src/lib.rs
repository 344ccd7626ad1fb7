//! # implgen-core
//!
//! Generates minimal concrete Java implementations of interfaces and
//! extensible classes.
//!
//! Given a type descriptor, the crate emits a `<Simple>Impl` compilation
//! unit that compiles against the original type: every abstract member gets
//! a body returning a default value, and every non-private constructor is
//! mirrored with a `super(...)` call. It includes:
//!
//! - [`MetadataProvider`] for plugging in type metadata sources
//! - [`CatalogProvider`] for types declared in TOML or JSON
//! - [`Implementor`] for orchestrating resolve, validate, render and write
//! - [`Compiler`] and [`write_archive`] for the compile-and-jar workflow
//!
//! ## Example
//!
//! ```ignore
//! use implgen_core::{CatalogProvider, Implementor};
//!
//! let implementor = Implementor::builder()
//!     .provider(CatalogProvider::from_file("types.toml".as_ref())?)
//!     .build();
//!
//! let path = implementor.implement("com.example.Shape", "src".as_ref())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collector;
mod config;
mod error;
mod identity;
mod implementor;
mod model;
mod render;
mod sink;
mod validation;

/// Unicode escaping for generated sources.
pub mod encoder;
/// Compile-and-package support.
pub mod jar;
/// Metadata providers and descriptor resolution.
pub mod provider;

pub use collector::{collect_abstract_members, AbstractMemberSet, Subtyping};
pub use config::{
    ArchiveConfig, CompilerConfig, Config, ConfigError, GeneratorConfig, LineEnding,
    ProviderConfig,
};
pub use error::ImplError;
pub use identity::{MemberIdentityKey, SignatureKey};
pub use implementor::{Implementor, ImplementorBuilder};
pub use jar::{write_archive, ArchiveError, CompileError, CompileRequest, Compiler, Javac};
pub use model::{
    is_identifier, ClassName, MemberKind, MemberSignature, ModelError, Modifiers, Parameter,
    PrimitiveType, TypeDescriptor, TypeKind, TypeRef, TypeShape,
};
pub use provider::{
    CatalogError, CatalogProvider, DescriptorResolver, MetadataProvider, ProviderBox,
    ProviderChain, ResolutionError,
};
pub use render::{GeneratedUnit, RenderError, SourceRenderer};
pub use sink::{Destination, DestinationError, DirectoryDestination};
pub use validation::{check_request, validate, InvalidReason, InvalidTargetError, ValidatedTarget};
