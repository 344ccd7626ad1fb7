//! # implgen-classfile
//!
//! Reads type metadata for implgen from compiled JVM class files.
//!
//! It includes:
//!
//! - [`parse_class`] for turning class file bytes into a [`TypeShape`]
//! - [`ClasspathProvider`] for looking types up in directories and jars
//! - descriptor parsing for field and method signatures
//!
//! ## Example
//!
//! ```ignore
//! use implgen_classfile::ClasspathProvider;
//! use implgen_core::Implementor;
//!
//! let implementor = Implementor::builder()
//!     .provider(ClasspathProvider::new(["lib/api.jar", "build/classes"]))
//!     .build();
//! ```
//!
//! [`TypeShape`]: implgen_core::TypeShape

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classpath;
mod descriptor;
mod parse;
mod reader;

#[cfg(test)]
#[path = "../tests/support/mod.rs"]
mod support;

pub use classpath::{ClasspathEntry, ClasspathProvider};
pub use descriptor::{parse_field_descriptor, parse_method_descriptor, MethodDescriptor};
pub use parse::parse_class;
pub use reader::ClassParseError;
