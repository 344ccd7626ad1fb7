//! Descriptor catalogs: type shapes declared in TOML or JSON.
//!
//! ```text
//! TOML / JSON text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert
//! Vec<TypeShape>
//!   ↓
//! CatalogProvider
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{MetadataProvider, ResolutionError};
use crate::model::{ClassName, TypeShape};

pub mod dto;
pub mod loader;

/// Errors from reading and loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Shape validation failed.
    #[error("{0}")]
    Load(#[from] loader::LoadError),
}

/// A provider backed by an in-memory set of shapes.
#[derive(Debug, Clone, Default)]
pub struct CatalogProvider {
    label: String,
    shapes: HashMap<ClassName, TypeShape>,
}

impl CatalogProvider {
    /// Creates a provider from already built shapes. Later shapes replace
    /// earlier ones with the same name.
    #[must_use]
    pub fn from_shapes(label: impl Into<String>, shapes: impl IntoIterator<Item = TypeShape>) -> Self {
        Self {
            label: label.into(),
            shapes: shapes.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    /// Loads a catalog file; `.json` files are read as JSON, anything else
    /// as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let dto = if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        let shapes = loader::load(dto, path.parent())?;
        tracing::debug!("loaded {} types from {}", shapes.len(), path.display());
        Ok(Self::from_shapes(path.display().to_string(), shapes))
    }

    /// Parses a TOML catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a shape fails validation.
    pub fn parse_toml(content: &str) -> Result<Self, CatalogError> {
        let dto: dto::CatalogDto = toml::from_str(content)?;
        Ok(Self::from_shapes("catalog", loader::load(dto, None)?))
    }

    /// Parses a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a shape fails validation.
    pub fn parse_json(content: &str) -> Result<Self, CatalogError> {
        let dto: dto::CatalogDto = serde_json::from_str(content)?;
        Ok(Self::from_shapes("catalog", loader::load(dto, None)?))
    }

    /// Number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if the catalog declares no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl MetadataProvider for CatalogProvider {
    fn name(&self) -> &str {
        &self.label
    }

    fn lookup(&self, name: &ClassName) -> Result<Option<TypeShape>, ResolutionError> {
        Ok(self.shapes.get(name).cloned())
    }
}
