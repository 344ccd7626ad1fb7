//! Metadata providers.
//!
//! A [`MetadataProvider`] answers one question: what does the type with a
//! given binary name look like? The [`DescriptorResolver`] turns those
//! per-type answers into linked [`TypeDescriptor`](crate::TypeDescriptor)s.

pub mod builtin;
pub mod catalog;
mod resolve;

pub use catalog::{CatalogError, CatalogProvider};
pub use resolve::DescriptorResolver;

use crate::model::{ClassName, ModelError, TypeShape};

/// Supplies type shapes by binary name.
pub trait MetadataProvider: Send + Sync {
    /// Short label used in logs and errors.
    fn name(&self) -> &str;

    /// Looks up a type.
    ///
    /// Returns `Ok(None)` when the provider does not know the type.
    ///
    /// # Errors
    ///
    /// Returns an error when the type is known but its metadata cannot be
    /// read.
    fn lookup(&self, name: &ClassName) -> Result<Option<TypeShape>, ResolutionError>;
}

/// Boxed provider for dynamic dispatch.
pub type ProviderBox = Box<dyn MetadataProvider>;

/// Queries providers in order; the first one that knows a type wins.
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<ProviderBox>,
}

impl ProviderChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider.
    #[must_use]
    pub fn with<P: MetadataProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Appends a boxed provider.
    pub fn push(&mut self, provider: ProviderBox) {
        self.providers.push(provider);
    }

    /// Number of providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if the chain has no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl MetadataProvider for ProviderChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn lookup(&self, name: &ClassName) -> Result<Option<TypeShape>, ResolutionError> {
        for provider in &self.providers {
            if let Some(shape) = provider.lookup(name)? {
                tracing::trace!(provider = provider.name(), "resolved {name}");
                return Ok(Some(shape));
            }
        }
        Ok(None)
    }
}

/// Errors while resolving a type descriptor.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// No provider knows the requested type.
    #[error("type `{name}` was not found on the classpath or in any catalog")]
    NotFound {
        /// Requested binary name.
        name: String,
    },

    /// A supertype of the requested type could not be found.
    #[error("supertype `{supertype}` of `{name}` was not found")]
    MissingSupertype {
        /// Type whose supertype is missing.
        name: String,
        /// The missing supertype.
        supertype: String,
    },

    /// The inheritance graph loops back on itself.
    #[error("cyclic inheritance involving `{name}`")]
    Cycle {
        /// A type on the cycle.
        name: String,
    },

    /// The identifier is not a type name.
    #[error("invalid type identifier `{identifier}`: {source}")]
    InvalidIdentifier {
        /// The rejected identifier.
        identifier: String,
        /// Why it was rejected.
        source: ModelError,
    },

    /// A provider found the type but could not decode it.
    #[error("{provider}: cannot read metadata for `{name}`: {message}")]
    Provider {
        /// Provider label.
        provider: String,
        /// Requested binary name.
        name: String,
        /// Provider-specific detail.
        message: String,
    },
}
