//! Command implementations.

use anyhow::{Context, Result};
use implgen_classfile::ClasspathProvider;
use implgen_core::{CatalogProvider, Config, Implementor};

use crate::config_resolver::ConfigSource;

pub mod implement;
pub mod jar;

/// Loads the resolved configuration, or defaults when none was found.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Builds an implementor over the configured providers: class files first,
/// then catalogs in the order given, then the built-in `java.lang` types.
pub fn build_implementor(config: &Config) -> Result<Implementor> {
    let mut builder = Implementor::builder().generator(config.generator.clone());

    if !config.provider.classpath.is_empty() {
        builder = builder.provider(ClasspathProvider::new(config.provider.classpath.iter()));
    }
    for path in &config.provider.catalogs {
        let catalog = CatalogProvider::from_file(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        tracing::debug!("catalog {} declares {} types", path.display(), catalog.len());
        builder = builder.provider(catalog);
    }

    Ok(builder.build())
}
