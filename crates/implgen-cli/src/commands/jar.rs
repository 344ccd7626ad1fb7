//! Compile-and-package command.

use anyhow::Result;
use implgen_core::{Config, Implementor, Javac};
use std::path::{Path, PathBuf};

/// Generates, compiles and packages `type_name` into `jar`.
pub fn run(implementor: &Implementor, config: &Config, type_name: &str, jar: &Path) -> Result<PathBuf> {
    let javac = Javac::from_config(&config.compiler);
    tracing::info!(
        "Packaging {type_name} into {} with {}",
        jar.display(),
        javac.program().display()
    );
    Ok(implementor.implement_jar(type_name, jar, &javac, &config.archive)?)
}
