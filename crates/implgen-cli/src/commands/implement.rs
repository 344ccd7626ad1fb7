//! Source generation command.

use anyhow::Result;
use implgen_core::Implementor;
use std::path::{Path, PathBuf};

/// Writes `<Simple>Impl.java` for `type_name` under `root`.
pub fn run(implementor: &Implementor, type_name: &str, root: &Path) -> Result<PathBuf> {
    tracing::info!("Implementing {type_name} into {}", root.display());
    Ok(implementor.implement(type_name, root)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use implgen_core::{CatalogProvider, ImplError};
    use std::fs;
    use tempfile::TempDir;

    fn implementor() -> Implementor {
        Implementor::builder()
            .provider(CatalogProvider::parse_toml(super::super::tests::GREETER).unwrap())
            .build()
    }

    #[test]
    fn writes_source_under_package_directory() {
        let tmp = TempDir::new().unwrap();
        let path = run(&implementor(), "com.example.Greeter", tmp.path()).unwrap();

        assert_eq!(path, tmp.path().join("com/example/GreeterImpl.java"));
        let source = fs::read_to_string(path).unwrap();
        assert!(source.contains("public java.lang.String greet(java.lang.String who) {"));
    }

    #[test]
    fn library_errors_survive_as_impl_errors() {
        let tmp = TempDir::new().unwrap();
        let err = run(&implementor(), "com.example.Unknown", tmp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ImplError>(),
            Some(ImplError::Resolution(_))
        ));
    }
}
