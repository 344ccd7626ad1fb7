//! Writing generated units to disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::render::GeneratedUnit;

/// A file could not be written.
#[derive(Debug, thiserror::Error)]
#[error("cannot write {}: {source}", path.display())]
pub struct DestinationError {
    /// File or directory that failed.
    pub path: PathBuf,
    /// Underlying IO error.
    #[source]
    pub source: std::io::Error,
}

impl DestinationError {
    pub(crate) fn new(path: &Path, source: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where generated units go.
pub trait Destination {
    /// Writes `unit` and returns the path it was written to.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit cannot be written.
    fn write_unit(&self, unit: &GeneratedUnit) -> Result<PathBuf, DestinationError>;
}

/// Writes units under a source root, one directory per package segment.
#[derive(Debug, Clone)]
pub struct DirectoryDestination {
    root: PathBuf,
}

impl DirectoryDestination {
    /// Creates a destination rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the file `unit` would be written to.
    #[must_use]
    pub fn path_for(&self, unit: &GeneratedUnit) -> PathBuf {
        self.root.join(unit.source_path())
    }
}

impl Destination for DirectoryDestination {
    fn write_unit(&self, unit: &GeneratedUnit) -> Result<PathBuf, DestinationError> {
        let path = self.path_for(unit);
        if let Some(dir) = path.parent() {
            prepare_directory(dir);
        }
        write_atomically(&path, unit.source().as_bytes())?;
        info!("wrote {}", path.display());
        Ok(path)
    }
}

/// Creates `dir` and its parents. A failure is only logged: the write that
/// follows reports the real problem.
pub(crate) fn prepare_directory(dir: &Path) {
    if let Err(e) = fs::create_dir_all(dir) {
        debug!("could not create {}: {e}", dir.display());
    }
}

/// Writes `bytes` to a temporary file next to `path`, then renames it over
/// `path`. Readers see either the old file or the complete new one.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), DestinationError> {
    let dir = parent_dir(path);
    let mut file = NamedTempFile::new_in(dir).map_err(|e| DestinationError::new(dir, e))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| DestinationError::new(path, e))?;
    file.persist(path)
        .map_err(|e| DestinationError::new(path, e.error))?;
    Ok(())
}

/// Parent directory of `path`, `.` for a bare file name.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::AbstractMemberSet;
    use crate::config::GeneratorConfig;
    use crate::model::{ClassName, Modifiers, TypeDescriptor, TypeKind, TypeShape};
    use crate::render::SourceRenderer;
    use crate::validation::validate;
    use tempfile::TempDir;

    fn unit(name: &str) -> GeneratedUnit {
        let shape = TypeShape::new(ClassName::new(name).unwrap(), TypeKind::Interface)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::INTERFACE | Modifiers::ABSTRACT);
        let target = validate(TypeDescriptor::new(shape, None, Vec::new())).unwrap();
        SourceRenderer::new(&GeneratorConfig::default())
            .render(&target, &AbstractMemberSet::new())
            .unwrap()
    }

    #[test]
    fn writes_into_package_directories() {
        let tmp = TempDir::new().unwrap();
        let unit = unit("com.example.Api");

        let path = DirectoryDestination::new(tmp.path()).write_unit(&unit).unwrap();
        assert_eq!(path, tmp.path().join("com/example/ApiImpl.java"));
        assert_eq!(fs::read_to_string(&path).unwrap(), unit.source());
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let destination = DirectoryDestination::new(tmp.path());
        let path = destination.path_for(&unit("Api"));
        fs::write(&path, "stale").unwrap();

        destination.write_unit(&unit("Api")).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("public class ApiImpl"));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("com");
        fs::write(&blocker, "not a directory").unwrap();

        let err = DirectoryDestination::new(tmp.path())
            .write_unit(&unit("com.example.Api"))
            .unwrap_err();
        assert_eq!(err.path, tmp.path().join("com/example"));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn parent_of_bare_file_is_current_dir() {
        assert_eq!(parent_dir(Path::new("out.jar")), Path::new("."));
        assert_eq!(parent_dir(Path::new("lib/out.jar")), Path::new("lib"));
    }
}
