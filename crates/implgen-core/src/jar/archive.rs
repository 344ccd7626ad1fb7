//! Jar archive writing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::ArchiveConfig;
use crate::sink::parent_dir;

/// Manifest entry name.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Errors while writing an archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// The compiled class could not be read.
    #[error("cannot read compiled class {}: {source}", path.display())]
    Read {
        /// Class file path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The archive file could not be written.
    #[error("cannot write archive {}: {source}", path.display())]
    Write {
        /// Archive path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The zip encoder failed.
    #[error("cannot write archive {}: {source}", path.display())]
    Zip {
        /// Archive path.
        path: PathBuf,
        /// Underlying zip error.
        source: zip::result::ZipError,
    },
}

/// Renders the manifest text. Manifest lines end in CRLF and the main
/// section ends with an empty line.
#[must_use]
pub fn manifest(config: &ArchiveConfig) -> String {
    format!(
        "Manifest-Version: {}\r\nImplementation-Vendor: {}\r\n\r\n",
        config.manifest_version, config.vendor
    )
}

/// Writes a jar at `jar_path` holding the manifest and one class entry.
///
/// The archive is assembled in a temporary file beside `jar_path` and
/// renamed into place, so a failed run never leaves a partial jar.
///
/// # Errors
///
/// Returns an error if the class cannot be read or the archive cannot be
/// written.
pub fn write_archive(
    class_file: &Path,
    entry_name: &str,
    jar_path: &Path,
    config: &ArchiveConfig,
) -> Result<(), ArchiveError> {
    let bytes = fs::read(class_file).map_err(|source| ArchiveError::Read {
        path: class_file.to_path_buf(),
        source,
    })?;

    let write_err = |source| ArchiveError::Write {
        path: jar_path.to_path_buf(),
        source,
    };
    let zip_err = |source| ArchiveError::Zip {
        path: jar_path.to_path_buf(),
        source,
    };

    let temp = NamedTempFile::new_in(parent_dir(jar_path)).map_err(write_err)?;
    let mut zip = ZipWriter::new(temp);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(MANIFEST_PATH, options).map_err(zip_err)?;
    zip.write_all(manifest(config).as_bytes()).map_err(write_err)?;
    zip.start_file(entry_name, options).map_err(zip_err)?;
    zip.write_all(&bytes).map_err(write_err)?;

    let temp = zip.finish().map_err(zip_err)?;
    temp.persist(jar_path).map_err(|e| write_err(e.error))?;
    tracing::info!("wrote {}", jar_path.display());
    Ok(())
}
