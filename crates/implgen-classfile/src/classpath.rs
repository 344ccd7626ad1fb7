//! Classpath-backed metadata provider.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use implgen_core::{ClassName, MetadataProvider, ResolutionError, TypeShape};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::parse::parse_class;
use crate::reader::ClassParseError;

#[derive(Debug, thiserror::Error)]
enum ReadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("ZIP error reading {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    #[error("class parse error in {path}: {source}")]
    ClassFile {
        path: PathBuf,
        #[source]
        source: ClassParseError,
    },
}

/// One root on the classpath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathEntry {
    /// A directory of `.class` files laid out by package.
    Directory(PathBuf),
    /// A `.jar` or `.zip` archive.
    Archive(PathBuf),
}

impl ClasspathEntry {
    /// Classifies a path by its extension: `jar` and `zip` are archives,
    /// anything else a directory.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if is_archive(&path) {
            Self::Archive(path)
        } else {
            Self::Directory(path)
        }
    }

    /// The root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }

    fn read_class(&self, entry_name: &str) -> Result<Option<Vec<u8>>, ReadError> {
        match self {
            Self::Directory(root) => {
                let path = root.join(entry_name);
                match fs::read(&path) {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                    Err(source) => Err(ReadError::Io { path, source }),
                }
            }
            Self::Archive(path) => {
                let file = match File::open(path) {
                    Ok(file) => file,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        tracing::debug!("classpath archive {} does not exist", path.display());
                        return Ok(None);
                    }
                    Err(source) => {
                        return Err(ReadError::Io {
                            path: path.clone(),
                            source,
                        })
                    }
                };
                let mut archive =
                    ZipArchive::new(BufReader::new(file)).map_err(|source| ReadError::Zip {
                        path: path.clone(),
                        source,
                    })?;
                let mut entry = match archive.by_name(entry_name) {
                    Ok(entry) => entry,
                    Err(ZipError::FileNotFound) => return Ok(None),
                    Err(source) => {
                        return Err(ReadError::Zip {
                            path: path.clone(),
                            source,
                        })
                    }
                };
                let mut buffer = Vec::new();
                entry
                    .read_to_end(&mut buffer)
                    .map_err(|source| ReadError::Io {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Some(buffer))
            }
        }
    }
}

/// Looks types up in compiled `.class` files on a classpath.
///
/// Entries are searched in order and the first hit wins. A name such as
/// `a.Outer.Inner` is also tried as `a.Outer$Inner`, so nested types can be
/// requested by their canonical names. The origin of every returned shape is
/// the classpath root it was found in.
#[derive(Debug, Clone, Default)]
pub struct ClasspathProvider {
    entries: Vec<ClasspathEntry>,
}

impl ClasspathProvider {
    /// Creates a provider over the given roots.
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            entries: roots.into_iter().map(ClasspathEntry::from_path).collect(),
        }
    }

    /// Creates a provider from a platform path list such as
    /// `lib/a.jar:build/classes`. Empty segments are skipped.
    #[must_use]
    pub fn from_path_list(list: &OsStr) -> Self {
        Self::new(std::env::split_paths(list).filter(|p| !p.as_os_str().is_empty()))
    }

    /// The classpath roots in search order.
    #[must_use]
    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    fn find(&self, name: &ClassName) -> Result<Option<TypeShape>, ReadError> {
        for entry_name in entry_candidates(name) {
            for entry in &self.entries {
                if let Some(bytes) = entry.read_class(&entry_name)? {
                    tracing::trace!("found {entry_name} in {}", entry.path().display());
                    let shape = parse_class(&bytes, Some(entry.path())).map_err(|source| {
                        ReadError::ClassFile {
                            path: entry.path().join(&entry_name),
                            source,
                        }
                    })?;
                    return Ok(Some(shape));
                }
            }
        }
        Ok(None)
    }
}

impl MetadataProvider for ClasspathProvider {
    fn name(&self) -> &str {
        "classpath"
    }

    fn lookup(&self, name: &ClassName) -> Result<Option<TypeShape>, ResolutionError> {
        self.find(name).map_err(|e| ResolutionError::Provider {
            provider: self.name().to_string(),
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}

/// Archive entry names to try for a binary name, most literal first:
/// `a/b/C.class`, then each trailing `.` turned into `$`.
fn entry_candidates(name: &ClassName) -> Vec<String> {
    let mut candidates = vec![format!("{}.class", name.internal())];
    let mut binary = name.as_str().to_string();
    while let Some(dot) = binary.rfind('.') {
        binary.replace_range(dot..=dot, "$");
        candidates.push(format!("{}.class", binary.replace('.', "/")));
    }
    candidates
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ["jar", "zip"].iter().any(|v| ext.eq_ignore_ascii_case(v)))
}
