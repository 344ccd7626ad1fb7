//! Configuration types for implgen.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration, read from `implgen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source generation options.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Where type metadata comes from.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Java compiler invocation.
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Archive metadata.
    #[serde(default)]
    pub archive: ArchiveConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// Relative provider paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.provider.rebase(base);
        }
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.generator.validate()?;
        Ok(config)
    }
}

/// Source generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Appended to the simple name of the target (default: "Impl").
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Spaces per indentation level (default: 4).
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Line terminator (default: "lf").
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl GeneratorConfig {
    /// Returns true if the suffix is a non-empty identifier.
    #[must_use]
    pub fn has_valid_suffix(&self) -> bool {
        crate::model::is_identifier(&self.suffix)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.has_valid_suffix() {
            return Err(ConfigError::Invalid {
                field: "generator.suffix",
                message: format!("`{}` is not a valid identifier suffix", self.suffix),
            });
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            indent: default_indent(),
            line_ending: LineEnding::default(),
        }
    }
}

/// Line terminator for generated sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
    /// The host platform's terminator.
    Native,
}

impl LineEnding {
    /// Returns the terminator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
            Self::Native if cfg!(windows) => "\r\n",
            Self::Native => "\n",
        }
    }
}

/// Where type metadata comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Class directories and jar files.
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Descriptor catalogs (TOML or JSON).
    #[serde(default)]
    pub catalogs: Vec<PathBuf>,
}

impl ProviderConfig {
    fn rebase(&mut self, base: &Path) {
        for path in self.classpath.iter_mut().chain(self.catalogs.iter_mut()) {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Java compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Compiler executable (default: "javac").
    #[serde(default = "default_compiler")]
    pub program: PathBuf,

    /// Extra arguments placed before the classpath.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_compiler(),
            args: Vec::new(),
        }
    }
}

/// Archive metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// `Implementation-Vendor` manifest attribute (default: "implgen").
    #[serde(default = "default_vendor")]
    pub vendor: String,

    /// `Manifest-Version` manifest attribute (default: "1.0").
    #[serde(default = "default_manifest_version")]
    pub manifest_version: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            vendor: default_vendor(),
            manifest_version: default_manifest_version(),
        }
    }
}

fn default_suffix() -> String {
    "Impl".to_string()
}

fn default_indent() -> usize {
    4
}

fn default_compiler() -> PathBuf {
    PathBuf::from("javac")
}

fn default_vendor() -> String {
    "implgen".to_string()
}

fn default_manifest_version() -> String {
    "1.0".to_string()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(implgen::config))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(implgen::config))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A value parsed but is not usable.
    #[error("Invalid {field}: {message}")]
    #[diagnostic(code(implgen::config))]
    Invalid {
        /// Dotted field name.
        field: &'static str,
        /// What is wrong.
        message: String,
    },
}
