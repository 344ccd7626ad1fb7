//! Compiling generated sources.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::CompilerConfig;

/// One compilation: a source file, an output directory and a classpath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// The `.java` file to compile.
    pub source: PathBuf,
    /// Directory that receives the `.class` files.
    pub output_dir: PathBuf,
    /// Classpath entries, in order.
    pub classpath: Vec<PathBuf>,
}

/// Errors from a compiler run.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The compiler could not be started.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        /// Compiler executable.
        program: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The compiler ran and reported errors.
    #[error("`{program}` exited with {status}\n{diagnostics}")]
    Failed {
        /// Compiler executable.
        program: String,
        /// Exit status description.
        status: String,
        /// Captured compiler output.
        diagnostics: String,
    },

    /// A classpath entry contains the platform path separator.
    #[error("invalid classpath: {0}")]
    Classpath(#[from] std::env::JoinPathsError),
}

/// Compiles a single generated source.
pub trait Compiler {
    /// Runs the compilation.
    ///
    /// # Errors
    ///
    /// Returns an error if the compiler cannot be started or rejects the
    /// source.
    fn compile(&self, request: &CompileRequest) -> Result<(), CompileError>;
}

/// The JDK `javac` tool, run as a child process.
#[derive(Debug, Clone)]
pub struct Javac {
    program: PathBuf,
    args: Vec<String>,
}

impl Javac {
    /// Uses `javac` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&CompilerConfig::default())
    }

    /// Uses the configured program and extra arguments.
    #[must_use]
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    /// Compiler executable.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command-line arguments for `request`, program excluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the classpath cannot be joined.
    pub fn arguments(&self, request: &CompileRequest) -> Result<Vec<OsString>, CompileError> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push("-cp".into());
        args.push(std::env::join_paths(&request.classpath)?);
        args.push("-d".into());
        args.push(request.output_dir.clone().into_os_string());
        args.push(request.source.clone().into_os_string());
        Ok(args)
    }
}

impl Default for Javac {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler for Javac {
    fn compile(&self, request: &CompileRequest) -> Result<(), CompileError> {
        let program = self.program.display().to_string();
        let args = self.arguments(request)?;
        debug!("running {program} {args:?}");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| CompileError::Launch {
                program: program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }
        let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stdout));
        Err(CompileError::Failed {
            program,
            status: output.status.to_string(),
            diagnostics: diagnostics.trim_end().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompileRequest {
        CompileRequest {
            source: PathBuf::from("/work/a/AImpl.java"),
            output_dir: PathBuf::from("/work"),
            classpath: vec![PathBuf::from("/work"), PathBuf::from("/lib/a.jar")],
        }
    }

    #[test]
    fn arguments_follow_configured_flags() {
        let javac = Javac::from_config(&CompilerConfig {
            program: PathBuf::from("/opt/jdk/bin/javac"),
            args: vec!["--release".to_string(), "17".to_string()],
        });
        let args = javac.arguments(&request()).unwrap();
        let expected_cp = std::env::join_paths(["/work", "/lib/a.jar"]).unwrap();
        assert_eq!(
            args,
            [
                OsString::from("--release"),
                OsString::from("17"),
                OsString::from("-cp"),
                expected_cp,
                OsString::from("-d"),
                OsString::from("/work"),
                OsString::from("/work/a/AImpl.java"),
            ]
        );
        assert_eq!(javac.program(), Path::new("/opt/jdk/bin/javac"));
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let javac = Javac::from_config(&CompilerConfig {
            program: PathBuf::from("/nonexistent/implgen-test-javac"),
            args: Vec::new(),
        });
        let err = javac.compile(&request()).unwrap_err();
        assert!(matches!(err, CompileError::Launch { .. }));
    }

    #[test]
    fn classpath_entry_with_separator_is_rejected() {
        let separator = if cfg!(windows) { ";" } else { ":" };
        let mut request = request();
        request.classpath.push(PathBuf::from(format!("/a{separator}b")));
        assert!(matches!(
            Javac::new().arguments(&request),
            Err(CompileError::Classpath(_))
        ));
    }
}
