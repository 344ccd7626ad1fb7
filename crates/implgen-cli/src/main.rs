//! implgen CLI tool.
//!
//! Usage:
//! ```bash
//! implgen [OPTIONS] <type> <output-root>
//! implgen [OPTIONS] -jar <type> <output-jar>
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use implgen_core::{ConfigError, ImplError};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod invocation;

use invocation::{Invocation, USAGE};

/// Generates minimal Java implementations of interfaces and abstract classes
#[derive(Parser)]
#[command(name = "implgen")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = USAGE)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Class directory or jar to read type metadata from (repeatable)
    #[arg(long, value_name = "PATH")]
    classpath: Vec<PathBuf>,

    /// Descriptor catalog (.toml or .json) to read type metadata from (repeatable)
    #[arg(long, value_name = "FILE")]
    catalog: Vec<PathBuf>,

    /// `<type> <output-root>` or `-jar <type> <output-jar>`
    #[arg(
        value_name = "ARGS",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(invocation) = Invocation::from_args(&cli.args) else {
        Cli::command()
            .error(ErrorKind::WrongNumberOfValues, "expected `<type> <output-root>` or `-jar <type> <output-jar>`")
            .exit();
    };

    match run(&cli, &invocation) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, invocation: &Invocation) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let source = config_resolver::resolve(&cwd, cli.config.as_deref());
    let mut config = commands::load_config(&source)?;
    config.provider.classpath.extend(cli.classpath.iter().cloned());
    config.provider.catalogs.extend(cli.catalog.iter().cloned());

    let implementor = commands::build_implementor(&config)?;
    match invocation {
        Invocation::Source { type_name, root } => {
            commands::implement::run(&implementor, type_name, root)
        }
        Invocation::Jar { type_name, jar } => {
            commands::jar::run(&implementor, &config, type_name, jar)
        }
    }
}

/// Prints library failures as miette reports and anything else as a plain
/// error chain.
fn report(err: anyhow::Error) {
    let err = match err.downcast::<ImplError>() {
        Ok(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            return;
        }
        Err(other) => other,
    };
    match err.downcast::<ConfigError>() {
        Ok(e) => eprintln!("{:?}", miette::Report::new(e)),
        Err(other) => eprintln!("Error: {other:#}"),
    }
}
