//! Check structure and completeness of API documentation.
//!
//! A missing directory is skipped; only unreadable files fail the run.

use anyhow::Result;
use apidoc::config;
use apidoc::console::Console;
use apidoc::logging;
use apidoc::structure::StructureValidator;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "validate-api-docs",
    about = "Validate API documentation structure and completeness"
)]
struct Cli {
    /// API documentation directory
    #[arg(default_value = config::DEFAULT_API_DOCS_DIR)]
    docs_dir: PathBuf,
}

fn main() -> Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();

    let mut console = Console::new();
    console.banner(&format!(
        "API Documentation Validator v{}",
        env!("CARGO_PKG_VERSION")
    ));

    StructureValidator::new(&cli.docs_dir).validate_all(&mut console);
    console.summary("Validation Summary");

    Ok(console.report().exit_code())
}
