//! Build the complete API reference from a shell library directory.
//!
//! `apidoc-extract [LIB_DIR]` writes `docs/api/COMPLETE_API_REFERENCE.md`
//! under the current directory.

use anyhow::{Context, Result};
use apidoc::config::{self, CategoryMap, ReferenceConfig};
use apidoc::logging;
use apidoc::reference::Assembler;
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "apidoc-extract",
    about = "Extract API documentation from shell library modules"
)]
struct Cli {
    /// Library directory containing the modules
    #[arg(default_value = config::DEFAULT_LIB_DIR)]
    lib_dir: PathBuf,
}

fn main() -> Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();

    let cwd = env::current_dir().context("failed to resolve current directory")?;
    let lib_dir = cwd.join(&cli.lib_dir);
    let output = cwd.join(config::DEFAULT_REFERENCE);

    println!("Extracting API documentation from library modules...");

    let assembler = Assembler::new(
        CategoryMap::default(),
        ReferenceConfig {
            location_prefix: cli.lib_dir.display().to_string(),
            ..ReferenceConfig::default()
        },
    );
    let reference = assembler
        .assemble(&lib_dir)
        .with_context(|| format!("failed to assemble reference from {}", lib_dir.display()))?;
    reference.write_to(&output)?;

    println!();
    println!("✓ API documentation generated: {}", output.display());
    println!("  Total modules: {}", reference.module_count);
    println!("  Total functions: {}", reference.function_count);
    println!("  File size: {:.1} KB", reference.text.len() as f64 / 1024.0);

    Ok(ExitCode::SUCCESS)
}
