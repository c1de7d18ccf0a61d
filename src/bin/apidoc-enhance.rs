//! Insert the introduction and usage guide into a generated reference.

use anyhow::Result;
use apidoc::config;
use apidoc::enhance::{self, Outcome};
use apidoc::logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "apidoc-enhance",
    about = "Insert the introduction ahead of the API reference table of contents"
)]
struct Cli {
    /// Generated reference document
    #[arg(default_value = config::DEFAULT_REFERENCE)]
    reference: PathBuf,
}

fn main() -> Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();

    match enhance::enhance_file(&cli.reference)? {
        Outcome::Inserted { lines } => {
            println!("✓ Enhanced API reference with introduction and usage guide");
            println!("  Total lines: {}", lines);
        }
        Outcome::AlreadyEnhanced => {
            println!("✓ API reference already has an introduction, nothing to do");
        }
    }

    Ok(ExitCode::SUCCESS)
}
