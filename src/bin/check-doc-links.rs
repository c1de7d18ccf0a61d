//! Validate every markdown link under a documentation directory.
//!
//! Exits 1 when an internal link is broken or the directory is missing.

use anyhow::Result;
use apidoc::config;
use apidoc::console::Console;
use apidoc::links::LinkChecker;
use apidoc::logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "check-doc-links", about = "Validate markdown links in documentation")]
struct Cli {
    /// Documentation directory
    #[arg(default_value = config::DEFAULT_DOCS_DIR)]
    docs_dir: PathBuf,
}

fn main() -> Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();

    let mut console = Console::new();
    console.banner(&format!(
        "Documentation Link Checker v{}",
        env!("CARGO_PKG_VERSION")
    ));

    let stats = LinkChecker::new(&cli.docs_dir).check_all(&mut console);

    println!();
    println!("═══ Link Check Summary ═══");
    println!("Total links checked: {}", stats.total);
    println!("Broken links:        {}", stats.broken);
    println!("Valid links:         {}", stats.valid());
    println!();
    console.tally();

    Ok(console.report().exit_code())
}
