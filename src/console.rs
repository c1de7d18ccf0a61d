//! Colored console rendering of findings.

use crate::model::{Finding, Severity};
use crate::report::{Report, Sink};
use colored::Colorize;

/// Prints each finding as it is recorded and keeps it in a [`Report`].
#[derive(Debug, Default)]
pub struct Console {
    report: Report,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed tool banner.
    pub fn banner(&self, title: &str) {
        let width = 56;
        println!("╔{}╗", "═".repeat(width));
        println!("║      {:<w$}║", title, w = width - 6);
        println!("╚{}╝", "═".repeat(width));
        println!();
    }

    /// Print the success / warning / error tally.
    pub fn summary(&self, title: &str) {
        println!();
        println!("═══ {} ═══", title);
        self.tally();
    }

    pub fn tally(&self) {
        println!("Successes: {}", self.report.successes());
        println!("Warnings:  {}", self.report.warnings());
        println!("Errors:    {}", self.report.errors());
    }

    pub fn report(&self) -> &Report {
        &self.report
    }
}

impl Sink for Console {
    fn record(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => eprintln!("{}: {}", "✗ ERROR".red(), finding),
            Severity::Warning => eprintln!("{}: {}", "⚠ WARNING".yellow(), finding),
            Severity::Success => println!("{} {}", "✓".green(), finding),
        }
        self.report.record(finding);
    }

    fn info(&mut self, message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    fn section(&mut self, title: &str) {
        println!();
        println!("═══ {} ═══", title);
    }
}
