//! Finding sink. Checkers push findings into a [`Sink`]; [`Report`] keeps
//! them for the verdict, the console layer prints them as they arrive.

use crate::model::{Finding, Severity};
use std::process::ExitCode;

pub trait Sink {
    fn record(&mut self, finding: Finding);

    /// Progress information that is not a finding.
    fn info(&mut self, _message: &str) {}

    /// Start of a named check pass.
    fn section(&mut self, _title: &str) {}
}

/// Accumulated findings of a run.
#[derive(Debug, Default)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn successes(&self) -> usize {
        self.count(Severity::Success)
    }

    /// Any error fails the run; warnings alone do not.
    pub fn passed(&self) -> bool {
        self.errors() == 0
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

impl Sink for Report {
    fn record(&mut self, finding: Finding) {
        self.findings.push(finding);
    }
}
