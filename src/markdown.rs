//! Lexical markdown scanning shared by the link and structure checkers.
//!
//! Pure pattern matching over the raw text; links and headings inside code
//! blocks are reported like any others.

use crate::error::{Error, Result};
use crate::model::{Finding, Link};
use crate::report::Sink;
use glob::glob;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+\s+(.+)$").unwrap());

static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+\w+").unwrap());

static RE_SECTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##\s+(.+)$").unwrap());

static RE_FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```(\w+)?\n").unwrap());

static RE_CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap());

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub body: String,
}

/// Every inline `[text](target)` link, in document order, duplicates kept.
pub fn links(content: &str) -> Vec<Link> {
    RE_LINK
        .captures_iter(content)
        .map(|caps| Link {
            text: caps[1].to_string(),
            target: caps[2].to_string(),
        })
        .collect()
}

/// Text of every heading at any level.
pub fn headings(content: &str) -> Vec<&str> {
    RE_HEADING
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Whether the document has a top-level `# Title` heading.
pub fn has_title(content: &str) -> bool {
    RE_TITLE.is_match(content)
}

/// Number of `##` headings.
pub fn section_count(content: &str) -> usize {
    RE_SECTION.find_iter(content).count()
}

/// Number of opening code fences.
pub fn fence_count(content: &str) -> usize {
    RE_FENCE_OPEN.find_iter(content).count()
}

pub fn code_blocks(content: &str) -> Vec<CodeBlock> {
    RE_CODE_BLOCK
        .captures_iter(content)
        .map(|caps| CodeBlock {
            language: caps.get(1).map(|m| m.as_str().to_string()),
            body: caps[2].to_string(),
        })
        .collect()
}

/// Markdown files found under a docs root.
#[derive(Debug, Default)]
pub struct Documents {
    /// Sorted paths of every readable `*.md` file
    pub files: Vec<PathBuf>,
    /// Directory entries the walk could not read
    pub unreadable: Vec<Error>,
}

impl Documents {
    /// Record each unreadable entry as an error finding.
    pub fn report_unreadable<S: Sink>(&self, sink: &mut S) {
        for error in &self.unreadable {
            sink.record(Finding::error(None, error.to_string()));
        }
    }
}

/// All `*.md` files under `root`, recursively, sorted.
pub fn documents(root: &Path) -> Result<Documents> {
    let pattern = format!("{}/**/*.md", glob::Pattern::escape(&root.to_string_lossy()));
    let mut found = Documents::default();
    for entry in glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => found.files.push(path),
            Ok(_) => {}
            Err(e) => found.unreadable.push(Error::Read {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            }),
        }
    }
    found.files.sort();
    Ok(found)
}
