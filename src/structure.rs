//! Structural completeness checker for an API documentation directory.
//!
//! Four passes over the same documents: directory structure, per-document
//! headings, code examples, cross references. Content problems are only ever
//! warnings; an unreadable file is the one way to record an error.

use crate::markdown;
use crate::model::{Finding, LinkKind};
use crate::report::Sink;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Documents with fewer `##` sections than this are flagged.
const MIN_SECTIONS: usize = 2;

pub struct StructureValidator {
    docs_dir: PathBuf,
    display_root: PathBuf,
}

impl StructureValidator {
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        let docs_dir = docs_dir.into();
        let display_root = docs_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| docs_dir.clone());
        Self {
            docs_dir,
            display_root,
        }
    }

    /// Run every pass. A missing directory is skipped without findings.
    pub fn validate_all<S: Sink>(&self, sink: &mut S) {
        if !self.docs_dir.is_dir() {
            sink.info(&format!(
                "API docs directory not found: {}",
                self.docs_dir.display()
            ));
            sink.info("Skipping API documentation validation (optional)");
            return;
        }
        sink.info(&format!(
            "Validating API documentation in: {}",
            self.docs_dir.display()
        ));

        let documents = match markdown::documents(&self.docs_dir) {
            Ok(documents) => documents,
            Err(e) => {
                sink.record(Finding::error(None, e.to_string()));
                return;
            }
        };

        documents.report_unreadable(sink);
        let files = &documents.files;
        self.validate_structure(files, sink);
        self.validate_markdown(files, sink);
        self.validate_code_examples(files, sink);
        self.validate_cross_references(files, sink);
    }

    pub fn validate_structure<S: Sink>(&self, documents: &[PathBuf], sink: &mut S) {
        sink.section("Structure Validation");

        let readme = self.docs_dir.join("README.md");
        if readme.is_file() {
            sink.record(Finding::success(None, "API README found: README.md"));
        } else {
            sink.record(Finding::warning(
                None,
                format!("API README not found: {}", readme.display()),
            ));
        }

        sink.info(&format!("Found {} API documentation files", documents.len()));
        if documents.is_empty() {
            sink.record(Finding::warning(None, "No API documentation files found"));
        } else {
            sink.record(Finding::success(
                None,
                format!("API documentation files present: {}", documents.len()),
            ));
        }
    }

    pub fn validate_markdown<S: Sink>(&self, documents: &[PathBuf], sink: &mut S) {
        sink.section("Markdown Structure Validation");

        for document in documents {
            let shown = self.display_path(document);
            let Some(content) = read(document, &shown, "Failed to read", sink) else {
                continue;
            };

            if markdown::has_title(&content) {
                sink.record(Finding::success(Some(shown.as_path()), "Has title"));
            } else {
                sink.record(Finding::warning(Some(shown.as_path()), "Missing top-level heading"));
            }

            let sections = markdown::section_count(&content);
            if sections < MIN_SECTIONS {
                sink.record(Finding::warning(
                    Some(shown.as_path()),
                    format!("Few sections ({})", sections),
                ));
            }

            let fences = markdown::fence_count(&content);
            if fences > 0 {
                sink.info(&format!("{}: Has {} code blocks", shown.display(), fences));
            }
        }
    }

    pub fn validate_code_examples<S: Sink>(&self, documents: &[PathBuf], sink: &mut S) {
        sink.section("Code Example Validation");

        let mut total = 0;
        let mut flagged = 0;
        for document in documents {
            let shown = self.display_path(document);
            let Some(content) = read(document, &shown, "Failed to validate examples", sink)
            else {
                continue;
            };

            for block in markdown::code_blocks(&content) {
                total += 1;
                if block.language.is_none() {
                    sink.record(Finding::warning(Some(shown.as_path()), "Code block without language"));
                    flagged += 1;
                }
                if block.body.trim().is_empty() {
                    sink.record(Finding::warning(Some(shown.as_path()), "Empty code block"));
                    flagged += 1;
                }
            }
        }

        if total > 0 {
            sink.record(Finding::success(
                None,
                format!("Validated {} code examples", total),
            ));
            if flagged > 0 {
                sink.record(Finding::warning(
                    None,
                    format!("{} code examples need improvement", flagged),
                ));
            }
        } else {
            sink.info("No code examples found");
        }
    }

    /// Name-only matching: a `.md` reference is satisfied by any document
    /// with the same stem anywhere in the tree.
    pub fn validate_cross_references<S: Sink>(&self, documents: &[PathBuf], sink: &mut S) {
        sink.section("Cross-Reference Validation");

        let stems: HashSet<String> = documents.iter().filter_map(|d| file_stem(d)).collect();
        let mut broken = 0;

        for document in documents {
            let shown = self.display_path(document);
            let Some(content) = read(document, &shown, "Failed to validate references", sink)
            else {
                continue;
            };

            for link in markdown::links(&content) {
                if !link.target.ends_with(".md") || link.kind() == LinkKind::External {
                    continue;
                }
                let satisfied = file_stem(Path::new(&link.target))
                    .is_some_and(|stem| stems.contains(&stem));
                if !satisfied {
                    sink.record(Finding::warning(
                        Some(shown.as_path()),
                        format!("Broken reference to {}", link.target),
                    ));
                    broken += 1;
                }
            }
        }

        if broken == 0 {
            sink.record(Finding::success(None, "All cross-references valid"));
        } else {
            sink.record(Finding::warning(
                None,
                format!("Found {} broken cross-references", broken),
            ));
        }
    }

    fn display_path(&self, document: &Path) -> PathBuf {
        document
            .strip_prefix(&self.display_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| document.to_path_buf())
    }
}

fn read<S: Sink>(document: &Path, shown: &Path, what: &str, sink: &mut S) -> Option<String> {
    match fs::read_to_string(document) {
        Ok(content) => Some(content),
        Err(e) => {
            sink.record(Finding::error(Some(shown), format!("{} - {}", what, e)));
            None
        }
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}
