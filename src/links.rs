//! Link graph validator: checks every inline link in a documentation tree.
//!
//! External links are only shape-checked and anchors are matched against the
//! headings of the same document; both produce warnings. A broken internal
//! path is the only error.

use crate::markdown;
use crate::model::{Finding, LinkKind};
use crate::report::Sink;
use crate::toc::heading_anchor;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Link totals over a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    pub total: usize,
    pub broken: usize,
}

impl LinkStats {
    pub fn valid(&self) -> usize {
        self.total - self.broken
    }
}

pub struct LinkChecker {
    docs_dir: PathBuf,
    project_root: PathBuf,
    /// (document, raw target) pairs already validated
    checked: HashSet<(PathBuf, String)>,
}

impl LinkChecker {
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        let docs_dir = docs_dir.into();
        let project_root = docs_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| docs_dir.clone());
        Self {
            docs_dir,
            project_root,
            checked: HashSet::new(),
        }
    }

    /// Check every document under the docs directory.
    ///
    /// A missing docs directory is recorded as an error.
    pub fn check_all<S: Sink>(&mut self, sink: &mut S) -> LinkStats {
        let mut stats = LinkStats::default();
        if !self.docs_dir.is_dir() {
            sink.record(Finding::error(
                None,
                format!("Documentation directory not found: {}", self.docs_dir.display()),
            ));
            return stats;
        }
        sink.info(&format!("Checking links in: {}", self.docs_dir.display()));

        let documents = match markdown::documents(&self.docs_dir) {
            Ok(documents) => documents,
            Err(e) => {
                sink.record(Finding::error(None, e.to_string()));
                return stats;
            }
        };
        sink.info(&format!("Found {} markdown files", documents.files.len()));

        sink.section("Link Validation");
        documents.report_unreadable(sink);
        for document in &documents.files {
            let file_stats = self.check_document(document, sink);
            stats.total += file_stats.total;
            stats.broken += file_stats.broken;
        }
        stats
    }

    /// Check one document's links.
    pub fn check_document<S: Sink>(&mut self, document: &Path, sink: &mut S) -> LinkStats {
        let shown = self.display_path(document);
        let content = match fs::read_to_string(document) {
            Ok(content) => content,
            Err(e) => {
                sink.record(Finding::error(Some(shown.as_path()), format!("Failed to read - {}", e)));
                return LinkStats::default();
            }
        };

        let links = markdown::links(&content);
        let mut stats = LinkStats {
            total: links.len(),
            broken: 0,
        };

        for link in &links {
            let key = (document.to_path_buf(), link.target.clone());
            if !self.checked.insert(key) {
                continue;
            }
            let finding = match link.kind() {
                LinkKind::External if !is_valid_url(&link.target) => Some(Finding::warning(
                    Some(shown.as_path()),
                    format!("Invalid URL format: {}", link.target),
                )),
                LinkKind::Anchor if !anchor_exists(&content, &link.target) => Some(
                    Finding::warning(Some(shown.as_path()), format!("Broken anchor link: {}", link.target)),
                ),
                LinkKind::Internal { path } if !self.resolves(document, &path) => Some(
                    Finding::error(Some(shown.as_path()), format!("Broken link to {}", link.target)),
                ),
                _ => None,
            };
            if let Some(finding) = finding {
                stats.broken += 1;
                sink.record(finding);
            }
        }

        if stats.total > 0 && stats.broken == 0 {
            sink.record(Finding::success(
                Some(shown.as_path()),
                format!("{} links OK", stats.total),
            ));
        }
        stats
    }

    /// Try the document's directory, then the docs root, then the project root.
    fn resolves(&self, document: &Path, path: &str) -> bool {
        if path.is_empty() {
            return true;
        }
        let document_dir = document.parent().unwrap_or(Path::new(""));
        [document_dir, self.docs_dir.as_path(), self.project_root.as_path()]
            .iter()
            .map(|base| normalize(&base.join(path)))
            .any(|candidate| {
                let found = candidate.exists();
                tracing::debug!("resolve {} -> {} ({})", path, candidate.display(), found);
                found
            })
    }

    fn display_path(&self, document: &Path) -> PathBuf {
        document
            .strip_prefix(&self.project_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| document.to_path_buf())
    }
}

/// A URL is well formed when it has both a scheme and a host. Nothing is
/// fetched.
pub fn is_valid_url(target: &str) -> bool {
    Url::parse(target)
        .map(|url| !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}

/// Whether `#anchor` names a heading of `content`.
pub fn anchor_exists(content: &str, anchor: &str) -> bool {
    let wanted = anchor.trim_start_matches('#');
    markdown::headings(content)
        .into_iter()
        .any(|heading| heading_anchor(heading) == wanted)
}

/// Collapse `.` and `..` lexically so a link through a missing directory
/// still resolves the way the path reads.
///
/// `..` only cancels a named component. Leading `..` of a relative path are
/// kept; above the root they are dropped.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                let named = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if named {
                    out.pop();
                } else if !at_root {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Report;
    use tempfile::TempDir;

    /// project/
    ///   README.md
    ///   scripts/run.sh
    ///   docs/
    ///     index.md
    ///     guide/setup.md
    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("docs").join("guide")).unwrap();
        fs::create_dir_all(root.join("scripts")).unwrap();
        fs::write(root.join("README.md"), "# Project\n").unwrap();
        fs::write(root.join("scripts").join("run.sh"), "echo\n").unwrap();
        fs::write(root.join("docs").join("index.md"), "# Index\n\n## Getting Started\n").unwrap();
        fs::write(root.join("docs").join("guide").join("setup.md"), "# Setup\n").unwrap();
        dir
    }

    fn check(dir: &TempDir, name: &str, content: &str) -> (LinkStats, Report) {
        let docs = dir.path().join("docs");
        let document = docs.join(name);
        fs::write(&document, content).unwrap();
        let mut report = Report::default();
        let stats = LinkChecker::new(&docs).check_document(&document, &mut report);
        (stats, report)
    }

    #[test]
    fn valid_urls() {
        assert!(is_valid_url("https://x.com"));
        assert!(is_valid_url("http://example.org/a?b#c"));
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn anchors_match_normalized_headings() {
        let content = "# API Reference\n## Getting Started!\n### `init_metrics`\n";
        assert!(anchor_exists(content, "#getting-started"));
        assert!(anchor_exists(content, "#api-reference"));
        assert!(anchor_exists(content, "#init_metrics"));
        assert!(!anchor_exists(content, "#getting started"));
        assert!(!anchor_exists(content, "#missing"));
    }

    #[test]
    fn internal_relative_to_document() {
        let dir = project();
        let (stats, report) = check(&dir, "a.md", "[setup](guide/setup.md#install)\n");
        assert_eq!(stats, LinkStats { total: 1, broken: 0 });
        assert_eq!(report.successes(), 1);
    }

    #[test]
    fn internal_relative_to_docs_root() {
        let dir = project();
        fs::write(dir.path().join("docs").join("guide").join("b.md"), "[i](index.md)\n").unwrap();
        let docs = dir.path().join("docs");
        let mut report = Report::default();
        let stats =
            LinkChecker::new(&docs).check_document(&docs.join("guide").join("b.md"), &mut report);
        assert_eq!(stats.broken, 0);
        assert!(report.passed());
    }

    #[test]
    fn internal_relative_to_project_root() {
        let dir = project();
        let (stats, report) = check(&dir, "a.md", "[run](scripts/run.sh) [readme](README.md)\n");
        assert_eq!(stats.broken, 0);
        assert!(report.passed());
    }

    #[test]
    fn parent_traversal() {
        let dir = project();
        let (stats, _) = check(&dir, "a.md", "[up](../README.md) [gone](missing/../index.md)\n");
        assert_eq!(stats.broken, 0);
    }

    #[test]
    fn broken_internal_is_error() {
        let dir = project();
        let (stats, report) = check(&dir, "a.md", "[x](nope.md)\n");
        assert_eq!(stats.broken, 1);
        assert_eq!(report.errors(), 1);
        assert_eq!(report.successes(), 0);
        assert!(report.findings()[0].message.contains("Broken link to nope.md"));
        assert_eq!(
            report.findings()[0].path.as_deref(),
            Some(Path::new("docs/a.md"))
        );
    }

    #[test]
    fn bad_external_and_anchor_are_warnings() {
        let dir = project();
        let (stats, report) = check(&dir, "a.md", "# A\n[x](http://) [y](#nowhere) [z](#a)\n");
        assert_eq!(stats, LinkStats { total: 3, broken: 2 });
        assert_eq!(report.warnings(), 2);
        assert!(report.passed());
    }

    #[test]
    fn duplicate_targets_checked_once_per_document() {
        let dir = project();
        let (stats, report) = check(&dir, "a.md", "[x](nope.md) [y](nope.md)\n");
        assert_eq!(stats, LinkStats { total: 2, broken: 1 });
        assert_eq!(report.errors(), 1);
    }

    #[test]
    fn same_target_rechecked_in_other_document() {
        let dir = project();
        let docs = dir.path().join("docs");
        fs::write(docs.join("a.md"), "[x](nope.md)\n").unwrap();
        fs::write(docs.join("b.md"), "[x](nope.md)\n").unwrap();
        let mut report = Report::default();
        let stats = LinkChecker::new(&docs).check_all(&mut report);
        assert_eq!(stats.broken, 2);
        assert_eq!(report.errors(), 2);
    }

    #[test]
    fn missing_docs_dir_is_error() {
        let dir = TempDir::new().unwrap();
        let mut report = Report::default();
        LinkChecker::new(dir.path().join("docs")).check_all(&mut report);
        assert!(!report.passed());
    }

    #[test]
    fn documents_without_links_are_silent() {
        let dir = project();
        let (stats, report) = check(&dir, "a.md", "# Nothing here\n");
        assert_eq!(stats.total, 0);
        assert!(report.findings().is_empty());
    }

    #[test]
    fn normalize_parent_dirs() {
        assert_eq!(normalize(Path::new("a/b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("./a/./b")), PathBuf::from("a/b"));
        assert_eq!(normalize(Path::new("../a")), PathBuf::from("../a"));
    }

    #[test]
    fn normalize_keeps_leading_parent_dirs() {
        assert_eq!(normalize(Path::new("../../a")), PathBuf::from("../../a"));
        assert_eq!(
            normalize(Path::new("docs/guide/../../../../README.md")),
            PathBuf::from("../../README.md")
        );
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn link_climbing_past_project_root_is_broken() {
        let dir = project();
        let (stats, report) = check(&dir, "a.md", "[x](../../../../../../../../README.md)\n");
        assert_eq!(stats.broken, 1);
        assert_eq!(report.errors(), 1);
        assert!(report.findings()[0].message.contains("Broken link to"));
    }

    #[test]
    fn unreadable_document_is_error() {
        let dir = project();
        let docs = dir.path().join("docs");
        let document = docs.join("binary.md");
        fs::write(&document, [0xff, 0xfe, b'[', b'x', b']', b'(', b'y', b')']).unwrap();
        let mut report = Report::default();
        let stats = LinkChecker::new(&docs).check_document(&document, &mut report);
        assert_eq!(stats, LinkStats::default());
        assert_eq!(report.errors(), 1);
        assert!(report.findings()[0].message.starts_with("Failed to read"));
        assert!(!report.passed());
    }
}
