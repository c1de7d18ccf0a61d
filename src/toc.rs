//! Anchor derivation and table-of-contents rendering.
//!
//! The module anchor is emitted verbatim as the module's section heading, so
//! [`heading_anchor`] of that heading yields the TOC target unchanged.

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

static RE_NON_ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w-]").unwrap());

/// Anchor for a module file name: lowercase, suffix stripped, `_` → `-`.
///
/// `my_module.sh` → `my-module`. Characters a heading anchor would drop are
/// dropped here too.
pub fn module_anchor(name: &str, suffix: &str) -> String {
    let stem = name.strip_suffix(suffix).unwrap_or(name);
    heading_anchor(&stem.replace('_', "-"))
}

/// Anchor a heading's text resolves to: lowercase, spaces to hyphens, then
/// every character that is not a word character or hyphen removed.
pub fn heading_anchor(text: &str) -> String {
    let lower = text.to_lowercase().replace(' ', "-");
    RE_NON_ANCHOR.replace_all(&lower, "").into_owned()
}

/// Render a TOC list item.
pub fn render_toc_item(name: &str, anchor: &str) -> String {
    format!("- [{}](#{})", name, anchor)
}

/// Anchors already handed out in one document.
///
/// Distinct module names can share an anchor (`a_b.sh` and `a-b.sh`); later
/// claims get `-1`, `-2`, ... appended until unused.
#[derive(Debug, Default)]
pub struct AnchorSet {
    used: HashSet<String>,
}

impl AnchorSet {
    pub fn claim(&mut self, anchor: &str) -> String {
        let mut candidate = anchor.to_string();
        let mut n = 0;
        while self.used.contains(&candidate) {
            n += 1;
            candidate = format!("{}-{}", anchor, n);
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Render the table of contents from `(name, anchor)` pairs. `BTreeMap`
/// ordering keeps categories lexicographic; module names must already be
/// sorted.
pub fn render_toc(categories: &BTreeMap<String, Vec<(String, String)>>) -> String {
    let mut out = String::from("## Table of Contents\n\n");
    for (category, modules) in categories {
        out.push_str(&format!("### {}\n\n", category));
        for (name, anchor) in modules {
            out.push_str(&render_toc_item(name, anchor));
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str("---\n\n");
    out
}
