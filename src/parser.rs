//! Comment-block parser: finds function definitions and the comment run
//! directly above each one.
//!
//! Only single-line `#` comments are recognised. A definition is
//! `[function] name()`; the comment run must touch the definition line, so a
//! blank line in between leaves the definition undocumented.

use crate::error::{Error, Result};
use crate::model::DefinitionEntry;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

// Definition with an empty parameter list, optional `function` keyword
static RE_FUNC_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:function\s+)?([a-zA-Z_][a-zA-Z0-9_]*)\s*\(\)").unwrap()
});

/// Parse shell source text into its definitions, in file order.
pub fn parse(input: &str) -> Vec<DefinitionEntry> {
    let lines: Vec<&str> = input.lines().collect();
    let mut entries = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = RE_FUNC_DECL.captures(line) else {
            continue;
        };
        entries.push(DefinitionEntry {
            name: caps[1].to_string(),
            line: i + 1,
            comments: preceding_comments(&lines[..i]),
        });
    }

    entries
}

/// Read and parse a file. Unreadable or non-UTF-8 files are an error for the
/// caller to log and skip.
pub fn parse_file(path: &Path) -> Result<Vec<DefinitionEntry>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&content))
}

/// Walk backwards from the end of `above` collecting comment bodies until the
/// first non-comment line.
fn preceding_comments(above: &[&str]) -> Vec<String> {
    let mut comments: Vec<String> = above
        .iter()
        .rev()
        .map(|l| l.trim())
        .take_while(|l| l.starts_with('#'))
        .map(comment_body)
        .collect();
    comments.reverse();
    comments
}

/// Strip the `#` marker and one following space.
fn comment_body(trimmed: &str) -> String {
    let rest = &trimmed[1..];
    rest.strip_prefix(' ').unwrap_or(rest).to_string()
}

/// The module purpose: the first meaningful header comment.
///
/// Skips the interpreter line, empty comments, blank lines and divider
/// comments (`-`/`=`), and gives up at the first line of code.
pub fn module_purpose(input: &str) -> Option<String> {
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("#!") {
            continue;
        }
        let Some(body) = line.strip_prefix('#') else {
            break;
        };
        let body = body.trim();
        if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
            continue;
        }
        return Some(body.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_entries_in_file_order() {
        let input = r#"#!/usr/bin/env bash

# First function
# does things
first() {
  true
}

# Second
function second() {
  true
}
third () { true; }
"#;
        let entries = parse(input);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "first");
        assert_eq!(entries[0].line, 5);
        assert_eq!(entries[0].comments, vec!["First function", "does things"]);
        assert_eq!(entries[1].name, "second");
        assert_eq!(entries[1].line, 10);
        assert_eq!(entries[1].comments, vec!["Second"]);
        assert_eq!(entries[2].name, "third");
        assert_eq!(entries[2].line, 13);
        assert!(entries[2].comments.is_empty());
    }

    #[test]
    fn blank_line_severs_comments() {
        let input = "# Orphaned comment\n\nfunc() {\n  true\n}\n";
        let entries = parse(input);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].comments.is_empty());
    }

    #[test]
    fn comment_run_stops_at_code() {
        let input = "# header\nreadonly X=1\n# Doc line\nfunc() { :; }\n";
        let entries = parse(input);
        assert_eq!(entries[0].comments, vec!["Doc line"]);
    }

    #[test]
    fn keeps_extra_indentation_and_empty_comments() {
        let input = "# Does X\n#\n# Example:\n#   func a b\nfunc() { :; }\n";
        let entries = parse(input);
        assert_eq!(
            entries[0].comments,
            vec!["Does X", "", "Example:", "  func a b"]
        );
    }

    #[test]
    fn indented_definitions_and_comments() {
        let input = "if true; then\n    # nested helper\n    helper() { :; }\nfi\n";
        let entries = parse(input);
        assert_eq!(entries[0].name, "helper");
        assert_eq!(entries[0].comments, vec!["nested helper"]);
    }

    #[test]
    fn ignores_calls_and_parameterised_syntax() {
        let input = "echo hello\nfoo arg\n1bad() { :; }\nx=$(date)\n";
        assert!(parse(input).is_empty());
    }

    #[test]
    fn parse_empty_file() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn parse_file_missing_is_error() {
        let err = parse_file(Path::new("/nonexistent/lib.sh")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn purpose_skips_shebang_and_dividers() {
        let input = "#!/bin/bash\n#\n# ===========\n# --- section\n# AI response caching\n# more\n";
        assert_eq!(module_purpose(input).as_deref(), Some("AI response caching"));
    }

    #[test]
    fn purpose_skips_blank_lines() {
        let input = "#!/bin/bash\n\n# Git helpers\n";
        assert_eq!(module_purpose(input).as_deref(), Some("Git helpers"));
    }

    #[test]
    fn purpose_stops_at_code() {
        let input = "#!/bin/bash\nset -euo pipefail\n# Too late\n";
        assert_eq!(module_purpose(input), None);
    }
}
