//! Narrative enhancer: inserts an introduction and usage guide ahead of the
//! generated table of contents.
//!
//! The introduction is a template: `_intro.md` next to the reference when
//! present, the built-in text otherwise. `${modules}`, `${functions}` and
//! `${categories}` are filled from the reference itself.

use crate::error::{Error, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

pub const TOC_HEADING: &str = "## Table of Contents";
pub const INTRO_TEMPLATE_FILE: &str = "_intro.md";

static RE_TOTAL_MODULES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*\*Total Modules\*\*: (\d+)").unwrap());

static RE_TOTAL_FUNCTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*\*Total Functions\*\*: (\d+)").unwrap());

const DEFAULT_INTRODUCTION: &str = r#"## Introduction

This document is the complete API reference for the workflow library. It covers **${modules} library modules** with **${functions} functions** organized into **${categories} categories**.

### Purpose

This reference serves as:
- **Developer Guide**: Understand available functions and their usage
- **Integration Reference**: Learn how to use library modules in custom scripts
- **Maintenance Guide**: Track function signatures and documentation
- **Code Navigation**: Quickly find relevant functions by category

### Usage Patterns

#### Sourcing Modules

```bash
#!/usr/bin/env bash
set -euo pipefail

SCRIPT_DIR="$(cd "$(dirname "${BASH_SOURCE[0]}")" && pwd)"
source "${SCRIPT_DIR}/lib/change_detection.sh"
source "${SCRIPT_DIR}/lib/metrics.sh"

init_metrics
analyze_changes
finalize_metrics
```

### Function Naming Conventions

- **Verb_Noun**: `init_metrics`, `analyze_changes`, `validate_config`
- **Get_Something**: `get_changed_files`, `get_step_name`
- **Has/Is_Something**: `has_code_changes`, `is_workflow_artifact`
- **Check_Something**: `check_prerequisites`, `check_git_status`

### Return Values and Exit Codes

- **0** - Success
- **1** - General error
- **2** - Invalid arguments
- **3** - Missing dependencies
- **4** - Configuration error

### Documentation Standards

Every function comment block should provide:
- **Description**: What the function does
- **Parameters**: Lines starting with `Param`
- **Returns**: Lines starting with `Returns`
- **Exit Codes**: Lines starting with `Exit`
- **Examples**: Lines following an `Example` marker
- **Notes**: Lines starting with `Note`

---
"#;

/// Totals read back from an assembled reference.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub modules: usize,
    pub functions: usize,
    pub categories: usize,
}

/// Result of [`enhance_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted { lines: usize },
    AlreadyEnhanced,
}

/// Header totals plus the number of category headings in the TOC.
pub fn read_totals(content: &str) -> Totals {
    let categories = content
        .lines()
        .skip_while(|l| l.trim() != TOC_HEADING)
        .skip(1)
        .take_while(|l| l.trim() != "---")
        .filter(|l| l.starts_with("### "))
        .count();
    Totals {
        modules: captured_number(&RE_TOTAL_MODULES, content),
        functions: captured_number(&RE_TOTAL_FUNCTIONS, content),
        categories,
    }
}

fn captured_number(re: &Regex, content: &str) -> usize {
    re.captures(content)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Fill the template placeholders.
pub fn render_introduction(template: &str, totals: &Totals) -> String {
    template
        .replace("${modules}", &totals.modules.to_string())
        .replace("${functions}", &totals.functions.to_string())
        .replace("${categories}", &totals.categories.to_string())
}

/// Insert `introduction` before the TOC line. `None` when there is no TOC.
///
/// Returns the content unchanged when the introduction's first line already
/// appears above the TOC.
pub fn enhance(content: &str, introduction: &str) -> Option<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    let toc_index = lines.iter().position(|l| l.trim() == TOC_HEADING)?;

    let marker = introduction.lines().find(|l| !l.trim().is_empty());
    if let Some(marker) = marker {
        if lines[..toc_index].iter().any(|l| l.trim() == marker.trim()) {
            return Some(content.to_string());
        }
    }

    let mut out: Vec<&str> = lines[..toc_index].to_vec();
    out.extend(introduction.split('\n'));
    out.extend(&lines[toc_index..]);
    Some(out.join("\n"))
}

/// `_intro.md` beside the reference, or the built-in introduction.
pub fn resolve_template(reference: &Path) -> Result<String> {
    let candidate = reference.with_file_name(INTRO_TEMPLATE_FILE);
    if candidate.is_file() {
        fs::read_to_string(&candidate).map_err(|source| Error::Read {
            path: candidate,
            source,
        })
    } else {
        Ok(DEFAULT_INTRODUCTION.to_string())
    }
}

/// Enhance the reference at `path` in place.
pub fn enhance_file(path: &Path) -> Result<Outcome> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let template = resolve_template(path)?;
    let introduction = render_introduction(&template, &read_totals(&content));

    let enhanced =
        enhance(&content, &introduction).ok_or_else(|| Error::MissingToc(path.to_path_buf()))?;
    if enhanced == content {
        return Ok(Outcome::AlreadyEnhanced);
    }

    fs::write(path, &enhanced).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Outcome::Inserted {
        lines: enhanced.split('\n').count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const REFERENCE: &str = "# Ref\n\n**Total Modules**: 3  \n**Total Functions**: 7  \n\n## Table of Contents\n\n### Core\n\n- [a.sh](#a)\n\n### Utilities\n\n- [b.sh](#b)\n\n---\n\n## a\n\n### `f`\n";

    #[test]
    fn totals_from_header_and_toc() {
        assert_eq!(
            read_totals(REFERENCE),
            Totals {
                modules: 3,
                functions: 7,
                categories: 2
            }
        );
    }

    #[test]
    fn placeholders_substituted() {
        let totals = Totals {
            modules: 3,
            functions: 7,
            categories: 2,
        };
        let out = render_introduction(DEFAULT_INTRODUCTION, &totals);
        assert!(out.contains("**3 library modules** with **7 functions**"));
        assert!(out.contains("**2 categories**"));
        // shell variables in the usage example are left alone
        assert!(out.contains("${SCRIPT_DIR}"));
    }

    #[test]
    fn inserted_before_toc() {
        let out = enhance(REFERENCE, "## Introduction\n\nHello\n").unwrap();
        let intro = out.find("## Introduction").unwrap();
        let toc = out.find(TOC_HEADING).unwrap();
        assert!(intro < toc);
        assert!(out.starts_with("# Ref\n\n**Total Modules**: 3  \n"));
        assert!(out.ends_with("## a\n\n### `f`\n"));
        assert!(out.contains("Hello\n\n## Table of Contents\n"));
    }

    #[test]
    fn second_run_is_noop() {
        let once = enhance(REFERENCE, "## Introduction\n\nHello\n").unwrap();
        let twice = enhance(&once, "## Introduction\n\nHello\n").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_toc() {
        assert!(enhance("# Nothing\n", "## Introduction\n").is_none());
    }

    #[test]
    fn enhance_file_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("REF.md");
        fs::write(&path, REFERENCE).unwrap();

        let outcome = enhance_file(&path).unwrap();
        assert!(matches!(outcome, Outcome::Inserted { .. }));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("**3 library modules**"));

        assert_eq!(enhance_file(&path).unwrap(), Outcome::AlreadyEnhanced);
    }

    #[test]
    fn custom_template_beside_reference() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("REF.md");
        fs::write(&path, REFERENCE).unwrap();
        fs::write(
            dir.path().join(INTRO_TEMPLATE_FILE),
            "## Overview\n\n${functions} functions.\n",
        )
        .unwrap();

        enhance_file(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("## Overview\n\n7 functions.\n\n## Table of Contents"));
    }

    #[test]
    fn enhance_file_without_toc() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("REF.md");
        fs::write(&path, "# Nothing\n").unwrap();
        assert!(matches!(enhance_file(&path), Err(Error::MissingToc(_))));
    }
}
