//! Data model shared by the extractor and the checkers, independent of output format.

use std::fmt;
use std::path::{Path, PathBuf};

/// A shell library file discovered by the directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModule {
    pub path: PathBuf,
    /// File name, e.g. `ai_cache.sh`
    pub name: String,
    pub category: String,
}

/// A function definition together with the comment run directly above it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionEntry {
    pub name: String,
    /// 1-based line of the definition
    pub line: usize,
    /// Comment bodies in top-to-bottom order, marker stripped
    pub comments: Vec<String>,
}

/// Semantic field a comment line is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Parameters,
    Returns,
    ExitCodes,
    Examples,
    Notes,
}

impl Field {
    /// Field introduced by a marker line, matched case-insensitively on the prefix.
    pub fn from_marker(line: &str) -> Option<Field> {
        let lower = line.to_lowercase();
        if lower.starts_with("param") {
            Some(Field::Parameters)
        } else if lower.starts_with("return") {
            Some(Field::Returns)
        } else if lower.starts_with("exit") {
            Some(Field::ExitCodes)
        } else if lower.starts_with("example") {
            Some(Field::Examples)
        } else if lower.starts_with("note") {
            Some(Field::Notes)
        } else {
            None
        }
    }
}

/// Classified comment lines of one definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pub description: Vec<String>,
    pub parameters: Vec<String>,
    pub returns: Vec<String>,
    pub exit_codes: Vec<String>,
    pub examples: Vec<String>,
    pub notes: Vec<String>,
}

impl Fields {
    pub fn get_mut(&mut self, field: Field) -> &mut Vec<String> {
        match field {
            Field::Description => &mut self.description,
            Field::Parameters => &mut self.parameters,
            Field::Returns => &mut self.returns,
            Field::ExitCodes => &mut self.exit_codes,
            Field::Examples => &mut self.examples,
            Field::Notes => &mut self.notes,
        }
    }
}

/// Render-ready form of a [`DefinitionEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFragment {
    pub name: String,
    pub line: usize,
    /// `None` when the definition had no comments at all
    pub fields: Option<Fields>,
}

impl DocFragment {
    pub fn is_documented(&self) -> bool {
        self.fields.is_some()
    }
}

/// How a link target is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// `http://` or `https://`
    External,
    /// `#fragment` within the same document
    Anchor,
    /// A file path; `path` has any trailing `#fragment` removed
    Internal { path: String },
}

/// An inline markdown link `[text](target)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub target: String,
}

impl Link {
    pub fn kind(&self) -> LinkKind {
        let target = self.target.as_str();
        if target.starts_with("http://") || target.starts_with("https://") {
            LinkKind::External
        } else if target.starts_with('#') {
            LinkKind::Anchor
        } else {
            let path = target.split('#').next().unwrap_or_default();
            LinkKind::Internal {
                path: path.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Success,
}

/// One checker verdict, attributed to a document when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub path: Option<PathBuf>,
    pub message: String,
}

impl Finding {
    pub fn error(path: Option<&Path>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, path, message)
    }

    pub fn warning(path: Option<&Path>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, path, message)
    }

    pub fn success(path: Option<&Path>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, path, message)
    }

    fn new(severity: Severity, path: Option<&Path>, message: impl Into<String>) -> Self {
        Self {
            severity,
            path: path.map(Path::to_path_buf),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.message),
            None => f.write_str(&self.message),
        }
    }
}
