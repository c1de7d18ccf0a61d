//! Reference assembler: scans a library directory and builds the complete
//! API reference.
//!
//! The whole document is buffered; the total function count is only known
//! after the last module, so the header carries [`TOTAL_PLACEHOLDER`] until
//! the buffer is finished and is substituted before anything is written.

use crate::config::{CategoryMap, ReferenceConfig};
use crate::error::{Error, Result};
use crate::model::SourceModule;
use crate::{parser, render, toc};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

pub const TOTAL_PLACEHOLDER: &str = "[calculating...]";

/// The assembled reference and its totals.
#[derive(Debug, Clone)]
pub struct ReferenceDocument {
    pub text: String,
    pub module_count: usize,
    pub function_count: usize,
    pub category_count: usize,
}

impl ReferenceDocument {
    /// Write to `output`, creating missing parent directories.
    pub fn write_to(&self, output: &Path) -> Result<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(output, &self.text).map_err(|source| Error::Write {
            path: output.to_path_buf(),
            source,
        })
    }
}

pub struct Assembler {
    categories: CategoryMap,
    config: ReferenceConfig,
}

impl Assembler {
    pub fn new(categories: CategoryMap, config: ReferenceConfig) -> Self {
        Self { categories, config }
    }

    /// Module files directly under `dir`, test files excluded, sorted by path.
    pub fn discover(&self, dir: &Path) -> Result<Vec<SourceModule>> {
        if !dir.is_dir() {
            return Err(Error::MissingDirectory(dir.to_path_buf()));
        }
        let pattern = format!(
            "{}/*{}",
            glob::Pattern::escape(&dir.to_string_lossy()),
            self.config.suffix
        );
        let mut modules: Vec<SourceModule> = glob::glob(&pattern)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::error!("Error reading {}: {}", e.path().display(), e.error());
                    None
                }
            })
            .filter(|p| p.is_file())
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?.to_string();
                if name.starts_with(&self.config.test_prefix) {
                    return None;
                }
                let category = self.categories.category(&name).to_string();
                Some(SourceModule {
                    path,
                    name,
                    category,
                })
            })
            .collect();
        modules.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(modules)
    }

    /// Build the reference for every module under `dir`.
    pub fn assemble(&self, dir: &Path) -> Result<ReferenceDocument> {
        let modules = self.discover(dir)?;
        let total_modules = modules.len();
        tracing::info!("Found {} modules", total_modules);

        let mut by_category: BTreeMap<String, Vec<&SourceModule>> = BTreeMap::new();
        for module in &modules {
            by_category
                .entry(module.category.clone())
                .or_default()
                .push(module);
        }
        let mut anchors = toc::AnchorSet::default();
        let toc_entries: BTreeMap<String, Vec<(String, String)>> = by_category
            .iter()
            .map(|(category, mods)| {
                let entries: Vec<(String, String)> = mods
                    .iter()
                    .map(|m| {
                        let anchor = toc::module_anchor(&m.name, &self.config.suffix);
                        (m.name.clone(), anchors.claim(&anchor))
                    })
                    .collect();
                (category.clone(), entries)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.config.title));
        out.push_str(&format!("> **Version**: {}  \n", self.config.version));
        out.push_str(&format!("> **Last Updated**: {}  \n", last_updated(&modules)));
        out.push_str("> **Generated**: Auto-generated from source code  \n\n");
        out.push_str(&format!("**Total Modules**: {}  \n", total_modules));
        out.push_str(&format!("**Total Functions**: {}  \n\n", TOTAL_PLACEHOLDER));
        out.push_str(&toc::render_toc(&toc_entries));

        let mut total_functions = 0;
        let mut index = 0;
        let sections = by_category.values().flatten().zip(toc_entries.values().flatten());
        for (module, (_, anchor)) in sections {
            index += 1;
            tracing::info!("Processing [{}/{}] {}...", index, total_modules, module.name);
            total_functions += self.render_module(&mut out, module, anchor);
        }

        let text = out.replacen(TOTAL_PLACEHOLDER, &total_functions.to_string(), 1);
        Ok(ReferenceDocument {
            text,
            module_count: total_modules,
            function_count: total_functions,
            category_count: by_category.len(),
        })
    }

    /// Append one module section under `anchor`, returning how many
    /// functions it listed.
    fn render_module(&self, out: &mut String, module: &SourceModule, anchor: &str) -> usize {
        out.push_str(&format!("## {}\n\n", anchor));
        out.push_str(&format!(
            "**Location**: `{}/{}`  \n",
            self.config.location_prefix.trim_end_matches('/'),
            module.name
        ));
        out.push_str(&format!("**Category**: {}\n\n", module.category));

        let content = match fs::read_to_string(&module.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Error reading {}: {}", module.path.display(), e);
                String::new()
            }
        };

        if let Some(purpose) = parser::module_purpose(&content) {
            out.push_str(&format!("**Purpose**: {}\n\n", purpose));
        }

        let entries = parser::parse(&content);
        out.push_str(&format!("**Functions**: {}\n\n", entries.len()));
        if entries.is_empty() {
            out.push_str("*No public functions documented*\n\n");
        }
        for entry in &entries {
            out.push_str(&render::render_fragment(&render::classify(entry)));
        }
        out.push('\n');

        entries.len()
    }
}

/// Newest modification date among the modules, so an unchanged tree always
/// renders the same header.
fn last_updated(modules: &[SourceModule]) -> String {
    modules
        .iter()
        .filter_map(|m| fs::metadata(&m.path).and_then(|md| md.modified()).ok())
        .max()
        .map(format_date)
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format("%Y-%m-%d").to_string()
}
