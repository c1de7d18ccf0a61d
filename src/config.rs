//! Defaults and the module → category table.

use std::collections::HashMap;

pub const DEFAULT_LIB_DIR: &str = "src/workflow/lib";
pub const DEFAULT_REFERENCE: &str = "docs/api/COMPLETE_API_REFERENCE.md";
pub const DEFAULT_DOCS_DIR: &str = "docs";
pub const DEFAULT_API_DOCS_DIR: &str = "docs/api";

/// Category for modules missing from the table.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Built-in category of every known library module.
const MODULE_CATEGORIES: &[(&str, &str)] = &[
    ("ai_cache.sh", "AI & Caching"),
    ("ai_helpers.sh", "AI & Caching"),
    ("ai_personas.sh", "AI & Caching"),
    ("ai_prompt_builder.sh", "AI & Caching"),
    ("ai_validation.sh", "AI & Caching"),
    ("analysis_cache.sh", "AI & Caching"),
    ("change_detection.sh", "Core Infrastructure"),
    ("metrics.sh", "Core Infrastructure"),
    ("workflow_optimization.sh", "Core Infrastructure"),
    ("tech_stack.sh", "Core Infrastructure"),
    ("config.sh", "Configuration"),
    ("config_wizard.sh", "Configuration"),
    ("project_kind_config.sh", "Configuration"),
    ("project_kind_detection.sh", "Configuration"),
    ("git_automation.sh", "Git Operations"),
    ("git_cache.sh", "Git Operations"),
    ("git_submodule_helpers.sh", "Git Operations"),
    ("auto_commit.sh", "Git Operations"),
    ("batch_ai_commit.sh", "Git Operations"),
    ("file_operations.sh", "File Operations"),
    ("edit_operations.sh", "File Operations"),
    ("doc_section_extractor.sh", "Documentation"),
    ("doc_section_mapper.sh", "Documentation"),
    ("doc_template_validator.sh", "Documentation"),
    ("auto_documentation.sh", "Documentation"),
    ("changelog_generator.sh", "Documentation"),
    ("link_validator.sh", "Documentation"),
    ("validation.sh", "Validation & Testing"),
    ("enhanced_validations.sh", "Validation & Testing"),
    ("metrics_validation.sh", "Validation & Testing"),
    ("api_coverage.sh", "Validation & Testing"),
    ("code_example_tester.sh", "Validation & Testing"),
    ("deployment_validator.sh", "Validation & Testing"),
    ("step_execution.sh", "Step Management"),
    ("step_loader.sh", "Step Management"),
    ("step_metadata.sh", "Step Management"),
    ("step_registry.sh", "Step Management"),
    ("step_adaptation.sh", "Step Management"),
    ("step_validation_cache.sh", "Step Management"),
    ("step_validation_cache_integration.sh", "Step Management"),
    ("session_manager.sh", "Session & State"),
    ("backlog.sh", "Session & State"),
    ("summary.sh", "Session & State"),
    ("dependency_cache.sh", "Optimization"),
    ("dependency_graph.sh", "Optimization"),
    ("code_changes_optimization.sh", "Optimization"),
    ("docs_only_optimization.sh", "Optimization"),
    ("full_changes_optimization.sh", "Optimization"),
    ("conditional_execution.sh", "Optimization"),
    ("incremental_analysis.sh", "Optimization"),
    ("skip_predictor.sh", "Optimization"),
    ("ml_optimization.sh", "Optimization"),
    ("multi_stage_pipeline.sh", "Optimization"),
    ("workflow_profiles.sh", "Optimization"),
    ("performance.sh", "Performance & Monitoring"),
    ("performance_monitoring.sh", "Performance & Monitoring"),
    ("dashboard.sh", "Performance & Monitoring"),
    ("model_selector.sh", "AI Model Selection"),
    ("utils.sh", "Utilities"),
    ("colors.sh", "Utilities"),
    ("jq_wrapper.sh", "Utilities"),
    ("argument_parser.sh", "Utilities"),
    ("health_check.sh", "Utilities"),
    ("third_party_exclusion.sh", "Utilities"),
    ("version_bump.sh", "Utilities"),
    ("cleanup_handlers.sh", "Cleanup"),
    ("cleanup_template.sh", "Cleanup"),
    ("audio_notifications.sh", "User Experience"),
    ("precommit_hooks.sh", "Hooks"),
];

/// Exact file name → category lookup.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    categories: HashMap<String, String>,
}

impl CategoryMap {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            categories: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn category(&self, module_name: &str) -> &str {
        self.categories
            .get(module_name)
            .map(String::as_str)
            .unwrap_or(UNCATEGORIZED)
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new(MODULE_CATEGORIES.iter().copied())
    }
}

/// Header text and file conventions of the generated reference.
#[derive(Debug, Clone)]
pub struct ReferenceConfig {
    pub title: String,
    pub version: String,
    /// Module files end with this suffix
    pub suffix: String,
    /// Files starting with this prefix are tests, not modules
    pub test_prefix: String,
    /// Directory shown in each module's `Location` line
    pub location_prefix: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            title: "Complete API Reference - AI Workflow Automation".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            suffix: ".sh".to_string(),
            test_prefix: "test_".to_string(),
            location_prefix: DEFAULT_LIB_DIR.to_string(),
        }
    }
}
