//! Per-source configuration overrides from file rules

use std::path::Path;

use crate::configuration::{Configuration, ConfigurationHolder};
use crate::model::{Project, Solution};
use crate::path;

/// The file-level overrides that apply to `source` in `project`.
///
/// The result holds one configuration per project configuration. Matching
/// project rules are merged first (pattern against the path relative to the
/// project source root), then matching solution rules (relative to the
/// solution's base directory). A configuration with nothing set means the
/// source builds with the project settings unchanged.
pub fn source_configuration(solution: &Solution, project: &Project, source: &Path) -> ConfigurationHolder {
    let mut merged = ConfigurationHolder::new();
    for configuration in project.holder.configurations() {
        merged.add_configuration(Configuration::new(configuration.name()));
    }

    let project_relative = path::to_slash(&path::relative(source, &project.source_root));
    for rule in project.holder.rules() {
        if rule.matches(&project_relative) {
            merged.merge_from(rule.holder());
        }
    }

    let solution_relative = path::to_slash(&path::relative(source, &solution.base_dir));
    for rule in solution.holder.rules() {
        if rule.matches(&solution_relative) {
            merged.merge_from(rule.holder());
        }
    }
    merged
}

/// Whether any configuration of `holder` carries an override.
pub fn has_overrides(holder: &ConfigurationHolder) -> bool {
    holder.configurations().iter().any(|c| !c.is_empty())
}
