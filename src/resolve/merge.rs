//! Configuration inheritance across holders
//!
//! Precedence, narrowest first: a project's named configuration, the
//! project's shared configuration, the solution's same-named configuration
//! (which already contains the solution's shared values), and finally the
//! solution's shared configuration for names the solution does not define.
//! File rules are kept apart and only applied per source, see
//! [`source_configuration`](super::source_configuration).

use crate::configuration::ConfigurationHolder;
use crate::model::Project;

/// Fold the solution's shared configuration into its named configurations
/// and into those of each solution-level rule.
pub fn merge_solution_configurations(holder: &mut ConfigurationHolder) {
    holder.apply_shared();
    for rule in holder.rules_mut() {
        rule.holder_mut().apply_shared();
    }
}

/// Complete a project's configurations from the solution.
///
/// Every solution configuration gets a project counterpart, created empty
/// when the project does not declare it.
pub fn merge_project_configurations(project: &mut Project, solution: &ConfigurationHolder) {
    project.holder.inherit_from(solution);
    for rule in project.holder.rules_mut() {
        rule.holder_mut().apply_shared();
    }
}
