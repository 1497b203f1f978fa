//! # Model Resolver
//!
//! Post-parse passes that turn a parsed [`Solution`] into the model the
//! project writers consume. They run once per solution, in this order:
//!
//! 1. **References**: bind each project reference to a project of the solution.
//! 2. **Configurations**: apply shared configurations and inherit the
//!    solution's configurations into every project.
//! 3. **Classification**: assign every source to exactly one target.
//! 4. **Generation**: derive sources through each target's generators, then
//!    classify the derived sources.
//! 5. **Directories**: build per-directory sub-filters.
//!
//! None of the passes fail. Problems are recorded in the [`Diagnostics`]
//! collector and the caller must refuse to write output when it holds
//! errors. Steps 2 to 5 only touch one project at a time, so they run in
//! parallel over the projects; each project's diagnostics are appended in
//! project order once all are done.

mod classify;
mod directories;
mod generate;
mod merge;
mod overrides;
mod references;

use log::debug;
use rayon::prelude::*;

use crate::diagnostics::Diagnostics;
use crate::model::Solution;

pub use classify::classify_sources;
pub use directories::build_directory_filters;
pub use generate::{expand_template, run_source_generators};
pub use merge::{merge_project_configurations, merge_solution_configurations};
pub use overrides::{has_overrides, source_configuration};
pub use references::resolve_project_references;

/// Run every resolution pass over `solution`.
pub fn resolve_solution(solution: &mut Solution, diag: &mut Diagnostics) {
    debug!("Resolving solution {}", solution.name);
    resolve_project_references(solution, diag);
    merge_solution_configurations(&mut solution.holder);

    let Solution {
        projects,
        holder,
        targets,
        ..
    } = solution;
    let holder = &*holder;
    let targets = &*targets;

    let per_project: Vec<Diagnostics> = projects
        .par_iter_mut()
        .filter(|project| !project.external)
        .map(|project| {
            let mut local = Diagnostics::new();
            merge_project_configurations(project, holder);
            classify_sources(project, targets, false, &mut local);
            run_source_generators(project, targets, &mut local);
            classify_sources(project, targets, true, &mut local);
            build_directory_filters(project, &mut local);
            local
        })
        .collect();

    for local in per_project {
        diag.absorb(local);
    }
}
