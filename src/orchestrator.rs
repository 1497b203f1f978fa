//! Orchestrator for a complete run
//!
//! Coordinates parsing and resolution and enforces the refusal rule: once
//! any error has been recorded, no model is handed on for generation.

use std::path::Path;

use log::info;

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::parse::{parse_document, BuildDescription};
use crate::resolve::resolve_solution;

/// A fully resolved build description and the warnings collected on the way
#[derive(Debug)]
pub struct Build {
    pub description: BuildDescription,
    pub diagnostics: Diagnostics,
}

/// Parse and resolve the build description at `path`.
///
/// 1. Bind global options and parse every solution
/// 2. Stop if parsing recorded errors
/// 3. Resolve each solution
/// 4. Stop if resolution recorded errors
pub fn build(fs: &dyn FileSystem, path: &Path, bindings: &[(String, String)]) -> Result<Build> {
    let mut diagnostics = Diagnostics::new();

    // Phase 1: Parse
    let mut description = parse_document(fs, path, bindings, &mut diagnostics)?;
    if diagnostics.has_errors() {
        return Err(Error::Aborted {
            count: diagnostics.error_count(),
        });
    }

    // Phase 2: Resolve
    for solution in &mut description.solutions {
        resolve_solution(solution, &mut diagnostics);
    }
    if diagnostics.has_errors() {
        return Err(Error::Aborted {
            count: diagnostics.error_count(),
        });
    }

    info!(
        "Resolved {} solution(s) with {} warning(s)",
        description.solutions.len(),
        diagnostics.warning_count()
    );
    Ok(Build {
        description,
        diagnostics,
    })
}
