//! # msvcgen
//!
//! Resolution engine for MSVC build descriptions. An XML build description
//! declares solutions, projects, source filters, build targets and layered
//! configurations; this library parses it and resolves it into a complete
//! model ready for `.sln`/`.vcxproj` writers.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use msvcgen::filesystem::MemoryFS;
//! use msvcgen::orchestrator;
//!
//! let fs = MemoryFS::new().with_file(
//!     "/work/build.xml",
//!     r#"<build>
//!          <solution name="Game">
//!            <platforms><platform>x64</platform></platforms>
//!            <configurations><configuration name="Debug"/></configurations>
//!            <project name="Core"/>
//!          </solution>
//!        </build>"#,
//! );
//!
//! let build = orchestrator::build(&fs, Path::new("/work/build.xml"), &[]).unwrap();
//! let solution = &build.description.solutions[0];
//! assert_eq!(solution.configuration_platforms(), vec!["Debug|x64"]);
//! assert!(solution.projects[0].holder.find_configuration("Debug").is_some());
//! ```
//!
//! ## Core Concepts
//!
//! - **Options (`options`)**: the closed registry of MSVC settings per scope,
//!   with typed parsing and inheritance rules.
//! - **Configurations (`configuration`)**: named option sets, shared
//!   configurations and per-file rules, owned by a holder.
//! - **Model (`model`)**: solutions, folders, projects, filters, sources and
//!   targets, linked by index.
//! - **Parsing (`parse`)**: reads the XML description, imports and global
//!   options into the model.
//! - **Resolution (`resolve`)**: binds references, merges configurations,
//!   classifies and generates sources and builds directory filters.
//!
//! ## Execution Flow
//!
//! [`orchestrator::build`] runs the whole pipeline:
//!
//! 1.  **Globals**: declare global options and bind command-line values.
//! 2.  **Parse**: build every solution, collecting diagnostics.
//! 3.  **Resolve**: run the resolution passes over each solution.
//!
//! Any error recorded along the way aborts the run before a model is
//! returned.

pub mod configuration;
pub mod diagnostics;
pub mod error;
pub mod filesystem;
pub mod globals;
pub mod model;
pub mod msvc;
pub mod options;
pub mod orchestrator;
pub mod parse;
pub mod path;
pub mod report;
pub mod resolve;

#[cfg(test)]
mod options_proptest;
