//! CLI argument parsing and dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use msvcgen::error::Error;
use msvcgen::filesystem::DiskFS;
use msvcgen::{orchestrator, report};

/// msvcgen - Resolve an MSVC build description into solutions and projects
#[derive(Parser, Debug)]
#[command(name = "msvcgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the root build description, followed by any number of
    /// `--name=value` (or `--name`) global option bindings
    #[arg(
        value_name = "PATH [--OPTION[=VALUE]]...",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<String>,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let (path, bindings) = split_arguments(&self.args)?;
        let build = orchestrator::build(&DiskFS, &path, &bindings)?;

        for solution in &build.description.solutions {
            report::print_solution(solution)?;
        }
        info!(
            "Done: {} solution(s), {} warning(s)",
            build.description.solutions.len(),
            build.diagnostics.warning_count()
        );
        Ok(())
    }
}

/// Separate the root document path from `--name[=value]` bindings.
///
/// `--name` alone binds `"true"`. Exactly one bare argument is expected.
pub fn split_arguments(args: &[String]) -> msvcgen::error::Result<(PathBuf, Vec<(String, String)>)> {
    let mut path = None;
    let mut bindings = Vec::new();

    for argument in args {
        if let Some(option) = argument.strip_prefix("--") {
            let (name, value) = option.split_once('=').unwrap_or((option, "true"));
            bindings.push((name.to_string(), value.to_string()));
        } else if path.is_none() {
            path = Some(PathBuf::from(argument));
        } else {
            return Err(Error::UnexpectedArgument {
                argument: argument.clone(),
            });
        }
    }

    let path = path.ok_or(Error::MissingInput)?;
    Ok((path, bindings))
}
