//! # Error Handling
//!
//! This module defines the hard failures of `msvcgen`. It uses the
//! `thiserror` library to create an `Error` enum with clear, descriptive
//! messages.
//!
//! Problems found *inside* a build description (an unknown option, an
//! unresolved project reference, a missing directory under a filter root)
//! are not errors in this sense. They are recorded in a
//! [`Diagnostics`](crate::diagnostics::Diagnostics) collector so a single run
//! reports as many of them as possible. The variants here cover what stops a
//! run outright:
//!
//! - Startup errors (no input path, bad command-line bindings).
//! - Required global options that were never bound.
//! - Unreadable or malformed documents.
//! - An invalid wildcard pattern.
//! - The final "resolution recorded errors" refusal.

use thiserror::Error;

/// Main error type for msvcgen operations
#[derive(Error, Debug)]
pub enum Error {
    /// No root document path was given on the command line.
    #[error("No path given")]
    MissingInput,

    /// More than one bare path was given on the command line.
    #[error("Unknown command line argument '{argument}'")]
    UnexpectedArgument { argument: String },

    /// A `--name=value` binding named an option the document never declared.
    #[error("Unknown option '{name}'. Available options: {}", format_names(.available))]
    UnknownOption {
        name: String,
        available: Vec<String>,
    },

    /// A declared option has no default and was not bound on the command line.
    #[error("Option '{name}' is required (no default value given). Available options: {}", format_names(.available))]
    RequiredOption {
        name: String,
        available: Vec<String>,
    },

    /// A document could not be parsed as XML.
    #[error("Failed to parse {path}: {source}")]
    Document {
        path: String,
        #[source]
        source: roxmltree::Error,
    },

    /// Parsing or resolution recorded errors; nothing may be generated.
    #[error("Errors found while processing the build description ({count} error(s)). Aborting")]
    Aborted { count: usize },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
