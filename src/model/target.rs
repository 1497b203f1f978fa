//! Build targets: extension-based source classification, custom build
//! steps and source generators

use std::path::PathBuf;

use indexmap::IndexMap;

/// A named classification of sources by extension
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    /// Claimed extensions, without the leading dot
    pub extensions: Vec<String>,
    /// External build definition (`.targets`) imported by projects using this target
    pub definition: Option<PathBuf>,
    pub build: Option<CustomBuild>,
    pub generators: Vec<SourceGenerator>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extensions: Vec::new(),
            definition: None,
            build: None,
            generators: Vec::new(),
        }
    }

    /// Register an extension; a leading dot is stripped, duplicates ignored.
    pub fn add_extension(&mut self, extension: &str) {
        let extension = extension.trim().trim_start_matches('.');
        if extension.is_empty() || self.claims(extension) {
            return;
        }
        self.extensions.push(extension.to_string());
    }

    /// Whether `extension` (no dot) is claimed, ignoring ASCII case.
    pub fn claims(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|claimed| claimed.eq_ignore_ascii_case(extension))
    }
}

/// Custom build step settings; unset fields inherit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomBuildOptions {
    pub command: Option<String>,
    pub message: Option<String>,
    pub outputs: Option<String>,
    pub inputs: Option<String>,
    pub link: Option<bool>,
    pub content: Option<bool>,
}

impl CustomBuildOptions {
    /// Fill fields unset here from `parent`.
    pub fn inherit(&mut self, parent: &CustomBuildOptions) {
        fn fill<T: Clone>(own: &mut Option<T>, parent: &Option<T>) {
            if own.is_none() {
                own.clone_from(parent);
            }
        }
        fill(&mut self.command, &parent.command);
        fill(&mut self.message, &parent.message);
        fill(&mut self.outputs, &parent.outputs);
        fill(&mut self.inputs, &parent.inputs);
        fill(&mut self.link, &parent.link);
        fill(&mut self.content, &parent.content);
    }
}

/// A custom build step: shared settings plus per-configuration overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomBuild {
    pub shared: Option<CustomBuildOptions>,
    pub configurations: IndexMap<String, CustomBuildOptions>,
}

impl CustomBuild {
    /// Effective settings for the configuration called `name`.
    pub fn resolved(&self, name: &str) -> CustomBuildOptions {
        let mut options = self.configurations.get(name).cloned().unwrap_or_default();
        if let Some(shared) = &self.shared {
            options.inherit(shared);
        }
        options
    }
}

/// Derives a new source from each source of its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGenerator {
    /// Path template with `$(...)` tokens
    pub template: String,
    /// Filter that receives the derived sources (matched ignoring case)
    pub filter: Option<String>,
}
