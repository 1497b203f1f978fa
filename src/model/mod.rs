//! # Solution Model
//!
//! The in-memory graph produced by the parser and completed by the
//! resolver. A [`Solution`] owns every folder, project and target; all
//! back-references (a project's folder, a source's filter or target) are
//! plain indices into those owners.

pub mod project;
pub mod target;

use std::path::PathBuf;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::configuration::ConfigurationHolder;
use crate::msvc;

pub use project::{
    AlreadyAssigned, Filter, Project, ProjectReference, ReferenceKind, Source, SubFilter,
};
pub use target::{CustomBuild, CustomBuildOptions, SourceGenerator, Target};

/// Index of a folder in [`Solution::folders`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FolderId(pub usize);

/// Index of a filter in [`Project::filters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterId(pub usize);

/// Index of a target in [`Solution::targets`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

/// Name of the implicit target for sources nothing else claims
pub const NONE_TARGET: &str = "None";

/// A solution folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    pub parent: Option<FolderId>,
    pub guid: Uuid,
}

impl Folder {
    pub fn new(name: impl Into<String>, parent: Option<FolderId>) -> Self {
        Self {
            name: name.into(),
            parent,
            guid: Uuid::new_v4(),
        }
    }

    pub fn type_guid(&self) -> Uuid {
        msvc::FOLDER_PROJECT_TYPE
    }
}

/// A solution and everything it owns
#[derive(Debug, Clone)]
pub struct Solution {
    pub name: String,
    /// Generated solution file
    pub path: PathBuf,
    /// Directory the solution was declared in; solution rules match relative to it
    pub base_dir: PathBuf,
    pub platforms: Vec<String>,
    pub targets: IndexMap<String, Target>,
    pub holder: ConfigurationHolder,
    pub macros: IndexMap<String, String>,
    pub projects: Vec<Project>,
    pub folders: Vec<Folder>,
}

impl Solution {
    pub fn new(name: impl Into<String>, path: PathBuf, base_dir: PathBuf) -> Self {
        let mut targets = IndexMap::new();
        targets.insert(NONE_TARGET.to_string(), Target::new(NONE_TARGET));
        Self {
            name: name.into(),
            path,
            base_dir,
            platforms: Vec::new(),
            targets,
            holder: ConfigurationHolder::new(),
            macros: IndexMap::new(),
            projects: Vec::new(),
            folders: Vec::new(),
        }
    }

    /// Add a canonical platform name once.
    pub fn add_platform(&mut self, platform: &str) {
        if !self.platforms.iter().any(|p| p == platform) {
            self.platforms.push(platform.to_string());
        }
    }

    /// The target called `name`, registered if absent.
    pub fn target_entry(&mut self, name: &str) -> &mut Target {
        self.targets
            .entry(name.to_string())
            .or_insert_with(|| Target::new(name))
    }

    pub fn target_id(&self, name: &str) -> Option<TargetId> {
        self.targets.get_index_of(name).map(TargetId)
    }

    pub fn none_target(&self) -> TargetId {
        TargetId(0)
    }

    pub fn target(&self, id: TargetId) -> &Target {
        &self.targets[id.0]
    }

    pub fn add_folder(&mut self, folder: Folder) -> FolderId {
        self.folders.push(folder);
        FolderId(self.folders.len() - 1)
    }

    pub fn folder(&self, id: FolderId) -> &Folder {
        &self.folders[id.0]
    }

    /// Index of the project called `name`
    pub fn find_project(&self, name: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.name == name)
    }

    /// `Configuration|Platform` pairs the solution builds
    pub fn configuration_platforms(&self) -> Vec<String> {
        self.holder
            .configurations()
            .iter()
            .flat_map(|c| {
                self.platforms
                    .iter()
                    .map(move |p| format!("{}|{}", c.name(), p))
            })
            .collect()
    }
}
