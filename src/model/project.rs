//! Projects, their filters and their sources
//!
//! A [`Project`] owns its [`Filter`]s and a single insertion-ordered arena
//! of [`Source`]s keyed by absolute path. Each source points back at its
//! filter and target by index, so a source is in exactly one filter at a
//! time and classified at most once.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use uuid::Uuid;

use super::{FilterId, FolderId, TargetId};
use crate::configuration::ConfigurationHolder;
use crate::msvc::ProjectKind;

/// Whether a reference links against the other project or only orders the build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Reference,
    Dependency,
}

/// A named dependency on another project of the same solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    pub project: String,
    pub kind: ReferenceKind,
    /// Per-reference settings (child element name and text)
    pub settings: Vec<(String, String)>,
    /// Index into the solution's projects, set by the resolver
    pub resolved: Option<usize>,
}

impl ProjectReference {
    pub fn new(project: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            project: project.into(),
            kind,
            settings: Vec::new(),
            resolved: None,
        }
    }
}

/// A per-directory child of a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubFilter {
    /// Full display name, `Filter\dir\subdir`
    pub name: String,
    /// Directory relative to the owning filter's root, `/`-separated
    pub directory: String,
    pub guid: Uuid,
}

/// A named, rooted grouping of sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    pub root: PathBuf,
    pub generate_directories: bool,
    pub guid: Uuid,
    pub sub_filters: Vec<SubFilter>,
}

impl Filter {
    pub fn new(name: impl Into<String>, root: PathBuf) -> Self {
        Self {
            name: name.into(),
            root,
            generate_directories: false,
            guid: Uuid::new_v4(),
            sub_filters: Vec::new(),
        }
    }

    /// Root directory text with a trailing separator
    pub fn root_with_separator(&self) -> String {
        let mut root = crate::path::to_slash(&self.root);
        if !root.ends_with('/') {
            root.push('/');
        }
        root
    }

    /// Index of the sub-filter for `directory`, created on first use.
    pub fn sub_filter_entry(&mut self, directory: &str) -> usize {
        if let Some(index) = self.sub_filters.iter().position(|s| s.directory == directory) {
            return index;
        }
        self.sub_filters.push(SubFilter {
            name: format!("{}\\{}", self.name, directory.replace('/', "\\")),
            directory: directory.to_string(),
            guid: Uuid::new_v4(),
        });
        self.sub_filters.len() - 1
    }
}

/// A file belonging to a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub filter: FilterId,
    pub target: Option<TargetId>,
    /// Derived by a source generator rather than found on disk
    pub generated: bool,
    /// Index into the filter's sub-filters, when directory filters are generated
    pub sub_filter: Option<usize>,
}

/// Error returned when a source is classified a second time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyAssigned(pub TargetId);

/// A project, authored in the description or linked from a foreign file
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub kind: ProjectKind,
    /// Generated project file, or the foreign file for external projects
    pub path: PathBuf,
    pub source_root: PathBuf,
    pub folder: Option<FolderId>,
    pub filters: Vec<Filter>,
    pub sources: IndexMap<PathBuf, Source>,
    pub holder: ConfigurationHolder,
    pub macros: IndexMap<String, String>,
    pub references: Vec<ProjectReference>,
    pub guid: Uuid,
    pub external: bool,
}

impl Project {
    pub fn new(name: impl Into<String>, kind: ProjectKind, path: PathBuf, source_root: PathBuf) -> Self {
        Self {
            name: name.into(),
            kind,
            path,
            source_root,
            folder: None,
            filters: Vec::new(),
            sources: IndexMap::new(),
            holder: ConfigurationHolder::new(),
            macros: IndexMap::new(),
            references: Vec::new(),
            guid: Uuid::new_v4(),
            external: false,
        }
    }

    /// A project only linked into the solution; its identity comes from its own file.
    pub fn external(name: impl Into<String>, kind: ProjectKind, path: PathBuf, guid: Uuid) -> Self {
        let source_root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            guid,
            external: true,
            ..Self::new(name, kind, path, source_root)
        }
    }

    /// Directory holding the project file
    pub fn directory(&self) -> PathBuf {
        self.path.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    pub fn add_filter(&mut self, filter: Filter) -> FilterId {
        self.filters.push(filter);
        FilterId(self.filters.len() - 1)
    }

    pub fn filter(&self, id: FilterId) -> &Filter {
        &self.filters[id.0]
    }

    /// Filter whose name matches ignoring case
    pub fn find_filter(&self, name: &str) -> Option<FilterId> {
        self.filters
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
            .map(FilterId)
    }

    /// Add `path` to `filter`. A source already present moves to `filter`.
    pub fn include(&mut self, path: PathBuf, filter: FilterId) {
        self.insert_source(path, filter, false);
    }

    pub(crate) fn insert_source(&mut self, path: PathBuf, filter: FilterId, generated: bool) {
        match self.sources.get_mut(&path) {
            Some(source) => source.filter = filter,
            None => {
                let source = Source {
                    path: path.clone(),
                    filter,
                    target: None,
                    generated,
                    sub_filter: None,
                };
                self.sources.insert(path, source);
            }
        }
    }

    /// Remove `path` if it currently belongs to `filter`.
    pub fn exclude(&mut self, path: &Path, filter: FilterId) -> bool {
        match self.sources.get(path) {
            Some(source) if source.filter == filter => {
                self.sources.shift_remove(path);
                true
            }
            _ => false,
        }
    }

    /// Sources currently in `filter`, in insertion order
    pub fn filter_sources(&self, filter: FilterId) -> impl Iterator<Item = &Source> {
        self.sources.values().filter(move |s| s.filter == filter)
    }

    /// Sources classified to `target`, in insertion order
    pub fn target_sources(&self, target: TargetId) -> impl Iterator<Item = &Source> {
        self.sources
            .values()
            .filter(move |s| s.target == Some(target))
    }

    /// Classify a source. The first assignment wins.
    pub fn assign_target(&mut self, path: &Path, target: TargetId) -> Result<(), AlreadyAssigned> {
        let Some(source) = self.sources.get_mut(path) else {
            return Ok(());
        };
        match source.target {
            Some(existing) => Err(AlreadyAssigned(existing)),
            None => {
                source.target = Some(target);
                Ok(())
            }
        }
    }
}
