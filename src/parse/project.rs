//! Folders, projects, filters and project references

use std::path::{Path, PathBuf};

use log::{debug, info};
use roxmltree::{Document, Node};
use uuid::Uuid;

use super::{child, children, text, Context, Parser};
use crate::error::Error;
use crate::model::{Filter, FilterId, Folder, FolderId, Project, ProjectReference, ReferenceKind, Solution};
use crate::msvc::{guid_string, ProjectKind};
use crate::path;

impl<'a> Parser<'a> {
    /// Folders and projects directly below `element`, placed in `folder`.
    pub(super) fn parse_folder_contents(
        &mut self,
        element: Node<'_, '_>,
        context: &Context,
        solution: &mut Solution,
        folder: Option<FolderId>,
    ) {
        for folder_element in children(element, "folder") {
            let name = folder_element.attribute("name").unwrap_or_default();
            if name.is_empty() {
                self.diag.error("Missing name for folder");
            }
            let id = solution.add_folder(Folder::new(name, folder));
            info!("Folder: {}", name);

            self.with_imports(folder_element, context, |parser, imported, context| {
                parser.parse_folder_contents(imported, context, solution, Some(id))
            });
            self.parse_folder_contents(folder_element, context, solution, Some(id));
        }

        for project_element in children(element, "project") {
            let project = match project_element.attribute("external") {
                Some(external) => self.parse_external_project(context, external),
                None => self.parse_authored_project(project_element, context),
            };
            if let Some(mut project) = project {
                project.folder = folder;
                solution.projects.push(project);
            }
        }
    }

    fn parse_authored_project(&mut self, element: Node<'_, '_>, context: &Context) -> Option<Project> {
        let Some(name) = element.attribute("name") else {
            self.diag.error("Missing name for project");
            return None;
        };

        let kind = match element.attribute("type") {
            None => ProjectKind::Cpp,
            Some(kind) => ProjectKind::from_type(kind).unwrap_or_else(|| {
                self.diag
                    .error(format!("Unknown type {} for project {}", kind, name));
                ProjectKind::Cpp
            }),
        };

        let source_root = match element.attribute("root").filter(|root| !root.is_empty()) {
            Some(root) => context.resolve(root),
            None => context.dir().to_path_buf(),
        };
        let path = self.output_file(context, name, "vcxproj");
        let mut project = Project::new(name, kind, path, source_root);
        info!(
            "Project: {} ({}) - Source root: {}",
            project.name,
            kind.label(),
            project.source_root.display()
        );

        self.parse_project(element, context, context.dir(), &mut project);
        Some(project)
    }

    /// `origin` is the directory of the document the project was declared in.
    fn parse_project(
        &mut self,
        element: Node<'_, '_>,
        context: &Context,
        origin: &Path,
        project: &mut Project,
    ) {
        self.with_imports(element, context, |parser, imported, context| {
            parser.parse_project(imported, context, origin, project)
        });

        if let Some(configurations) = child(element, "configurations") {
            let owner = project.name.clone();
            self.parse_configurations(configurations, context, &mut project.holder, origin, &owner);
        }

        if let Some(macros) = child(element, "macros") {
            for (name, value) in self.parse_macros(macros, context) {
                project.macros.insert(name, value);
            }
        }

        for filter in children(element, "filter") {
            self.parse_filter(filter, project);
        }

        for reference in children(element, "reference") {
            let Some(target) = reference.attribute("project") else {
                self.diag
                    .error(format!("Reference without a project attribute in {}", project.name));
                continue;
            };
            let mut entry = ProjectReference::new(target, ReferenceKind::Reference);
            entry.settings = reference
                .children()
                .filter(Node::is_element)
                .map(|setting| (setting.tag_name().name().to_string(), text(setting).to_string()))
                .collect();
            project.references.push(entry);
        }

        for dependency in children(element, "dependency") {
            let Some(target) = dependency.attribute("project") else {
                self.diag
                    .error(format!("Dependency without a project attribute in {}", project.name));
                continue;
            };
            project
                .references
                .push(ProjectReference::new(target, ReferenceKind::Dependency));
        }
    }

    fn parse_filter(&mut self, element: Node<'_, '_>, project: &mut Project) {
        let Some(name) = element.attribute("name") else {
            self.diag
                .error(format!("Missing name for filter in project {}", project.name));
            return;
        };
        let root = match element.attribute("root") {
            Some(root) => path::resolve(&project.source_root, root),
            None => project.source_root.clone(),
        };

        let mut filter = Filter::new(name, root);
        filter.generate_directories = self.bool_attribute(element, "directories", false);
        info!("Filter: {}", filter.name);
        let id = project.add_filter(filter);

        for include in children(element, "include") {
            for file in self.expand_files(include, project, id) {
                debug!("{}", file.display());
                project.include(file, id);
            }
        }
        for exclude in children(element, "exclude") {
            for file in self.expand_files(exclude, project, id) {
                project.exclude(&file, id);
            }
        }
    }

    /// Files matched by an `include` or `exclude` element under the filter root.
    fn expand_files(&mut self, element: Node<'_, '_>, project: &Project, filter: FilterId) -> Vec<PathBuf> {
        let Some(files) = element.attribute("files") else {
            self.diag.error(format!(
                "<{}> without a files attribute in filter {}",
                element.tag_name().name(),
                project.filter(filter).name
            ));
            return Vec::new();
        };
        let recursive = self.bool_attribute(element, "recursive", true);
        let root = &project.filter(filter).root;
        match self.fs.find_files(root, files, recursive) {
            Ok(found) => found,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                self.diag.warning(format!("No match for filter {}: {}", files, e));
                Vec::new()
            }
            Err(e) => {
                self.diag
                    .error(format!("Failed to expand {} under {}: {}", files, root.display(), e));
                Vec::new()
            }
        }
    }

    /// A project linked from a foreign project file.
    ///
    /// The name and identity token come from `RootNamespace` and
    /// `ProjectGuid` in the file's property groups.
    fn parse_external_project(&mut self, context: &Context, external: &str) -> Option<Project> {
        let path = context.resolve(external);
        let Some(kind) = path::extension(&path).and_then(ProjectKind::from_extension) else {
            self.diag.error(format!(
                "External project {} has unknown extension. Can't include",
                path.display()
            ));
            return None;
        };

        let text = self.load(&path)?;
        let document = match Document::parse(&text) {
            Ok(document) => document,
            Err(e) => {
                self.diag
                    .error(format!("Can't open external project {}: {}", path.display(), e));
                return None;
            }
        };

        match read_project_identity(document.root_element()) {
            (Some(name), Some(guid)) => {
                info!(
                    "Added external project {} ({}) with guid {}",
                    name,
                    path.display(),
                    guid_string(&guid)
                );
                Some(Project::external(name, kind, path, guid))
            }
            _ => {
                self.diag
                    .error(format!("Failed to parse project {}", path.display()));
                None
            }
        }
    }
}

/// `RootNamespace` and `ProjectGuid` from the property groups in the root's
/// default namespace. Later groups override earlier ones.
fn read_project_identity(root: Node<'_, '_>) -> (Option<String>, Option<Uuid>) {
    let namespace = root.tag_name().namespace();

    let mut name = None;
    let mut guid = None;
    for group in root
        .children()
        .filter(|n| is_named(*n, "PropertyGroup", namespace))
    {
        for property in group.children() {
            if is_named(property, "RootNamespace", namespace) {
                name = Some(text(property).trim().to_string());
            } else if is_named(property, "ProjectGuid", namespace) {
                guid = Uuid::parse_str(text(property).trim()).ok().or(guid);
            }
        }
    }
    (
        name.filter(|n: &String| !n.is_empty()),
        guid.filter(|g: &Uuid| !g.is_nil()),
    )
}

fn is_named(node: Node<'_, '_>, name: &str, namespace: Option<&str>) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == namespace
}
