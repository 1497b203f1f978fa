//! Source generators
//!
//! A target's generators derive one new source from every source already
//! classified to that target. The template may use these tokens:
//!
//! | Token | Value |
//! |---|---|
//! | `$(FileDirectory)` | absolute directory of the source |
//! | `$(FileRelativeDirectory)` | that directory relative to the project source root |
//! | `$(FileBasename)` | file name without extension |
//! | `$(FileExtension)` | extension without the dot |
//! | `$(Filename)` | full file name |
//! | `$(SourceRoot)` | project source root |
//! | `$(ProjectDirectory)` | directory of the generated project file |
//!
//! A relative result is taken relative to the source's directory.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::diagnostics::Diagnostics;
use crate::model::{Filter, FilterId, Project, SourceGenerator, Target, TargetId};
use crate::path;

/// Run every generator of every target over `project`.
pub fn run_source_generators(
    project: &mut Project,
    targets: &IndexMap<String, Target>,
    diag: &mut Diagnostics,
) {
    for (index, target) in targets.values().enumerate() {
        for generator in &target.generators {
            run_generator(project, TargetId(index), generator, diag);
        }
    }
}

fn run_generator(
    project: &mut Project,
    target: TargetId,
    generator: &SourceGenerator,
    diag: &mut Diagnostics,
) {
    let derived: Vec<(PathBuf, FilterId)> = project
        .target_sources(target)
        .filter(|source| !source.generated)
        .map(|source| (expand_template(&generator.template, &source.path, project), source.filter))
        .collect();
    if derived.is_empty() {
        return;
    }

    let destination = generator
        .filter
        .as_deref()
        .map(|name| destination_filter(project, name, diag));

    for (path, origin) in derived {
        if project.sources.contains_key(&path) {
            debug!("Generated source {} already present", path.display());
            continue;
        }
        debug!("Generated source {}", path.display());
        project.insert_source(path, destination.unwrap_or(origin), true);
    }
}

/// The filter called `name`, created at the project directory if missing.
fn destination_filter(project: &mut Project, name: &str, diag: &mut Diagnostics) -> FilterId {
    if let Some(id) = project.find_filter(name) {
        return id;
    }
    diag.warning(format!(
        "Filter {} for generated sources does not exist in project {}, creating it",
        name, project.name
    ));
    let root = project.directory();
    project.add_filter(Filter::new(name, root))
}

/// Substitute the generator tokens for `source` and resolve the result.
pub fn expand_template(template: &str, source: &Path, project: &Project) -> PathBuf {
    let directory = source.parent().unwrap_or_else(|| Path::new(""));
    let mut relative_directory = path::to_slash(&path::relative(directory, &project.source_root));
    if relative_directory.is_empty() {
        relative_directory.push('.');
    }
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let basename = source
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let text = template
        .replace("$(FileDirectory)", &path::to_slash(directory))
        .replace("$(FileRelativeDirectory)", &relative_directory)
        .replace("$(FileBasename)", &basename)
        .replace("$(FileExtension)", path::extension(source).unwrap_or_default())
        .replace("$(Filename)", &file_name)
        .replace("$(SourceRoot)", &path::to_slash(&project.source_root))
        .replace("$(ProjectDirectory)", &path::to_slash(&project.directory()));
    path::resolve(directory, &text)
}
