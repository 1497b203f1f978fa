//! Per-directory sub-filters for filters with `directories="true"`

use std::path::{Component, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::model::{FilterId, Project};
use crate::path;

/// Build the nested sub-filters of every directory-generating filter and
/// point each of its sources at the deepest one.
pub fn build_directory_filters(project: &mut Project, diag: &mut Diagnostics) {
    for index in 0..project.filters.len() {
        if !project.filters[index].generate_directories {
            continue;
        }
        let id = FilterId(index);
        let root = project.filters[index].root.clone();

        let placements: Vec<(PathBuf, Vec<String>)> = project
            .filter_sources(id)
            .map(|source| {
                let directory = source.path.parent().unwrap_or(root.as_path());
                let relative = path::relative(directory, &root);
                let mut parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                if relative.components().next() == Some(Component::ParentDir) {
                    diag.warning(format!(
                        "Root path for filter {} is not specific enough. File {} is outside {}",
                        project.filters[index].name,
                        source.path.display(),
                        root.display()
                    ));
                    parts.remove(0);
                }
                (source.path.clone(), parts)
            })
            .collect();

        for (source_path, parts) in placements {
            if parts.is_empty() {
                continue;
            }
            let filter = &mut project.filters[index];
            let mut deepest = 0;
            for depth in 1..=parts.len() {
                deepest = filter.sub_filter_entry(&parts[..depth].join("/"));
            }
            if let Some(source) = project.sources.get_mut(&source_path) {
                source.sub_filter = Some(deepest);
            }
        }
    }
}
