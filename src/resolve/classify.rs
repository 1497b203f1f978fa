//! Source classification by extension

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::diagnostics::Diagnostics;
use crate::model::{AlreadyAssigned, Project, Target, TargetId};
use crate::path;

/// Assign each source to the first target claiming its extension.
///
/// Targets are visited in registration order. A source claimed by a second
/// target keeps its first assignment and the conflict is reported. Sources
/// nothing claims fall back to the implicit `None` target (index 0) with a
/// warning. Only sources whose `generated` flag equals `generated` take part,
/// so derived sources can be classified in a later pass.
pub fn classify_sources(
    project: &mut Project,
    targets: &IndexMap<String, Target>,
    generated: bool,
    diag: &mut Diagnostics,
) {
    let candidates: Vec<(PathBuf, String)> = project
        .sources
        .values()
        .filter(|source| source.generated == generated && source.target.is_none())
        .map(|source| {
            let extension = path::extension(&source.path).unwrap_or_default().to_string();
            (source.path.clone(), extension)
        })
        .collect();

    for (index, target) in targets.values().enumerate() {
        let id = TargetId(index);
        for (path, extension) in &candidates {
            if !target.claims(extension) {
                continue;
            }
            if let Err(AlreadyAssigned(existing)) = project.assign_target(path, id) {
                if existing != id {
                    diag.warning(format!(
                        "Source {} matches both {} and {}, keeping {}",
                        path.display(),
                        targets[existing.0].name,
                        target.name,
                        targets[existing.0].name
                    ));
                }
            }
        }
    }

    let none = TargetId(0);
    for (path, _) in &candidates {
        if project.assign_target(path, none).is_ok() {
            diag.warning(format!(
                "No target for source {} in project {}, using {}",
                path.display(),
                project.name,
                targets[none.0].name
            ));
        }
    }
}
