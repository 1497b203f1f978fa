//! Project reference resolution

use crate::diagnostics::Diagnostics;
use crate::model::Solution;

/// Point every project reference at the project it names.
///
/// A name that matches no project of the solution is an error; the
/// reference stays unresolved.
pub fn resolve_project_references(solution: &mut Solution, diag: &mut Diagnostics) {
    let names: Vec<String> = solution.projects.iter().map(|p| p.name.clone()).collect();
    for project in &mut solution.projects {
        for reference in &mut project.references {
            reference.resolved = names.iter().position(|name| *name == reference.project);
            if reference.resolved.is_none() {
                diag.error(format!(
                    "Project {} references unknown project {}",
                    project.name, reference.project
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, ProjectReference, ReferenceKind};
    use crate::msvc::ProjectKind;
    use std::path::PathBuf;

    fn project(name: &str) -> Project {
        Project::new(name, ProjectKind::Cpp, PathBuf::from(format!("/out/{name}.vcxproj")), PathBuf::from("/src"))
    }

    #[test]
    fn test_references_resolve_by_name() {
        let mut solution = Solution::new("S", PathBuf::from("/out/s.sln"), PathBuf::from("/src"));
        let mut app = project("App");
        app.references.push(ProjectReference::new("Core", ReferenceKind::Reference));
        app.references.push(ProjectReference::new("Missing", ReferenceKind::Dependency));
        solution.projects.push(project("Core"));
        solution.projects.push(app);

        let mut diag = Diagnostics::new();
        resolve_project_references(&mut solution, &mut diag);

        let references = &solution.projects[1].references;
        assert_eq!(references[0].resolved, Some(0));
        assert_eq!(references[1].resolved, None);
        assert_eq!(diag.error_count(), 1);
        assert!(diag.entries()[0].message.contains("Missing"));
    }
}
