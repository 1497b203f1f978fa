//! # Resolved Model Report
//!
//! Renders a resolved [`Solution`] as a tree: platforms, configurations,
//! targets, then folders and projects with their filters, per-target source
//! counts and references. This is a read-only view for the console.

use std::borrow::Cow;
use std::io::{self, Write};

use ptree::TreeItem;

use crate::model::{FilterId, FolderId, Project, ReferenceKind, Solution, TargetId};
use crate::msvc::guid_string;
use crate::resolve::{has_overrides, source_configuration};

/// A labelled node of the report tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn branch(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &ptree::Style) -> io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}

/// Build the report tree for a resolved solution.
pub fn solution_tree(solution: &Solution) -> TreeNode {
    let mut children = vec![
        TreeNode::leaf(format!("Platforms: {}", solution.platforms.join(", "))),
        TreeNode::leaf(format!(
            "Configurations: {}",
            solution.configuration_platforms().join(", ")
        )),
        TreeNode::branch(
            "Targets",
            solution
                .targets
                .values()
                .map(|target| {
                    let mut label = target.name.clone();
                    if !target.extensions.is_empty() {
                        label.push_str(&format!(" (.{})", target.extensions.join(", .")));
                    }
                    TreeNode::leaf(label)
                })
                .collect(),
        ),
    ];
    children.extend(folder_children(solution, None));

    TreeNode::branch(
        format!("Solution {} ({})", solution.name, solution.path.display()),
        children,
    )
}

/// Folders whose parent is `parent`, then projects placed directly in it.
fn folder_children(solution: &Solution, parent: Option<FolderId>) -> Vec<TreeNode> {
    let mut nodes = Vec::new();
    for (index, folder) in solution.folders.iter().enumerate() {
        if folder.parent == parent {
            nodes.push(TreeNode::branch(
                format!("Folder {}", folder.name),
                folder_children(solution, Some(FolderId(index))),
            ));
        }
    }
    nodes.extend(
        solution
            .projects
            .iter()
            .filter(|p| p.folder == parent)
            .map(|p| project_node(solution, p)),
    );
    nodes
}

fn project_node(solution: &Solution, project: &Project) -> TreeNode {
    let label = format!(
        "Project {} [{}] {}",
        project.name,
        project.kind.label(),
        guid_string(&project.guid)
    );
    if project.external {
        return TreeNode::leaf(format!("{} (external: {})", label, project.path.display()));
    }

    let mut children = Vec::new();
    for (index, filter) in project.filters.iter().enumerate() {
        let count = project
            .filter_sources(FilterId(index))
            .count();
        let sub_filters = filter
            .sub_filters
            .iter()
            .map(|s| TreeNode::leaf(s.name.clone()))
            .collect();
        children.push(TreeNode::branch(
            format!("Filter {} ({} sources)", filter.name, count),
            sub_filters,
        ));
    }

    for index in 0..solution.targets.len() {
        let target = TargetId(index);
        let count = project.target_sources(target).count();
        if count > 0 {
            children.push(TreeNode::leaf(format!(
                "{}: {} source(s)",
                solution.target(target).name,
                count
            )));
        }
    }

    let overridden = project
        .sources
        .keys()
        .filter(|path| has_overrides(&source_configuration(solution, project, path)))
        .count();
    if overridden > 0 {
        children.push(TreeNode::leaf(format!("Per-file overrides: {} source(s)", overridden)));
    }

    for reference in &project.references {
        let kind = match reference.kind {
            ReferenceKind::Reference => "Reference",
            ReferenceKind::Dependency => "Dependency",
        };
        children.push(TreeNode::leaf(format!("{} -> {}", kind, reference.project)));
    }

    TreeNode::branch(label, children)
}

/// Write the tree for `solution` to `out`.
pub fn write_solution<W: Write>(solution: &Solution, out: W) -> io::Result<()> {
    ptree::write_tree(&solution_tree(solution), out)
}

/// Print the tree for `solution` to stdout.
pub fn print_solution(solution: &Solution) -> io::Result<()> {
    ptree::print_tree(&solution_tree(solution))
}
