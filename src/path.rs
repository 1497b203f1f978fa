//! Path manipulation utilities for msvcgen
//!
//! Build descriptions are written on Windows and may use either separator,
//! so every path read from a document goes through [`from_document`] first.
//! All other helpers here are purely lexical: nothing touches the disk.

use std::path::{Component, Path, PathBuf};

/// Convert a path written in a document to a native path.
pub fn from_document(text: &str) -> PathBuf {
    PathBuf::from(text.trim().replace('\\', "/"))
}

/// Lexically normalize a path: drop `.` components and fold `..` into
/// the preceding component where there is one.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

/// Join `relative` (document text) onto `base` and normalize.
///
/// Absolute document paths replace `base` entirely.
pub fn resolve(base: &Path, relative: &str) -> PathBuf {
    normalize(&base.join(from_document(relative)))
}

/// Express `path` relative to the directory `base`.
///
/// Both paths are normalized first. When they share no common prefix the
/// result climbs out of `base` with `..` components.
pub fn relative(path: &Path, base: &Path) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);
    let path_components: Vec<_> = path.components().collect();
    let base_components: Vec<_> = base.components().collect();

    let common = path_components
        .iter()
        .zip(base_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base_components.len() {
        out.push("..");
    }
    for component in &path_components[common..] {
        out.push(component.as_os_str());
    }
    out
}

/// Render a path with `/` separators.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::RootDir => Some(String::new()),
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
        .replace("//", "/")
}

/// Extension of `path` without the leading dot.
pub fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
