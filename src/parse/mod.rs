//! # Document Parser
//!
//! Reads a build description into an unresolved [`Solution`] tree.
//!
//! ## Directory context
//!
//! Relative paths in a document (project roots, custom build definitions,
//! rule patterns, path macros, imports) are resolved against the directory
//! of the document they were written in. The parser carries that directory
//! in a [`Context`] passed by value down the recursion; an `import` element
//! derives a new context from the imported file and hands it to the nested
//! parse, so leaving the import restores the outer directory automatically.
//!
//! ## Failure policy
//!
//! Only the root document itself (unreadable, malformed, bad global option
//! bindings) produces an `Err`. Every problem below that point is recorded
//! in the [`Diagnostics`] collector and parsing continues, so a single run
//! reports as much as possible.

mod configuration;
mod project;
mod target;

use std::path::{Path, PathBuf};

use log::{debug, info};
use roxmltree::{Document, Node};

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::globals::GlobalOptions;
use crate::model::Solution;
use crate::options::parse_bool;
use crate::path;

/// Everything read from a root document
#[derive(Debug)]
pub struct BuildDescription {
    /// Absolute path of the root document
    pub root: PathBuf,
    pub output_dir: PathBuf,
    pub globals: GlobalOptions,
    pub solutions: Vec<Solution>,
}

/// Directory that relative paths are resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    dir: PathBuf,
}

impl Context {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Context for the contents of `file`
    pub fn for_file(file: &Path) -> Self {
        Self::new(file.parent().map(Path::to_path_buf).unwrap_or_default())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve document text against this directory.
    pub fn resolve(&self, text: &str) -> PathBuf {
        path::resolve(&self.dir, text)
    }
}

/// Parse the document at `path`.
///
/// `bindings` are the `--name=value` pairs from the command line; they are
/// applied to the document's `options` block before anything else is read.
pub fn parse_document(
    fs: &dyn FileSystem,
    path: &Path,
    bindings: &[(String, String)],
    diag: &mut Diagnostics,
) -> Result<BuildDescription> {
    let root = path::normalize(&std::path::absolute(path)?);
    info!("Building from {}", root.display());

    let text = fs.read_to_string(&root)?;
    let document = Document::parse(&text).map_err(|source| Error::Document {
        path: root.display().to_string(),
        source,
    })?;
    let element = document.root_element();

    let globals = GlobalOptions::from_document(element, bindings)?;
    let root_dir = Context::for_file(&root).dir;
    let output_dir = match child(element, "output").and_then(|o| o.attribute("path")) {
        Some(output) => path::resolve(&root_dir, output),
        None => root_dir.clone(),
    };

    let mut parser = Parser {
        fs,
        globals: &globals,
        diag,
        root_dir: root_dir.clone(),
        output_dir: output_dir.clone(),
        import_stack: vec![root.clone()],
    };
    let context = Context::new(root_dir);
    let mut solutions = Vec::new();
    for element in children(element, "solution") {
        if let Some(solution) = parser.parse_solution_element(element, &context) {
            solutions.push(solution);
        }
    }

    Ok(BuildDescription {
        root,
        output_dir,
        globals,
        solutions,
    })
}

/// Recursive-descent state shared by the element parsers
pub(crate) struct Parser<'a> {
    fs: &'a dyn FileSystem,
    globals: &'a GlobalOptions,
    diag: &'a mut Diagnostics,
    root_dir: PathBuf,
    output_dir: PathBuf,
    import_stack: Vec<PathBuf>,
}

impl<'a> Parser<'a> {
    /// Where a generated file for `name` goes, mirroring the context's
    /// position below the root document under the output directory.
    fn output_file(&self, context: &Context, name: &str, extension: &str) -> PathBuf {
        let relative = path::relative(context.dir(), &self.root_dir);
        path::normalize(
            &self
                .output_dir
                .join(relative)
                .join(format!("{}.{}", name.to_lowercase(), extension)),
        )
    }

    fn parse_solution_element(&mut self, element: Node<'_, '_>, context: &Context) -> Option<Solution> {
        let Some(name) = element.attribute("name") else {
            self.diag.error("Missing name for solution");
            return None;
        };
        let path = self.output_file(context, name, "sln");
        let mut solution = Solution::new(name, path, context.dir().to_path_buf());
        info!("Solution: {}", solution.name);
        self.parse_solution(element, context, &mut solution);
        Some(solution)
    }

    fn parse_solution(&mut self, element: Node<'_, '_>, context: &Context, solution: &mut Solution) {
        self.with_imports(element, context, |parser, imported, context| {
            parser.parse_solution(imported, context, solution)
        });

        if let Some(platforms) = child(element, "platforms") {
            for platform in children(platforms, "platform") {
                let text = text(platform);
                match crate::msvc::platform(text) {
                    Some(canonical) => {
                        debug!("Platform {}", canonical);
                        solution.add_platform(canonical);
                    }
                    None => self.diag.error(format!("Unknown platform {}", text)),
                }
            }
        }

        if let Some(targets) = child(element, "targets") {
            self.parse_targets(targets, context, solution);
        }

        if let Some(configurations) = child(element, "configurations") {
            let origin = solution.base_dir.clone();
            let owner = solution.name.clone();
            self.parse_configurations(configurations, context, &mut solution.holder, &origin, &owner);
        }

        if let Some(macros) = child(element, "macros") {
            for (name, value) in self.parse_macros(macros, context) {
                solution.macros.insert(name, value);
            }
        }

        self.parse_folder_contents(element, context, solution, None);
    }

    /// Macro definitions: element name is the macro name, text the value.
    fn parse_macros(&mut self, macros: Node<'_, '_>, context: &Context) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for element in macros.children().filter(Node::is_element) {
            let name = element.tag_name().name().to_string();
            let mut value = self.globals.expand(text(element));
            if self.bool_attribute(element, "path", false) {
                value = path::to_slash(&context.resolve(&value));
            }
            debug!("Macro {} = {}", name, value);
            out.push((name, value));
        }
        out
    }

    /// Run `parse` on the root element of every `import` child of `element`.
    fn with_imports<F>(&mut self, element: Node<'_, '_>, context: &Context, mut parse: F)
    where
        F: FnMut(&mut Self, Node<'_, '_>, &Context),
    {
        for import in children(element, "import") {
            let Some(file) = import.attribute("file") else {
                self.diag.error("Import without a file attribute");
                continue;
            };
            let path = context.resolve(&self.globals.expand(file));
            if self.import_stack.contains(&path) {
                self.diag
                    .error(format!("Import cycle: {} imports itself", path.display()));
                continue;
            }
            let Some(text) = self.load(&path) else {
                continue;
            };
            let document = match Document::parse(&text) {
                Ok(document) => document,
                Err(e) => {
                    self.diag
                        .error(format!("Failed to parse {}: {}", path.display(), e));
                    continue;
                }
            };

            let inner = Context::for_file(&path);
            debug!("Changing working directory to '{}'", inner.dir().display());
            self.import_stack.push(path);
            parse(self, document.root_element(), &inner);
            self.import_stack.pop();
            debug!("Changing back working directory to '{}'", context.dir().display());
        }
    }

    fn load(&mut self, path: &Path) -> Option<String> {
        info!("Loading {}", path.display());
        match self.fs.read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                self.diag
                    .error(format!("Could not load {}: {}", path.display(), e));
                None
            }
        }
    }

    /// Optional boolean attribute; a malformed value warns and uses `default`.
    fn bool_attribute(&mut self, element: Node<'_, '_>, name: &str, default: bool) -> bool {
        match element.attribute(name) {
            None => default,
            Some(value) => parse_bool(value.trim()).unwrap_or_else(|| {
                self.diag.warning(format!(
                    "Invalid value '{}' for attribute {} of <{}>, using {}",
                    value,
                    name,
                    element.tag_name().name(),
                    default
                ));
                default
            }),
        }
    }
}

/// Element children of `node` called `name`
pub(crate) fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// First element child of `node` called `name`
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    children(node, name).next()
}

/// Text content of an element, or `""`
pub(crate) fn text<'a>(node: Node<'a, '_>) -> &'a str {
    node.text().unwrap_or("")
}
