//! `configurations` blocks for solutions and projects

use std::path::Path;

use glob::Pattern;
use roxmltree::Node;

use super::{child, children, text, Context, Parser};
use crate::configuration::{Configuration, ConfigurationHolder};
use crate::options::{parse_bool, Scope};
use crate::path;

/// Which configuration of a holder an element writes into
enum Slot {
    Shared(String),
    Named(String),
}

impl Slot {
    fn entry<'h>(&self, holder: &'h mut ConfigurationHolder) -> &'h mut Configuration {
        match self {
            Slot::Shared(name) => holder.shared_entry(name),
            Slot::Named(name) => holder.configuration_entry(name),
        }
    }
}

impl<'a> Parser<'a> {
    /// Fill `holder` from a `configurations` element.
    ///
    /// `origin` is the directory of the document declaring the holder, and
    /// `owner` names the holder in the shared configuration's name.
    pub(super) fn parse_configurations(
        &mut self,
        element: Node<'_, '_>,
        context: &Context,
        holder: &mut ConfigurationHolder,
        origin: &Path,
        owner: &str,
    ) {
        self.with_imports(element, context, |parser, imported, context| {
            parser.parse_configurations(imported, context, holder, origin, owner)
        });

        if let Some(shared) = child(element, "shared") {
            let slot = Slot::Shared(format!("{}_shared", owner));
            slot.entry(holder);
            self.parse_configuration(shared, context, holder, origin, &slot);
        }

        for configuration in children(element, "configuration") {
            let Some(name) = configuration.attribute("name") else {
                self.diag
                    .error(format!("Missing name for configuration in {}", owner));
                continue;
            };
            let slot = Slot::Named(name.to_string());
            slot.entry(holder);
            self.parse_configuration(configuration, context, holder, origin, &slot);
        }
    }

    fn parse_configuration(
        &mut self,
        element: Node<'_, '_>,
        context: &Context,
        holder: &mut ConfigurationHolder,
        origin: &Path,
        slot: &Slot,
    ) {
        self.with_imports(element, context, |parser, imported, context| {
            parser.parse_configuration(imported, context, holder, origin, slot)
        });

        for option in element.children().filter(Node::is_element) {
            let tag = option.tag_name().name();
            if tag == "import" {
                continue;
            }

            if tag.eq_ignore_ascii_case("compile") {
                match option.attribute("files") {
                    Some(files) => {
                        let pattern = rule_pattern(context, origin, files);
                        match holder.find_or_create_rule(&pattern) {
                            Ok(rule) => {
                                let configuration = slot.entry(rule.holder_mut());
                                self.parse_compile_options(option, configuration);
                            }
                            Err(e) => self
                                .diag
                                .error(format!("Invalid file pattern '{}': {}", files, e)),
                        }
                    }
                    None => self.parse_compile_options(option, slot.entry(holder)),
                }
            } else if tag.eq_ignore_ascii_case("link") {
                let configuration = slot.entry(holder);
                for link in option.children().filter(Node::is_element) {
                    let value = self.globals.expand(text(link));
                    configuration.add_option(Scope::Link, link.tag_name().name(), &value, self.diag);
                }
            } else {
                let value = self.globals.expand(text(option));
                slot.entry(holder)
                    .add_option(Scope::Project, tag, &value, self.diag);
            }
        }
    }

    fn parse_compile_options(&mut self, element: Node<'_, '_>, configuration: &mut Configuration) {
        for option in element.children().filter(Node::is_element) {
            let tag = option.tag_name().name();
            let value = self.globals.expand(text(option));
            if tag == "exclude" || tag.eq_ignore_ascii_case("ExcludedFromBuild") {
                match parse_bool(value.trim()) {
                    Some(excluded) => configuration.set_excluded_from_build(excluded),
                    None => self.diag.error(format!(
                        "Invalid value '{}' for {}, expected true or false",
                        value.trim(),
                        tag
                    )),
                }
            } else {
                configuration.add_option(Scope::Compile, tag, &value, self.diag);
            }
        }
    }
}

/// Rule patterns are kept as written, `/`-separated, and matched against
/// paths relative to the holder's base. A pattern from an imported document
/// is prefixed with that document's directory relative to `origin`, escaped
/// so directory names are taken literally.
fn rule_pattern(context: &Context, origin: &Path, files: &str) -> String {
    let written = files.trim().replace('\\', "/");
    let offset = path::to_slash(&path::relative(context.dir(), origin));
    if offset.is_empty() {
        return written;
    }
    let prefixed = format!("{}/{}", Pattern::escape(&offset), written);
    path::to_slash(&path::normalize(Path::new(&prefixed)))
}
