//! `targets` block: built-in targets, custom targets, custom build steps
//! and source generators

use log::info;
use roxmltree::Node;

use super::{child, children, text, Context, Parser};
use crate::model::{CustomBuild, CustomBuildOptions, Solution, SourceGenerator};
use crate::options::parse_bool;

/// Element name and target name of the built-in targets
const BUILTIN_TARGETS: [(&str, &str); 4] = [
    ("compile", "ClCompile"),
    ("include", "ClInclude"),
    ("none", "None"),
    ("text", "Text"),
];

impl<'a> Parser<'a> {
    pub(super) fn parse_targets(&mut self, element: Node<'_, '_>, context: &Context, solution: &mut Solution) {
        self.with_imports(element, context, |parser, imported, context| {
            parser.parse_targets(imported, context, solution)
        });

        for (element_name, target_name) in BUILTIN_TARGETS {
            let mut declared = false;
            for extension in children(element, element_name) {
                solution.target_entry(target_name).add_extension(text(extension));
                declared = true;
            }
            if declared {
                let target = solution.target_entry(target_name);
                info!("Added target {}: {}", target.name, target.extensions.join(", "));
            }
        }

        for custom in children(element, "custom") {
            self.parse_custom_target(custom, context, solution);
        }
    }

    /// A `custom` target either lists extensions as its text, or has
    /// `extension`, `generate` and `build` children.
    fn parse_custom_target(&mut self, element: Node<'_, '_>, context: &Context, solution: &mut Solution) {
        let Some(name) = element.attribute("name") else {
            self.diag.error("Missing name for custom target");
            return;
        };
        let target = solution.target_entry(name);

        if let Some(definition) = element.attribute("definition") {
            target.definition = Some(context.resolve(definition));
        }

        if element.children().any(|n| n.is_element()) {
            for extension in children(element, "extension") {
                target.add_extension(text(extension));
            }

            for generate in children(element, "generate") {
                target.generators.push(SourceGenerator {
                    template: text(generate).trim().to_string(),
                    filter: generate.attribute("filter").map(str::to_string),
                });
            }

            if let Some(build) = child(element, "build") {
                let mut custom_build = CustomBuild::default();
                if let Some(shared) = child(build, "shared") {
                    custom_build.shared = Some(self.parse_custom_build_options(shared));
                }
                let blocks = build.children().filter(|n| {
                    n.is_element() && matches!(n.tag_name().name(), "configuration" | "configurations")
                });
                for block in blocks {
                    let Some(configuration) = block.attribute("name") else {
                        self.diag
                            .error(format!("Missing configuration name in build step of target {}", name));
                        continue;
                    };
                    let options = self.parse_custom_build_options(block);
                    custom_build.configurations.insert(configuration.to_string(), options);
                }
                target.build = Some(custom_build);
            }
        } else {
            target.add_extension(text(element));
        }

        info!("Added custom target {}: {}", target.name, target.extensions.join(", "));
    }

    fn parse_custom_build_options(&mut self, element: Node<'_, '_>) -> CustomBuildOptions {
        let string = |name: &'static str| child(element, name).map(|n| text(n).to_string());
        CustomBuildOptions {
            command: string("command"),
            message: string("message"),
            outputs: string("outputs"),
            inputs: string("inputs"),
            link: self.optional_bool(element, "link"),
            content: self.optional_bool(element, "content"),
        }
    }

    fn optional_bool(&mut self, element: Node<'_, '_>, name: &'static str) -> Option<bool> {
        let value = text(child(element, name)?).trim();
        match parse_bool(value) {
            Some(flag) => Some(flag),
            None => {
                self.diag
                    .error(format!("Invalid value '{}' for {}, expected true or false", value, name));
                None
            }
        }
    }
}
