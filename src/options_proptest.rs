//! Property-based tests for option values, configuration merging, file
//! rules and source classification.

#[cfg(test)]
mod proptest_tests {
    use std::path::PathBuf;

    use indexmap::IndexMap;
    use proptest::prelude::*;

    use crate::configuration::{Configuration, ConfigurationRule};
    use crate::diagnostics::Diagnostics;
    use crate::model::{Filter, Project, Target};
    use crate::msvc::ProjectKind;
    use crate::options::{self, OptionValue, Scope, OPTIMIZATION_VALUES};
    use crate::resolve::classify_sources;

    fn list_entry() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_./$()]{1,12}"
    }

    // ============================================================================
    // Configuration merge properties
    // ============================================================================

    proptest! {
        /// Property: a list inherits as child entries followed by parent entries
        #[test]
        fn list_merge_is_child_then_parent(
            child in prop::collection::vec(list_entry(), 0..5),
            parent in prop::collection::vec(list_entry(), 0..5),
        ) {
            let mut diag = Diagnostics::new();
            let mut own = Configuration::new("Debug");
            if !child.is_empty() {
                own.add_option(Scope::Compile, "PreprocessorDefinitions", &child.join(";"), &mut diag);
            }
            let mut inherited = Configuration::new("Debug");
            if !parent.is_empty() {
                inherited.add_option(Scope::Compile, "PreprocessorDefinitions", &parent.join(";"), &mut diag);
            }

            own.merge(&inherited);

            let expected: Vec<String> = child.iter().chain(parent.iter()).cloned().collect();
            match own.get_option(Scope::Compile, "PreprocessorDefinitions") {
                Some(OptionValue::List(values)) => prop_assert_eq!(values, &expected),
                None => prop_assert!(expected.is_empty()),
                Some(other) => prop_assert!(false, "unexpected value {:?}", other),
            }
        }

        /// Property: a scalar set on the child survives inheritance
        #[test]
        fn scalar_merge_keeps_child(
            child in prop::option::of(prop::sample::select(OPTIMIZATION_VALUES)),
            parent in prop::sample::select(OPTIMIZATION_VALUES),
        ) {
            let mut diag = Diagnostics::new();
            let mut own = Configuration::new("Release");
            if let Some(value) = child {
                own.add_option(Scope::Compile, "Optimization", value, &mut diag);
            }
            let mut inherited = Configuration::new("Release");
            inherited.add_option(Scope::Compile, "Optimization", parent, &mut diag);

            own.merge(&inherited);

            let expected = child.unwrap_or(parent);
            prop_assert_eq!(
                own.get_option(Scope::Compile, "Optimization"),
                Some(&OptionValue::Choice(expected))
            );
        }
    }

    // ============================================================================
    // Canonical text properties
    // ============================================================================

    proptest! {
        /// Property: the canonical text of a bool parses back to the same value
        #[test]
        fn bool_text_parses_back(value in any::<bool>()) {
            let mut diag = Diagnostics::new();
            let text = OptionValue::Bool(value).to_option_string();
            let (_, parsed) = options::parse(Scope::Compile, "SDLCheck", &text, &mut diag).unwrap();
            prop_assert_eq!(parsed, OptionValue::Bool(value));
            prop_assert!(diag.entries().is_empty());
        }

        /// Property: the canonical text of a choice parses back to the same value
        #[test]
        fn choice_text_parses_back(value in prop::sample::select(OPTIMIZATION_VALUES)) {
            let mut diag = Diagnostics::new();
            let text = OptionValue::Choice(value).to_option_string();
            let (_, parsed) = options::parse(Scope::Compile, "Optimization", &text, &mut diag).unwrap();
            prop_assert_eq!(parsed, OptionValue::Choice(value));
            prop_assert!(!diag.has_errors());
        }

        /// Property: the canonical text of a list parses back to the same entries
        #[test]
        fn list_text_parses_back(values in prop::collection::vec(list_entry(), 1..6)) {
            let mut diag = Diagnostics::new();
            let text = OptionValue::List(values.clone()).to_option_string();
            let (_, parsed) = options::parse(Scope::Link, "AdditionalDependencies", &text, &mut diag).unwrap();
            prop_assert_eq!(parsed, OptionValue::List(values));
        }
    }

    // ============================================================================
    // File rule properties
    // ============================================================================

    proptest! {
        /// Property: a literal pattern matches exactly its own path
        #[test]
        fn literal_rule_matches_itself(
            dirs in prop::collection::vec("[a-z]{1,6}", 0..3),
            file in "[a-z]{1,8}\\.(cpp|h)",
            other in "[a-z]{1,8}\\.(cpp|h)",
        ) {
            let mut parts = dirs.clone();
            parts.push(file.clone());
            let pattern = parts.join("/");
            let rule = ConfigurationRule::new(&pattern).unwrap();
            prop_assert!(rule.matches(&pattern));
            prop_assert!(rule.matches(&pattern.replace('/', "\\")));

            let mut moved = dirs;
            moved.push(other.clone());
            prop_assert_eq!(rule.matches(&moved.join("/")), other == file);
        }

        /// Property: `*` never crosses a directory separator
        #[test]
        fn star_stays_in_one_directory(dir in "[a-z]{1,6}", file in "[a-z]{1,8}") {
            let rule = ConfigurationRule::new("*.cpp").unwrap();
            let top = format!("{}.cpp", file);
            let nested = format!("{}/{}.cpp", dir, file);
            prop_assert!(rule.matches(&top));
            prop_assert!(!rule.matches(&nested));
        }
    }

    // ============================================================================
    // Classification properties
    // ============================================================================

    proptest! {
        /// Property: every source ends up in exactly one target, the first claimant
        #[test]
        fn classification_assigns_one_target(
            files in prop::collection::btree_set("[a-z]{1,6}\\.(cpp|c|h|rc|txt)", 1..10),
        ) {
            let mut targets = IndexMap::new();
            targets.insert("None".to_string(), Target::new("None"));
            let mut compile = Target::new("ClCompile");
            compile.add_extension("cpp");
            compile.add_extension("c");
            targets.insert("ClCompile".to_string(), compile);
            let mut include = Target::new("ClInclude");
            include.add_extension("h");
            include.add_extension("cpp");
            targets.insert("ClInclude".to_string(), include);

            let mut project = Project::new(
                "P",
                ProjectKind::Cpp,
                PathBuf::from("/out/p.vcxproj"),
                PathBuf::from("/src"),
            );
            let filter = project.add_filter(Filter::new("Source", PathBuf::from("/src")));
            for file in &files {
                project.include(PathBuf::from("/src").join(file), filter);
            }

            let mut diag = Diagnostics::new();
            classify_sources(&mut project, &targets, false, &mut diag);

            prop_assert!(!diag.has_errors());
            for source in project.sources.values() {
                let target = source.target.map(|id| targets[id.0].name.as_str());
                let expected = match source.path.extension().and_then(|e| e.to_str()) {
                    Some("cpp") | Some("c") => "ClCompile",
                    Some("h") => "ClInclude",
                    _ => "None",
                };
                prop_assert_eq!(target, Some(expected));
            }
        }
    }
}
