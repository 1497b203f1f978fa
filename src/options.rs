//! # Option Registry
//!
//! Every option that may appear inside a configuration block is known at
//! compile time. Options are grouped by the scope they are written under:
//!
//! - **Project** options land in the per-configuration property group
//!   (`ConfigurationType`, `PlatformToolset`, ...).
//! - **Compile** options are compiler settings written under `compile`.
//! - **Link** options are linker settings written under `link`.
//!
//! Each option is bound to an [`OptionKind`] that decides how its raw text is
//! parsed, how two values merge, and how a value is written back out.
//! An [`OptionKey`] is the tagged union of the three scope enums, so lookups,
//! parsing and merging are exhaustive matches instead of string tables.

use std::fmt;

use crate::diagnostics::Diagnostics;

/// The three option categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Project,
    Compile,
    Link,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Project, Scope::Compile, Scope::Link];

    pub fn label(self) -> &'static str {
        match self {
            Scope::Project => "configuration",
            Scope::Compile => "compile",
            Scope::Link => "link",
        }
    }
}

/// How an option's text is parsed, merged and serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// `true` / `false`
    Bool,
    /// One of a fixed, case-sensitive set of values
    Choice(&'static [&'static str]),
    /// Numeric level or `off`/`none`/`all`
    WarningLevel,
    /// Passed through untouched
    String,
    /// Split on newline, comma or semicolon; concatenated on merge
    List,
}

macro_rules! option_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $kind:expr,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every option of this scope, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }

            pub fn kind(self) -> OptionKind {
                match self {
                    $($name::$variant => $kind,)+
                }
            }

            /// Case-insensitive lookup by element name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.name().eq_ignore_ascii_case(name))
            }
        }
    };
}

pub const CONFIGURATION_TYPE_VALUES: &[&str] = &["Application", "StaticLibrary", "DynamicLibrary"];
pub const PLATFORM_TOOLSET_VALUES: &[&str] = &["v120", "v140", "v141", "v142", "v143"];
pub const CHARACTER_SET_VALUES: &[&str] = &["NotSet", "Unicode", "MultiByte"];
pub const DEBUG_INFORMATION_FORMAT_VALUES: &[&str] =
    &["None", "ProgramDatabase", "EditAndContinue", "OldStyle"];
pub const OPTIMIZATION_VALUES: &[&str] = &["Disabled", "MaxSpeed", "MinSpace", "Full"];
pub const FAVOR_SIZE_OR_SPEED_VALUES: &[&str] = &["Neither", "Speed", "Size"];
pub const SUBSYSTEM_VALUES: &[&str] = &["Console", "Windows"];

option_set! {
    /// Options written directly under a configuration block
    ProjectOption {
        ConfigurationType => OptionKind::Choice(CONFIGURATION_TYPE_VALUES),
        UseDebugLibraries => OptionKind::Bool,
        PlatformToolset => OptionKind::Choice(PLATFORM_TOOLSET_VALUES),
        WholeProgramOptimization => OptionKind::Bool,
        CharacterSet => OptionKind::Choice(CHARACTER_SET_VALUES),
        IntDir => OptionKind::String,
        OutDir => OptionKind::String,
    }
}

option_set! {
    /// Compiler options, written under `compile`
    CompileOption {
        WarningLevel => OptionKind::WarningLevel,
        DebugInformationFormat => OptionKind::Choice(DEBUG_INFORMATION_FORMAT_VALUES),
        Optimization => OptionKind::Choice(OPTIMIZATION_VALUES),
        FunctionLevelLinking => OptionKind::Bool,
        IntrinsicFunctions => OptionKind::Bool,
        AdditionalIncludeDirectories => OptionKind::List,
        PreprocessorDefinitions => OptionKind::List,
        PrecompiledHeader => OptionKind::Bool,
        SDLCheck => OptionKind::Bool,
        MultiProcessorCompilation => OptionKind::Bool,
        MinimalRebuild => OptionKind::Bool,
        CompileAsManaged => OptionKind::Bool,
        FavorSizeOrSpeed => OptionKind::Choice(FAVOR_SIZE_OR_SPEED_VALUES),
        TreatWarningAsError => OptionKind::Bool,
        ObjectFileName => OptionKind::String,
        ExceptionHandling => OptionKind::Bool,
    }
}

option_set! {
    /// Linker options, written under `link`
    LinkOption {
        SubSystem => OptionKind::Choice(SUBSYSTEM_VALUES),
        GenerateDebugInformation => OptionKind::Bool,
        EnableCOMDATFolding => OptionKind::Bool,
        OptimizeReferences => OptionKind::Bool,
        AdditionalDependencies => OptionKind::List,
    }
}

/// A recognized option in any scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    Project(ProjectOption),
    Compile(CompileOption),
    Link(LinkOption),
}

impl OptionKey {
    /// Find the option called `name` in `scope`.
    pub fn lookup(scope: Scope, name: &str) -> Option<OptionKey> {
        match scope {
            Scope::Project => ProjectOption::from_name(name).map(OptionKey::Project),
            Scope::Compile => CompileOption::from_name(name).map(OptionKey::Compile),
            Scope::Link => LinkOption::from_name(name).map(OptionKey::Link),
        }
    }

    /// Every option of `scope`, in declaration order.
    pub fn all(scope: Scope) -> Vec<OptionKey> {
        match scope {
            Scope::Project => ProjectOption::ALL.iter().map(|o| OptionKey::Project(*o)).collect(),
            Scope::Compile => CompileOption::ALL.iter().map(|o| OptionKey::Compile(*o)).collect(),
            Scope::Link => LinkOption::ALL.iter().map(|o| OptionKey::Link(*o)).collect(),
        }
    }

    pub fn scope(self) -> Scope {
        match self {
            OptionKey::Project(_) => Scope::Project,
            OptionKey::Compile(_) => Scope::Compile,
            OptionKey::Link(_) => Scope::Link,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OptionKey::Project(o) => o.name(),
            OptionKey::Compile(o) => o.name(),
            OptionKey::Link(o) => o.name(),
        }
    }

    pub fn kind(self) -> OptionKind {
        match self {
            OptionKey::Project(o) => o.kind(),
            OptionKey::Compile(o) => o.kind(),
            OptionKey::Link(o) => o.kind(),
        }
    }

    /// Parse raw text for this option. Bad values are reported to `diag`
    /// and replaced by a fallback; parsing itself never fails.
    pub fn parse_value(self, raw: &str, diag: &mut Diagnostics) -> OptionValue {
        let text = raw.trim();
        match self.kind() {
            OptionKind::Bool => match parse_bool(text) {
                Some(value) => OptionValue::Bool(value),
                None => {
                    diag.warning(format!(
                        "Invalid boolean value '{}' for {}, using false",
                        text,
                        self.name()
                    ));
                    OptionValue::Bool(false)
                }
            },
            OptionKind::Choice(values) => match values.iter().copied().find(|v| *v == text) {
                Some(value) => OptionValue::Choice(value),
                None => {
                    diag.error(format!(
                        "'{}' is not a valid {} value. Possible values are: {}",
                        text,
                        self.name(),
                        values.join(", ")
                    ));
                    OptionValue::Choice(values[0])
                }
            },
            OptionKind::WarningLevel => match WarningLevel::parse(text) {
                Some(level) => OptionValue::WarningLevel(level),
                None => {
                    diag.warning(format!("Unknown warning level '{}', using Level1", text));
                    OptionValue::WarningLevel(WarningLevel::Level1)
                }
            },
            OptionKind::String => OptionValue::String(raw.to_string()),
            OptionKind::List => OptionValue::List(split_list(raw)),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`parse`] when a name is not registered for a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub scope: Scope,
    pub name: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not a valid {} option (or is not supported yet)",
            self.name,
            self.scope.label()
        )
    }
}

/// Look up `name` in `scope` and parse `raw` with the option's kind.
pub fn parse(
    scope: Scope,
    name: &str,
    raw: &str,
    diag: &mut Diagnostics,
) -> std::result::Result<(OptionKey, OptionValue), UnknownOption> {
    let key = OptionKey::lookup(scope, name).ok_or_else(|| UnknownOption {
        scope,
        name: name.to_string(),
    })?;
    Ok((key, key.parse_value(raw, diag)))
}

/// Strict boolean parsing: only `true` and `false`.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Split list text on newline, comma or semicolon, dropping empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(['\n', ',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Compiler warning level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningLevel {
    TurnOffAllWarnings,
    Level1,
    Level2,
    Level3,
    Level4,
    EnableAllWarnings,
}

impl WarningLevel {
    const ALL: [WarningLevel; 6] = [
        WarningLevel::TurnOffAllWarnings,
        WarningLevel::Level1,
        WarningLevel::Level2,
        WarningLevel::Level3,
        WarningLevel::Level4,
        WarningLevel::EnableAllWarnings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WarningLevel::TurnOffAllWarnings => "TurnOffAllWarnings",
            WarningLevel::Level1 => "Level1",
            WarningLevel::Level2 => "Level2",
            WarningLevel::Level3 => "Level3",
            WarningLevel::Level4 => "Level4",
            WarningLevel::EnableAllWarnings => "EnableAllWarnings",
        }
    }

    /// Accepts `0`..`4`, `off`, `none`, `all`, and the canonical names.
    pub fn parse(text: &str) -> Option<WarningLevel> {
        if let Ok(level) = text.parse::<i64>() {
            return match level {
                0 => Some(WarningLevel::TurnOffAllWarnings),
                1 => Some(WarningLevel::Level1),
                2 => Some(WarningLevel::Level2),
                3 => Some(WarningLevel::Level3),
                4 => Some(WarningLevel::Level4),
                _ => None,
            };
        }
        match text {
            "off" | "none" => Some(WarningLevel::TurnOffAllWarnings),
            "all" => Some(WarningLevel::EnableAllWarnings),
            _ => Self::ALL.iter().copied().find(|level| level.as_str() == text),
        }
    }
}

/// A parsed option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Choice(&'static str),
    WarningLevel(WarningLevel),
    String(String),
    List(Vec<String>),
}

impl OptionValue {
    /// Combine a child value with its parent's.
    ///
    /// Lists concatenate child entries followed by parent entries; every
    /// other kind keeps the child when present.
    pub fn merged(child: Option<OptionValue>, parent: Option<&OptionValue>) -> Option<OptionValue> {
        match (child, parent) {
            (Some(OptionValue::List(mut own)), Some(OptionValue::List(inherited))) => {
                own.extend(inherited.iter().cloned());
                Some(OptionValue::List(own))
            }
            (Some(own), _) => Some(own),
            (None, inherited) => inherited.cloned(),
        }
    }

    /// Canonical text form, the inverse of parsing.
    pub fn to_option_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(value) => f.write_str(if *value { "true" } else { "false" }),
            OptionValue::Choice(value) => f.write_str(value),
            OptionValue::WarningLevel(level) => f.write_str(level.as_str()),
            OptionValue::String(value) => f.write_str(value),
            OptionValue::List(values) => f.write_str(&values.join(";")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(scope: Scope, name: &str, raw: &str) -> (OptionValue, Diagnostics) {
        let mut diag = Diagnostics::new();
        let (_, value) = parse(scope, name, raw, &mut diag).unwrap();
        (value, diag)
    }

    #[test]
    fn test_lookup_is_case_insensitive_on_names() {
        assert_eq!(
            OptionKey::lookup(Scope::Compile, "warninglevel"),
            Some(OptionKey::Compile(CompileOption::WarningLevel))
        );
        assert_eq!(
            OptionKey::lookup(Scope::Link, "SUBSYSTEM"),
            Some(OptionKey::Link(LinkOption::SubSystem))
        );
    }

    #[test]
    fn test_lookup_respects_scope() {
        assert!(OptionKey::lookup(Scope::Project, "WarningLevel").is_none());
        assert!(OptionKey::lookup(Scope::Link, "ConfigurationType").is_none());
    }

    #[test]
    fn test_unknown_option_fails() {
        let mut diag = Diagnostics::new();
        let err = parse(Scope::Compile, "Frobnicate", "yes", &mut diag).unwrap_err();
        assert_eq!(err.name, "Frobnicate");
        assert!(err.to_string().contains("not a valid compile option"));
        // The caller decides how to record it.
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_bool_parsing() {
        let (value, diag) = parse_ok(Scope::Compile, "SDLCheck", "true");
        assert_eq!(value, OptionValue::Bool(true));
        assert_eq!(diag.warning_count(), 0);

        let (value, diag) = parse_ok(Scope::Compile, "SDLCheck", "TRUE");
        assert_eq!(value, OptionValue::Bool(false));
        assert_eq!(diag.warning_count(), 1);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_choice_parsing_is_case_sensitive() {
        let (value, diag) = parse_ok(Scope::Project, "ConfigurationType", "StaticLibrary");
        assert_eq!(value, OptionValue::Choice("StaticLibrary"));
        assert!(!diag.has_errors());

        let (value, diag) = parse_ok(Scope::Project, "ConfigurationType", "staticlibrary");
        assert_eq!(value, OptionValue::Choice("Application"));
        assert!(diag.has_errors());
        let message = diag.entries()[0].message.clone();
        assert!(message.contains("Possible values are: Application, StaticLibrary, DynamicLibrary"));
    }

    #[test]
    fn test_warning_level_forms() {
        let cases = [
            ("0", WarningLevel::TurnOffAllWarnings),
            ("1", WarningLevel::Level1),
            ("3", WarningLevel::Level3),
            ("4", WarningLevel::Level4),
            ("off", WarningLevel::TurnOffAllWarnings),
            ("none", WarningLevel::TurnOffAllWarnings),
            ("all", WarningLevel::EnableAllWarnings),
            ("Level2", WarningLevel::Level2),
        ];
        for (text, expected) in cases {
            let (value, diag) = parse_ok(Scope::Compile, "WarningLevel", text);
            assert_eq!(value, OptionValue::WarningLevel(expected), "input {}", text);
            assert_eq!(diag.warning_count(), 0);
        }
    }

    #[test]
    fn test_warning_level_fallback() {
        for text in ["7", "-1", "loud"] {
            let (value, diag) = parse_ok(Scope::Compile, "WarningLevel", text);
            assert_eq!(value, OptionValue::WarningLevel(WarningLevel::Level1));
            assert_eq!(diag.warning_count(), 1);
            assert!(!diag.has_errors());
        }
    }

    #[test]
    fn test_list_parsing_splits_and_trims() {
        let (value, _) = parse_ok(
            Scope::Compile,
            "PreprocessorDefinitions",
            "WIN32;_DEBUG,\n  _CONSOLE ;;",
        );
        assert_eq!(
            value,
            OptionValue::List(vec![
                "WIN32".to_string(),
                "_DEBUG".to_string(),
                "_CONSOLE".to_string()
            ])
        );
        assert_eq!(value.to_option_string(), "WIN32;_DEBUG;_CONSOLE");
    }

    #[test]
    fn test_string_is_passthrough() {
        let (value, _) = parse_ok(Scope::Project, "OutDir", "$(SolutionDir)bin\\");
        assert_eq!(value.to_option_string(), "$(SolutionDir)bin\\");
    }

    #[test]
    fn test_merge_scalar_keeps_child() {
        let merged = OptionValue::merged(
            Some(OptionValue::Bool(true)),
            Some(&OptionValue::Bool(false)),
        );
        assert_eq!(merged, Some(OptionValue::Bool(true)));

        let merged = OptionValue::merged(None, Some(&OptionValue::Choice("Console")));
        assert_eq!(merged, Some(OptionValue::Choice("Console")));

        assert_eq!(OptionValue::merged(None, None), None);
    }

    #[test]
    fn test_merge_list_concatenates_child_first() {
        let child = OptionValue::List(vec!["A".to_string(), "B".to_string()]);
        let parent = OptionValue::List(vec!["B".to_string(), "C".to_string()]);
        let merged = OptionValue::merged(Some(child), Some(&parent)).unwrap();
        assert_eq!(merged.to_option_string(), "A;B;B;C");
    }

    #[test]
    fn test_all_options_per_scope() {
        assert_eq!(OptionKey::all(Scope::Project).len(), ProjectOption::ALL.len());
        assert_eq!(OptionKey::all(Scope::Compile).len(), 16);
        assert_eq!(OptionKey::all(Scope::Link).len(), 5);
        for scope in Scope::ALL {
            for key in OptionKey::all(scope) {
                assert_eq!(key.scope(), scope);
                assert_eq!(OptionKey::lookup(scope, key.name()), Some(key));
            }
        }
    }
}
