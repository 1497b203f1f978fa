//! Visual Studio constants: platforms and project-type identity tokens

use uuid::Uuid;

/// Platforms a solution may declare, in their canonical spelling.
pub const PLATFORMS: [&str; 4] = ["Win32", "x64", "ARM", "Any CPU"];

/// Canonical spelling of a platform name, or `None` if it is not supported.
///
/// Matching ignores case; `x86` is accepted as an alias for `Win32`.
pub fn platform(name: &str) -> Option<&'static str> {
    let name = name.trim();
    PLATFORMS
        .iter()
        .copied()
        .find(|platform| platform.eq_ignore_ascii_case(name))
        .or_else(|| name.eq_ignore_ascii_case("x86").then_some("Win32"))
}

pub const CPP_PROJECT_TYPE: Uuid = Uuid::from_u128(0x8BC9CEB8_8B4A_11D0_8D11_00A0C91BC942);
pub const CSHARP_PROJECT_TYPE: Uuid = Uuid::from_u128(0xFAE04EC0_301F_11D3_BF4B_00C04F79EFBC);
pub const FOLDER_PROJECT_TYPE: Uuid = Uuid::from_u128(0x2150E333_8FDC_42A3_9474_1A3956D46DE8);

/// Language of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Cpp,
    CSharp,
}

impl ProjectKind {
    /// Parse the `type` attribute of a project element.
    pub fn from_type(text: &str) -> Option<Self> {
        match text {
            "c++" | "cpp" => Some(ProjectKind::Cpp),
            "c#" => Some(ProjectKind::CSharp),
            _ => None,
        }
    }

    /// Kind of a foreign project file, from its extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "vcxproj" => Some(ProjectKind::Cpp),
            "csproj" => Some(ProjectKind::CSharp),
            _ => None,
        }
    }

    /// The project-type token a solution file uses for this kind
    pub fn type_guid(self) -> Uuid {
        match self {
            ProjectKind::Cpp => CPP_PROJECT_TYPE,
            ProjectKind::CSharp => CSHARP_PROJECT_TYPE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectKind::Cpp => "c++",
            ProjectKind::CSharp => "c#",
        }
    }
}

/// Braced upper-case form used by solution files.
pub fn guid_string(guid: &Uuid) -> String {
    format!("{{{}}}", guid.hyphenated()).to_uppercase()
}
