//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_build(documents::MINIMAL)
//!         .with_file("src/a.cpp", "");
//!     let build = fixture.build(&[]).unwrap();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

use msvcgen::filesystem::DiskFS;
use msvcgen::orchestrator::{self, Build};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::documents;
    pub use super::TestFixture;
}

/// Build description snippets shared by several tests.
#[allow(dead_code)]
pub mod documents {
    /// One solution, one platform, one configuration, one empty project.
    pub const MINIMAL: &str = r#"<build>
  <solution name="Game">
    <platforms><platform>x64</platform></platforms>
    <configurations><configuration name="Debug"/></configurations>
    <project name="Core"/>
  </solution>
</build>"#;

    /// A global option without a default, so it must be bound.
    pub const REQUIRED_OPTION: &str = r#"<build>
  <options><option name="sdk"/></options>
  <solution name="Game"/>
</build>"#;

    /// A platform the whitelist rejects.
    pub const BAD_PLATFORM: &str = r#"<build>
  <solution name="Game">
    <platforms><platform>Z80</platform></platforms>
  </solution>
</build>"#;
}

/// A temporary directory holding a build description tree.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_build(documents::MINIMAL)
///     .with_file("core/a.cpp", "");
///
/// let mut cmd = fixture.command();
/// cmd.arg(fixture.build_path()).assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the root document `build.xml`.
    pub fn with_build(self, content: &str) -> Self {
        self.with_file("build.xml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the root document.
    pub fn build_path(&self) -> PathBuf {
        self.temp_dir.path().join("build.xml")
    }

    /// Parse and resolve the root document from disk.
    #[allow(dead_code)]
    pub fn build(&self, bindings: &[(&str, &str)]) -> msvcgen::error::Result<Build> {
        let bindings: Vec<(String, String)> = bindings
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        orchestrator::build(&DiskFS, &self.build_path(), &bindings)
    }

    /// Create a command configured to run in this fixture's directory.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("msvcgen");
        cmd.current_dir(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_build() {
        let fixture = TestFixture::new().with_build(documents::MINIMAL);
        assert!(fixture.build_path().exists());
    }

    #[test]
    fn test_fixture_with_nested_file() {
        let fixture = TestFixture::new().with_file("core/src/a.cpp", "");
        assert!(fixture.path().join("core/src/a.cpp").exists());
    }
}
