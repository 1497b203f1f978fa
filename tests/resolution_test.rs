//! Integration tests for parsing and resolving build descriptions on disk.
//!
//! Each test lays out a document tree in a temporary directory and runs the
//! full pipeline through `orchestrator::build` with the disk filesystem.

mod common;

use common::prelude::*;
use msvcgen::error::Error;
use msvcgen::options::{OptionValue, Scope, WarningLevel};
use msvcgen::resolve::{has_overrides, source_configuration};

/// Targets, a filter and classification over real files
#[test]
fn test_single_compile_target_classifies_matching_files() {
    let fixture = TestFixture::new()
        .with_build(
            r#"<build>
  <solution name="Game">
    <platforms><platform>Win32</platform><platform>x64</platform></platforms>
    <targets><compile>cpp</compile></targets>
    <project name="Core" root="core">
      <filter name="Source"><include files="*.cpp"/></filter>
    </project>
  </solution>
</build>"#,
        )
        .with_file("core/a.cpp", "")
        .with_file("core/b.h", "");

    let build = fixture.build(&[]).unwrap();
    let solution = &build.description.solutions[0];
    assert_eq!(solution.platforms, vec!["Win32", "x64"]);

    let project = &solution.projects[0];
    assert_eq!(project.sources.len(), 1);
    let source = &project.sources[&fixture.path().join("core/a.cpp")];
    assert_eq!(source.target, solution.target_id("ClCompile"));
    assert!(!project.sources.contains_key(&fixture.path().join("core/b.h")));
}

#[test]
fn test_unclaimed_source_falls_back_to_none() {
    let fixture = TestFixture::new()
        .with_build(
            r#"<build>
  <solution name="Game">
    <targets><compile>cpp</compile></targets>
    <project name="Core">
      <filter name="All"><include files="*"/></filter>
    </project>
  </solution>
</build>"#,
        )
        .with_file("a.cpp", "")
        .with_file("b.h", "");

    let build = fixture.build(&[]).unwrap();
    let solution = &build.description.solutions[0];
    let project = &solution.projects[0];
    let header = &project.sources[&fixture.path().join("b.h")];
    assert_eq!(header.target, Some(solution.none_target()));
    assert!(build.diagnostics.warning_count() >= 1);
}

/// Solution configuration inherited by a project that declares none
#[test]
fn test_solution_configuration_inherited_wholesale() {
    let fixture = TestFixture::new().with_build(
        r#"<build>
  <solution name="Game">
    <configurations>
      <configuration name="Debug"><compile><WarningLevel>3</WarningLevel></compile></configuration>
    </configurations>
    <project name="Core"/>
  </solution>
</build>"#,
    );

    let build = fixture.build(&[]).unwrap();
    let project = &build.description.solutions[0].projects[0];
    let debug = project.holder.find_configuration("Debug").unwrap();
    assert_eq!(
        debug.get_option(Scope::Compile, "WarningLevel"),
        Some(&OptionValue::WarningLevel(WarningLevel::Level3))
    );
}

/// A project file rule excludes generated sources from the build
#[test]
fn test_file_rule_excludes_matching_sources() {
    let fixture = TestFixture::new()
        .with_build(
            r#"<build>
  <solution name="Game">
    <targets><compile>cpp</compile></targets>
    <configurations><configuration name="Debug"/></configurations>
    <project name="Core" root="core">
      <configurations>
        <configuration name="Debug">
          <compile files="*.generated.cpp"><ExcludedFromBuild>true</ExcludedFromBuild></compile>
        </configuration>
      </configurations>
      <filter name="Source"><include files="*.cpp"/></filter>
    </project>
  </solution>
</build>"#,
        )
        .with_file("core/foo.generated.cpp", "")
        .with_file("core/foo.cpp", "");

    let build = fixture.build(&[]).unwrap();
    let solution = &build.description.solutions[0];
    let project = &solution.projects[0];
    assert_eq!(project.sources.len(), 2);
    assert_eq!(project.holder.rules()[0].pattern(), "*.generated.cpp");

    let generated = source_configuration(solution, project, &fixture.path().join("core/foo.generated.cpp"));
    assert!(generated
        .find_configuration("Debug")
        .unwrap()
        .is_excluded_from_build());

    let plain = source_configuration(solution, project, &fixture.path().join("core/foo.cpp"));
    assert!(!plain.find_configuration("Debug").unwrap().is_excluded_from_build());
    assert!(!has_overrides(&plain));
}

/// A command-line binding flows into macro expansion
#[test]
fn test_bound_global_option_expands_in_macros() {
    let fixture = TestFixture::new().with_build(
        r#"<build>
  <options><option name="debug" default="false"/></options>
  <solution name="Game">
    <macros>
      <IsDebug>#[debug]</IsDebug>
      <IsRelease>#[!debug]</IsRelease>
    </macros>
  </solution>
</build>"#,
    );

    let build = fixture.build(&[("debug", "true")]).unwrap();
    let macros = &build.description.solutions[0].macros;
    assert_eq!(macros["IsDebug"], "true");
    assert_eq!(macros["IsRelease"], "false");

    let defaults = fixture.build(&[]).unwrap();
    assert_eq!(defaults.description.solutions[0].macros["IsDebug"], "false");
}

#[test]
fn test_unknown_option_aborts_but_siblings_are_parsed() {
    let fixture = TestFixture::new().with_build(
        r#"<build>
  <solution name="Game">
    <configurations>
      <configuration name="Debug">
        <compile>
          <Frobnicate>yes</Frobnicate>
          <SDLCheck>true</SDLCheck>
        </compile>
      </configuration>
    </configurations>
  </solution>
</build>"#,
    );

    let err = fixture.build(&[]).unwrap_err();
    assert!(matches!(err, Error::Aborted { count: 1 }));

    // The parser alone keeps the sibling option.
    let mut diag = msvcgen::diagnostics::Diagnostics::new();
    let description = msvcgen::parse::parse_document(
        &msvcgen::filesystem::DiskFS,
        &fixture.build_path(),
        &[],
        &mut diag,
    )
    .unwrap();
    assert!(diag.has_errors());
    let debug = description.solutions[0].holder.find_configuration("Debug").unwrap();
    assert_eq!(
        debug.get_option(Scope::Compile, "SDLCheck"),
        Some(&OptionValue::Bool(true))
    );
}

#[test]
fn test_required_global_option_is_fatal() {
    let fixture = TestFixture::new().with_build(documents::REQUIRED_OPTION);
    assert!(matches!(
        fixture.build(&[]).unwrap_err(),
        Error::RequiredOption { .. }
    ));
    assert!(fixture.build(&[("sdk", "10")]).is_ok());
}

#[test]
fn test_undeclared_binding_is_fatal() {
    let fixture = TestFixture::new().with_build(documents::MINIMAL);
    let err = fixture.build(&[("nope", "1")]).unwrap_err();
    assert!(matches!(err, Error::UnknownOption { name, .. } if name == "nope"));
}

#[test]
fn test_imports_relative_to_imported_file() {
    let fixture = TestFixture::new()
        .with_build(
            r#"<build>
  <output path="out"/>
  <solution name="Game">
    <import file="engine/engine.xml"/>
  </solution>
</build>"#,
        )
        .with_file(
            "engine/engine.xml",
            r#"<solution>
  <targets><compile>cpp</compile></targets>
  <project name="Engine">
    <filter name="Source" root="src"><include files="*.cpp"/></filter>
  </project>
</solution>"#,
        )
        .with_file("engine/src/render.cpp", "");

    let build = fixture.build(&[]).unwrap();
    let solution = &build.description.solutions[0];
    assert_eq!(solution.path, fixture.path().join("out/game.sln"));

    let engine = &solution.projects[0];
    assert_eq!(engine.source_root, fixture.path().join("engine"));
    assert_eq!(engine.path, fixture.path().join("out/engine/engine.vcxproj"));
    assert!(engine
        .sources
        .contains_key(&fixture.path().join("engine/src/render.cpp")));
}

#[test]
fn test_missing_import_aborts() {
    let fixture = TestFixture::new().with_build(
        r#"<build><solution name="Game"><import file="missing.xml"/></solution></build>"#,
    );
    assert!(matches!(fixture.build(&[]).unwrap_err(), Error::Aborted { .. }));
}

#[test]
fn test_external_project_identity() {
    let fixture = TestFixture::new()
        .with_build(
            r#"<build>
  <solution name="Game">
    <project external="third_party/zlib.vcxproj"/>
    <project name="App"><reference project="zlib"/></project>
  </solution>
</build>"#,
        )
        .with_file(
            "third_party/zlib.vcxproj",
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup Label="Globals">
    <ProjectGuid>{6E4F2A0B-1C2D-4E5F-8A9B-0C1D2E3F4A5B}</ProjectGuid>
    <RootNamespace>zlib</RootNamespace>
  </PropertyGroup>
</Project>"#,
        );

    let build = fixture.build(&[]).unwrap();
    let solution = &build.description.solutions[0];
    let zlib = &solution.projects[0];
    assert!(zlib.external);
    assert_eq!(zlib.name, "zlib");
    assert_eq!(
        msvcgen::msvc::guid_string(&zlib.guid),
        "{6E4F2A0B-1C2D-4E5F-8A9B-0C1D2E3F4A5B}"
    );
    assert_eq!(solution.projects[1].references[0].resolved, Some(0));
}

#[test]
fn test_generators_and_directory_filters() {
    let fixture = TestFixture::new()
        .with_build(
            r#"<build>
  <solution name="Game">
    <targets>
      <compile>cpp</compile>
      <custom name="Midl">
        <extension>idl</extension>
        <generate filter="Generated">$(FileBasename)_i.cpp</generate>
      </custom>
    </targets>
    <project name="Net">
      <filter name="Source" directories="true">
        <include files="*.idl"/>
        <include files="*.cpp"/>
      </filter>
    </project>
  </solution>
</build>"#,
        )
        .with_file("proto/api.idl", "")
        .with_file("net/socket.cpp", "");

    let build = fixture.build(&[]).unwrap();
    let solution = &build.description.solutions[0];
    let project = &solution.projects[0];

    let derived = &project.sources[&fixture.path().join("proto/api_i.cpp")];
    assert!(derived.generated);
    assert_eq!(derived.target, solution.target_id("ClCompile"));
    let generated_filter = project.find_filter("Generated").unwrap();
    assert_eq!(derived.filter, generated_filter);

    let source = project.find_filter("Source").unwrap();
    let names: Vec<&str> = project
        .filter(source)
        .sub_filters
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["Source\\proto", "Source\\net"]);
}
