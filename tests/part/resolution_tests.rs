//! Part resolution tests
//!
//! Resolution against manifests on disk: companion probing, dependency
//! manifests, cycles and load failures.

use super::test_utils::*;

use part_composer::part::registry::{DepsFileContext, DirectoryComponentLoader};
use part_composer::{DiscoveryConfig, PartError, PartGraph, PartKind, PartResolver};

fn child_names(graph: &PartGraph, name: &str) -> Vec<String> {
    let id = graph.find_by_name(name).unwrap();
    graph
        .part(id)
        .additional_parts()
        .map(|p| p.name().to_string())
        .collect()
}

fn order(graph: &PartGraph) -> Vec<String> {
    graph
        .parts_in_order()
        .into_iter()
        .map(|id| graph.node(id).name().to_string())
        .collect()
}

#[test]
fn test_companion_found_for_part_without_declarations() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("Library", &[]);
    fixture.write_part("Library.Views", &[]);

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let graph = PartResolver::new(&loader).resolve_model("Library").unwrap();

    assert_eq!(child_names(&graph, "Library"), vec!["Library.Views"]);
    let views = graph.find_by_name("Library.Views").unwrap();
    assert_eq!(
        graph.part(views).parent().map(|p| p.name()),
        Some("Library")
    );
}

#[test]
fn test_most_specific_companion_suffix_wins() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("Library", &[]);
    fixture.write_part("Library.PrecompiledViews", &[]);
    fixture.write_part("Library.Views", &[]);

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let graph = PartResolver::new(&loader).resolve_model("Library").unwrap();

    assert_eq!(child_names(&graph, "Library"), vec!["Library.PrecompiledViews"]);
    assert!(graph.find_by_name("Library.Views").is_none());
}

#[test]
fn test_unloadable_companion_is_skipped() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("Library", &[]);
    fixture.write_raw("Library.PrecompiledViews.part.toml", "this is not toml = [");
    fixture.write_part("Library.Views", &[]);

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let graph = PartResolver::new(&loader).resolve_model("Library").unwrap();

    assert_eq!(child_names(&graph, "Library"), vec!["Library.Views"]);
}

#[test]
fn test_only_unloadable_companion_means_no_companion() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("Library", &[]);
    fixture.write_raw("Library.Views.part.toml", "name = 42");

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let graph = PartResolver::new(&loader).resolve_model("Library").unwrap();

    assert_eq!(graph.len(), 1);
}

#[test]
fn test_declared_parts_disable_companion_probe() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("Library", &["Library.EmbeddedFiles"]);
    fixture.write_part("Library.EmbeddedFiles", &[]);
    fixture.write_part("Library.Views", &[]);

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let graph = PartResolver::new(&loader).resolve_model("Library").unwrap();

    assert_eq!(child_names(&graph, "Library"), vec!["Library.EmbeddedFiles"]);
}

#[test]
fn test_configure_override_reenables_companion_probe() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_configured_part("Library", &["Library.EmbeddedFiles"], "null");
    fixture.write_part("Library.EmbeddedFiles", &[]);
    fixture.write_part("Library.Views", &[]);

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let graph = PartResolver::new(&loader).resolve_model("Library").unwrap();

    assert_eq!(
        child_names(&graph, "Library"),
        vec!["Library.EmbeddedFiles", "Library.Views"]
    );
}

#[test]
fn test_configured_suffix_companion_is_compiled_resources() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("Lib", &[]);
    fixture.write_part("Lib.Assets", &[]);
    fixture.write_part("Lib.Views", &[]);

    let mut discovery = DiscoveryConfig::default();
    discovery.companion_suffixes = vec![".Assets".to_string()];
    let loader = DirectoryComponentLoader::with_config(fixture.parts_dir(), &discovery);
    let graph = PartResolver::with_config(&loader, &discovery)
        .resolve_model("Lib")
        .unwrap();

    assert_eq!(child_names(&graph, "Lib"), vec!["Lib.Assets"]);
    let assets = graph.find_by_name("Lib.Assets").unwrap();
    assert_eq!(
        graph.part(assets).to_application_part().kind(),
        PartKind::CompiledResources
    );
    let lib = graph.find_by_name("Lib").unwrap();
    assert_eq!(
        graph.part(lib).to_application_part().kind(),
        PartKind::Component
    );
}

#[test]
fn test_entry_point_links_dependency_manifest() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("App", &[]);
    fixture.write_part("App.Views", &[]);
    fixture.write_part("ClassLib1", &["ModuleComponent", "Component1"]);
    fixture.write_part("ClassLib2", &[]);
    fixture.write_part("Component1", &[]);
    fixture.write_part("ModuleComponent", &["ThemingModule"]);
    fixture.write_part("ThemingModule", &[]);
    fixture.write_deps(
        "App",
        &["App", "Component1", "ClassLib1", "ClassLib2", "ModuleComponent"],
    );

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let deps = DepsFileContext::new();
    let graph = PartResolver::new(&loader)
        .with_dependencies(&deps)
        .resolve_entry_point("App")
        .unwrap();

    assert_eq!(graph.len(), 7);
    assert_eq!(
        child_names(&graph, "App"),
        vec![
            "App.Views",
            "Component1",
            "ClassLib1",
            "ClassLib2",
            "ModuleComponent"
        ]
    );
    assert_eq!(
        order(&graph),
        vec![
            "App",
            "ClassLib1",
            "ModuleComponent",
            "ThemingModule",
            "Component1",
            "App.Views",
            "ClassLib2",
        ]
    );
}

#[test]
fn test_cycle_across_manifests() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("A", &["B"]);
    fixture.write_part("B", &["A"]);

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let err = PartResolver::new(&loader).resolve_model("A").unwrap_err();

    match err {
        PartError::Cycle { path, .. } => assert_eq!(path, vec!["A", "B", "A"]),
        other => panic!("expected cycle, got {other}"),
    }
}

#[test]
fn test_missing_entry_point_is_load_error() {
    let fixture = PartTestFixture::new().unwrap();
    let loader = DirectoryComponentLoader::new(fixture.parts_dir());

    let err = PartResolver::new(&loader)
        .resolve_entry_point("Nowhere")
        .unwrap_err();
    assert!(matches!(err, PartError::Load { ref name, .. } if name == "Nowhere"));
}

#[test]
fn test_missing_dependency_component_is_load_error() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("App", &[]);
    fixture.write_deps("App", &["App", "Ghost"]);

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let deps = DepsFileContext::new();
    let err = PartResolver::new(&loader)
        .with_dependencies(&deps)
        .resolve_entry_point("App")
        .unwrap_err();
    assert!(matches!(err, PartError::Load { ref name, .. } if name == "Ghost"));
}

#[test]
fn test_each_pass_builds_a_fresh_graph() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("App", &["Lib"]);
    fixture.write_part("Lib", &[]);

    let loader = DirectoryComponentLoader::new(fixture.parts_dir());
    let resolver = PartResolver::new(&loader);
    let first = resolver.resolve_model("App").unwrap();

    fixture.write_part("Lib", &["Extra"]);
    fixture.write_part("Extra", &[]);
    let second = resolver.resolve_model("App").unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 3);
}
