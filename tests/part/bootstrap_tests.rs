//! Bootstrap tests
//!
//! Full pipeline from manifests on disk to a populated part manager and
//! compiled resources feature.

use super::test_utils::*;

use part_composer::part::configure::{ConfigureOperation, NULL_OPERATION};
use part_composer::part::features::{CompiledResourcesFeature, CompiledResourcesFeatureProvider};
use part_composer::{
    OperationRegistry, PartError, PartKind, PartLoader, PartManager, PartRef,
};

fn registered(manager: &PartManager) -> Vec<(PartKind, String)> {
    manager
        .parts()
        .iter()
        .map(|p| (p.kind(), p.name().to_string()))
        .collect()
}

fn resource_fixture() -> PartTestFixture {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("App", &[]);
    fixture.write_bundle(
        "App.Views",
        &[("/Views/Home/Index.cshtml", "AppIndex")],
        &[("/Views/Home/Index.cshtml", "AppIndex")],
    );
    fixture.write_part("Lib", &[]);
    fixture.write_bundle(
        "Lib.Views",
        &[
            ("/views/home/index.cshtml", "LibIndex"),
            ("/Views/Lib/Widget.cshtml", "LibWidget"),
        ],
        &[],
    );
    fixture.write_deps("App", &["App", "Lib"]);
    fixture
}

#[test]
fn test_bootstrap_registers_parts_in_order() {
    let fixture = resource_fixture();
    let mut manager = PartManager::new();

    PartLoader::configure_parts_with_discovery(
        &mut manager,
        &fixture.config("App"),
        &OperationRegistry::with_builtins(),
    )
    .unwrap();

    // Lib brings its own bundle, so it outweighs App.Views
    assert_eq!(
        registered(&manager),
        vec![
            (PartKind::Component, "App".to_string()),
            (PartKind::Component, "Lib".to_string()),
            (PartKind::CompiledResources, "Lib.Views".to_string()),
            (PartKind::CompiledResources, "App.Views".to_string()),
        ]
    );
}

#[test]
fn test_compiled_resources_follow_registration_precedence() {
    let fixture = resource_fixture();
    let mut manager = PartManager::new();
    PartLoader::configure_parts_with_discovery(
        &mut manager,
        &fixture.config("App"),
        &OperationRegistry::with_builtins(),
    )
    .unwrap();

    let mut feature = CompiledResourcesFeature::default();
    manager.populate_feature(&CompiledResourcesFeatureProvider, &mut feature);

    assert_eq!(feature.descriptors.len(), 2);
    let index = feature.find("/Views/Home/Index.cshtml").unwrap();
    assert_eq!(index.relative_path, "/views/home/index.cshtml");
    assert_eq!(index.type_name(), Some("LibIndex"));
    assert_eq!(index.source.name(), "Lib.Views");
    assert!(feature.find("/Views/Lib/Widget.cshtml").is_some());
}

#[test]
fn test_configured_suffix_bundle_feeds_compiled_resources() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("App", &[]);
    fixture.write_bundle("App.Assets", &[("/Assets/Logo.svg", "Logo")], &[]);

    let mut config = fixture.config("App");
    config.discovery.companion_suffixes = vec![".Assets".to_string()];

    let mut manager = PartManager::new();
    PartLoader::configure_parts_with_discovery(
        &mut manager,
        &config,
        &OperationRegistry::with_builtins(),
    )
    .unwrap();

    assert_eq!(
        registered(&manager),
        vec![
            (PartKind::Component, "App".to_string()),
            (PartKind::CompiledResources, "App.Assets".to_string()),
        ]
    );

    let mut feature = CompiledResourcesFeature::default();
    manager.populate_feature(&CompiledResourcesFeatureProvider, &mut feature);
    let logo = feature.find("/assets/logo.svg").unwrap();
    assert_eq!(logo.type_name(), Some("Logo"));
    assert_eq!(logo.source.name(), "App.Assets");
}

#[test]
fn test_null_override_skips_only_that_part() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_configured_part("App", &[], NULL_OPERATION);
    fixture.write_bundle("App.Views", &[("/Views/Index.cshtml", "Index")], &[]);

    let mut manager = PartManager::new();
    PartLoader::configure_parts_with_discovery(
        &mut manager,
        &fixture.config("App"),
        &OperationRegistry::with_builtins(),
    )
    .unwrap();

    assert_eq!(
        registered(&manager),
        vec![(PartKind::CompiledResources, "App.Views".to_string())]
    );
}

#[test]
fn test_unknown_operation_fails_bootstrap() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_configured_part("App", &[], "lights-off");

    let mut manager = PartManager::new();
    let err = PartLoader::configure_parts_with_discovery(
        &mut manager,
        &fixture.config("App"),
        &OperationRegistry::with_builtins(),
    )
    .unwrap_err();

    match err {
        PartError::ConfigurationType { part, slot, operation } => {
            assert_eq!(part, "App");
            assert_eq!(slot, "Default");
            assert_eq!(operation, "lights-off");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_host_registered_operation() {
    struct ComponentsOnly;

    impl ConfigureOperation for ComponentsOnly {
        fn configure(&self, manager: &mut PartManager, part: PartRef<'_>) -> Result<(), PartError> {
            if !part.is_compiled_resources() {
                manager.add(part.to_application_part());
            }
            Ok(())
        }
    }

    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("App", &["Lib"]);
    fixture.write_configured_part("Lib", &[], "components-only");
    fixture.write_part("Lib.Views", &[]);

    let mut operations = OperationRegistry::with_builtins();
    operations.register("components-only", || Box::new(ComponentsOnly));

    let mut manager = PartManager::new();
    PartLoader::configure_parts_with_discovery(&mut manager, &fixture.config("App"), &operations)
        .unwrap();

    assert_eq!(
        registered(&manager),
        vec![
            (PartKind::Component, "App".to_string()),
            (PartKind::Component, "Lib".to_string()),
            (PartKind::CompiledResources, "Lib.Views".to_string()),
        ]
    );
}

#[test]
fn test_cycle_fails_before_any_registration() {
    let fixture = PartTestFixture::new().unwrap();
    fixture.write_part("App", &["Lib"]);
    fixture.write_part("Lib", &["App"]);

    let mut manager = PartManager::new();
    let err = PartLoader::configure_parts_with_discovery(
        &mut manager,
        &fixture.config("App"),
        &OperationRegistry::with_builtins(),
    )
    .unwrap_err();

    assert!(matches!(err, PartError::Cycle { .. }));
    assert!(manager.is_empty());
}
