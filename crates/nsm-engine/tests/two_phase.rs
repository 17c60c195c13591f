//! End-to-end coverage of the two-stage rename over in-memory files.

use nsm_ast_api::source_unit::SourceUnit;
use nsm_engine::{MigrationEngine, RenameMapStore, CLASSMAP_FILE_NAME};
use nsm_foundation::error::MigrateError;
use nsm_foundation::model::{ApplicationSide, LegacyPrefixRule};
use nsm_test_support::mocks::mock_file_mover;
use nsm_test_support::{
    create_test_settings, method, static_call, temp_workspace, ClassDecl, InMemorySourceUnit,
    MapReferenceRenamer, RecordingFileMover,
};
use pretty_assertions::assert_eq;
use std::path::Path;

fn example_rules() -> Vec<LegacyPrefixRule> {
    vec![LegacyPrefixRule::new("Example", "Acme\\Example")]
}

fn engine_in(dir: &Path) -> MigrationEngine {
    MigrationEngine::new(create_test_settings(example_rules(), dir))
}

#[test]
fn test_controller_is_renamed_namespaced_and_moved() {
    let dir = temp_workspace();
    let mut engine = engine_in(dir.path());
    let mut mover = RecordingFileMover::default();

    let mut unit = InMemorySourceUnit::new("admin/controllers/foobar.php")
        .with_class(ClassDecl::new("ExampleControllerFoobar"));

    let changed = engine
        .run_declaration_stage(&mut [&mut unit], &mut mover)
        .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(unit.declared_classes(), vec!["FoobarController".to_string()]);
    assert_eq!(
        unit.namespace(),
        Some("Acme\\Example\\Administrator\\Controller")
    );
    assert_eq!(mover.moves.len(), 1);
    assert_eq!(mover.moves[0].from_path, "admin/controllers/foobar.php");
    assert_eq!(
        mover.moves[0].to_path,
        "admin/src/Controller/FoobarController.php"
    );
    assert_eq!(
        engine.store().map_for(ApplicationSide::Administrator)["ExampleControllerFoobar"],
        "Acme\\Example\\Administrator\\Controller\\FoobarController"
    );
}

#[test]
fn test_legacy_display_controller_gets_canonical_leaf() {
    let dir = temp_workspace();
    let mut engine = engine_in(dir.path());
    let mut mover = RecordingFileMover::default();

    let mut unit = InMemorySourceUnit::new("admin/controller.php")
        .with_class(ClassDecl::new("ExampleController"));

    engine
        .run_declaration_stage(&mut [&mut unit], &mut mover)
        .unwrap();

    assert_eq!(unit.declared_classes(), vec!["DisplayController".to_string()]);
    assert_eq!(
        mover.moves[0].to_path,
        "admin/src/Controller/DisplayController.php"
    );
}

#[test]
fn test_same_file_reference_becomes_fully_qualified() {
    let dir = temp_workspace();
    let mut engine = engine_in(dir.path());
    let mut mover = RecordingFileMover::default();

    let mut unit = InMemorySourceUnit::new("admin/models/foobar.php")
        .with_class(ClassDecl::new("ExampleModelFoobar"))
        .with_reference("ExampleTableFoobar");

    engine
        .run_declaration_stage(&mut [&mut unit], &mut mover)
        .unwrap();

    assert_eq!(unit.declared_classes(), vec!["FoobarModel".to_string()]);
    assert_eq!(
        unit.namespace(),
        Some("Acme\\Example\\Administrator\\Model")
    );
    // The table reference shares the namespace root, so it is not an
    // ambiguity; it is rewritten to its own fully qualified name.
    assert_eq!(
        unit.references(),
        &["Acme\\Example\\Administrator\\Table\\FoobarTable".to_string()]
    );
}

#[test]
fn test_view_class_derives_leaf_from_file_name() {
    let dir = temp_workspace();
    let mut engine = engine_in(dir.path());
    let mut mover = RecordingFileMover::default();

    let mut unit = InMemorySourceUnit::new("admin/views/foobar/view.html.php")
        .with_class(ClassDecl::new("ExampleViewFoobar"));

    engine
        .run_declaration_stage(&mut [&mut unit], &mut mover)
        .unwrap();

    assert_eq!(unit.declared_classes(), vec!["HtmlView".to_string()]);
    assert_eq!(
        unit.namespace(),
        Some("Acme\\Example\\Administrator\\View\\Foobar")
    );
    assert_eq!(
        mover.moves[0].to_path,
        "admin/src/View/Foobar/HtmlView.php"
    );
}

#[test]
fn test_excluded_name_is_left_alone() {
    let dir = temp_workspace();
    let rules = vec![
        LegacyPrefixRule::new("Example", "Acme\\Example").with_excluded(["ExampleModelFoobar"])
    ];
    let mut engine = MigrationEngine::new(create_test_settings(rules, dir.path()));
    let mut mover = mock_file_mover();
    mover.expect_move_file().never();

    let mut unit = InMemorySourceUnit::new("admin/models/foobar.php")
        .with_class(ClassDecl::new("ExampleModelFoobar"));

    let changed = engine
        .run_declaration_stage(&mut [&mut unit], &mut mover)
        .unwrap();

    assert_eq!(changed, 0);
    assert_eq!(unit.declared_classes(), vec!["ExampleModelFoobar".to_string()]);
    assert_eq!(unit.namespace(), None);
    assert!(engine.store().is_empty());
}

#[test]
fn test_conflicting_namespace_roots_abort_the_stage() {
    let dir = temp_workspace();
    let rules = vec![
        LegacyPrefixRule::new("Example", "Acme\\Example"),
        LegacyPrefixRule::new("Other", "Vendor\\Other"),
    ];
    let mut engine = MigrationEngine::new(create_test_settings(rules, dir.path()));
    let mut mover = RecordingFileMover::default();

    // One file, two rules deriving under different roots.
    let mut conflicted = InMemorySourceUnit::new("admin/models/foobar.php")
        .with_class(ClassDecl::new("ExampleModelFoobar"))
        .with_reference("OtherModelBaz");
    let mut untouched = InMemorySourceUnit::new("admin/models/later.php")
        .with_class(ClassDecl::new("ExampleModelLater"));

    let err = engine
        .run_declaration_stage(&mut [&mut conflicted, &mut untouched], &mut mover)
        .unwrap_err();

    assert!(matches!(err, MigrateError::AmbiguousNamespace { .. }));
    // Processing stops at the conflicting file.
    assert_eq!(untouched.declared_classes(), vec!["ExampleModelLater".to_string()]);
    // Work completed before the conflict is still checkpointed.
    let reloaded = RenameMapStore::new(dir.path());
    assert_eq!(
        reloaded.map_for(ApplicationSide::Administrator)["ExampleModelFoobar"],
        "Acme\\Example\\Administrator\\Model\\FoobarModel"
    );
}

#[test]
fn test_declaration_stage_is_idempotent() {
    let dir = temp_workspace();
    let mut engine = engine_in(dir.path());
    let mut mover = RecordingFileMover::default();

    let mut unit = InMemorySourceUnit::new("admin/controller.php")
        .with_class(ClassDecl::new("ExampleController"));

    engine
        .run_declaration_stage(&mut [&mut unit], &mut mover)
        .unwrap();
    assert_eq!(unit.declared_classes(), vec!["DisplayController".to_string()]);

    // The file now carries a namespace; the second traversal leaves it be.
    let changed = engine
        .run_declaration_stage(&mut [&mut unit], &mut mover)
        .unwrap();
    assert_eq!(changed, 0);
    assert_eq!(unit.declared_classes(), vec!["DisplayController".to_string()]);
    assert_eq!(mover.moves.len(), 1);
}

#[test]
fn test_html_helper_staticness_is_normalized() {
    let dir = temp_workspace();
    let mut engine = engine_in(dir.path());
    let mut mover = RecordingFileMover::default();

    let mut unit = InMemorySourceUnit::new("admin/helpers/html/example.php").with_class(
        ClassDecl::new("JHtmlExample")
            .abstract_class()
            .with_method(method("render", true, false, false))
            .with_method(method("inherited", true, true, true))
            .with_static_call(static_call(7, "JHtmlExample", "render", false))
            .with_static_call(static_call(8, "JHtmlExample", "render", true))
            .with_static_call(static_call(9, "SomeOtherClass", "render", false)),
    );

    engine
        .run_declaration_stage(&mut [&mut unit], &mut mover)
        .unwrap();

    assert_eq!(unit.declared_classes(), vec!["Example".to_string()]);
    assert_eq!(
        unit.namespace(),
        Some("Acme\\Example\\Administrator\\Service\\Html")
    );
    assert_eq!(
        mover.moves[0].to_path,
        "admin/src/Service/Html/Example.php"
    );

    let class = unit.class("Example").unwrap();
    assert!(!class.is_abstract);
    let render = class.methods.iter().find(|m| m.name == "render").unwrap();
    assert!(!render.is_static);
    assert!(render.has_visibility);
    // Parent-declared staticness stays untouched.
    let inherited = class.methods.iter().find(|m| m.name == "inherited").unwrap();
    assert!(inherited.is_static);
    // Only the self-call from non-static context is converted.
    assert_eq!(unit.rewritten_calls(), &[7]);
}

#[test]
fn test_reference_stage_rewrites_what_derivation_cannot() {
    let dir = temp_workspace();
    let mut settings = create_test_settings(example_rules(), dir.path());
    settings.prefer_imports = true;
    let mut engine = MigrationEngine::new(settings);
    let mut mover = RecordingFileMover::default();

    // The form rule only derives under models/rules; the consumer file's
    // reference is out of the derivation's reach and needs the map.
    let mut rule_file = InMemorySourceUnit::new("admin/models/rules/url.php")
        .with_class(ClassDecl::new("JFormRuleUrl"));
    let mut consumer = InMemorySourceUnit::new("admin/helpers/import.php")
        .with_reference("JFormRuleUrl")
        .with_import("JFormRuleUrl", None);

    let report = engine
        .run(
            &mut [&mut rule_file, &mut consumer],
            &mut mover,
            &MapReferenceRenamer,
        )
        .unwrap();

    assert_eq!(report.changed_files, 1);
    assert_eq!(report.rewritten_references, 1);
    assert_eq!(report.map_entries, 1);
    assert_eq!(
        consumer.references(),
        &["Acme\\Example\\Administrator\\Rule\\UrlRule".to_string()]
    );
    assert!(consumer.imports().is_empty());
}

#[test]
fn test_reference_stage_is_scoped_to_the_file_side() {
    let dir = temp_workspace();
    let mut engine = engine_in(dir.path());
    let mut mover = RecordingFileMover::default();

    let mut rule_file = InMemorySourceUnit::new("admin/models/rules/url.php")
        .with_class(ClassDecl::new("JFormRuleUrl"));
    // Same legacy reference, but on the site side: the admin partition
    // must not leak into it.
    let mut site_consumer = InMemorySourceUnit::new("site/helpers/import.php")
        .with_reference("JFormRuleUrl");

    engine
        .run(
            &mut [&mut rule_file, &mut site_consumer],
            &mut mover,
            &MapReferenceRenamer,
        )
        .unwrap();

    assert_eq!(site_consumer.references(), &["JFormRuleUrl".to_string()]);
}

#[test]
fn test_rename_map_survives_across_engine_instances() {
    let dir = temp_workspace();
    let mut mover = RecordingFileMover::default();

    {
        let mut engine = engine_in(dir.path());
        let mut unit = InMemorySourceUnit::new("admin/models/foobar.php")
            .with_class(ClassDecl::new("ExampleModelFoobar"));
        engine
            .run_declaration_stage(&mut [&mut unit], &mut mover)
            .unwrap();
    }
    assert!(dir.path().join(CLASSMAP_FILE_NAME).exists());

    // A later invocation picks the map back up and can run the reference
    // stage without re-deriving anything.
    let engine = engine_in(dir.path());
    let mut consumer = InMemorySourceUnit::new("admin/helpers/consumer.php")
        .with_reference("ExampleModelFoobar");
    let rewritten = engine.run_reference_stage(&mut [&mut consumer], &MapReferenceRenamer);

    assert_eq!(rewritten, 1);
    assert_eq!(
        consumer.references(),
        &["Acme\\Example\\Administrator\\Model\\FoobarModel".to_string()]
    );
}
