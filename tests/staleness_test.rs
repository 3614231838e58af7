//! Integration tests for the up-to-date check against real files

use projcfg_core::{
    BuildableConfiguration, ConfigurationQuery, ConfigurationSet, DocumentEvaluator, Project,
    ProjectDocument,
};
use projcfg_workspace::Fixture;
use serde_json::json;
use std::sync::Arc;

fn open(fixture: &Fixture, targets: serde_json::Value) -> ConfigurationSet {
    let path = fixture
        .write_project(&json!({
            "name": "App",
            "property_groups": [
                { "condition": " '$(Configuration)' == 'Debug' ", "properties": [] }
            ],
            "targets": targets
        }))
        .unwrap();

    let document = ProjectDocument::load_from_file(&path).unwrap();
    let project = Project::builder(fixture.path())
        .model(document.model())
        .evaluator(Arc::new(DocumentEvaluator::from_document(&document)))
        .build();
    ConfigurationSet::new(project)
}

fn targets(sources: &[&str], built: &[&str]) -> serde_json::Value {
    let items = |paths: &[&str]| -> Vec<serde_json::Value> {
        paths.iter().map(|path| json!({ "include": path })).collect()
    };
    json!({
        "CoreCompile": {},
        "SourceFilesProjectOutputGroup": { "items": items(sources) },
        "BuiltProjectOutputGroup": { "items": items(built) }
    })
}

#[test]
fn test_no_output_groups_is_up_to_date() {
    let fixture = Fixture::new().unwrap();
    fixture.touch_at("a.py", 10).unwrap();

    let set = open(&fixture, json!({}));
    assert!(set.configuration("Debug").unwrap().output_groups().is_empty());
    assert!(set.is_up_to_date("Debug").unwrap());
}

#[test]
fn test_only_input_outputs_is_up_to_date() {
    let fixture = Fixture::new().unwrap();
    fixture.touch_at("a.py", 10).unwrap();

    let set = open(&fixture, targets(&["a.py"], &[]));
    assert!(set.is_up_to_date("Debug").unwrap());
}

#[test]
fn test_missing_output_forces_rebuild() {
    let fixture = Fixture::new().unwrap();
    fixture.touch_at("a.py", 10).unwrap();

    let set = open(&fixture, targets(&["a.py"], &["out.bin"]));
    assert!(!set.is_up_to_date("Debug").unwrap());
}

#[test]
fn test_output_times_against_input_times() {
    let fixture = Fixture::new().unwrap();
    let set = open(&fixture, targets(&["a.py"], &["out.bin"]));
    let config = set.configuration("Debug").unwrap();

    fixture.touch_at("a.py", 10).unwrap();
    fixture.touch_at("out.bin", 20).unwrap();
    assert!(config.is_up_to_date());

    fixture.touch_at("out.bin", 10).unwrap();
    assert!(config.is_up_to_date());

    fixture.touch_at("out.bin", 5).unwrap();
    assert!(!config.is_up_to_date());
}

#[test]
fn test_output_that_is_also_an_input_is_skipped() {
    let fixture = Fixture::new().unwrap();
    fixture.touch_at("a.py", 10).unwrap();
    fixture.touch_at("data/table.csv", 5).unwrap();
    fixture.touch_at("out.bin", 20).unwrap();

    // Folding table.csv (5) into the earliest output time would make a.py (10) look newer.
    let set = open(
        &fixture,
        targets(&["a.py", "data/table.csv"], &["out.bin", "data/../data/table.csv"]),
    );
    assert!(set.is_up_to_date("Debug").unwrap());
}

#[test]
fn test_source_file_metadata_newer_than_output() {
    let fixture = Fixture::new().unwrap();
    fixture.touch_at("src/a.c", 30).unwrap();
    fixture.touch_at("obj/a.o", 20).unwrap();

    let set = open(
        &fixture,
        json!({
            "CoreCompile": {},
            "BuiltProjectOutputGroup": {
                "items": [ { "include": "obj/a.o", "metadata": { "SourceFile": "src/a.c" } } ]
            }
        }),
    );
    assert!(!set.is_up_to_date("Debug").unwrap());

    fixture.touch_at("obj/a.o", 40).unwrap();
    assert!(set.is_up_to_date("Debug").unwrap());
}

#[test]
fn test_failed_target_leaves_group_empty() {
    let fixture = Fixture::new().unwrap();
    fixture.touch_at("a.py", 10).unwrap();

    let set = open(
        &fixture,
        json!({
            "CoreCompile": {},
            "SourceFilesProjectOutputGroup": { "items": [ { "include": "a.py" } ] },
            "BuiltProjectOutputGroup": { "fails": true, "items": [ { "include": "out.bin" } ] }
        }),
    );
    let config = set.configuration("Debug").unwrap();
    let built = config.open_output_group("Built").unwrap();

    assert!(built.outputs().is_empty());
    assert!(built.key_output().is_none());
    assert!(config.is_up_to_date());
}
