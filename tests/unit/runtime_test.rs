//! Tests for snapshots and the shared registry handle

use process_model_binding::builders::ModelBuilder;
use process_model_binding::core::{tags, Family, TypeRegistry};
use process_model_binding::runtime::{export_json, snapshot_models, SharedRegistry};

fn registry() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    let process = types.root(Family::Process).clone();
    let resource = types.root(Family::Resource).clone();
    types.declare("LIF", Some(&process)).unwrap();
    types.declare("CPU", Some(&resource)).unwrap();
    ModelBuilder::new("PyLifModel")
        .process("LIF")
        .requires(["CPU"])
        .tags(["floating_pt"])
        .build(&mut types)
        .unwrap();
    ModelBuilder::new("PyLifModelFixed")
        .extends("PyLifModel")
        .tags(["fixed_pt"])
        .build(&mut types)
        .unwrap();
    types
}

#[test]
fn test_snapshot_models_skips_root_and_non_models() {
    let types = registry();
    let snapshots = snapshot_models(&types);
    let names: Vec<&str> = snapshots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["PyLifModel", "PyLifModelFixed"]);
    assert_eq!(snapshots[0].extends.as_deref(), Some("AbstractProcessModel"));
    assert_eq!(snapshots[1].extends.as_deref(), Some("PyLifModel"));
    assert_eq!(snapshots[1].metadata.tag_list, ["floating_pt", "fixed_pt"]);
}

#[test]
fn test_export_json_shape() {
    let types = registry();
    let json: serde_json::Value = serde_json::from_str(&export_json(&types).unwrap()).unwrap();
    let fixed = &json[1];
    assert_eq!(fixed["name"], "PyLifModelFixed");
    assert_eq!(fixed["metadata"]["implements_process"], "LIF");
    assert_eq!(fixed["metadata"]["implements_protocol"], serde_json::Value::Null);
    assert_eq!(fixed["metadata"]["required_resources"], serde_json::json!(["CPU"]));
    assert_eq!(fixed["metadata"]["tag_list"], serde_json::json!(["floating_pt", "fixed_pt"]));
}

#[test]
fn test_shared_registry_binds_and_reads() {
    let shared = SharedRegistry::new(registry());
    let model = shared.read(|types| types.lookup("PyLifModel")).unwrap();
    let binder = tags(["cpu"]).unwrap();
    shared.bind(&binder, &model).unwrap();
    assert_eq!(shared.metadata(&model).tag_list, ["floating_pt", "cpu"]);

    let fixed = shared.read(|types| types.lookup("PyLifModelFixed")).unwrap();
    assert_eq!(shared.metadata(&fixed).tag_list, ["floating_pt", "fixed_pt"]);
}
