//! Tests for builder modules

use process_model_binding::builders::{build_registry, ModelBuilder, RegistryManifest};
use process_model_binding::config::{BindingConfig, NoopPolicy};
use process_model_binding::core::{BindError, Family, RequirementExpr, TagArg, TypeRegistry};

const MANIFEST: &str = r#"{
    "types": [
        { "name": "LIF", "extends": "AbstractProcess" },
        { "name": "LoihiProtocol", "extends": "AbstractSyncProtocol" },
        { "name": "CPU", "extends": "AbstractResource" },
        { "name": "Loihi1NeuroCore", "extends": "AbstractResource" },
        { "name": "Loihi2NeuroCore", "extends": "AbstractResource" }
    ],
    "models": [
        {
            "name": "PyLifModelFloat",
            "process": "LIF",
            "protocol": "LoihiProtocol",
            "requires": ["CPU"],
            "tags": ["floating_pt"]
        },
        {
            "name": "PyLifModelBitAcc",
            "extends": "PyLifModelFloat",
            "requires": [["Loihi1NeuroCore", "Loihi2NeuroCore"]],
            "tags": [["bit_accurate", "loihi"]]
        }
    ]
}"#;

fn catalog() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    for (name, family) in [
        ("LIF", Family::Process),
        ("Dense", Family::Process),
        ("LoihiProtocol", Family::SyncProtocol),
        ("CPU", Family::Resource),
        ("GPU", Family::Resource),
    ] {
        let root = types.root(family).clone();
        types.declare(name, Some(&root)).unwrap();
    }
    types
}

#[test]
fn test_model_builder_defaults() {
    let builder = ModelBuilder::new("PyLifModel");
    assert_eq!(builder.name(), "PyLifModel");

    let mut types = catalog();
    let model = builder.build(&mut types).unwrap();
    assert!(types.is_process_model(&model));
    assert_eq!(types.parent(&model).as_ref(), Some(types.root(Family::ProcessModel)));
    assert!(types.own_record(&model).unwrap().is_empty());
}

#[test]
fn test_model_builder_applies_all_binders() {
    let mut types = catalog();
    let model = ModelBuilder::new("PyLifModel")
        .process("LIF")
        .protocol("LoihiProtocol")
        .requires(["CPU"])
        .requires([["GPU", "CPU"]])
        .tags(["floating_pt"])
        .tags([TagArg::from(vec!["cpu", "python"])])
        .build(&mut types)
        .unwrap();

    let meta = types.metadata(&model);
    assert_eq!(meta.implements_process.unwrap().name(), "LIF");
    assert_eq!(meta.implements_protocol.unwrap().name(), "LoihiProtocol");
    assert_eq!(meta.required_resources.len(), 2);
    assert!(meta.required_resources[0].is_mandatory());
    assert_eq!(meta.tag_list, ["floating_pt", "cpu", "python"]);
}

#[test]
fn test_model_builder_invalid_argument_declares_nothing() {
    let mut types = catalog();
    let before = types.len();
    let err = ModelBuilder::new("Broken")
        .process("CPU")
        .build(&mut types)
        .unwrap_err();
    assert!(matches!(err, BindError::InvalidArgument { .. }));
    assert_eq!(types.len(), before);
    assert!(types.lookup("Broken").is_none());
}

#[test]
fn test_model_builder_unknown_names() {
    let mut types = catalog();
    let err = ModelBuilder::new("Orphan").extends("Missing").build(&mut types).unwrap_err();
    assert_eq!(err, BindError::UnknownType("Missing".to_string()));

    let err = ModelBuilder::new("NeedsTpu").requires(["TPU"]).build(&mut types).unwrap_err();
    assert_eq!(err, BindError::UnknownType("TPU".to_string()));
}

#[test]
fn test_model_builder_rejects_non_model_parent() {
    let mut types = catalog();
    let err = ModelBuilder::new("Odd")
        .extends("CPU")
        .tags(["x"])
        .build(&mut types)
        .unwrap_err();
    assert!(matches!(err, BindError::InvalidTarget { .. }));
    assert!(types.lookup("Odd").is_none());
}

#[test]
fn test_model_builder_conflict_with_parent() {
    let mut types = catalog();
    ModelBuilder::new("Base").process("LIF").build(&mut types).unwrap();
    let err = ModelBuilder::new("Child")
        .extends("Base")
        .process("Dense")
        .build(&mut types)
        .unwrap_err();
    match err {
        BindError::Conflict { target, existing, requested, .. } => {
            assert_eq!(target, "Child");
            assert_eq!(existing, "LIF");
            assert_eq!(requested, "Dense");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(types.lookup("Child").is_none());

    let child = ModelBuilder::new("Child")
        .extends("Base")
        .process("LIF")
        .tags(["retry"])
        .build(&mut types)
        .unwrap();
    assert_eq!(types.metadata(&child).tag_list, ["retry"]);
}

#[test]
fn test_model_builder_uses_configured_audit_capacity() {
    let mut types = TypeRegistry::with_config(BindingConfig {
        audit_capacity: 2,
        ..BindingConfig::default()
    });
    let sink = types.attach_memory_audit();
    let root = types.root(Family::Process).clone();
    types.declare("LIF", Some(&root)).unwrap();
    ModelBuilder::new("PyLifModel")
        .process("LIF")
        .tags(["a"])
        .build(&mut types)
        .unwrap();
    ModelBuilder::new("PyLifModelFixed")
        .extends("PyLifModel")
        .tags(["b"])
        .build(&mut types)
        .unwrap();

    let events = sink.lock().events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].target, "PyLifModel");
    assert_eq!(events[1].target, "PyLifModelFixed");
}

#[test]
fn test_manifest_builds_registry() {
    let manifest = RegistryManifest::from_json_str(MANIFEST).unwrap();
    let types = build_registry(&manifest, BindingConfig::default()).unwrap();

    let child = types.lookup("PyLifModelBitAcc").unwrap();
    let meta = types.metadata(&child);
    assert_eq!(meta.implements_process.as_ref().map(|p| p.name()), Some("LIF"));
    assert_eq!(meta.tag_list, ["floating_pt", "bit_accurate", "loihi"]);
    assert_eq!(meta.required_resources.len(), 2);
    match &meta.required_resources[1] {
        RequirementExpr::AlternativeGroup(group) => {
            let names: Vec<&str> = group.iter().map(|r| r.name()).collect();
            assert_eq!(names, ["Loihi1NeuroCore", "Loihi2NeuroCore"]);
        }
        other => panic!("expected alternative group, got {other:?}"),
    }

    let parent = types.lookup("PyLifModelFloat").unwrap();
    assert_eq!(types.metadata(&parent).tag_list, ["floating_pt"]);
}

#[test]
fn test_manifest_duplicate_names() {
    let json = r#"{
        "types": [{ "name": "CPU", "extends": "AbstractResource" }],
        "models": [{ "name": "CPU" }]
    }"#;
    let err = RegistryManifest::from_json_str(json).unwrap_err();
    assert!(err.contains("CPU"), "{err}");
}

#[test]
fn test_manifest_nested_tags_rejected() {
    let json = r#"{ "models": [{ "name": "Deep", "tags": [["a", ["b"]]] }] }"#;
    let manifest = RegistryManifest::from_json_str(json).unwrap();
    let err = build_registry(&manifest, BindingConfig::default()).unwrap_err();
    assert!(matches!(err, BindError::InvalidArgument { .. }));
}

#[test]
fn test_manifest_honors_noop_policy() {
    let manifest = RegistryManifest::from_json_str(r#"{ "models": [{ "name": "Empty" }] }"#).unwrap();
    let config = BindingConfig {
        noop_implements: NoopPolicy::Reject,
        ..BindingConfig::default()
    };
    // No implements binder is built for a model without process or protocol.
    let types = build_registry(&manifest, config).unwrap();
    assert!(types.lookup("Empty").is_some());
}
