//! Tests for error types

use process_model_binding::core::{BindError, BinderKind, MetadataField};

#[test]
fn test_invalid_argument_error() {
    let err = BindError::InvalidArgument {
        binder: BinderKind::Tags,
        reason: "tag group at position 1 is empty".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "invalid argument to `tags`: tag group at position 1 is empty"
    );
}

#[test]
fn test_invalid_target_error() {
    let err = BindError::InvalidTarget {
        binder: BinderKind::Requires,
        target: "Loose".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "`requires` cannot target `Loose`: it is not a subclass of `AbstractProcessModel`"
    );
}

#[test]
fn test_conflict_error() {
    let err = BindError::Conflict {
        target: "PyLifModel".to_string(),
        field: MetadataField::ImplementsProcess,
        existing: "LIF".to_string(),
        requested: "Dense".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "process model `PyLifModel` already implements an execution unit `LIF` (perhaps due to subclassing); \
         cannot rebind `implements_process` to `Dense`"
    );
}

#[test]
fn test_registry_errors() {
    assert_eq!(
        format!("{}", BindError::DuplicateType("CPU".to_string())),
        "type `CPU` is already declared"
    );
    assert_eq!(
        format!("{}", BindError::UnknownType("GPU".to_string())),
        "unknown type `GPU`"
    );
    assert_eq!(
        format!("{}", BindError::RegistryFull("PyLifModel".to_string())),
        "registry is full; cannot declare `PyLifModel`"
    );
}

#[test]
fn test_converts_into_anyhow() {
    fn run() -> process_model_binding::core::AppResult<()> {
        Err(BindError::UnknownType("X".to_string()))?;
        Ok(())
    }
    let err = run().unwrap_err();
    assert!(err.downcast_ref::<BindError>().is_some());
}
