//! Binder abstraction and the validation helpers shared by all binders.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::metadata::ModelRecord;
use crate::core::registry::TypeRegistry;
use crate::core::types::{Family, TypeRef};
use crate::core::BindError;

/// Which binder produced an event or error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinderKind {
    /// Binds the implemented execution unit and protocol.
    Implements,
    /// Accumulates resource requirements.
    Requires,
    /// Accumulates capability tags.
    Tags,
}

impl fmt::Display for BinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implements => f.write_str("implements"),
            Self::Requires => f.write_str("requires"),
            Self::Tags => f.write_str("tags"),
        }
    }
}

/// A configured metadata transformer for process-model types.
///
/// Arguments are validated when the binder is built. A binder can then be
/// applied to any number of targets; each application is an independent
/// read-merge-write against that target's own record, driven by
/// [`TypeRegistry::bind`].
pub trait Binder {
    /// Kind of binder, for errors and audit.
    fn kind(&self) -> BinderKind;

    /// Compute the fields to write onto `target`'s own record.
    ///
    /// Called only for targets that passed the process-model gate. Must not
    /// assume anything is written until it returns `Ok`.
    fn plan(&self, types: &TypeRegistry, target: &TypeRef) -> Result<ModelRecord, BindError>;

    /// Apply this binder to `target`, returning the target handle.
    fn apply(&self, types: &mut TypeRegistry, target: &TypeRef) -> Result<TypeRef, BindError>
    where
        Self: Sized,
    {
        types.bind(self, target)
    }
}

/// Fail with [`BindError::InvalidArgument`] unless `ty` belongs to `family`.
pub(crate) fn ensure_member(
    types: &TypeRegistry,
    ty: &TypeRef,
    family: Family,
    binder: BinderKind,
) -> Result<(), BindError> {
    if types.conforms(ty, family) {
        return Ok(());
    }
    Err(BindError::InvalidArgument {
        binder,
        reason: format!(
            "`{ty}` is not a {} type (expected a subclass of `{}`)",
            family.describe(),
            family.root_name()
        ),
    })
}

/// Fail with [`BindError::InvalidTarget`] unless `target` is a process model.
pub(crate) fn ensure_process_model(
    types: &TypeRegistry,
    target: &TypeRef,
    binder: BinderKind,
) -> Result<(), BindError> {
    if types.is_process_model(target) {
        return Ok(());
    }
    Err(BindError::InvalidTarget {
        binder,
        target: target.name().to_string(),
    })
}
