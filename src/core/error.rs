//! Error types for binder construction and application.

use thiserror::Error;

use super::binder::BinderKind;
use super::metadata::MetadataField;

/// Errors produced while configuring or applying binders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// Malformed binder configuration, raised before any target is touched.
    #[error("invalid argument to `{binder}`: {reason}")]
    InvalidArgument {
        /// Binder being constructed.
        binder: BinderKind,
        /// What was wrong with the argument, naming the offending value.
        reason: String,
    },
    /// The target type is not a process model.
    #[error("`{binder}` cannot target `{target}`: it is not a subclass of `AbstractProcessModel`")]
    InvalidTarget {
        /// Binder being applied.
        binder: BinderKind,
        /// Name of the rejected target type.
        target: String,
    },
    /// The target already carries a different value for a single-valued field.
    #[error(
        "process model `{target}` already implements {} `{existing}` (perhaps due to subclassing); \
         cannot rebind `{field}` to `{requested}`",
        .field.describe()
    )]
    Conflict {
        /// Name of the target type.
        target: String,
        /// Field that would have been overwritten.
        field: MetadataField,
        /// Value currently visible on the target.
        existing: String,
        /// Value the binder tried to set.
        requested: String,
    },
    /// A type with this name is already declared in the registry.
    #[error("type `{0}` is already declared")]
    DuplicateType(String),
    /// A type handle or name that the registry does not know.
    #[error("unknown type `{0}`")]
    UnknownType(String),
    /// The registry has run out of type keys.
    #[error("registry is full; cannot declare `{0}`")]
    RegistryFull(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
