//! Binder recording which execution unit and protocol a model implements.

use crate::config::NoopPolicy;
use crate::core::binder::{ensure_member, Binder, BinderKind};
use crate::core::metadata::{MetadataField, ModelRecord};
use crate::core::registry::TypeRegistry;
use crate::core::types::{Family, TypeRef};
use crate::core::BindError;

/// Sets `implements_process` and `implements_protocol` on a process model.
///
/// Once a model (or one of its ancestors) implements a process or protocol,
/// the binder refuses to switch it to a different one. Re-binding the same
/// value is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implements {
    process: Option<TypeRef>,
    protocol: Option<TypeRef>,
}

impl Implements {
    /// Validate the arguments against `types`.
    ///
    /// With neither argument the binder does nothing; the registry's
    /// [`NoopPolicy`] decides whether that is accepted silently, logged, or
    /// rejected.
    pub fn new(
        types: &TypeRegistry,
        process: Option<&TypeRef>,
        protocol: Option<&TypeRef>,
    ) -> Result<Self, BindError> {
        if let Some(process) = process {
            ensure_member(types, process, Family::Process, BinderKind::Implements)?;
        }
        if let Some(protocol) = protocol {
            ensure_member(types, protocol, Family::SyncProtocol, BinderKind::Implements)?;
        }
        if process.is_none() && protocol.is_none() {
            match types.config().noop_implements {
                NoopPolicy::Allow => {}
                NoopPolicy::Warn => {
                    tracing::warn!("`implements` built without a process or protocol; it will not change anything");
                }
                NoopPolicy::Reject => {
                    return Err(BindError::InvalidArgument {
                        binder: BinderKind::Implements,
                        reason: "neither a process nor a protocol was given".into(),
                    });
                }
            }
        }
        Ok(Self {
            process: process.cloned(),
            protocol: protocol.cloned(),
        })
    }

    /// Execution unit this binder sets.
    pub const fn process(&self) -> Option<&TypeRef> {
        self.process.as_ref()
    }

    /// Protocol this binder sets.
    pub const fn protocol(&self) -> Option<&TypeRef> {
        self.protocol.as_ref()
    }

    /// Whether applying the binder leaves every record untouched.
    pub const fn is_noop(&self) -> bool {
        self.process.is_none() && self.protocol.is_none()
    }
}

/// Shorthand for [`Implements::new`].
pub fn implements(
    types: &TypeRegistry,
    process: Option<&TypeRef>,
    protocol: Option<&TypeRef>,
) -> Result<Implements, BindError> {
    Implements::new(types, process, protocol)
}

fn check_rebind(
    target: &TypeRef,
    field: MetadataField,
    existing: Option<&TypeRef>,
    requested: &TypeRef,
) -> Result<(), BindError> {
    match existing {
        Some(existing) if existing != requested => Err(BindError::Conflict {
            target: target.name().to_string(),
            field,
            existing: existing.name().to_string(),
            requested: requested.name().to_string(),
        }),
        _ => Ok(()),
    }
}

impl Binder for Implements {
    fn kind(&self) -> BinderKind {
        BinderKind::Implements
    }

    fn plan(&self, types: &TypeRegistry, target: &TypeRef) -> Result<ModelRecord, BindError> {
        let visible = types.metadata(target);
        // Both fields are checked before either is planned.
        if let Some(process) = &self.process {
            check_rebind(
                target,
                MetadataField::ImplementsProcess,
                visible.implements_process.as_ref(),
                process,
            )?;
        }
        if let Some(protocol) = &self.protocol {
            check_rebind(
                target,
                MetadataField::ImplementsProtocol,
                visible.implements_protocol.as_ref(),
                protocol,
            )?;
        }
        Ok(ModelRecord {
            implements_process: self.process.clone(),
            implements_protocol: self.protocol.clone(),
            ..ModelRecord::default()
        })
    }
}
