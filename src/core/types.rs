//! Type handles and the reference-type families binders validate against.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Dense index of a type inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeKey(pub(crate) u32);

impl TypeKey {
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a type declared in a [`TypeRegistry`](super::TypeRegistry).
///
/// Two handles are equal when they point at the same declaration of the same
/// registry; the name is carried along for diagnostics and serialization.
#[derive(Clone)]
pub struct TypeRef {
    registry: Uuid,
    key: TypeKey,
    name: Arc<str>,
}

impl TypeRef {
    pub(crate) const fn new(registry: Uuid, key: TypeKey, name: Arc<str>) -> Self {
        Self {
            registry,
            key,
            name,
        }
    }

    /// Declared name of the type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the type within its registry.
    pub const fn key(&self) -> TypeKey {
        self.key
    }

    /// Identifier of the registry that declared this type.
    pub const fn registry_id(&self) -> Uuid {
        self.registry
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.registry == other.registry && self.key == other.key
    }
}

impl Eq for TypeRef {}

impl std::hash::Hash for TypeRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.registry.hash(state);
        self.key.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({}#{})", self.name, self.key.0)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// Capability sets a type can conform to.
///
/// Every family is rooted at an abstract type that each registry declares up
/// front; a type belongs to the family when it extends that root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Abstract execution units.
    Process,
    /// Synchronization protocols.
    SyncProtocol,
    /// Hardware or software resources.
    Resource,
    /// Process models, the types binders annotate.
    ProcessModel,
}

impl Family {
    /// All families, in root declaration order.
    pub const ALL: [Self; 4] = [
        Self::Process,
        Self::SyncProtocol,
        Self::Resource,
        Self::ProcessModel,
    ];

    /// Name of the root abstraction of this family.
    pub const fn root_name(self) -> &'static str {
        match self {
            Self::Process => "AbstractProcess",
            Self::SyncProtocol => "AbstractSyncProtocol",
            Self::Resource => "AbstractResource",
            Self::ProcessModel => "AbstractProcessModel",
        }
    }

    /// Human readable family name used in error messages.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Process => "execution unit",
            Self::SyncProtocol => "synchronization protocol",
            Self::Resource => "resource",
            Self::ProcessModel => "process model",
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Process => 0,
            Self::SyncProtocol => 1,
            Self::Resource => 2,
            Self::ProcessModel => 3,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
