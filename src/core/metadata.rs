//! Metadata records attached to process-model types.
//!
//! Each declared type owns a [`ModelRecord`] whose fields are only `Some` once a
//! binder has written them onto that very type. Readers see a resolved
//! [`ModelMetadata`], where every field comes from the nearest type in the
//! `extends` chain that owns it.

use std::fmt;

use serde::Serialize;

use super::types::TypeRef;

/// A resource requirement of a process model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RequirementExpr {
    /// The resource is mandatory.
    Single(TypeRef),
    /// Exactly one member of the group must be satisfied.
    AlternativeGroup(Vec<TypeRef>),
}

impl RequirementExpr {
    /// Resources named by this requirement, in declaration order.
    pub fn members(&self) -> &[TypeRef] {
        match self {
            Self::Single(resource) => std::slice::from_ref(resource),
            Self::AlternativeGroup(group) => group,
        }
    }

    /// Whether the requirement names a single mandatory resource.
    pub const fn is_mandatory(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Whether `resource` appears in this requirement.
    pub fn contains(&self, resource: &TypeRef) -> bool {
        self.members().contains(resource)
    }
}

impl fmt::Display for RequirementExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(resource) => write!(f, "{resource}"),
            Self::AlternativeGroup(group) => {
                f.write_str("one of [")?;
                for (i, resource) in group.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{resource}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Names of the metadata fields, used for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    /// Execution unit implemented by the model.
    ImplementsProcess,
    /// Synchronization protocol implemented by the model.
    ImplementsProtocol,
    /// Accumulated resource requirements.
    RequiredResources,
    /// Accumulated capability tags.
    TagList,
}

impl MetadataField {
    /// Field name as it appears on the record.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ImplementsProcess => "implements_process",
            Self::ImplementsProtocol => "implements_protocol",
            Self::RequiredResources => "required_resources",
            Self::TagList => "tag_list",
        }
    }

    /// What the field holds, phrased for messages.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::ImplementsProcess => "an execution unit",
            Self::ImplementsProtocol => "a synchronization protocol",
            Self::RequiredResources => "resource requirements",
            Self::TagList => "tags",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields set on one type's own record.
///
/// Also used as the increment a binder plans to write: `Some` fields replace
/// the owner's value, `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelRecord {
    /// Execution unit, if set on this type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implements_process: Option<TypeRef>,
    /// Synchronization protocol, if set on this type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implements_protocol: Option<TypeRef>,
    /// Requirements, if bound on this type (inherited entries included).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_resources: Option<Vec<RequirementExpr>>,
    /// Tags, if bound on this type (inherited entries included).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_list: Option<Vec<String>>,
}

impl ModelRecord {
    /// True when no field has been written.
    pub const fn is_empty(&self) -> bool {
        self.implements_process.is_none()
            && self.implements_protocol.is_none()
            && self.required_resources.is_none()
            && self.tag_list.is_none()
    }

    /// Fields carried by this record.
    pub fn fields(&self) -> Vec<MetadataField> {
        let mut fields = Vec::new();
        if self.implements_process.is_some() {
            fields.push(MetadataField::ImplementsProcess);
        }
        if self.implements_protocol.is_some() {
            fields.push(MetadataField::ImplementsProtocol);
        }
        if self.required_resources.is_some() {
            fields.push(MetadataField::RequiredResources);
        }
        if self.tag_list.is_some() {
            fields.push(MetadataField::TagList);
        }
        fields
    }

    pub(crate) fn overlay(&mut self, update: Self) {
        if update.implements_process.is_some() {
            self.implements_process = update.implements_process;
        }
        if update.implements_protocol.is_some() {
            self.implements_protocol = update.implements_protocol;
        }
        if update.required_resources.is_some() {
            self.required_resources = update.required_resources;
        }
        if update.tag_list.is_some() {
            self.tag_list = update.tag_list;
        }
    }
}

/// Metadata visible on a type after resolving its `extends` chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelMetadata {
    /// Execution unit the model implements.
    pub implements_process: Option<TypeRef>,
    /// Synchronization protocol the model adheres to.
    pub implements_protocol: Option<TypeRef>,
    /// Resource requirements, parent entries first.
    pub required_resources: Vec<RequirementExpr>,
    /// Capability tags, parent entries first.
    pub tag_list: Vec<String>,
}

impl ModelMetadata {
    /// Resolve metadata from own records ordered nearest first.
    pub(crate) fn resolve<'a, I>(chain: I) -> Self
    where
        I: IntoIterator<Item = &'a ModelRecord>,
    {
        let mut process = None;
        let mut protocol = None;
        let mut resources = None;
        let mut tags = None;
        for record in chain {
            process = process.or_else(|| record.implements_process.clone());
            protocol = protocol.or_else(|| record.implements_protocol.clone());
            resources = resources.or_else(|| record.required_resources.clone());
            tags = tags.or_else(|| record.tag_list.clone());
        }
        Self {
            implements_process: process,
            implements_protocol: protocol,
            required_resources: resources.unwrap_or_default(),
            tag_list: tags.unwrap_or_default(),
        }
    }

    /// Whether `tag` appears in the tag list.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_list.iter().any(|t| t == tag)
    }

    /// Whether any requirement names `resource`.
    pub fn mentions_resource(&self, resource: &TypeRef) -> bool {
        self.required_resources.iter().any(|r| r.contains(resource))
    }
}

/// Merge an inherited sequence with new entries: parent entries first, in
/// their original order, then the additions. Nothing is removed or deduplicated.
pub fn accumulate<T: Clone>(inherited: &[T], additions: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(inherited.len() + additions.len());
    merged.extend_from_slice(inherited);
    merged.extend_from_slice(additions);
    merged
}
