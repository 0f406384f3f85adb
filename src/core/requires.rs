//! Binder accumulating the resources a process model needs.

use crate::core::binder::{ensure_member, Binder, BinderKind};
use crate::core::metadata::{accumulate, ModelRecord, RequirementExpr};
use crate::core::registry::TypeRegistry;
use crate::core::types::{Family, TypeRef};
use crate::core::BindError;

/// One argument of [`Requires`]: a mandatory resource, or a group of
/// alternatives of which exactly one must be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceArg {
    /// Mandatory resource.
    One(TypeRef),
    /// Alternatives.
    AnyOf(Vec<TypeRef>),
}

impl From<TypeRef> for ResourceArg {
    fn from(resource: TypeRef) -> Self {
        Self::One(resource)
    }
}

impl From<&TypeRef> for ResourceArg {
    fn from(resource: &TypeRef) -> Self {
        Self::One(resource.clone())
    }
}

impl From<Vec<TypeRef>> for ResourceArg {
    fn from(group: Vec<TypeRef>) -> Self {
        Self::AnyOf(group)
    }
}

impl From<&[TypeRef]> for ResourceArg {
    fn from(group: &[TypeRef]) -> Self {
        Self::AnyOf(group.to_vec())
    }
}

/// Appends requirement expressions to a model's `required_resources`.
///
/// Strictly additive: inherited requirements are kept in order and the new
/// ones follow. Duplicates are left for the consumer to sort out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requires {
    items: Vec<RequirementExpr>,
}

impl Requires {
    /// Validate every item against the resource family of `types`.
    pub fn new<I>(types: &TypeRegistry, items: I) -> Result<Self, BindError>
    where
        I: IntoIterator,
        I::Item: Into<ResourceArg>,
    {
        let items = items
            .into_iter()
            .enumerate()
            .map(|(position, item)| validate_item(types, position, item.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    /// Requirements this binder appends.
    pub fn requirements(&self) -> &[RequirementExpr] {
        &self.items
    }
}

fn validate_item(
    types: &TypeRegistry,
    position: usize,
    item: ResourceArg,
) -> Result<RequirementExpr, BindError> {
    match item {
        ResourceArg::One(resource) => {
            ensure_member(types, &resource, Family::Resource, BinderKind::Requires)?;
            Ok(RequirementExpr::Single(resource))
        }
        ResourceArg::AnyOf(group) => {
            if group.is_empty() {
                return Err(BindError::InvalidArgument {
                    binder: BinderKind::Requires,
                    reason: format!("alternative group at position {position} is empty"),
                });
            }
            for resource in &group {
                ensure_member(types, resource, Family::Resource, BinderKind::Requires)?;
            }
            Ok(RequirementExpr::AlternativeGroup(group))
        }
    }
}

/// Shorthand for [`Requires::new`].
pub fn requires<I>(types: &TypeRegistry, items: I) -> Result<Requires, BindError>
where
    I: IntoIterator,
    I::Item: Into<ResourceArg>,
{
    Requires::new(types, items)
}

impl Binder for Requires {
    fn kind(&self) -> BinderKind {
        BinderKind::Requires
    }

    fn plan(&self, types: &TypeRegistry, target: &TypeRef) -> Result<ModelRecord, BindError> {
        let inherited = types.metadata(target).required_resources;
        Ok(ModelRecord {
            required_resources: Some(accumulate(&inherited, &self.items)),
            ..ModelRecord::default()
        })
    }
}
