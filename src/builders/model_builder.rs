//! Builder declaring a process model and applying its binders in one call.

use serde::Deserialize;

use crate::core::{
    implements, requires, tags, BindError, Binder, BinderKind, Family, ResourceArg, TagArg, TypeRef, TypeRegistry,
};

/// Resource requirement named by type name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ResourceSpec {
    /// Mandatory resource.
    One(String),
    /// Alternatives; exactly one must be satisfied.
    AnyOf(Vec<String>),
}

impl From<&str> for ResourceSpec {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for ResourceSpec {
    fn from(group: [&str; N]) -> Self {
        Self::AnyOf(group.iter().map(|name| (*name).to_string()).collect())
    }
}

impl ResourceSpec {
    fn resolve(&self, types: &TypeRegistry) -> Result<ResourceArg, BindError> {
        match self {
            Self::One(name) => types.resolve_name(name).map(ResourceArg::One),
            Self::AnyOf(names) => names
                .iter()
                .map(|name| types.resolve_name(name))
                .collect::<Result<Vec<_>, _>>()
                .map(ResourceArg::AnyOf),
        }
    }
}

/// Declares a process model by name and binds its metadata.
///
/// Every binder is built and checked against the parent's metadata before the
/// model is declared, so a failed build leaves the registry untouched.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    name: String,
    extends: Option<String>,
    process: Option<String>,
    protocol: Option<String>,
    requires: Option<Vec<ResourceSpec>>,
    tags: Option<Vec<TagArg>>,
}

impl ModelBuilder {
    /// Start a model named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name of the model being built.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent model; defaults to `AbstractProcessModel`.
    #[must_use]
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Execution unit the model implements.
    #[must_use]
    pub fn process(mut self, process: impl Into<String>) -> Self {
        self.process = Some(process.into());
        self
    }

    /// Protocol the model adheres to.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Append resource requirements.
    #[must_use]
    pub fn requires<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ResourceSpec>,
    {
        self.requires
            .get_or_insert_with(Vec::new)
            .extend(items.into_iter().map(Into::into));
        self
    }

    /// Append tags.
    #[must_use]
    pub fn tags<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TagArg>,
    {
        self.tags
            .get_or_insert_with(Vec::new)
            .extend(items.into_iter().map(Into::into));
        self
    }

    /// Declare the model in `types` and apply the configured binders.
    pub fn build(self, types: &mut TypeRegistry) -> Result<TypeRef, BindError> {
        let parent = match &self.extends {
            Some(name) => types.resolve_name(name)?,
            None => types.root(Family::ProcessModel).clone(),
        };
        let mut binders: Vec<Box<dyn Binder>> = Vec::new();
        if self.process.is_some() || self.protocol.is_some() {
            let process = self.process.as_deref().map(|n| types.resolve_name(n)).transpose()?;
            let protocol = self.protocol.as_deref().map(|n| types.resolve_name(n)).transpose()?;
            binders.push(Box::new(implements(types, process.as_ref(), protocol.as_ref())?));
        }
        if let Some(specs) = &self.requires {
            let items = specs
                .iter()
                .map(|spec| spec.resolve(types))
                .collect::<Result<Vec<_>, _>>()?;
            binders.push(Box::new(requires(types, items)?));
        }
        if let Some(items) = self.tags {
            binders.push(Box::new(tags(items)?));
        }

        if !types.is_process_model(&parent) {
            return Err(BindError::InvalidTarget {
                binder: binders.first().map_or(BinderKind::Implements, |b| b.kind()),
                target: format!("{} (extending `{parent}`)", self.name),
            });
        }

        // A fresh model sees exactly its parent's metadata, so planning against
        // the parent catches every conflict before anything is declared.
        for binder in &binders {
            binder.plan(types, &parent).map_err(|err| match err {
                BindError::Conflict {
                    field,
                    existing,
                    requested,
                    ..
                } => BindError::Conflict {
                    target: self.name.clone(),
                    field,
                    existing,
                    requested,
                },
                other => other,
            })?;
        }

        let model = types.declare(&self.name, Some(&parent))?;
        for binder in &binders {
            types.bind(binder.as_ref(), &model)?;
        }
        tracing::info!(model = %model, parent = %parent, binders = binders.len(), "process model built");
        Ok(model)
    }
}
