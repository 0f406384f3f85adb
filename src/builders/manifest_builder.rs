//! Build a registry from a declarative JSON manifest.

use std::collections::HashSet;

use serde::Deserialize;

use crate::builders::model_builder::{ModelBuilder, ResourceSpec};
use crate::config::BindingConfig;
use crate::core::{BindError, TagArg, TypeRegistry};

/// Plain type declaration: an execution unit, protocol, resource or
/// intermediate model base.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeDecl {
    /// Type name.
    pub name: String,
    /// Parent type name, e.g. `AbstractResource`.
    pub extends: String,
}

/// Process model declaration with its bindings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelDecl {
    /// Model name.
    pub name: String,
    /// Parent model; defaults to `AbstractProcessModel`.
    #[serde(default)]
    pub extends: Option<String>,
    /// Execution unit the model implements.
    #[serde(default)]
    pub process: Option<String>,
    /// Protocol the model adheres to.
    #[serde(default)]
    pub protocol: Option<String>,
    /// Resource requirements.
    #[serde(default)]
    pub requires: Option<Vec<ResourceSpec>>,
    /// Capability tags.
    #[serde(default)]
    pub tags: Option<Vec<TagArg>>,
}

impl ModelDecl {
    fn to_builder(&self) -> ModelBuilder {
        let mut builder = ModelBuilder::new(&self.name);
        if let Some(parent) = &self.extends {
            builder = builder.extends(parent);
        }
        if let Some(process) = &self.process {
            builder = builder.process(process);
        }
        if let Some(protocol) = &self.protocol {
            builder = builder.protocol(protocol);
        }
        if let Some(requires) = &self.requires {
            builder = builder.requires(requires.iter().cloned());
        }
        if let Some(tags) = &self.tags {
            builder = builder.tags(tags.iter().cloned());
        }
        builder
    }
}

/// Root manifest: types first, then models, each in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryManifest {
    /// Plain type declarations.
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    /// Process model declarations.
    #[serde(default)]
    pub models: Vec<ModelDecl>,
}

impl RegistryManifest {
    /// Check that no name is declared twice.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        let names = self
            .types
            .iter()
            .map(|t| t.name.as_str())
            .chain(self.models.iter().map(|m| m.name.as_str()));
        for name in names {
            if name.trim().is_empty() {
                return Err("declared names must not be empty".into());
            }
            if !seen.insert(name) {
                return Err(format!("`{name}` is declared more than once"));
            }
        }
        Ok(())
    }

    /// Parse a manifest from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let manifest: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        manifest.validate()?;
        Ok(manifest)
    }
}

/// Build a registry from `manifest` under `config`.
pub fn build_registry(manifest: &RegistryManifest, config: BindingConfig) -> Result<TypeRegistry, BindError> {
    let mut types = TypeRegistry::with_config(config);
    for decl in &manifest.types {
        let parent = types.resolve_name(&decl.extends)?;
        types.declare(&decl.name, Some(&parent))?;
    }
    for decl in &manifest.models {
        decl.to_builder().build(&mut types)?;
    }
    tracing::info!(
        types = manifest.types.len(),
        models = manifest.models.len(),
        "registry built from manifest"
    );
    Ok(types)
}
