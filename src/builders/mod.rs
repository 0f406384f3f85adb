//! Builders to declare process models from code or from a manifest.

pub mod model_builder;
pub mod manifest_builder;

pub use model_builder::{ModelBuilder, ResourceSpec};
pub use manifest_builder::{build_registry, ModelDecl, RegistryManifest, TypeDecl};
