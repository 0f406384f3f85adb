//! Snapshot models handed to downstream selection and compilation.

use serde::Serialize;

use crate::core::{Family, ModelMetadata, TypeRegistry};

/// Resolved metadata of one process model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSnapshot {
    /// Model name.
    pub name: String,
    /// Direct parent name.
    pub extends: Option<String>,
    /// Metadata visible on the model.
    pub metadata: ModelMetadata,
}

/// Snapshot every process model except the family root, in declaration order.
pub fn snapshot_models(types: &TypeRegistry) -> Vec<ModelSnapshot> {
    let root = types.root(Family::ProcessModel);
    types
        .members(Family::ProcessModel)
        .into_iter()
        .filter(|model| model != root)
        .map(|model| ModelSnapshot {
            name: model.name().to_string(),
            extends: types.parent(&model).map(|p| p.name().to_string()),
            metadata: types.metadata(&model),
        })
        .collect()
}

/// Serialize all model snapshots as pretty JSON.
pub fn export_json(types: &TypeRegistry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&snapshot_models(types))
}
