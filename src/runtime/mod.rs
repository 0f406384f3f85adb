//! Surface consumed outside the binding layer: metadata snapshots and a
//! lock-guarded registry handle.

pub mod api;
pub mod shared;

pub use api::{export_json, snapshot_models, ModelSnapshot};
pub use shared::SharedRegistry;
