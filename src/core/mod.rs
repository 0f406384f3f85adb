//! Core binding abstractions: type handles, the registry and the three binders.

pub mod error;
pub mod types;
pub mod metadata;
pub mod registry;
pub mod binder;
pub mod implements;
pub mod requires;
pub mod tags;
pub mod audit;

pub use error::{AppResult, BindError};
pub use types::{Family, TypeKey, TypeRef};
pub use metadata::{accumulate, MetadataField, ModelMetadata, ModelRecord, RequirementExpr};
pub use registry::TypeRegistry;
pub use binder::{Binder, BinderKind};
pub use implements::{implements, Implements};
pub use requires::{requires, Requires, ResourceArg};
pub use tags::{tags, TagArg, Tags};
pub use audit::{
    build_binding_event, AuditSink, BindingEvent, BindingOutcome, InMemoryAuditSink, JsonLinesAuditSink,
};
