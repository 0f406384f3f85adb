//! Type registry holding declarations, the `extends` relation and the metadata
//! side table.
//!
//! The registry stands in for a runtime type system: downstream users declare
//! execution units, protocols, resources and process models under the four
//! family roots, and binders read and write the per-type [`ModelRecord`]s kept
//! here. A record is only ever written onto the type a binder is applied to.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::config::BindingConfig;
use crate::core::audit::{build_binding_event, AuditSink, BindingOutcome, InMemoryAuditSink};
use crate::core::binder::{ensure_process_model, Binder};
use crate::core::metadata::{ModelMetadata, ModelRecord};
use crate::core::types::{Family, TypeKey, TypeRef};
use crate::core::BindError;

struct TypeEntry {
    handle: TypeRef,
    parent: Option<TypeKey>,
    record: ModelRecord,
}

/// Registry of declared types and their own metadata records.
pub struct TypeRegistry {
    id: Uuid,
    entries: Vec<TypeEntry>,
    by_name: HashMap<Arc<str>, TypeKey>,
    roots: [TypeRef; 4],
    config: BindingConfig,
    audit: Option<Arc<Mutex<dyn AuditSink>>>,
}

// The four family roots are declared on construction, so a registry is never empty.
#[allow(clippy::len_without_is_empty)]
impl TypeRegistry {
    /// Create a registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BindingConfig::default())
    }

    /// Create a registry with the four family roots declared.
    pub fn with_config(config: BindingConfig) -> Self {
        let id = Uuid::new_v4();
        let mut entries = Vec::with_capacity(Family::ALL.len());
        let mut by_name = HashMap::new();
        for (index, family) in Family::ALL.iter().enumerate() {
            let name: Arc<str> = Arc::from(family.root_name());
            #[allow(clippy::cast_possible_truncation)]
            let key = TypeKey(index as u32);
            by_name.insert(Arc::clone(&name), key);
            entries.push(TypeEntry {
                handle: TypeRef::new(id, key, name),
                parent: None,
                record: ModelRecord::default(),
            });
        }
        let roots = [
            entries[Family::Process.slot()].handle.clone(),
            entries[Family::SyncProtocol.slot()].handle.clone(),
            entries[Family::Resource.slot()].handle.clone(),
            entries[Family::ProcessModel.slot()].handle.clone(),
        ];
        Self {
            id,
            entries,
            by_name,
            roots,
            config,
            audit: None,
        }
    }

    /// Attach an audit sink that records every binder application.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<Mutex<dyn AuditSink>>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Attach a bounded in-memory sink sized by the configured
    /// `audit_capacity` and return a handle to read its events.
    pub fn attach_memory_audit(&mut self) -> Arc<Mutex<InMemoryAuditSink>> {
        let sink = Arc::new(Mutex::new(InMemoryAuditSink::new(self.config.audit_capacity)));
        let shared: Arc<Mutex<dyn AuditSink>> = sink.clone();
        self.audit = Some(shared);
        sink
    }

    /// Identifier stamped on every handle this registry hands out.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Active binding configuration.
    pub const fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Root abstraction of `family`.
    pub const fn root(&self, family: Family) -> &TypeRef {
        &self.roots[family.slot()]
    }

    /// Number of declared types, roots included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Declare a new type extending `parent`, or a standalone type when
    /// `parent` is `None`.
    ///
    /// Standalone types belong to no family and are rejected by every binder.
    pub fn declare(&mut self, name: &str, parent: Option<&TypeRef>) -> Result<TypeRef, BindError> {
        if self.by_name.contains_key(name) {
            return Err(BindError::DuplicateType(name.to_string()));
        }
        let parent = match parent {
            Some(parent) => Some(self.entry(parent)?.handle.key()),
            None => None,
        };
        let key = TypeKey(
            u32::try_from(self.entries.len())
                .map_err(|_| BindError::RegistryFull(name.to_string()))?,
        );
        let name: Arc<str> = Arc::from(name);
        let handle = TypeRef::new(self.id, key, Arc::clone(&name));
        self.by_name.insert(name, key);
        self.entries.push(TypeEntry {
            handle: handle.clone(),
            parent,
            record: ModelRecord::default(),
        });
        tracing::trace!(ty = %handle, parent = ?parent, "type declared");
        Ok(handle)
    }

    /// Find a declared type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeRef> {
        self.by_name
            .get(name)
            .map(|key| self.entries[key.index()].handle.clone())
    }

    /// Find a declared type by name, failing with [`BindError::UnknownType`].
    pub fn resolve_name(&self, name: &str) -> Result<TypeRef, BindError> {
        self.lookup(name)
            .ok_or_else(|| BindError::UnknownType(name.to_string()))
    }

    /// Whether `ty` was declared by this registry.
    pub fn contains(&self, ty: &TypeRef) -> bool {
        self.entry(ty).is_ok()
    }

    /// Direct parent of `ty`.
    pub fn parent(&self, ty: &TypeRef) -> Option<TypeRef> {
        let entry = self.entry(ty).ok()?;
        entry
            .parent
            .map(|key| self.entries[key.index()].handle.clone())
    }

    /// `ty` followed by its ancestors, nearest first. Empty for foreign handles.
    pub fn ancestors(&self, ty: &TypeRef) -> Vec<TypeRef> {
        self.chain(ty)
            .into_iter()
            .map(|key| self.entries[key.index()].handle.clone())
            .collect()
    }

    /// Whether `ty` is `base` or extends it, directly or transitively.
    pub fn is_subtype(&self, ty: &TypeRef, base: &TypeRef) -> bool {
        if !self.contains(base) {
            return false;
        }
        self.chain(ty).contains(&base.key())
    }

    /// Whether `ty` belongs to `family`.
    pub fn conforms(&self, ty: &TypeRef, family: Family) -> bool {
        self.is_subtype(ty, self.root(family))
    }

    /// Whether `ty` may be targeted by binders.
    pub fn is_process_model(&self, ty: &TypeRef) -> bool {
        self.conforms(ty, Family::ProcessModel)
    }

    /// Types conforming to `family`, roots included, in declaration order.
    pub fn members(&self, family: Family) -> Vec<TypeRef> {
        self.entries
            .iter()
            .filter(|entry| self.conforms(&entry.handle, family))
            .map(|entry| entry.handle.clone())
            .collect()
    }

    /// Fields written onto `ty` itself.
    pub fn own_record(&self, ty: &TypeRef) -> Option<&ModelRecord> {
        self.entry(ty).ok().map(|entry| &entry.record)
    }

    /// Metadata visible on `ty`, resolved through its `extends` chain.
    pub fn metadata(&self, ty: &TypeRef) -> ModelMetadata {
        ModelMetadata::resolve(
            self.chain(ty)
                .into_iter()
                .map(|key| &self.entries[key.index()].record),
        )
    }

    /// Apply `binder` to `target`.
    ///
    /// Checks the target gate, lets the binder plan its increment against the
    /// currently visible metadata, then writes the increment onto the target's
    /// own record. Nothing is written when any step fails.
    pub fn bind(&mut self, binder: &dyn Binder, target: &TypeRef) -> Result<TypeRef, BindError> {
        let kind = binder.kind();
        let planned = ensure_process_model(self, target, kind).and_then(|()| binder.plan(self, target));
        match planned {
            Ok(update) => {
                let fields = update.fields();
                let entry = &mut self.entries[target.key().index()];
                entry.record.overlay(update);
                tracing::debug!(model = %target, binder = %kind, fields = ?fields, "binder applied");
                self.record_audit(target, binder, BindingOutcome::Applied, None);
                Ok(target.clone())
            }
            Err(err) => {
                tracing::warn!(model = %target, binder = %kind, error = %err, "binder rejected");
                self.record_audit(target, binder, BindingOutcome::Rejected, Some(err.to_string()));
                Err(err)
            }
        }
    }

    fn record_audit(
        &self,
        target: &TypeRef,
        binder: &dyn Binder,
        outcome: BindingOutcome,
        detail: Option<String>,
    ) {
        if let Some(audit) = self.audit.as_ref() {
            audit
                .lock()
                .record(build_binding_event(target.name(), binder.kind(), outcome, detail));
        }
    }

    fn entry(&self, ty: &TypeRef) -> Result<&TypeEntry, BindError> {
        if ty.registry_id() != self.id {
            return Err(BindError::UnknownType(ty.name().to_string()));
        }
        self.entries
            .get(ty.key().index())
            .ok_or_else(|| BindError::UnknownType(ty.name().to_string()))
    }

    fn chain(&self, ty: &TypeRef) -> Vec<TypeKey> {
        let mut keys = Vec::new();
        let mut next = self.entry(ty).ok().map(|entry| entry.handle.key());
        while let Some(key) = next {
            keys.push(key);
            next = self.entries[key.index()].parent;
        }
        keys
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("id", &self.id)
            .field("types", &self.entries.len())
            .field("config", &self.config)
            .field("audit", &self.audit.is_some())
            .finish()
    }
}
