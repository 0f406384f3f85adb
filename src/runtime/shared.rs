//! Registry handle for hosts that register types from several threads.
//!
//! The registry itself does no locking. Wrapping it here serializes every
//! declaration and binder application behind one `parking_lot::RwLock`, so
//! applications on the same target never interleave.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{BindError, Binder, ModelMetadata, TypeRef, TypeRegistry};

/// Cloneable, thread-safe handle to a [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<TypeRegistry>>,
}

impl SharedRegistry {
    /// Wrap a registry.
    pub fn new(types: TypeRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(types)),
        }
    }

    /// Declare a type under the write lock.
    pub fn declare(&self, name: &str, parent: Option<&TypeRef>) -> Result<TypeRef, BindError> {
        self.inner.write().declare(name, parent)
    }

    /// Apply a binder under the write lock.
    pub fn bind(&self, binder: &dyn Binder, target: &TypeRef) -> Result<TypeRef, BindError> {
        self.inner.write().bind(binder, target)
    }

    /// Resolved metadata of `ty`.
    pub fn metadata(&self, ty: &TypeRef) -> ModelMetadata {
        self.inner.read().metadata(ty)
    }

    /// Run `f` with shared access, e.g. to build binders.
    pub fn read<R>(&self, f: impl FnOnce(&TypeRegistry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access.
    pub fn write<R>(&self, f: impl FnOnce(&mut TypeRegistry) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl std::fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedRegistry").field(&*self.inner.read()).finish()
    }
}
