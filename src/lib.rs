//! # Process Model Binding
//!
//! Class-metadata binding and validation for process models.
//!
//! A process model is a concrete definition of how an abstract execution unit
//! behaves on a given backend. Before a compiler can pick one for a run, it
//! needs a few static facts about every candidate: which execution unit and
//! synchronization protocol it implements, which resources it requires, and
//! which free-form tags set it apart from its siblings. This crate governs what
//! metadata a model may carry and how that metadata composes when one model
//! subclasses another.
//!
//! ## Binders
//!
//! - **`Implements`**: sets the execution unit and protocol; refuses to switch
//!   either to a different value once the model or an ancestor has one.
//! - **`Requires`**: appends resource requirements, either single mandatory
//!   resources or groups of alternatives.
//! - **`Tags`**: appends capability tags, accepting flat groups.
//!
//! Binders validate their arguments when built and are applied through
//! [`core::TypeRegistry::bind`], which checks the target is a process model,
//! reads the metadata visible through the `extends` chain, and writes the
//! merged result onto the target's own record only. Parents are never
//! modified.
//!
//! ```rust
//! use process_model_binding::core::{implements, requires, tags, Binder, Family, TypeRegistry};
//!
//! let mut types = TypeRegistry::new();
//! let process = types.root(Family::Process).clone();
//! let protocol = types.root(Family::SyncProtocol).clone();
//! let resource = types.root(Family::Resource).clone();
//! let model_root = types.root(Family::ProcessModel).clone();
//!
//! let lif = types.declare("LIF", Some(&process)).unwrap();
//! let loihi = types.declare("LoihiProtocol", Some(&protocol)).unwrap();
//! let cpu = types.declare("CPU", Some(&resource)).unwrap();
//! let base = types.declare("PyLifModel", Some(&model_root)).unwrap();
//! let fixed = types.declare("PyLifModelFixed", Some(&base)).unwrap();
//!
//! implements(&types, Some(&lif), Some(&loihi)).unwrap().apply(&mut types, &base).unwrap();
//! requires(&types, [&cpu]).unwrap().apply(&mut types, &base).unwrap();
//! tags(["floating-pt"]).unwrap().apply(&mut types, &base).unwrap();
//! tags(["bit-accurate"]).unwrap().apply(&mut types, &fixed).unwrap();
//!
//! let meta = types.metadata(&fixed);
//! assert_eq!(meta.implements_process, Some(lif));
//! assert_eq!(meta.tag_list, ["floating-pt", "bit-accurate"]);
//! assert_eq!(types.metadata(&base).tag_list, ["floating-pt"]);
//! ```
//!
//! Declarative registration is available through
//! [`builders::ModelBuilder`] and [`builders::RegistryManifest`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Type handles, the registry, metadata records and the binders.
pub mod core;
/// Configuration models for binder behavior.
pub mod config;
/// Builders to declare models from code or manifests.
pub mod builders;
/// Snapshots and shared handles for downstream consumers.
pub mod runtime;
/// Shared utilities.
pub mod util;
