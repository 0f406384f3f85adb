//! Configuration for binder behavior and auditing.

pub mod binding;

pub use binding::{BindingConfig, NoopPolicy};
