//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "process_model_binding=info";

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_FILTER`]. Does nothing if a global subscriber already exists.
///
/// Binder applications log at `debug`, rejections at `warn`; set
/// `RUST_LOG=process_model_binding=debug` to follow every binding.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
}
