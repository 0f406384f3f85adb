//! Binding configuration structures.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable selecting the [`NoopPolicy`].
pub const ENV_NOOP_POLICY: &str = "PM_BINDING_NOOP_POLICY";
/// Environment variable setting the audit buffer capacity.
pub const ENV_AUDIT_CAPACITY: &str = "PM_BINDING_AUDIT_CAPACITY";

/// How to treat an `implements` binder given neither a process nor a protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopPolicy {
    /// Accept silently.
    Allow,
    /// Accept and emit a warning.
    #[default]
    Warn,
    /// Fail with an invalid-argument error.
    Reject,
}

impl FromStr for NoopPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown noop policy `{other}` (expected allow, warn or reject)")),
        }
    }
}

/// Root binding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Treatment of `implements` binders without arguments.
    pub noop_implements: NoopPolicy,
    /// Number of events an in-memory audit sink keeps.
    pub audit_capacity: usize,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            noop_implements: NoopPolicy::Warn,
            audit_capacity: 1024,
        }
    }
}

impl BindingConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.audit_capacity == 0 {
            return Err("audit_capacity must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse binding configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment, loading a `.env`
    /// file first when one is present.
    pub fn from_env() -> Result<Self, String> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(format!(".env error: {e}"));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Unset variables
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(policy) = lookup(ENV_NOOP_POLICY) {
            cfg.noop_implements = policy
                .parse()
                .map_err(|e| format!("{ENV_NOOP_POLICY}: {e}"))?;
        }
        if let Some(capacity) = lookup(ENV_AUDIT_CAPACITY) {
            cfg.audit_capacity = capacity
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_AUDIT_CAPACITY}: {e}"))?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
