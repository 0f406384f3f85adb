//! Tests for configuration validation

use std::collections::HashMap;

use process_model_binding::config::{BindingConfig, NoopPolicy};
use process_model_binding::config::binding::{ENV_AUDIT_CAPACITY, ENV_NOOP_POLICY};

#[test]
fn test_binding_config_defaults() {
    let config = BindingConfig::default();
    assert_eq!(config.noop_implements, NoopPolicy::Warn);
    assert_eq!(config.audit_capacity, 1024);
    assert!(config.validate().is_ok());
}

#[test]
fn test_binding_config_invalid_capacity() {
    let invalid = BindingConfig {
        audit_capacity: 0,
        ..BindingConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_binding_config_from_json() {
    let json = r#"{
        "noop_implements": "reject",
        "audit_capacity": 16
    }"#;

    let config = BindingConfig::from_json_str(json).unwrap();
    assert_eq!(config.noop_implements, NoopPolicy::Reject);
    assert_eq!(config.audit_capacity, 16);
}

#[test]
fn test_binding_config_from_partial_json() {
    let config = BindingConfig::from_json_str(r#"{"noop_implements": "allow"}"#).unwrap();
    assert_eq!(config.noop_implements, NoopPolicy::Allow);
    assert_eq!(config.audit_capacity, 1024);
}

#[test]
fn test_binding_config_from_json_rejects_bad_values() {
    assert!(BindingConfig::from_json_str(r#"{"audit_capacity": 0}"#).is_err());
    assert!(BindingConfig::from_json_str(r#"{"noop_implements": "maybe"}"#).is_err());
    assert!(BindingConfig::from_json_str("not json").is_err());
}

#[test]
fn test_binding_config_from_lookup() {
    let mut vars = HashMap::new();
    vars.insert(ENV_NOOP_POLICY, " Reject ".to_string());
    vars.insert(ENV_AUDIT_CAPACITY, "32".to_string());

    let config = BindingConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    assert_eq!(config.noop_implements, NoopPolicy::Reject);
    assert_eq!(config.audit_capacity, 32);
}

#[test]
fn test_binding_config_from_lookup_errors_name_variable() {
    let err = BindingConfig::from_lookup(|key| (key == ENV_AUDIT_CAPACITY).then(|| "lots".to_string()))
        .unwrap_err();
    assert!(err.contains(ENV_AUDIT_CAPACITY), "{err}");

    let err = BindingConfig::from_lookup(|key| (key == ENV_NOOP_POLICY).then(|| "sometimes".to_string()))
        .unwrap_err();
    assert!(err.contains("sometimes"), "{err}");
}

#[test]
fn test_binding_config_from_empty_lookup() {
    let config = BindingConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config, BindingConfig::default());
}

#[test]
fn test_noop_policy_parse() {
    assert_eq!("allow".parse::<NoopPolicy>(), Ok(NoopPolicy::Allow));
    assert_eq!("WARN".parse::<NoopPolicy>(), Ok(NoopPolicy::Warn));
    assert!("".parse::<NoopPolicy>().is_err());
}
