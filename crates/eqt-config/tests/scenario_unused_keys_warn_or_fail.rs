use eqt_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

/// Validates:
/// 1) Unused keys are detected in WARN mode but do not error.
/// 2) Unused keys cause failure in FAIL mode.
/// 3) Keys under consumed prefixes are not flagged.
/// 4) Deterministic ordering of unused pointers.

#[test]
fn warn_mode_reports_unused_keys_without_error() {
    let yaml = r#"
vendor:
  endpoint: "https://vendor.test/api"
  retry_count: 3

unused_section:
  foo: 123
  bar: 456
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert!(!report.is_clean());
    assert_eq!(
        report.unused_leaf_pointers,
        vec![
            "/unused_section/bar".to_string(),
            "/unused_section/foo".to_string(),
            "/vendor/retry_count".to_string(),
        ]
    );
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let yaml = r#"
vendor:
  endpoint: "https://vendor.test/api"
unused_section:
  foo: 1
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let result = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail);

    let msg = format!("{:?}", result.err().expect("fail policy must error"));
    assert!(msg.contains("CONFIG_UNUSED_KEYS"));
    assert!(msg.contains("/unused_section/foo"));
}

#[test]
fn consumed_prefix_covers_nested_keys() {
    let yaml = r#"
daemon:
  addr: "0.0.0.0:9000"
vendor:
  endpoint: "https://vendor.test/api"
  timeouts_ms:
    short: 500
  headers_env:
    x-api-key: "EQT_VENDOR_API_KEY"
  error_codes:
    RS-0001: 400
  paths:
    order_book: "/orders/book"
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail)
        .expect("fully consumed config must pass in FAIL mode");
    assert!(report.is_clean());
}

#[test]
fn shipped_default_config_is_fully_consumed() {
    let yaml = include_str!("../../../config/gateway.yaml");
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    loaded.gateway().unwrap();
}
