// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

/// Run `f` with `key` set (or removed), restoring the previous value after.
fn with_var<T>(key: &str, value: Option<&str>, f: impl FnOnce() -> T) -> T {
    let saved = std::env::var(key).ok();
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
    let result = f();
    match saved {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
    result
}

#[test]
#[serial]
fn image_defaults_to_agent_image() {
    assert_eq!(with_var("AZPOOL_IMAGE", None, image), "azp_agent");
    assert_eq!(with_var("AZPOOL_IMAGE", Some(""), image), "azp_agent");
    assert_eq!(with_var("AZPOOL_IMAGE", Some("azp_agent:2"), image), "azp_agent:2");
}

#[test]
#[serial]
fn poll_interval_parsing() {
    let cases = [
        (None, Duration::from_secs(30)),
        (Some("fast"), Duration::from_secs(30)),
        (Some("250"), Duration::from_millis(250)),
    ];
    for (value, expected) in cases {
        assert_eq!(with_var("AZPOOL_POLL_INTERVAL_MS", value, poll_interval), expected);
    }
}

#[test]
#[serial]
fn health_timeout_is_unbounded_by_default() {
    assert_eq!(with_var("AZPOOL_HEALTH_TIMEOUT_MS", None, health_timeout), None);
    assert_eq!(
        with_var("AZPOOL_HEALTH_TIMEOUT_MS", Some("60000"), health_timeout),
        Some(Duration::from_secs(60))
    );
}

#[test]
#[serial]
fn health_policy_combines_both_knobs() {
    let policy = with_var("AZPOOL_POLL_INTERVAL_MS", Some("100"), || {
        with_var("AZPOOL_HEALTH_TIMEOUT_MS", Some("1000"), health_policy)
    });

    assert_eq!(policy.interval, Duration::from_millis(100));
    assert_eq!(policy.deadline, Some(Duration::from_secs(1)));
}

#[test]
#[serial]
fn agent_fields_ignore_empty_values() {
    assert_eq!(with_var("AZP_URL", Some(""), organization_url), None);
    assert_eq!(with_var("AZP_POOL", Some("linux"), pool_name), Some("linux".to_string()));
    assert_eq!(with_var("AZP_AGENT_NAME", None, agent_name), None);
}
