use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults_when_unset() {
    let cfg = GatewayConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, GatewayConfig::default());
    assert_eq!(cfg.api_base(), "http://localhost:8000/api");
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = GatewayConfig::from_lookup(lookup_from(&[
        ("CHATLINE_API_URL", "https://chat.example.test/"),
        ("CHATLINE_REQUEST_TIMEOUT_SECS", "42"),
        ("CHATLINE_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://chat.example.test");
    assert_eq!(cfg.request_timeout_secs, 42);
    assert_eq!(cfg.connect_timeout_secs, 7);
    assert_eq!(cfg.api_base(), "https://chat.example.test/api");
}

#[test]
fn from_lookup_invalid_timeouts_fall_back() {
    let cfg = GatewayConfig::from_lookup(lookup_from(&[
        ("CHATLINE_REQUEST_TIMEOUT_SECS", "soon"),
        ("CHATLINE_CONNECT_TIMEOUT_SECS", "0"),
    ]))
    .unwrap();
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
}

#[test]
fn from_lookup_blank_url_uses_default() {
    let cfg = GatewayConfig::from_lookup(lookup_from(&[("CHATLINE_API_URL", "  ")])).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
}

#[test]
fn from_lookup_rejects_non_http_url() {
    let err = GatewayConfig::from_lookup(lookup_from(&[("CHATLINE_API_URL", "localhost:8000")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidBaseUrl("localhost:8000".into()));
}

#[test]
fn with_base_url_trims_trailing_slashes() {
    let cfg = GatewayConfig::with_base_url("http://127.0.0.1:9000//").unwrap();
    assert_eq!(cfg.api_base(), "http://127.0.0.1:9000/api");
}
