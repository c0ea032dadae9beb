//! Integration tests for the feynmind-web crate.
//!
//! These tests verify the web server configuration.  Full HTTP coverage
//! lives in `e2e_api.rs`.

use feynmind_web::WebConfig;

#[test]
fn web_config_defaults() {
    let config = WebConfig::default();
    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.port, 8000);
    assert_eq!(config.allowed_origins, vec!["http://localhost:5173"]);
}

#[test]
fn web_config_custom() {
    let config = WebConfig {
        bind_addr: "127.0.0.1".into(),
        port: 8080,
        allowed_origins: vec!["https://feynmind.app".into()],
    };
    assert_eq!(config.bind_addr, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.allowed_origins.len(), 1);
}
