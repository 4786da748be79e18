#![allow(dead_code)]

use storefront::config::Config;
use storefront::state::AppState;

/// Configuration pointing at unreachable backends.
///
/// Handlers under test here never call upstreams; anything that would is
/// covered by service-level unit tests with mocked gateways.
pub fn test_config() -> Config {
    Config {
        commerce_api_base: "http://127.0.0.1:1".to_string(),
        content_api_base: "http://127.0.0.1:1".to_string(),
        affiliate_api_base: "http://127.0.0.1:1".to_string(),
        affiliate_network_id: Some("R9f1WByH5RE".to_string()),
        affiliate_click_domain: "click.linksynergy.com".to_string(),
        site_base_url: "http://localhost:3000".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        fetch_timeout_seconds: 1,
        cache_ttl_seconds: 3600,
        cache_enabled: true,
        revalidate_secret: "test-secret".to_string(),
    }
}

pub fn create_test_state() -> AppState {
    AppState::from_config(&test_config()).unwrap()
}
