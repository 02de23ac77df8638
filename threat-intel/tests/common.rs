//! Shared helpers for the HTTP-level tests

use threat_intel::{IntelClient, IntelConfig};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-key-123";

/// Configuration pointing at the mock server's `/merlin` prefix
pub fn config_for(server: &MockServer) -> IntelConfig {
    let mut config = IntelConfig::with_api_key(TEST_API_KEY)
        .base_url(format!("{}/merlin", server.uri()))
        .timeout_ms(2_000);
    config.api.max_retries = 0;
    config
}

pub fn client_for(server: &MockServer) -> IntelClient {
    IntelClient::new(&config_for(server)).expect("client should build")
}

/// Base URL of a port nothing listens on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/merlin", port)
}
