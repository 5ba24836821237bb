use crate::config::UpstreamConfig;
use reqwest::Client;

const USER_AGENT: &str = concat!("magang-scout/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for both third-party services.
///
/// Some public portals reject requests without a User-Agent, so one is always sent.
pub fn http_client(config: &UpstreamConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .build()
}
