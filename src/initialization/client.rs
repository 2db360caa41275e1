//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// User-Agent sent with every MaxMind request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Initializes the HTTP client used for remote acquisition.
///
/// The client timeout bounds each whole request, body included, at
/// `config.download_timeout`. Redirects are followed because the MaxMind
/// endpoint answers with a redirect to its CDN.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend cannot
/// be initialized.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(config.download_timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use std::time::Duration;

    #[tokio::test]
    async fn test_client_sends_user_agent() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/ping"),
                request::headers(contains(("user-agent", USER_AGENT))),
            ])
            .respond_with(status_code(200)),
        );

        let client = init_client(&Config::default()).unwrap();
        let response = client
            .get(server.url("/ping").to_string())
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn test_client_times_out() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/slow")).respond_with(
                delay_and_then(Duration::from_millis(500), status_code(200)),
            ),
        );

        let config = Config {
            download_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let client = init_client(&config).unwrap();
        let err = client
            .get(server.url("/slow").to_string())
            .send()
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
