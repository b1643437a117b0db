use std::time::Duration;

use reqwest::Client;

use crate::error::SttError;

/// Build the HTTP client used for provider calls
///
/// No request timeout is applied unless one is configured.
pub(crate) fn http_client(timeout: Option<Duration>) -> crate::error::Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    let mut builder = Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| SttError::ConfigError(format!("Failed to build HTTP client: {e}")))
}
