//! # Reqwest Transport
//!
//! Default [`Transport`] backed by a rustls `reqwest::Client`.

use async_trait::async_trait;
use payrexx_core::{
    HttpRequest, HttpResponse, Method, PayrexxError, PayrexxResult, Transport, TransportError,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP transport over reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the given per-request timeout
    pub fn new(timeout: Duration) -> PayrexxResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("payrexx-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                PayrexxError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client (shared pools, proxies, custom TLS)
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest { method, url, body } = request;

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        debug!("{} {} -> {}", method, redact_query(&url), status);

        Ok(HttpResponse { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}

/// Drop the query string before logging; it carries the signature.
fn redact_query(url: &str) -> &str {
    url.split_once('?').map(|(path, _)| path).unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_query() {
        assert_eq!(
            redact_query("https://api.payrexx.com/v1.0/Gateway/1/?instance=x&ApiSignature=y"),
            "https://api.payrexx.com/v1.0/Gateway/1/"
        );
        assert_eq!(redact_query("https://x/"), "https://x/");
    }

    #[test]
    fn test_new_transport() {
        assert!(ReqwestTransport::new(Duration::from_secs(5)).is_ok());
    }
}
