//! # Transport
//!
//! The HTTP seam of the SDK. Actions build fully signed requests and hand
//! them to a `Transport`; the transport only moves bytes.
//!
//! Timeouts and cancellation belong to the transport. Dropping the future
//! returned by [`Transport::send`] cancels the call.

use crate::error::TransportError;
use async_trait::async_trait;
use std::sync::Arc;

/// HTTP methods used by the Payrexx REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound request. `body`, when present, is `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body.into()),
        }
    }

    pub fn delete(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            body: Some(body.into()),
        }
    }
}

/// Raw response as received from the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP exchange. No retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Type alias for a shared transport (dynamic dispatch)
pub type SharedTransport = Arc<dyn Transport>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_constructors() {
        let req = HttpRequest::get("https://api.payrexx.com/v1.0/Gateway/1/?instance=demo");
        assert_eq!(req.method, Method::Get);
        assert!(req.body.is_none());

        let req = HttpRequest::delete("https://x/", "ApiSignature=abc");
        assert_eq!(req.method.as_str(), "DELETE");
        assert_eq!(req.body.as_deref(), Some("ApiSignature=abc"));
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }
}
