//! # Payrexx Client
//!
//! `Payrexx` is the entry point: it owns the credential and the transport
//! and hands out one action object per resource type. `ApiClient` is the
//! shared, read-only core those actions use to sign and send requests.

use crate::auth::{Credential, SIGNATURE_FIELD};
use crate::config::PayrexxConfig;
use crate::endpoint::EndpointResolver;
use crate::form::{self, Format};
use crate::gateway::GatewayActions;
use crate::transport::ReqwestTransport;
use payrexx_core::{
    DeleteResponse, HttpRequest, PayrexxError, PayrexxResult, SharedTransport, TransportError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Top-level Payrexx client
pub struct Payrexx {
    api: Arc<ApiClient>,
    gateway: GatewayActions,
}

impl Payrexx {
    /// Create a client using the default reqwest transport
    pub fn new(config: PayrexxConfig) -> PayrexxResult<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create from environment variables
    pub fn from_env() -> PayrexxResult<Self> {
        let config = PayrexxConfig::from_env()?;
        Self::new(config)
    }

    /// Create a client on top of a caller-supplied transport
    pub fn with_transport(config: PayrexxConfig, transport: SharedTransport) -> PayrexxResult<Self> {
        config.validate()?;

        let credential = Arc::new(Credential::new(config.instance, config.secret));
        let endpoints = EndpointResolver::new(config.api_base_url, credential.clone());
        let api = Arc::new(ApiClient {
            credential,
            endpoints,
            transport,
        });

        Ok(Self {
            gateway: GatewayActions::new(api.clone()),
            api,
        })
    }

    /// Gateway (hosted checkout link) actions
    pub fn gateway(&self) -> &GatewayActions {
        &self.gateway
    }

    pub fn credential(&self) -> &Credential {
        &self.api.credential
    }

    pub fn api_base_url(&self) -> &str {
        self.api.endpoints.base()
    }
}

/// Signs, sends and unwraps API calls on behalf of resource actions.
pub struct ApiClient {
    credential: Arc<Credential>,
    endpoints: EndpointResolver,
    transport: SharedTransport,
}

impl ApiClient {
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// POST `params` to the collection endpoint and return the first snapshot.
    ///
    /// The signature is computed over the RFC 1738 encoding of `params`; the
    /// body sent is the RFC 3986 encoding with the signature appended.
    pub async fn create<P, T>(&self, resource: &str, params: &P) -> PayrexxResult<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut fields = form::to_object(params)?;
        let signature = self
            .credential
            .build_signature(&form::encode(&fields, Format::Rfc1738));
        fields.insert(SIGNATURE_FIELD.to_string(), Value::String(signature));
        let body = form::encode(&fields, Format::Rfc3986);

        let url = self.endpoints.resolve(resource, "");
        let response = self.execute(HttpRequest::post(url, body)).await?;
        first_snapshot(&response)
    }

    /// GET one resource by id and return its snapshot.
    pub async fn fetch<T: DeserializeOwned>(&self, resource: &str, id: u64) -> PayrexxResult<T> {
        let signature = self.credential.build_signature("");
        let url = self.endpoints.resolve_with(
            resource,
            &id.to_string(),
            &[(SIGNATURE_FIELD, signature.as_str())],
        );

        let response = self.execute(HttpRequest::get(url)).await?;
        first_snapshot(&response)
    }

    /// DELETE one resource by id and return the acknowledgement verbatim.
    pub async fn remove(&self, resource: &str, id: u64) -> PayrexxResult<DeleteResponse> {
        let mut fields = serde_json::Map::new();
        fields.insert(
            SIGNATURE_FIELD.to_string(),
            Value::String(self.credential.build_signature("")),
        );
        let body = form::encode(&fields, Format::Rfc3986);

        let url = self.endpoints.resolve(resource, &id.to_string());
        let response = self.execute(HttpRequest::delete(url, body)).await?;

        serde_json::from_str(&response).map_err(|e| {
            PayrexxError::ProtocolMismatch(format!("delete response is not JSON: {}", e))
        })
    }

    /// Send once; non-2xx becomes `TransportError::Status`.
    async fn execute(&self, request: HttpRequest) -> PayrexxResult<String> {
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(TransportError::Status {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        Ok(response.body)
    }
}

/// Unwrap `{ "data": [snapshot, ...] }` into its first element.
fn first_snapshot<T: DeserializeOwned>(body: &str) -> PayrexxResult<T> {
    let envelope: Value = serde_json::from_str(body).map_err(|e| {
        PayrexxError::ProtocolMismatch(format!("response is not JSON: {}", e))
    })?;

    if envelope.get("status").and_then(Value::as_str) == Some("error") {
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(PayrexxError::Api { message });
    }

    let first = envelope
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            PayrexxError::ProtocolMismatch("response has no `data` array".to_string())
        })?
        .first()
        .ok_or_else(|| PayrexxError::ProtocolMismatch("response `data` is empty".to_string()))?;

    T::deserialize(first).map_err(|e| {
        PayrexxError::ProtocolMismatch(format!("unexpected snapshot shape: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Item {
        id: u64,
    }

    #[test]
    fn test_first_snapshot() {
        let item: Item = first_snapshot(r#"{"status":"success","data":[{"id":3},{"id":4}]}"#).unwrap();
        assert_eq!(item.id, 3);
    }

    #[test]
    fn test_first_snapshot_shape_errors() {
        for body in [
            r#"{"status":"success","data":[]}"#,
            r#"{"status":"success"}"#,
            r#"{"data":{"id":1}}"#,
            r#"{"data":[{"name":"no id"}]}"#,
            "<html>maintenance</html>",
        ] {
            let err = first_snapshot::<Item>(body).unwrap_err();
            assert!(err.is_protocol_mismatch(), "{}: {}", body, err);
        }
    }

    #[test]
    fn test_first_snapshot_api_error() {
        let err = first_snapshot::<Item>(r#"{"status":"error","message":"No access"}"#).unwrap_err();
        match err {
            PayrexxError::Api { message } => assert_eq!(message, "No access"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_with_transport_validates_config() {
        let transport: SharedTransport = Arc::new(ReqwestTransport::new(Duration::from_secs(1)).unwrap());
        let result = Payrexx::with_transport(PayrexxConfig::new("", "secret"), transport);
        assert!(matches!(result, Err(PayrexxError::Configuration(_))));

        let result = Payrexx::new(PayrexxConfig::new("demo", ""));
        assert!(matches!(result, Err(PayrexxError::Configuration(_))));
    }

    #[test]
    fn test_client_accessors() {
        let payrexx = Payrexx::new(
            PayrexxConfig::new("demo", "secret").with_api_base_url("http://localhost:9000/v1.0"),
        )
        .unwrap();
        assert_eq!(payrexx.credential().instance(), "demo");
        assert_eq!(payrexx.api_base_url(), "http://localhost:9000/v1.0/");
    }
}
