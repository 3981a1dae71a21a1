//! # payrexx
//!
//! Client for the Payrexx REST API.
//!
//! Every request is scoped to an instance and signed with the instance's API
//! secret. Gateways (hosted checkout links) can be created, fetched,
//! reloaded and deleted.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payrexx::{GatewayRequest, Payrexx, ResourceAction};
//! use payrexx_core::Currency;
//!
//! // PAYREXX_INSTANCE / PAYREXX_API_SECRET
//! let payrexx = Payrexx::from_env()?;
//!
//! let request = GatewayRequest::new(1000, Currency::CHF)
//!     .with_purpose("Order 1234")
//!     .with_redirects(
//!         "https://example.com/success",
//!         "https://example.com/failed",
//!         "https://example.com/cancel",
//!     );
//!
//! let mut gateway = payrexx.gateway().create(&request).await?;
//!
//! // Redirect the shopper to gateway.link(), then later:
//! gateway.reload().await?;
//! println!("status: {:?}", gateway.status());
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod form;
pub mod gateway;
pub mod transport;

// Re-exports
pub use auth::{Credential, SIGNATURE_FIELD};
pub use client::{ApiClient, Payrexx};
pub use config::PayrexxConfig;
pub use endpoint::EndpointResolver;
pub use gateway::{
    BasketProduct, ContactFields, FieldOption, FieldOptions, FieldValue, Gateway, GatewayActions,
    GatewayRequest, GatewaySnapshot, GatewayStatus,
};
pub use payrexx_core::{
    CreateRequest, Currency, DeleteResponse, PayrexxError, PayrexxResult, Resource,
    ResourceAction, ResourceSnapshot, Transport, TransportError,
};
pub use transport::ReqwestTransport;
