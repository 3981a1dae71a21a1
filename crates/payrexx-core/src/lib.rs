//! # payrexx-core
//!
//! Core types and traits for the payrexx-rs gateway SDK.
//!
//! This crate provides:
//! - `ResourceAction` trait for implementing per-resource create/get/delete
//! - `Resource` entity wrapping a server snapshot with `reload`/`delete`
//! - `Transport` trait, the HTTP seam between actions and the network
//! - `Currency` for amounts sent to the gateway
//! - `PayrexxError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use payrexx_core::ResourceAction;
//!
//! let mut gateway = actions.create(&request).await?;
//! println!("pay at {:?}", gateway.link());
//!
//! // Later: pick up the status change
//! gateway.reload().await?;
//! ```

pub mod action;
pub mod currency;
pub mod error;
pub mod resource;
pub mod transport;

// Re-exports for convenience
pub use action::{CreateRequest, DeleteResponse, ResourceAction, ResourceSnapshot};
pub use currency::Currency;
pub use error::{PayrexxError, PayrexxResult, TransportError};
pub use resource::Resource;
pub use transport::{HttpRequest, HttpResponse, Method, SharedTransport, Transport};
