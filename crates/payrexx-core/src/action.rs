//! # Resource Actions
//!
//! Per-resource-type service objects. Each remote resource kind (Gateway,
//! and any other the API exposes) implements `ResourceAction` and hands out
//! [`Resource`] entities that keep a borrowed handle back to it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ResourceAction (trait)                     │
//! │  ├── create(request)  -> Resource<'_, Self>                 │
//! │  ├── get(id)          -> Resource<'_, Self>                 │
//! │  └── delete(id)       -> DeleteResponse                     │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │GatewayActions │
//!                    └───────────────┘
//! ```

use crate::error::PayrexxResult;
use crate::resource::Resource;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Opaque acknowledgement returned by a delete call, passed through verbatim.
pub type DeleteResponse = serde_json::Value;

/// Parameters accepted by a `create` call.
pub trait CreateRequest: Serialize + Send + Sync {
    /// Reject the request before any network call is made.
    fn validate(&self) -> PayrexxResult<()>;
}

/// The server's canonical representation of a resource at a point in time.
pub trait ResourceSnapshot: DeserializeOwned + Send + Sync {
    /// Server-assigned id, absent until the resource exists remotely.
    fn id(&self) -> Option<u64>;
}

/// Typed create/get/delete for one resource kind.
///
/// Implementations hold no per-call mutable state, so one instance can be
/// shared by any number of concurrent callers and entities.
#[async_trait]
pub trait ResourceAction: Sized + Send + Sync {
    type Request: CreateRequest;
    type Snapshot: ResourceSnapshot;

    /// Resource segment of the endpoint URL (e.g. `Gateway`)
    fn resource_name(&self) -> &'static str;

    /// Validate, sign and submit `request`; wrap the first returned snapshot.
    async fn create<'a>(&'a self, request: &Self::Request) -> PayrexxResult<Resource<'a, Self>>;

    /// Fetch the current snapshot of resource `id`.
    async fn get<'a>(&'a self, id: u64) -> PayrexxResult<Resource<'a, Self>>;

    /// Ask the service to delete resource `id`.
    async fn delete(&self, id: u64) -> PayrexxResult<DeleteResponse>;
}
