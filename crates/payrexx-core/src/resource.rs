//! # Resource Entity
//!
//! In-memory view of one remote resource. Holds the latest snapshot and a
//! non-owning handle to the action that produced it, which it uses for
//! `reload` and `delete`.

use crate::action::{DeleteResponse, ResourceAction, ResourceSnapshot};
use crate::error::{PayrexxError, PayrexxResult};
use std::ops::Deref;

/// A remote resource bound to the action that can re-fetch or delete it.
///
/// Snapshot accessors are reachable directly through `Deref`, so they always
/// reflect the snapshot currently held.
pub struct Resource<'a, A: ResourceAction> {
    snapshot: A::Snapshot,
    action: &'a A,
}

impl<'a, A: ResourceAction> Resource<'a, A> {
    /// Bind a freshly received snapshot to its action.
    ///
    /// Called by `ResourceAction` implementations after `create` and `get`.
    pub fn from_snapshot(action: &'a A, snapshot: A::Snapshot) -> Self {
        Self { snapshot, action }
    }

    /// True if the held snapshot carries a server-assigned id
    pub fn has_id(&self) -> bool {
        self.snapshot.id().is_some()
    }

    pub fn id(&self) -> Option<u64> {
        self.snapshot.id()
    }

    /// The full current snapshot
    pub fn data(&self) -> &A::Snapshot {
        &self.snapshot
    }

    pub fn into_data(self) -> A::Snapshot {
        self.snapshot
    }

    /// Re-fetch the resource and replace the held snapshot.
    ///
    /// Without an id this is a no-op that still returns the entity.
    pub async fn reload(&mut self) -> PayrexxResult<&mut Self> {
        if let Some(id) = self.id() {
            let fresh = self.action.get(id).await?;
            self.snapshot = fresh.into_data();
        }
        Ok(self)
    }

    /// Ask the service to delete this resource.
    ///
    /// The held snapshot stays readable afterwards.
    pub async fn delete(&self) -> PayrexxResult<DeleteResponse> {
        let id = self.id().ok_or_else(|| {
            PayrexxError::Validation(format!(
                "cannot delete {} without an id",
                self.action.resource_name()
            ))
        })?;
        self.action.delete(id).await
    }
}

impl<A: ResourceAction> Deref for Resource<'_, A> {
    type Target = A::Snapshot;

    fn deref(&self) -> &Self::Target {
        &self.snapshot
    }
}

impl<A> std::fmt::Debug for Resource<'_, A>
where
    A: ResourceAction,
    A::Snapshot: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("resource", &self.action.resource_name())
            .field("snapshot", &self.snapshot)
            .finish()
    }
}
