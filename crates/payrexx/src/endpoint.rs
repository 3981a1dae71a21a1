//! # Endpoint Resolution
//!
//! `{base}{Resource}/{sub_path}/?{auth query}`. The slash before `?` is
//! always present, with or without a sub-path.

use crate::auth::Credential;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EndpointResolver {
    base: String,
    credential: Arc<Credential>,
}

impl EndpointResolver {
    pub fn new(base: impl Into<String>, credential: Arc<Credential>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base, credential }
    }

    /// API root, always ending in `/`
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Collection-level (`sub_path` empty) or item-level URL for `resource`.
    pub fn resolve(&self, resource: &str, sub_path: &str) -> String {
        self.resolve_with(resource, sub_path, &[])
    }

    /// As [`resolve`](Self::resolve), with extra query parameters after the
    /// instance identifier.
    pub fn resolve_with(&self, resource: &str, sub_path: &str, extra: &[(&str, &str)]) -> String {
        let resource = resource.trim_matches('/');
        let sub_path = sub_path.trim_matches('/');
        let query = self.credential.build_url(extra);

        if sub_path.is_empty() {
            format!("{}{}/?{}", self.base, resource, query)
        } else {
            format!("{}{}/{}/?{}", self.base, resource, sub_path, query)
        }
    }
}
