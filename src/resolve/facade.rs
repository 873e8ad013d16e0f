// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Entry point used by transports to turn requests into pod sets.

use crate::error::{PodscopeError, Result};
use crate::kubernetes::ResourceCacheSet;
use crate::resolve::ownership::resolve_pods;
use crate::types::{PodSet, ResourceRef, ResourceRequest};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Resolves caller requests against the shared cache set.
///
/// Holds no state of its own; clones share the same caches.
#[derive(Clone)]
pub struct PodResolver {
    caches: Arc<ResourceCacheSet>,
}

impl PodResolver {
    pub fn new(caches: Arc<ResourceCacheSet>) -> Self {
        Self { caches }
    }

    /// Requests are rejected with `NotReady` until the sync barrier has passed.
    #[instrument(skip(self, request), fields(kind = %request.kind, namespace = %request.namespace, name = %request.name))]
    pub fn resolve(&self, request: &ResourceRequest) -> Result<PodSet> {
        if !self.caches.is_ready() {
            debug!("Rejecting request, caches not synced");
            return Err(PodscopeError::NotReady);
        }

        let reference = ResourceRef::try_from(request)?;

        let pods = resolve_pods(&self.caches, &reference)?;
        info!("Resolved {} to {} pods", reference, pods.len());
        Ok(pods)
    }
}
