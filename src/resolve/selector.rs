// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{PodscopeError, Result};
use crate::types::{LabelSelector, ResourceObject};

/// Returns the label selector identifying the pods governed by `object`.
///
/// Namespaces select everything. Replica sets and pods are resolved by
/// identity or ownership and have no selector here.
pub fn selector_for(object: &ResourceObject) -> Result<LabelSelector> {
    match object {
        ResourceObject::Namespace(_) => Ok(LabelSelector::everything()),
        ResourceObject::Deployment(deployment) => Ok(deployment
            .spec
            .as_ref()
            .map(|spec| LabelSelector::from_match_labels(&spec.selector))
            .unwrap_or_default()),
        ResourceObject::ReplicationController(rc) => Ok(rc
            .spec
            .as_ref()
            .and_then(|spec| spec.selector.as_ref())
            .map(LabelSelector::from_labels)
            .unwrap_or_default()),
        ResourceObject::Service(service) => Ok(service
            .spec
            .as_ref()
            .and_then(|spec| spec.selector.as_ref())
            .map(LabelSelector::from_labels)
            .unwrap_or_default()),
        ResourceObject::ReplicaSet(_) | ResourceObject::Pod(_) => {
            Err(PodscopeError::UnsupportedSelectorKind(object.kind()))
        }
    }
}
