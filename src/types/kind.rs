// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::kinds;
use crate::error::{PodscopeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of resource kinds the cache set watches.
///
/// Adding a variant requires a cache in `ResourceCacheSet`, a rule in
/// `selector_for` and, when the kind is owned by another, an ownership rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Namespaces,
    Deployments,
    ReplicaSets,
    Pods,
    ReplicationControllers,
    Services,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Namespaces,
        ResourceKind::Deployments,
        ResourceKind::ReplicaSets,
        ResourceKind::Pods,
        ResourceKind::ReplicationControllers,
        ResourceKind::Services,
    ];

    /// Canonical plural name, as exposed to callers
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Namespaces => kinds::NAMESPACES,
            ResourceKind::Deployments => kinds::DEPLOYMENTS,
            ResourceKind::ReplicaSets => kinds::REPLICA_SETS,
            ResourceKind::Pods => kinds::PODS,
            ResourceKind::ReplicationControllers => kinds::REPLICATION_CONTROLLERS,
            ResourceKind::Services => kinds::SERVICES,
        }
    }

    /// Singular lowercase name, used in not-found messages
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Namespaces => "namespace",
            ResourceKind::Deployments => "deployment",
            ResourceKind::ReplicaSets => "replicaset",
            ResourceKind::Pods => "pod",
            ResourceKind::ReplicationControllers => "replicationcontroller",
            ResourceKind::Services => "service",
        }
    }

    /// Whether callers may name this kind in a request.
    pub fn is_user_addressable(&self) -> bool {
        !matches!(self, ResourceKind::ReplicaSets)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = PodscopeError;

    fn from_str(s: &str) -> Result<Self> {
        normalize(s)
    }
}

/// Maps the shorthands used by command line tools to a canonical kind.
///
/// Matching is exact and case-sensitive. Replica sets are not addressable.
pub fn normalize(friendly_name: &str) -> Result<ResourceKind> {
    match friendly_name {
        "deploy" | "deployment" | "deployments" => Ok(ResourceKind::Deployments),
        "ns" | "namespace" | "namespaces" => Ok(ResourceKind::Namespaces),
        "po" | "pod" | "pods" => Ok(ResourceKind::Pods),
        "rc" | "replicationcontroller" | "replicationcontrollers" => {
            Ok(ResourceKind::ReplicationControllers)
        }
        "svc" | "service" | "services" => Ok(ResourceKind::Services),
        other => Err(PodscopeError::UnknownResourceKind(other.to_string())),
    }
}
