// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Canonical resource type names accepted from callers
pub mod kinds {
    pub const NAMESPACES: &str = "namespaces";
    pub const DEPLOYMENTS: &str = "deployments";
    /// Only used internally to walk from deployments to their pods
    pub const REPLICA_SETS: &str = "replicasets";
    pub const PODS: &str = "pods";
    pub const REPLICATION_CONTROLLERS: &str = "replicationcontrollers";
    pub const SERVICES: &str = "services";
}

/// Pod phase a pod must be in to be part of a resolved pod set
pub const POD_PHASE_RUNNING: &str = "Running";

/// Owner reference kind set by the deployment controller on its replica sets
pub const DEPLOYMENT_OWNER_KIND: &str = "Deployment";

/// API group of the deployment owner kind
pub const DEPLOYMENT_OWNER_GROUP: &str = "apps";

/// Cache configuration defaults
pub mod cache {
    /// Full re-list period for every watched kind
    pub const DEFAULT_RESYNC_INTERVAL_SECS: u64 = 600;
    /// How long startup waits for all caches to complete their initial list
    pub const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 60;
    /// Consecutive watch errors after which a kind stops reporting synced
    pub const WATCH_FAILURE_THRESHOLD: u32 = 5;
}

/// Namespace used for targets that do not name one
pub const DEFAULT_NAMESPACE: &str = "default";
