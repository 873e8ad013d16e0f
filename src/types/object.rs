// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::ResourceKind;
use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::{Namespace, Pod, ReplicationController, Service};
use kube::ResourceExt;
use std::sync::Arc;

/// A cached object of one of the watched kinds.
///
/// Objects are shared snapshots owned by the caches and never mutated by readers.
#[derive(Debug, Clone)]
pub enum ResourceObject {
    Namespace(Arc<Namespace>),
    Deployment(Arc<Deployment>),
    ReplicaSet(Arc<ReplicaSet>),
    Pod(Arc<Pod>),
    ReplicationController(Arc<ReplicationController>),
    Service(Arc<Service>),
}

impl ResourceObject {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceObject::Namespace(_) => ResourceKind::Namespaces,
            ResourceObject::Deployment(_) => ResourceKind::Deployments,
            ResourceObject::ReplicaSet(_) => ResourceKind::ReplicaSets,
            ResourceObject::Pod(_) => ResourceKind::Pods,
            ResourceObject::ReplicationController(_) => ResourceKind::ReplicationControllers,
            ResourceObject::Service(_) => ResourceKind::Services,
        }
    }

    pub fn name(&self) -> String {
        match self {
            ResourceObject::Namespace(o) => o.name_any(),
            ResourceObject::Deployment(o) => o.name_any(),
            ResourceObject::ReplicaSet(o) => o.name_any(),
            ResourceObject::Pod(o) => o.name_any(),
            ResourceObject::ReplicationController(o) => o.name_any(),
            ResourceObject::Service(o) => o.name_any(),
        }
    }
}
