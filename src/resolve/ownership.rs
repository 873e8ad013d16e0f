// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Walks from a resource reference to the running pods it represents.
//!
//! Ownership is never stored; deployments are related to their replica sets
//! on every call, from the current contents of the two caches.

use crate::constants::{DEPLOYMENT_OWNER_GROUP, DEPLOYMENT_OWNER_KIND, POD_PHASE_RUNNING};
use crate::error::{PodscopeError, Result};
use crate::kubernetes::ResourceCacheSet;
use crate::resolve::selector::selector_for;
use crate::types::{LabelSelector, PodSet, ResourceKind, ResourceObject, ResourceRef};
use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::ResourceExt;
use tracing::{debug, instrument};

/// Resolves `reference` against the current cache contents.
///
/// Only running pods are returned. An empty result is `NoPodsFound`, except
/// for namespaces, which may legitimately be empty.
#[instrument(skip(caches, reference), fields(reference = %reference))]
pub fn resolve_pods(caches: &ResourceCacheSet, reference: &ResourceRef) -> Result<PodSet> {
    let kind = reference.kind();
    let namespace = reference.namespace();

    if !kind.is_user_addressable() {
        return Err(PodscopeError::UnknownResourceKind(kind.to_string()));
    }

    let object = caches
        .get(kind, namespace, reference.name())
        .ok_or_else(|| PodscopeError::NotFound {
            kind,
            namespace: namespace.to_string(),
            name: reference.name().to_string(),
        })?;

    let mut pods: PodSet = match &object {
        ResourceObject::Pod(pod) => [pod.clone()].into_iter().collect(),
        ResourceObject::Deployment(deployment) => {
            let selector = selector_for(&object)?;
            pods_for_deployment(caches, deployment, &selector)
        }
        ResourceObject::Namespace(_)
        | ResourceObject::ReplicationController(_)
        | ResourceObject::Service(_) => {
            let selector = selector_for(&object)?;
            caches.pods.list(namespace, &selector).into_iter().collect()
        }
        ResourceObject::ReplicaSet(_) => {
            return Err(PodscopeError::UnknownResourceKind(kind.to_string()));
        }
    };

    pods.retain(|pod| is_running(pod) && admitted_by(reference, pod));
    debug!("Resolved {} pods", pods.len());

    if pods.is_empty() && kind != ResourceKind::Namespaces {
        return Err(PodscopeError::NoPodsFound {
            selection: reference.to_string(),
        });
    }

    Ok(pods)
}

/// Union of the pods selected by every replica set the deployment owns.
fn pods_for_deployment(
    caches: &ResourceCacheSet,
    deployment: &Deployment,
    selector: &LabelSelector,
) -> PodSet {
    let namespace = deployment.namespace().unwrap_or_default();
    let mut pods = PodSet::default();

    for rs in caches
        .replica_sets
        .list(&namespace, &LabelSelector::everything())
        .into_iter()
        .filter(|rs| is_owned_by(rs, deployment, selector))
    {
        let rs_selector = replica_set_selector(&rs);
        debug!(
            "Deployment {} owns replica set {} selecting {}",
            deployment.name_any(),
            rs.name_any(),
            rs_selector
        );
        pods.extend(caches.pods.list(&namespace, &rs_selector));
    }

    pods
}

/// Whether `rs` belongs to `deployment`.
///
/// A deployment owner reference on the replica set is authoritative; it must
/// carry the deployment's name and, when both sides have one, its uid.
/// Replica sets without one fall back to label matching: their selector must
/// contain every label of the deployment's (non-empty) selector.
fn is_owned_by(rs: &ReplicaSet, deployment: &Deployment, selector: &LabelSelector) -> bool {
    let mut owners = rs
        .owner_references()
        .iter()
        .filter(|o| is_deployment_owner(o))
        .peekable();

    if owners.peek().is_some() {
        let uid = deployment.uid();
        return owners.any(|o| {
            o.name == deployment.name_any() && uid.as_ref().map_or(true, |uid| *uid == o.uid)
        });
    }

    !selector.is_everything() && selector.matches(replica_set_selector(rs).requirements())
}

/// Owner references of kind `Deployment` in the `apps` group only.
fn is_deployment_owner(owner: &OwnerReference) -> bool {
    let group = owner
        .api_version
        .rsplit_once('/')
        .map_or("", |(group, _)| group);
    owner.kind == DEPLOYMENT_OWNER_KIND && group == DEPLOYMENT_OWNER_GROUP
}

fn replica_set_selector(rs: &ReplicaSet) -> LabelSelector {
    rs.spec
        .as_ref()
        .map(|spec| LabelSelector::from_match_labels(&spec.selector))
        .unwrap_or_default()
}

fn is_running(pod: &Pod) -> bool {
    pod.status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .is_some_and(|phase| phase == POD_PHASE_RUNNING)
}

fn admitted_by(reference: &ResourceRef, pod: &Pod) -> bool {
    reference
        .label_selector()
        .map_or(true, |selector| selector.matches(pod.labels()))
}
