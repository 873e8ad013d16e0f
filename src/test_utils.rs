// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: typed object builders, pre-populated caches and a mock
//! Kubernetes API.

use crate::kubernetes::{CacheFeeds, KindFeed, ResourceCacheSet};
use http::{Request, Response};
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec, ReplicaSet, ReplicaSetSpec};
use k8s_openapi::api::core::v1::{
    Namespace, Pod, PodStatus, ReplicationController, ReplicationControllerSpec, Service,
    ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, OwnerReference};
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::{Client, Resource};
use kube_runtime::watcher;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service as TowerService;

fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn meta(name: &str, namespace: &str, pairs: &[(&str, &str)]) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        uid: Some(format!("{}-uid", name)),
        labels: (!pairs.is_empty()).then(|| labels(pairs)),
        ..Default::default()
    }
}

pub fn make_namespace(name: &str) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn make_pod(name: &str, namespace: &str, pod_labels: &[(&str, &str)], phase: &str) -> Pod {
    Pod {
        metadata: meta(name, namespace, pod_labels),
        status: Some(PodStatus {
            phase: Some(phase.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn make_deployment(name: &str, namespace: &str, match_labels: &[(&str, &str)]) -> Deployment {
    Deployment {
        metadata: meta(name, namespace, match_labels),
        spec: Some(DeploymentSpec {
            selector: LabelSelector {
                match_labels: Some(labels(match_labels)),
                ..Default::default()
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// A replica set, optionally carrying a controller reference to `owner`
pub fn make_replica_set(
    name: &str,
    namespace: &str,
    match_labels: &[(&str, &str)],
    owner: Option<&Deployment>,
) -> ReplicaSet {
    let mut metadata = meta(name, namespace, match_labels);
    metadata.owner_references = owner.map(|d| {
        vec![OwnerReference {
            api_version: "apps/v1".to_string(),
            kind: Deployment::kind(&()).to_string(),
            name: d.metadata.name.clone().unwrap_or_default(),
            uid: d.metadata.uid.clone().unwrap_or_default(),
            controller: Some(true),
            ..Default::default()
        }]
    });

    ReplicaSet {
        metadata,
        spec: Some(ReplicaSetSpec {
            selector: LabelSelector {
                match_labels: Some(labels(match_labels)),
                ..Default::default()
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn make_replication_controller(
    name: &str,
    namespace: &str,
    selector: &[(&str, &str)],
) -> ReplicationController {
    ReplicationController {
        metadata: meta(name, namespace, selector),
        spec: Some(ReplicationControllerSpec {
            selector: Some(labels(selector)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn make_service(name: &str, namespace: &str, selector: &[(&str, &str)]) -> Service {
    Service {
        metadata: meta(name, namespace, &[]),
        spec: Some(ServiceSpec {
            selector: Some(labels(selector)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Replays a complete initial listing of `objects` into a feed, marking it synced
pub fn populate<K>(feed: &mut KindFeed<K>, objects: Vec<K>)
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    feed.apply(&watcher::Event::Init);
    for object in objects {
        feed.apply(&watcher::Event::InitApply(object));
    }
    feed.apply(&watcher::Event::InitDone);
}

/// Cache contents for a test; every kind is synced, even when empty.
#[derive(Default)]
pub struct CacheFixture {
    pub namespaces: Vec<Namespace>,
    pub deployments: Vec<Deployment>,
    pub replica_sets: Vec<ReplicaSet>,
    pub pods: Vec<Pod>,
    pub replication_controllers: Vec<ReplicationController>,
    pub services: Vec<Service>,
}

impl CacheFixture {
    /// The feeds must be kept alive for as long as the caches are waited on.
    pub fn build(self) -> (ResourceCacheSet, CacheFeeds) {
        let (caches, mut feeds) = ResourceCacheSet::detached();

        populate(&mut feeds.namespaces, self.namespaces);
        populate(&mut feeds.deployments, self.deployments);
        populate(&mut feeds.replica_sets, self.replica_sets);
        populate(&mut feeds.pods, self.pods);
        populate(&mut feeds.replication_controllers, self.replication_controllers);
        populate(&mut feeds.services, self.services);

        (caches, feeds)
    }
}

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    list_calls: Arc<AtomicUsize>,
    list_delay: Option<Duration>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            list_calls: Arc::new(AtomicUsize::new(0)),
            list_delay: None,
        }
    }

    /// Delay every list (non-watch) response by `delay`
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Number of list (non-watch) requests served so far, across all clones
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Add a response for GET requests matching the exact path; list and watch share it
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl TowerService<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let is_watch = req.uri().query().is_some_and(|q| q.contains("watch=true"));

        let delay = if is_watch {
            None
        } else {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.list_delay
        };

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json(&path)));

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// A list response body for `kind` (e.g. `PodList`) containing `items`
pub fn list_json(kind: &str, items: Vec<serde_json::Value>) -> String {
    let api_version = match kind {
        "DeploymentList" | "ReplicaSetList" => "apps/v1",
        _ => "v1",
    };
    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

pub fn empty_list_json(kind: &str) -> String {
    list_json(kind, vec![])
}

/// Create a mock namespace JSON object
pub fn namespace_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
}

/// Create a mock pod JSON object
pub fn pod_json(
    name: &str,
    namespace: &str,
    pod_labels: &[(&str, &str)],
    phase: &str,
) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("{}-uid", name),
            "labels": labels(pod_labels)
        },
        "status": { "phase": phase }
    })
}

/// Create a 404 not found response
pub fn not_found_json(path: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} not found", path),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
