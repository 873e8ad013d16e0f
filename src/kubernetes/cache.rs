// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One reflector-backed cache per watched kind.
//!
//! Every cache is split into a read half (`KindCache`), which is shared with
//! resolvers, and a write half (`KindFeed`), which is owned by exactly one
//! watch loop. All read handles must exist before the watch loops start, so
//! `ResourceCacheSet::start` builds the whole set first and only then hands
//! the feeds to their loops. `CacheFeeds::spawn` consumes the feeds, which
//! makes starting the loops twice impossible.

use crate::constants::cache::WATCH_FAILURE_THRESHOLD;
use crate::error::{PodscopeError, Result};
use crate::types::{LabelSelector, ResourceKind, ResourceObject};
use futures::TryStreamExt;
use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::{Namespace, Pod, ReplicationController, Service};
use kube::{
    runtime::{
        reflector::{self, store::Writer, ObjectRef, Store},
        WatchStreamExt,
    },
    Api, Client, Resource, ResourceExt,
};
use kube_runtime::watcher;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

/// Read half of a per-kind cache.
pub struct KindCache<K>
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    kind: ResourceKind,
    store: Store<K>,
    synced: Arc<AtomicBool>,
}

/// Write half of a per-kind cache, fed by that kind's watch loop.
pub struct KindFeed<K>
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    kind: ResourceKind,
    writer: Writer<K>,
    synced: Arc<AtomicBool>,
    listed: bool,
    failures: u32,
}

fn kind_cache<K>(kind: ResourceKind) -> (KindCache<K>, KindFeed<K>)
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    let (store, writer) = reflector::store();
    let synced = Arc::new(AtomicBool::new(false));

    (
        KindCache {
            kind,
            store,
            synced: synced.clone(),
        },
        KindFeed {
            kind,
            writer,
            synced,
            listed: false,
            failures: 0,
        },
    )
}

impl<K> KindCache<K>
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Point lookup; cluster-scoped kinds are looked up without a namespace.
    pub fn get(&self, namespace: Option<&str>, name: &str) -> Option<Arc<K>> {
        let key = match namespace {
            Some(ns) => ObjectRef::new(name).within(ns),
            None => ObjectRef::new(name),
        };
        self.store.get(&key)
    }

    /// All objects in `namespace` whose labels satisfy `selector`.
    pub fn list(&self, namespace: &str, selector: &LabelSelector) -> Vec<Arc<K>> {
        self.store
            .state()
            .into_iter()
            .filter(|o| o.meta().namespace.as_deref() == Some(namespace))
            .filter(|o| selector.matches(o.labels()))
            .collect()
    }

    /// True once a listing completed and the watch has not failed repeatedly since.
    pub fn has_synced(&self) -> bool {
        self.synced.load(Ordering::SeqCst)
    }

    /// Resolves when the first full listing has been applied.
    pub async fn wait_until_ready(&self) -> Result<()> {
        self.store
            .wait_until_ready()
            .await
            .map_err(|_| PodscopeError::CacheTerminated(self.kind))
    }
}

impl<K> KindFeed<K>
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    pub(crate) fn apply(&mut self, event: &watcher::Event<K>) {
        self.writer.apply_watcher_event(event);
        self.failures = 0;

        if let watcher::Event::InitDone = event {
            let was_synced = self.synced.swap(true, Ordering::SeqCst);
            match (self.listed, was_synced) {
                (false, _) => info!(kind = %self.kind, "Initial sync complete"),
                (true, true) => debug!(kind = %self.kind, "Relist complete"),
                (true, false) => {
                    info!(kind = %self.kind, "Relist complete, cache is synced again")
                }
            }
            self.listed = true;
        }
    }

    /// Counts a failed watch poll. Past the threshold the kind reports
    /// unsynced until its next complete listing.
    pub(crate) fn record_error(&mut self) {
        self.failures += 1;
        if self.failures == WATCH_FAILURE_THRESHOLD {
            warn!(
                kind = %self.kind,
                failures = self.failures,
                "Watch keeps failing, cache is no longer synced"
            );
            self.synced.store(false, Ordering::SeqCst);
        }
    }

    fn mark_terminated(&self) {
        self.synced.store(false, Ordering::SeqCst);
    }
}

/// Write halves for every cache in a `ResourceCacheSet`.
pub struct CacheFeeds {
    pub namespaces: KindFeed<Namespace>,
    pub deployments: KindFeed<Deployment>,
    pub replica_sets: KindFeed<ReplicaSet>,
    pub pods: KindFeed<Pod>,
    pub replication_controllers: KindFeed<ReplicationController>,
    pub services: KindFeed<Service>,
}

impl CacheFeeds {
    /// Starts one watch loop per kind. Must be called from within a tokio runtime.
    pub fn spawn(self, client: Client, resync_interval: Duration) {
        let CacheFeeds {
            namespaces,
            deployments,
            replica_sets,
            pods,
            replication_controllers,
            services,
        } = self;

        tokio::spawn(run_watch_loop(
            Api::<Namespace>::all(client.clone()),
            namespaces,
            resync_interval,
        ));
        tokio::spawn(run_watch_loop(
            Api::<Deployment>::all(client.clone()),
            deployments,
            resync_interval,
        ));
        tokio::spawn(run_watch_loop(
            Api::<ReplicaSet>::all(client.clone()),
            replica_sets,
            resync_interval,
        ));
        tokio::spawn(run_watch_loop(
            Api::<Pod>::all(client.clone()),
            pods,
            resync_interval,
        ));
        tokio::spawn(run_watch_loop(
            Api::<ReplicationController>::all(client.clone()),
            replication_controllers,
            resync_interval,
        ));
        tokio::spawn(run_watch_loop(
            Api::<Service>::all(client),
            services,
            resync_interval,
        ));
    }
}

/// Drives a single kind's cache for the lifetime of the process.
///
/// Reconnects and backoff are left to the watcher. The watcher is recreated
/// `resync_interval` after each completed listing, which re-lists the kind;
/// the store keeps serving the previous snapshot until the new listing is
/// complete. A listing in progress is never cut short by the resync timer.
async fn run_watch_loop<K>(api: Api<K>, mut feed: KindFeed<K>, resync_interval: Duration)
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
{
    info!(kind = %feed.kind, "Starting watch");

    loop {
        let mut stream = pin!(watcher(api.clone(), watcher::Config::default()).default_backoff());
        let mut resync = pin!(sleep(resync_interval));
        let mut listed = false;

        loop {
            tokio::select! {
                () = resync.as_mut(), if listed => {
                    debug!(kind = %feed.kind, "Resync interval elapsed, relisting");
                    break;
                }
                event = stream.try_next() => match event {
                    Ok(Some(event)) => {
                        if !listed && matches!(event, watcher::Event::InitDone) {
                            listed = true;
                            resync.as_mut().reset(Instant::now() + resync_interval);
                        }
                        feed.apply(&event);
                    }
                    Ok(None) => {
                        error!(kind = %feed.kind, "Watch stream terminated, cache is no longer synced");
                        feed.mark_terminated();
                        return;
                    }
                    Err(e) => {
                        warn!(kind = %feed.kind, "Watch error, retrying: {}", e);
                        feed.record_error();
                    }
                },
            }
        }
    }
}

/// Process-wide set of caches, one per `ResourceKind`.
pub struct ResourceCacheSet {
    pub namespaces: KindCache<Namespace>,
    pub deployments: KindCache<Deployment>,
    pub replica_sets: KindCache<ReplicaSet>,
    pub pods: KindCache<Pod>,
    pub replication_controllers: KindCache<ReplicationController>,
    pub services: KindCache<Service>,
    ready: AtomicBool,
}

impl ResourceCacheSet {
    /// Builds every cache and then starts their watch loops.
    pub fn start(client: Client, resync_interval: Duration) -> Self {
        let (caches, feeds) = Self::detached();
        feeds.spawn(client, resync_interval);
        caches
    }

    /// Builds the caches without starting any watch; the caller owns the feeds.
    pub fn detached() -> (Self, CacheFeeds) {
        let (namespaces, namespaces_feed) = kind_cache(ResourceKind::Namespaces);
        let (deployments, deployments_feed) = kind_cache(ResourceKind::Deployments);
        let (replica_sets, replica_sets_feed) = kind_cache(ResourceKind::ReplicaSets);
        let (pods, pods_feed) = kind_cache(ResourceKind::Pods);
        let (replication_controllers, replication_controllers_feed) =
            kind_cache(ResourceKind::ReplicationControllers);
        let (services, services_feed) = kind_cache(ResourceKind::Services);

        let caches = Self {
            namespaces,
            deployments,
            replica_sets,
            pods,
            replication_controllers,
            services,
            ready: AtomicBool::new(false),
        };
        let feeds = CacheFeeds {
            namespaces: namespaces_feed,
            deployments: deployments_feed,
            replica_sets: replica_sets_feed,
            pods: pods_feed,
            replication_controllers: replication_controllers_feed,
            services: services_feed,
        };

        (caches, feeds)
    }

    /// Point lookup of any kind by namespace and name.
    ///
    /// `namespace` is ignored for namespaces, which are cluster-scoped.
    pub fn get(&self, kind: ResourceKind, namespace: &str, name: &str) -> Option<ResourceObject> {
        let ns = Some(namespace);
        match kind {
            ResourceKind::Namespaces => self
                .namespaces
                .get(None, name)
                .map(ResourceObject::Namespace),
            ResourceKind::Deployments => self
                .deployments
                .get(ns, name)
                .map(ResourceObject::Deployment),
            ResourceKind::ReplicaSets => self
                .replica_sets
                .get(ns, name)
                .map(ResourceObject::ReplicaSet),
            ResourceKind::Pods => self.pods.get(ns, name).map(ResourceObject::Pod),
            ResourceKind::ReplicationControllers => self
                .replication_controllers
                .get(ns, name)
                .map(ResourceObject::ReplicationController),
            ResourceKind::Services => self.services.get(ns, name).map(ResourceObject::Service),
        }
    }

    /// Per-kind sync state, for health reporting.
    pub fn sync_status(&self) -> BTreeMap<ResourceKind, bool> {
        BTreeMap::from([
            (ResourceKind::Namespaces, self.namespaces.has_synced()),
            (ResourceKind::Deployments, self.deployments.has_synced()),
            (ResourceKind::ReplicaSets, self.replica_sets.has_synced()),
            (ResourceKind::Pods, self.pods.has_synced()),
            (
                ResourceKind::ReplicationControllers,
                self.replication_controllers.has_synced(),
            ),
            (ResourceKind::Services, self.services.has_synced()),
        ])
    }

    /// Whether the sync barrier has passed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub(crate) fn mark_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
    }
}
