// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Resolved pods, deduplicated by namespace and name.
///
/// Iteration order is stable for a given content but callers must not rely on it.
#[derive(Debug, Clone, Default)]
pub struct PodSet {
    pods: BTreeMap<(String, String), Arc<Pod>>,
}

/// The identifying part of a resolved pod handed back to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodSummary {
    pub namespace: String,
    pub name: String,
    pub labels: BTreeMap<String, String>,
}

impl PodSet {
    /// Returns false when the pod was already present.
    pub fn insert(&mut self, pod: Arc<Pod>) -> bool {
        let key = (pod.namespace().unwrap_or_default(), pod.name_any());
        self.pods.insert(key, pod).is_none()
    }

    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.pods
            .contains_key(&(namespace.to_string(), name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Pod>> {
        self.pods.values()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&Pod) -> bool) {
        self.pods.retain(|_, pod| keep(&**pod));
    }

    pub fn summaries(&self) -> Vec<PodSummary> {
        self.pods
            .iter()
            .map(|((namespace, name), pod)| PodSummary {
                namespace: namespace.clone(),
                name: name.clone(),
                labels: pod.labels().clone(),
            })
            .collect()
    }
}

impl FromIterator<Arc<Pod>> for PodSet {
    fn from_iter<I: IntoIterator<Item = Arc<Pod>>>(iter: I) -> Self {
        let mut set = PodSet::default();
        set.extend(iter);
        set
    }
}

impl Extend<Arc<Pod>> for PodSet {
    fn extend<I: IntoIterator<Item = Arc<Pod>>>(&mut self, iter: I) {
        for pod in iter {
            self.insert(pod);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_pod;

    #[test]
    fn test_insert_deduplicates_by_identity() {
        let mut set = PodSet::default();

        assert!(set.insert(Arc::new(make_pod("web-1", "default", &[("app", "web")], "Running"))));
        assert!(!set.insert(Arc::new(make_pod("web-1", "default", &[("app", "web")], "Running"))));
        assert!(set.insert(Arc::new(make_pod("web-1", "other", &[("app", "web")], "Running"))));

        assert_eq!(set.len(), 2);
        assert!(set.contains("default", "web-1"));
        assert!(set.contains("other", "web-1"));
    }

    #[test]
    fn test_summaries_carry_labels() {
        let set: PodSet = [Arc::new(make_pod(
            "emojivoto-meshed",
            "emojivoto",
            &[("app", "emoji-svc")],
            "Running",
        ))]
        .into_iter()
        .collect();

        assert_eq!(
            set.summaries(),
            vec![PodSummary {
                namespace: "emojivoto".to_string(),
                name: "emojivoto-meshed".to_string(),
                labels: BTreeMap::from([("app".to_string(), "emoji-svc".to_string())]),
            }]
        );
    }

    #[test]
    fn test_retain_filters_pods() {
        let mut set: PodSet = [
            Arc::new(make_pod("a", "default", &[("app", "web")], "Running")),
            Arc::new(make_pod("b", "default", &[("app", "api")], "Running")),
        ]
        .into_iter()
        .collect();

        set.retain(|pod| pod.labels().get("app").is_some_and(|v| v == "web"));

        assert_eq!(set.len(), 1);
        assert!(set.contains("default", "a"));
    }
}
