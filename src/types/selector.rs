// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{PodscopeError, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector as K8sLabelSelector;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A set of required `key=value` label constraints.
///
/// An object matches when its labels contain every constraint. A selector
/// without constraints matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    required: BTreeMap<String, String>,
}

impl LabelSelector {
    /// The selector that matches every object
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn from_labels(labels: &BTreeMap<String, String>) -> Self {
        Self {
            required: labels.clone(),
        }
    }

    /// Exact-match part of a Kubernetes selector; `matchExpressions` are not evaluated.
    pub fn from_match_labels(selector: &K8sLabelSelector) -> Self {
        selector
            .match_labels
            .as_ref()
            .map(Self::from_labels)
            .unwrap_or_default()
    }

    pub fn is_everything(&self) -> bool {
        self.required.is_empty()
    }

    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.required
            .iter()
            .all(|(k, v)| labels.get(k).is_some_and(|actual| actual == v))
    }

    pub fn requirements(&self) -> &BTreeMap<String, String> {
        &self.required
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.required.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        Ok(())
    }
}

/// Parses `key=value` and `key==value` terms separated by commas.
impl FromStr for LabelSelector {
    type Err = PodscopeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut required = BTreeMap::new();

        for term in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let Some((key, value)) = term.split_once("==").or_else(|| term.split_once('=')) else {
                return Err(PodscopeError::InvalidLabelSelector(format!(
                    "expected key=value, got '{}'",
                    term
                )));
            };
            let (key, value) = (key.trim(), value.trim());

            if key.is_empty() || key.ends_with('!') || value.contains('=') {
                return Err(PodscopeError::InvalidLabelSelector(format!(
                    "unsupported term '{}'",
                    term
                )));
            }

            if let Some(previous) = required.insert(key.to_string(), value.to_string()) {
                if previous != value {
                    return Err(PodscopeError::InvalidLabelSelector(format!(
                        "conflicting values for '{}'",
                        key
                    )));
                }
            }
        }

        Ok(Self { required })
    }
}
