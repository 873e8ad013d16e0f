// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Caller requests and the validated references resolution works on.

use crate::error::{PodscopeError, Result};
use crate::types::{normalize, LabelSelector, ResourceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolution request as received from a transport, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<String>,
}

impl ResourceRequest {
    pub fn new(kind: &str, namespace: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            label_selector: None,
        }
    }

    pub fn with_label_selector(mut self, selector: &str) -> Self {
        self.label_selector = Some(selector.to_string());
        self
    }
}

/// A validated reference to a single cluster object.
///
/// For namespaces the name is the namespace itself and `namespace()` returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    kind: ResourceKind,
    namespace: String,
    name: String,
    label_selector: Option<LabelSelector>,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, namespace: &str, name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(PodscopeError::InvalidReference(format!(
                "{} reference has an empty name",
                kind.singular()
            )));
        }

        let namespace = match kind {
            ResourceKind::Namespaces => name,
            _ if namespace.is_empty() => {
                return Err(PodscopeError::InvalidReference(format!(
                    "{} \"{}\" requires a namespace",
                    kind.singular(),
                    name
                )));
            }
            _ => namespace,
        };

        Ok(Self {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            label_selector: None,
        })
    }

    pub fn with_label_selector(mut self, selector: LabelSelector) -> Self {
        self.label_selector = (!selector.is_everything()).then_some(selector);
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label_selector(&self) -> Option<&LabelSelector> {
        self.label_selector.as_ref()
    }
}

impl TryFrom<&ResourceRequest> for ResourceRef {
    type Error = PodscopeError;

    fn try_from(request: &ResourceRequest) -> Result<Self> {
        let kind = normalize(&request.kind)?;
        let reference = ResourceRef::new(kind, &request.namespace, &request.name)?;

        match request.label_selector.as_deref() {
            Some(selector) => Ok(reference.with_label_selector(selector.parse()?)),
            None => Ok(reference),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{namespace: \"{}\", type: \"{}\", name: \"{}\"",
            self.namespace, self.kind, self.name
        )?;
        if let Some(selector) = &self.label_selector {
            write!(f, ", labelSelector: \"{}\"", selector)?;
        }
        f.write_str("}")
    }
}
