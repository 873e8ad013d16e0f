// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource kinds, references, label selectors and resolved pod sets.

pub mod kind;
pub mod object;
pub mod pod_set;
pub mod reference;
pub mod selector;

pub use kind::{normalize, ResourceKind};
pub use object::ResourceObject;
pub use pod_set::{PodSet, PodSummary};
pub use reference::{ResourceRef, ResourceRequest};
pub use selector::LabelSelector;
