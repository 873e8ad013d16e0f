// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution of resource references into the pods they represent.

pub mod facade;
pub mod ownership;
pub mod selector;

pub use facade::PodResolver;
pub use ownership::resolve_pods;
pub use selector::selector_for;
