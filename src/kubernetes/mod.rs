// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch-backed caches for the resource kinds used during pod resolution.

pub mod cache;
pub mod sync;

pub use cache::{CacheFeeds, KindCache, KindFeed, ResourceCacheSet};
