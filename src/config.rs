// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{cache, DEFAULT_NAMESPACE};
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Resolver configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum staleness before each cache re-lists its kind
    pub resync_interval: Duration,
    /// Upper bound on the startup wait for all caches to sync
    pub sync_timeout: Duration,
    /// Namespace for targets that do not name one
    pub default_namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resync_interval: Duration::from_secs(cache::DEFAULT_RESYNC_INTERVAL_SECS),
            sync_timeout: Duration::from_secs(cache::DEFAULT_SYNC_TIMEOUT_SECS),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let resync_interval = match lookup("RESYNC_INTERVAL_SECS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .with_context(|| format!("RESYNC_INTERVAL_SECS is not a number: {}", v))?,
            ),
            None => defaults.resync_interval,
        };
        if resync_interval.is_zero() {
            bail!("RESYNC_INTERVAL_SECS must be greater than zero");
        }

        let sync_timeout = match lookup("CACHE_SYNC_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .with_context(|| format!("CACHE_SYNC_TIMEOUT_SECS is not a number: {}", v))?,
            ),
            None => defaults.sync_timeout,
        };

        let default_namespace = lookup("DEFAULT_NAMESPACE")
            .filter(|ns| !ns.is_empty())
            .unwrap_or(defaults.default_namespace);

        Ok(Config {
            resync_interval,
            sync_timeout,
            default_namespace,
        })
    }
}
