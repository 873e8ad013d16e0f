// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Result};
use kube::Client;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use podscope::config::Config;
use podscope::kubernetes::ResourceCacheSet;
use podscope::resolve::PodResolver;
use podscope::types::ResourceRequest;

/// Turns a `kind/name` target into a request in `namespace`.
fn parse_target(target: &str, namespace: &str) -> Result<ResourceRequest> {
    match target.split_once('/') {
        Some((kind, name)) if !kind.is_empty() && !name.is_empty() => {
            Ok(ResourceRequest::new(kind, namespace, name))
        }
        _ => bail!("Invalid target '{}', expected <kind>/<name>", target),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting podscope");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: resync_interval={:?}, sync_timeout={:?}, default_namespace={}",
        config.resync_interval, config.sync_timeout, config.default_namespace
    );

    let targets = std::env::args()
        .skip(1)
        .map(|t| parse_target(&t, &config.default_namespace))
        .collect::<Result<Vec<_>>>()?;

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let caches = Arc::new(ResourceCacheSet::start(client, config.resync_interval));

    // Serving against partially populated caches is never allowed
    caches.wait_for_sync(config.sync_timeout).await?;

    let resolver = PodResolver::new(caches.clone());

    if targets.is_empty() {
        info!("No targets given, keeping caches in sync until interrupted");
        tokio::signal::ctrl_c().await?;
        info!("Shutting down, cache sync status: {:?}", caches.sync_status());
        return Ok(());
    }

    let mut failed = false;
    for request in &targets {
        match resolver.resolve(request) {
            Ok(pods) => print!("{}", serde_yaml::to_string(&pods.summaries())?),
            Err(e) => {
                error!("{}", e);
                failed = true;
            }
        }
    }

    if failed {
        bail!("Failed to resolve one or more targets");
    }
    Ok(())
}
