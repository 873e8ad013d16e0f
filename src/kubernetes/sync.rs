// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Startup barrier that waits for every cache to complete its initial list.

use crate::error::{PodscopeError, Result};
use crate::kubernetes::ResourceCacheSet;
use std::time::Duration;
use tracing::{error, info, instrument};

impl ResourceCacheSet {
    /// Blocks until all caches have completed their initial listing.
    ///
    /// Succeeds only when every kind is ready; fails with `SyncTimeout` once
    /// `timeout` elapses. Dropping the returned future cancels the wait.
    /// Until this succeeds, resolution requests are rejected with `NotReady`.
    #[instrument(skip(self))]
    pub async fn wait_for_sync(&self, timeout: Duration) -> Result<()> {
        info!("Waiting for caches to sync");

        let all_ready = async {
            futures::try_join!(
                self.namespaces.wait_until_ready(),
                self.deployments.wait_until_ready(),
                self.replica_sets.wait_until_ready(),
                self.pods.wait_until_ready(),
                self.replication_controllers.wait_until_ready(),
                self.services.wait_until_ready(),
            )
        };

        match tokio::time::timeout(timeout, all_ready).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                error!("Cache failed before syncing: {}", e);
                return Err(e);
            }
            Err(_) => {
                let pending: Vec<String> = self
                    .sync_status()
                    .into_iter()
                    .filter(|(_, synced)| !synced)
                    .map(|(kind, _)| kind.to_string())
                    .collect();
                error!("Timed out waiting for caches to sync: {}", pending.join(", "));
                return Err(PodscopeError::SyncTimeout(timeout));
            }
        }

        self.mark_ready();
        info!("Caches synced");
        Ok(())
    }
}
