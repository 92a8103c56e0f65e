//! Time-gated reconciliation of the registry with live API discovery.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use model_mapper_sdk::{ApiResource, Discovery, DiscoveryError};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::service::ModelMapper;

/// Deadline offset used when `now + interval` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

impl ModelMapper {
    /// Syncs plural names and namespaced flags of known model types with `discovery`.
    ///
    /// Before the refresh deadline the cached discovery set is returned and
    /// `discovery` is not called. Concurrent callers past the deadline are
    /// serialized; only the first one performs the round-trip. Discovered kinds
    /// without a known model type are skipped.
    ///
    /// # Errors
    /// Returns the `DiscoveryError` of `discovery` unchanged. The deadline and the
    /// cached set are left as they were, so the next call retries immediately.
    pub async fn refresh(
        &self,
        discovery: &dyn Discovery,
        interval: Duration,
    ) -> Result<Arc<HashSet<ApiResource>>, DiscoveryError> {
        if let Some(cached) = self.cached_discovery(Instant::now()) {
            debug!("Discovery refresh not due, using cached resources");
            return Ok(cached);
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have refreshed while this one waited on the gate.
        let now = Instant::now();
        if let Some(cached) = self.cached_discovery(now) {
            debug!("Discovery refreshed by a concurrent caller, using cached resources");
            return Ok(cached);
        }

        let resources = discovery.find_all().await.inspect_err(|e| {
            warn!(error = %e, "API discovery failed, refresh deadline unchanged");
        })?;

        let synced = self.sync_discovered(&resources);
        let resources = Arc::new(resources);

        {
            let mut state = self.refresh_state.write();
            let deadline = refresh_deadline(now, interval);
            state.next_refresh_deadline = Some(
                state
                    .next_refresh_deadline
                    .map_or(deadline, |current| current.max(deadline)),
            );
            state.last_discovery = Arc::clone(&resources);
        }

        info!(
            resources = resources.len(),
            synced,
            interval = %humantime::format_duration(interval),
            "Model mappings synced with API discovery"
        );
        Ok(resources)
    }

    /// Same as [`refresh`](Self::refresh) with the configured interval.
    ///
    /// # Errors
    /// Returns the `DiscoveryError` of `discovery` unchanged.
    pub async fn refresh_with_default_interval(
        &self,
        discovery: &dyn Discovery,
    ) -> Result<Arc<HashSet<ApiResource>>, DiscoveryError> {
        let interval = self.config().discovery_refresh_interval;
        self.refresh(discovery, interval).await
    }

    /// The cached discovery set, if `now` is before the refresh deadline.
    fn cached_discovery(&self, now: Instant) -> Option<Arc<HashSet<ApiResource>>> {
        let state = self.refresh_state.read();
        match state.next_refresh_deadline {
            Some(deadline) if now < deadline => Some(Arc::clone(&state.last_discovery)),
            _ => None,
        }
    }

    /// Re-registers every known model type found in `resources`. Returns how many
    /// (group, version, kind) triples were synced.
    fn sync_discovered(&self, resources: &HashSet<ApiResource>) -> usize {
        let mut synced = 0_usize;
        for resource in resources {
            for version in &resource.versions {
                let Some(ty) = self.lookup_type_by_gvk(&resource.group, version, &resource.kind)
                else {
                    debug!(
                        group = %resource.group,
                        version = %version,
                        kind = %resource.kind,
                        "No model type for discovered kind, skipping"
                    );
                    continue;
                };

                self.register(
                    &resource.group,
                    version,
                    &resource.kind,
                    &resource.resource_plural,
                    Some(resource.namespaced),
                    ty,
                );
                synced += 1;
            }
        }
        synced
    }
}

/// `now + interval`, saturated to a far-future instant on overflow.
fn refresh_deadline(now: Instant, interval: Duration) -> Instant {
    now.checked_add(interval).unwrap_or_else(|| now + FAR_FUTURE)
}
