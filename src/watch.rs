// src/watch.rs

//! Polling watcher that synthesizes registration-change events.
//!
//! Hosts with a native package-event stream can call
//! `DependencyResolver::handle_registration_change` directly. Everywhere
//! else this watcher fills the gap: it re-lists the installed packages on
//! an interval, diffs consecutive snapshots by identifier, and hands any
//! additions to the resolver.

use crate::client::PackageClient;
use crate::error::Result;
use crate::package::{PackageRecord, RegistrationChange};
use crate::resolver::DependencyResolver;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Polls the package client and drives the resolver on changes
pub struct Watcher {
    resolver: Arc<DependencyResolver>,
    client: Arc<dyn PackageClient>,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl Watcher {
    /// Create a watcher polling at the given interval
    pub fn new(
        resolver: Arc<DependencyResolver>,
        client: Arc<dyn PackageClient>,
        interval: Duration,
    ) -> Self {
        Self {
            resolver,
            client,
            interval,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the watch loop when set
    ///
    /// Hand this to a signal handler; the loop notices within a second.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    /// Run the watch loop until the shutdown flag is set
    ///
    /// Converges once at startup, then re-lists each interval. A failed
    /// listing skips that cycle rather than diffing against nothing, so a
    /// transient failure never looks like a mass removal.
    pub async fn run(&self) -> Result<()> {
        info!(
            "Watching {} for package changes every {:?}",
            self.client.name(),
            self.interval
        );

        let mut previous = match self.client.list().await {
            Ok(packages) => packages,
            Err(e) => {
                warn!("Initial package listing failed: {}", e);
                Vec::new()
            }
        };

        if let Err(e) = self.resolver.refresh().await {
            warn!("Initial resolution failed: {}", e);
        }

        while !self.shutdown.load(Ordering::Relaxed) {
            self.sleep_interval().await;
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }

            let current = match self.client.list().await {
                Ok(packages) => packages,
                Err(e) => {
                    warn!("Package listing failed, skipping this cycle: {}", e);
                    continue;
                }
            };

            let change = diff_snapshots(&previous, &current);
            if change.is_empty() {
                debug!("No package changes");
            } else {
                debug!(
                    "{} added, {} removed since last cycle",
                    change.added.len(),
                    change.removed.len()
                );
                if let Err(e) = self.resolver.handle_registration_change(&change).await {
                    warn!("Resolution failed: {}", e);
                }
            }

            previous = current;
        }

        info!("Watcher stopped");
        Ok(())
    }

    /// Sleep one interval in bounded slices so shutdown takes effect promptly
    async fn sleep_interval(&self) {
        let mut remaining = self.interval;
        while remaining > Duration::ZERO && !self.shutdown.load(Ordering::Relaxed) {
            let slice = remaining.min(Duration::from_secs(1));
            tokio::time::sleep(slice).await;
            remaining = remaining.saturating_sub(slice);
        }
    }
}

/// Compute the registration change between two snapshots, by identifier
pub fn diff_snapshots(before: &[PackageRecord], after: &[PackageRecord]) -> RegistrationChange {
    let before_ids: HashSet<&str> = before.iter().map(|p| p.identifier.as_str()).collect();
    let after_ids: HashSet<&str> = after.iter().map(|p| p.identifier.as_str()).collect();

    RegistrationChange {
        added: after
            .iter()
            .filter(|p| !before_ids.contains(p.identifier.as_str()))
            .cloned()
            .collect(),
        removed: before
            .iter()
            .filter(|p| !after_ids.contains(p.identifier.as_str()))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(identifier: &str) -> PackageRecord {
        PackageRecord::new(identifier)
    }

    #[test]
    fn test_diff_detects_additions() {
        let before = vec![record("com.acme.app")];
        let after = vec![record("com.acme.app"), record("com.acme.tools")];

        let change = diff_snapshots(&before, &after);

        assert_eq!(change.added.len(), 1);
        assert_eq!(change.added[0].identifier, "com.acme.tools");
        assert!(change.removed.is_empty());
    }

    #[test]
    fn test_diff_detects_removals() {
        let before = vec![record("com.acme.app"), record("com.acme.tools")];
        let after = vec![record("com.acme.app")];

        let change = diff_snapshots(&before, &after);

        assert!(change.added.is_empty());
        assert_eq!(change.removed.len(), 1);
        assert_eq!(change.removed[0].identifier, "com.acme.tools");
    }

    #[test]
    fn test_diff_of_identical_snapshots_is_empty() {
        let snapshot = vec![record("com.acme.app"), record("com.acme.tools")];
        let change = diff_snapshots(&snapshot, &snapshot);
        assert!(change.is_empty());
    }

    #[test]
    fn test_diff_ignores_dependency_edits_on_existing_packages() {
        // Only membership changes count as registration changes; edited
        // declarations are picked up by the pass the next addition triggers.
        let before = vec![record("com.acme.app")];
        let after = vec![
            record("com.acme.app").with_dependency("com.acme.base", "git://host/base"),
        ];

        let change = diff_snapshots(&before, &after);
        assert!(change.is_empty());
    }
}
