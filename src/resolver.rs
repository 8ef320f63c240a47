// src/resolver.rs

//! Dependency resolution orchestration.
//!
//! One resolution pass flows through a fixed sequence:
//!
//! ```text
//!   trigger (refresh | registration change with additions)
//!        |
//!        v
//!   client.list() ---failure---> empty snapshot + diagnostic
//!        |
//!        v
//!   detect_changes()
//!        |
//!        +-- to_add empty -----> Clean (no apply call)
//!        |
//!        +-- to_add non-empty -> client.add_and_remove() -> Applied
//!        |
//!        v
//!   emit messages, in order
//! ```
//!
//! Passes retain no state between runs; for a given snapshot a pass is
//! idempotent. An internal guard serializes passes so overlapping triggers
//! cannot interleave their detect-then-apply sequences.

use crate::client::PackageClient;
use crate::detector::{detect_changes, ResolutionResult};
use crate::diag::DiagnosticSink;
use crate::error::Result;
use crate::package::{PackageRecord, RegistrationChange};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Terminal state of one resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Additions were sent to the package client
    Applied {
        /// Number of references added
        added: usize,
    },

    /// Nothing to do, no apply call was made
    Clean,
}

impl PassOutcome {
    /// Check if this pass applied changes
    pub fn changed(&self) -> bool {
        matches!(self, PassOutcome::Applied { .. })
    }
}

impl std::fmt::Display for PassOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassOutcome::Applied { added } => write!(f, "added {} package(s)", added),
            PassOutcome::Clean => write!(f, "up to date"),
        }
    }
}

/// Orchestrates change detection and application
///
/// Constructed with its collaborators injected; dropping the resolver is
/// its teardown. Both entry points converge on the same pass sequence.
pub struct DependencyResolver {
    client: Arc<dyn PackageClient>,
    sink: Arc<dyn DiagnosticSink>,
    /// Held across detect-then-apply so passes serialize
    pass_guard: Mutex<()>,
}

impl DependencyResolver {
    /// Create a resolver over the given client and diagnostic sink
    pub fn new(client: Arc<dyn PackageClient>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            client,
            sink,
            pass_guard: Mutex::new(()),
        }
    }

    /// Run one resolution pass now
    ///
    /// Lists the installed packages, detects missing git dependencies, and
    /// applies any additions through the client.
    pub async fn refresh(&self) -> Result<PassOutcome> {
        let _pass = self.pass_guard.lock().await;
        self.run_pass().await
    }

    /// React to a registered-package-set change
    ///
    /// Acts only when packages were added; a removal-only change returns
    /// `Ok(None)` without listing or detecting anything, so dependencies
    /// are never resolved for packages on their way out.
    pub async fn handle_registration_change(
        &self,
        change: &RegistrationChange,
    ) -> Result<Option<PassOutcome>> {
        if !change.has_additions() {
            debug!("Registration change has no additions, ignoring");
            return Ok(None);
        }

        info!(
            "{} package(s) registered, checking git dependencies",
            change.added.len()
        );
        let _pass = self.pass_guard.lock().await;
        let outcome = self.run_pass().await?;
        Ok(Some(outcome))
    }

    /// Obtain the current snapshot, absorbing listing failures
    async fn snapshot(&self) -> Vec<PackageRecord> {
        match self.client.list().await {
            Ok(packages) => packages,
            Err(e) => {
                warn!("Package listing via {} failed: {}", self.client.name(), e);
                self.sink.emit(&format!("package listing failed: {}", e));
                Vec::new()
            }
        }
    }

    /// One detect-then-apply sequence over a fresh snapshot
    async fn run_pass(&self) -> Result<PassOutcome> {
        let packages = self.snapshot().await;
        debug!("Detecting changes across {} package(s)", packages.len());

        let result = detect_changes(&packages);
        let outcome = self.apply(&result).await?;

        for message in &result.messages {
            self.sink.emit(message);
        }

        Ok(outcome)
    }

    /// Send additions to the client when there are any
    ///
    /// Apply failures propagate to the caller; the resolver does not retry,
    /// since the next registration change re-triggers a pass anyway.
    async fn apply(&self, result: &ResolutionResult) -> Result<PassOutcome> {
        if result.is_empty() {
            debug!("No git dependencies to add");
            return Ok(PassOutcome::Clean);
        }

        info!("Adding {} git dependency reference(s)", result.to_add.len());
        self.client.add_and_remove(&result.to_add, &[]).await?;

        Ok(PassOutcome::Applied {
            added: result.to_add.len(),
        })
    }
}
