// tests/common/mod.rs

//! Shared test utilities for integration tests.

use async_trait::async_trait;
use gitdeps::{Error, PackageClient, PackageRecord, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Package client fake that plays scripted listings and records every
/// apply call.
///
/// Each `list` call advances the script. An `Ok` step replaces the
/// replayed snapshot, an `Err` step fails that one call and leaves the
/// snapshot unchanged, and an exhausted script repeats the last snapshot.
pub struct ScriptedClient {
    listings: Mutex<VecDeque<Result<Vec<PackageRecord>>>>,
    current: Mutex<Vec<PackageRecord>>,
    fail_next_apply: AtomicBool,
    list_calls: AtomicUsize,
    apply_calls: AtomicUsize,
    applied: Mutex<Vec<(Vec<String>, Vec<String>)>>,
}

#[allow(dead_code)]
impl ScriptedClient {
    /// Create a client that always returns the given snapshot
    pub fn with_snapshot(snapshot: Vec<PackageRecord>) -> Self {
        Self::with_script(vec![snapshot])
    }

    /// Create a client that plays through the given snapshots in order
    pub fn with_script(snapshots: Vec<Vec<PackageRecord>>) -> Self {
        Self::with_listing_script(snapshots.into_iter().map(Ok).collect())
    }

    /// Create a client whose individual listings can also fail
    pub fn with_listing_script(listings: Vec<Result<Vec<PackageRecord>>>) -> Self {
        Self {
            listings: Mutex::new(listings.into()),
            current: Mutex::new(Vec::new()),
            fail_next_apply: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
            apply_calls: AtomicUsize::new(0),
            applied: Mutex::new(Vec::new()),
        }
    }

    /// Make the next `add_and_remove` call fail
    pub fn fail_next_apply(&self) {
        self.fail_next_apply.store(true, Ordering::Relaxed);
    }

    /// Number of `list` calls made so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Relaxed)
    }

    /// Number of `add_and_remove` calls made so far, failed ones included
    pub fn apply_calls(&self) -> usize {
        self.apply_calls.load(Ordering::Relaxed)
    }

    /// Successful apply calls recorded so far, as (to_add, to_remove) pairs
    pub fn applied(&self) -> Vec<(Vec<String>, Vec<String>)> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageClient for ScriptedClient {
    async fn list(&self) -> Result<Vec<PackageRecord>> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);

        let mut current = self.current.lock().unwrap();
        match self.listings.lock().unwrap().pop_front() {
            Some(Ok(next)) => *current = next,
            Some(Err(e)) => return Err(e),
            None => {}
        }
        Ok(current.clone())
    }

    async fn add_and_remove(&self, to_add: &[String], to_remove: &[String]) -> Result<()> {
        self.apply_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_next_apply.swap(false, Ordering::Relaxed) {
            return Err(Error::ClientError("scripted apply failure".to_string()));
        }

        self.applied
            .lock()
            .unwrap()
            .push((to_add.to_vec(), to_remove.to_vec()));
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
