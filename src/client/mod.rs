// src/client/mod.rs

//! Package client capability trait
//!
//! The resolver talks to the surrounding package manager through this
//! trait: list what is installed, apply additions and removals. Keeping
//! the boundary behind a trait lets tests substitute a scripted fake for
//! the real directory-backed client.

mod directory;

pub use directory::DirectoryClient;

use crate::error::Result;
use crate::package::PackageRecord;
use async_trait::async_trait;

/// Operations the external package manager exposes to the resolver
#[async_trait]
pub trait PackageClient: Send + Sync {
    /// List the currently installed packages
    ///
    /// Returns one record per package, with any declared git dependencies
    /// attached.
    async fn list(&self) -> Result<Vec<PackageRecord>>;

    /// Apply package changes
    ///
    /// Adds the given dependency references and removes the given entries.
    /// Either slice may be empty.
    async fn add_and_remove(&self, to_add: &[String], to_remove: &[String]) -> Result<()>;

    /// Get a human-readable name for this client (for logging)
    fn name(&self) -> &str;
}
