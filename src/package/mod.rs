// src/package/mod.rs

//! Package records and registration-change events.
//!
//! A `PackageRecord` is a read-only snapshot of one installed package as
//! reported by the package client: its identity plus the git dependencies
//! it declares. A `RegistrationChange` describes one delivery of the
//! client's "registered package set changed" notification.

pub mod manifest;

pub use manifest::{PackageManifest, WorkspaceManifest};

use std::collections::BTreeMap;

/// Snapshot of one installed or candidate package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Unique package name (base identity)
    pub identifier: String,

    /// Installed version, if known
    pub version: Option<String>,

    /// Declared git dependencies: dependency identifier -> source reference.
    /// A package that declares none carries an empty map.
    pub git_dependencies: BTreeMap<String, String>,
}

impl PackageRecord {
    /// Create a record with no declared dependencies
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            version: None,
            git_dependencies: BTreeMap::new(),
        }
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Declare a git dependency
    pub fn with_dependency(
        mut self,
        identifier: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        self.git_dependencies
            .insert(identifier.into(), reference.into());
        self
    }

    /// Check if this package declares any git dependencies
    pub fn declares_dependencies(&self) -> bool {
        !self.git_dependencies.is_empty()
    }
}

/// One delivery of the registered-package-set-changed notification
#[derive(Debug, Clone, Default)]
pub struct RegistrationChange {
    /// Packages added in this change
    pub added: Vec<PackageRecord>,

    /// Packages removed in this change
    pub removed: Vec<PackageRecord>,
}

impl RegistrationChange {
    /// Check if any packages were added
    pub fn has_additions(&self) -> bool {
        !self.added.is_empty()
    }

    /// Check if the change carries no packages at all
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
