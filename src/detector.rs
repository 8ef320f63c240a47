// src/detector.rs

//! Change detection over a package snapshot.
//!
//! This module computes which declared git dependencies are not yet
//! satisfied by the installed package set. It is the pure half of the
//! resolver: it reads one snapshot and returns a value, and it never talks
//! to the package client itself.

use std::collections::HashSet;

use crate::package::PackageRecord;

/// The result of one change-detection pass
#[derive(Debug, Clone, Default)]
pub struct ResolutionResult {
    /// Dependency references to add, deduplicated, in first-declared order
    pub to_add: Vec<String>,

    /// Human-readable diagnostics produced during the pass
    pub messages: Vec<String>,
}

impl ResolutionResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the pass found nothing to add
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty()
    }

    /// Add a dependency reference
    fn add_reference(&mut self, reference: String) {
        self.to_add.push(reference);
    }

    /// Add a diagnostic message
    fn add_message(&mut self, message: String) {
        self.messages.push(message);
    }
}

/// Compute which declared git dependencies are missing from a snapshot
///
/// A dependency is satisfied when any package in the snapshot carries its
/// identifier, the declaring package included. Unsatisfied references are
/// collected once each, in the order first declared. Packages declaring no
/// dependencies yield an informational message; entries with an empty
/// identifier or reference are skipped with a message. Detection never
/// fails.
pub fn detect_changes(packages: &[PackageRecord]) -> ResolutionResult {
    let mut result = ResolutionResult::new();

    // Every identifier present in the snapshot satisfies a dependency on it
    let present: HashSet<&str> = packages.iter().map(|p| p.identifier.as_str()).collect();

    // References already collected this pass
    let mut seen: HashSet<&str> = HashSet::new();

    for package in packages {
        if !package.declares_dependencies() {
            result.add_message(format!(
                "{}: no git dependencies provided",
                package.identifier
            ));
            continue;
        }

        for (dep_identifier, dep_reference) in &package.git_dependencies {
            if dep_identifier.trim().is_empty() || dep_reference.trim().is_empty() {
                result.add_message(format!(
                    "{}: skipping malformed git dependency entry",
                    package.identifier
                ));
                continue;
            }

            if present.contains(dep_identifier.as_str()) {
                continue;
            }

            if seen.insert(dep_reference.as_str()) {
                result.add_reference(dep_reference.clone());
            }
        }
    }

    result
}
