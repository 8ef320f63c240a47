// src/client/directory.rs

//! Directory-backed package client
//!
//! Reads installed packages from a directory of package descriptions
//! (`<packages_dir>/<name>/package.json`) and applies changes by editing
//! the workspace manifest. Fetching the actual package content is the host
//! tooling's concern; this client only keeps the manifest in sync.

use crate::error::{Error, Result};
use crate::package::{PackageManifest, PackageRecord, WorkspaceManifest};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::PackageClient;

/// Package client backed by a packages directory and a workspace manifest
pub struct DirectoryClient {
    manifest_path: PathBuf,
    packages_dir: PathBuf,
}

impl DirectoryClient {
    /// Create a client over the given workspace manifest and packages directory
    pub fn new(manifest_path: impl AsRef<Path>, packages_dir: impl AsRef<Path>) -> Self {
        Self {
            manifest_path: manifest_path.as_ref().to_path_buf(),
            packages_dir: packages_dir.as_ref().to_path_buf(),
        }
    }

    /// Derive the workspace dependency name for a reference string
    ///
    /// Takes the last path segment of the URL, with any `#fragment` and
    /// `.git` suffix stripped: `https://host/acme/tools.git#v2` becomes
    /// `tools`. This naming is a convention of this client only; the
    /// resolver treats references as opaque strings.
    pub fn dependency_name_from_reference(reference: &str) -> String {
        let no_fragment = match reference.find('#') {
            Some(idx) => &reference[..idx],
            None => reference,
        };
        let trimmed = no_fragment.trim_end_matches('/');
        let last = match trimmed.rfind('/') {
            Some(idx) => &trimmed[idx + 1..],
            None => trimmed,
        };
        // scp-like references (git@host:repo.git) have no slash to split on
        let last = match last.rfind(':') {
            Some(idx) => &last[idx + 1..],
            None => last,
        };
        last.trim_end_matches(".git").to_string()
    }

    /// Load the workspace manifest, treating a missing file as empty
    async fn load_manifest(&self) -> Result<WorkspaceManifest> {
        let text = match tokio::fs::read_to_string(&self.manifest_path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(WorkspaceManifest::default());
            }
            Err(e) => {
                return Err(Error::IoError(format!(
                    "Failed to read {}: {e}",
                    self.manifest_path.display()
                )));
            }
        };
        WorkspaceManifest::parse(&text)
    }

    /// Write the workspace manifest atomically via a temp file
    async fn save_manifest(&self, manifest: &WorkspaceManifest) -> Result<()> {
        let json = manifest.to_pretty_json()?;

        if let Some(parent) = self.manifest_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::IoError(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let temp_path = self.manifest_path.with_extension("tmp");
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            Error::IoError(format!("Failed to write {}: {e}", temp_path.display()))
        })?;
        tokio::fs::rename(&temp_path, &self.manifest_path)
            .await
            .map_err(|e| {
                Error::IoError(format!(
                    "Failed to rename temp file to {}: {e}",
                    self.manifest_path.display()
                ))
            })?;

        Ok(())
    }
}

#[async_trait]
impl PackageClient for DirectoryClient {
    async fn list(&self) -> Result<Vec<PackageRecord>> {
        let mut records = Vec::new();

        if !self.packages_dir.exists() {
            debug!(
                "Packages directory {} does not exist",
                self.packages_dir.display()
            );
            return Ok(records);
        }

        let mut entries = tokio::fs::read_dir(&self.packages_dir).await.map_err(|e| {
            Error::IoError(format!(
                "Failed to read {}: {e}",
                self.packages_dir.display()
            ))
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            Error::IoError(format!(
                "Failed to read {}: {e}",
                self.packages_dir.display()
            ))
        })? {
            let manifest_path = entry.path().join("package.json");
            if !manifest_path.is_file() {
                continue;
            }

            let text = match tokio::fs::read_to_string(&manifest_path).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping {}: {}", manifest_path.display(), e);
                    continue;
                }
            };

            match PackageManifest::parse(&text) {
                Ok(manifest) => records.push(manifest.into_record()),
                Err(e) => {
                    warn!("Skipping {}: {}", manifest_path.display(), e);
                }
            }
        }

        records.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        debug!(
            "Listed {} package(s) from {}",
            records.len(),
            self.packages_dir.display()
        );
        Ok(records)
    }

    async fn add_and_remove(&self, to_add: &[String], to_remove: &[String]) -> Result<()> {
        if to_add.is_empty() && to_remove.is_empty() {
            return Ok(());
        }

        let mut manifest = self.load_manifest().await?;
        let mut changed = false;

        for reference in to_add {
            let name = Self::dependency_name_from_reference(reference);
            if name.is_empty() {
                warn!("Cannot derive a dependency name from '{}', skipping", reference);
                continue;
            }
            if manifest.add(name.clone(), reference.clone()) {
                debug!("Adding dependency {} -> {}", name, reference);
                changed = true;
            }
        }

        for target in to_remove {
            if manifest.remove(target) {
                debug!("Removing dependency {}", target);
                changed = true;
            }
        }

        if changed {
            self.save_manifest(&manifest).await?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "directory"
    }
}
