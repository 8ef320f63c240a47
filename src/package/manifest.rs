// src/package/manifest.rs

//! On-disk manifest formats.
//!
//! Two JSON documents are involved. Each installed package carries a
//! `package.json` describing itself and the git repositories it needs
//! (`PackageManifest`). The workspace keeps a single manifest listing the
//! dependencies pulled in so far (`WorkspaceManifest`); the resolver edits
//! only the latter.
//!
//! # Example package.json
//!
//! ```json
//! {
//!     "name": "com.acme.tools",
//!     "version": "1.2.0",
//!     "gitDependencies": {
//!         "com.acme.base": "https://github.com/acme/base.git"
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PackageRecord;

/// Package description as found in a package's `package.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name (base identity)
    pub name: String,

    /// Package version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Git dependencies declared by this package. A manifest without the
    /// field and one with an empty object are the same thing.
    #[serde(default, rename = "gitDependencies")]
    pub git_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Parse a package manifest from JSON text
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::ParseError(format!("Invalid package manifest: {e}")))
    }

    /// Convert into a package record snapshot
    pub fn into_record(self) -> PackageRecord {
        PackageRecord {
            identifier: self.name,
            version: self.version,
            git_dependencies: self.git_dependencies,
        }
    }
}

/// Workspace-level manifest holding the dependency map the resolver edits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceManifest {
    /// Dependency name -> source reference
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

impl WorkspaceManifest {
    /// Parse a workspace manifest from JSON text
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::ParseError(format!("Invalid workspace manifest: {e}")))
    }

    /// Render the manifest as pretty-printed JSON with a trailing newline
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| {
            Error::ParseError(format!("Failed to serialize workspace manifest: {e}"))
        })?;
        json.push('\n');
        Ok(json)
    }

    /// Insert a dependency entry, returning whether the map changed
    pub fn add(&mut self, name: impl Into<String>, reference: impl Into<String>) -> bool {
        let name = name.into();
        let reference = reference.into();
        match self.dependencies.get(&name) {
            Some(existing) if *existing == reference => false,
            _ => {
                self.dependencies.insert(name, reference);
                true
            }
        }
    }

    /// Remove entries matching the given dependency name or reference
    /// value, returning whether anything was removed
    pub fn remove(&mut self, target: &str) -> bool {
        let before = self.dependencies.len();
        self.dependencies
            .retain(|name, reference| name != target && reference != target);
        before != self.dependencies.len()
    }

    /// Check if the manifest lists no dependencies
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_with_dependencies() {
        let manifest = PackageManifest::parse(
            r#"{
                "name": "com.acme.tools",
                "version": "1.2.0",
                "gitDependencies": {
                    "com.acme.base": "https://github.com/acme/base.git"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.name, "com.acme.tools");
        assert_eq!(manifest.version.as_deref(), Some("1.2.0"));
        assert_eq!(manifest.git_dependencies.len(), 1);
    }

    #[test]
    fn test_absent_dependencies_field_is_empty_map() {
        let manifest = PackageManifest::parse(r#"{"name": "com.acme.app"}"#).unwrap();
        assert!(manifest.git_dependencies.is_empty());

        let record = manifest.into_record();
        assert!(!record.declares_dependencies());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PackageManifest::parse("not json").is_err());
        assert!(PackageManifest::parse(r#"{"version": "1.0.0"}"#).is_err());
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let manifest = PackageManifest::parse(
            r#"{
                "name": "com.acme.tools",
                "gitDependencies": {"com.acme.base": "https://github.com/acme/base.git"}
            }"#,
        )
        .unwrap();

        let record = manifest.into_record();
        assert_eq!(record.identifier, "com.acme.tools");
        assert!(record.version.is_none());
        assert_eq!(
            record.git_dependencies.get("com.acme.base").map(String::as_str),
            Some("https://github.com/acme/base.git")
        );
    }

    #[test]
    fn test_workspace_manifest_add_and_remove() {
        let mut manifest = WorkspaceManifest::default();
        assert!(manifest.is_empty());

        assert!(manifest.add("base", "https://github.com/acme/base.git"));
        assert!(!manifest.add("base", "https://github.com/acme/base.git"));
        assert!(manifest.add("base", "https://github.com/acme/base.git#v2"));
        assert_eq!(manifest.dependencies.len(), 1);

        assert!(manifest.remove("base"));
        assert!(manifest.is_empty());
        assert!(!manifest.remove("base"));
    }

    #[test]
    fn test_workspace_manifest_remove_by_reference() {
        let mut manifest = WorkspaceManifest::default();
        manifest.add("base", "https://github.com/acme/base.git");
        manifest.add("tools", "https://github.com/acme/tools.git");

        assert!(manifest.remove("https://github.com/acme/base.git"));
        assert_eq!(manifest.dependencies.len(), 1);
        assert!(manifest.dependencies.contains_key("tools"));
    }

    #[test]
    fn test_workspace_manifest_round_trip() {
        let mut manifest = WorkspaceManifest::default();
        manifest.add("base", "https://github.com/acme/base.git");

        let json = manifest.to_pretty_json().unwrap();
        assert!(json.ends_with('\n'));

        let parsed = WorkspaceManifest::parse(&json).unwrap();
        assert_eq!(parsed.dependencies, manifest.dependencies);
    }

    #[test]
    fn test_workspace_manifest_tolerates_missing_field() {
        let manifest = WorkspaceManifest::parse("{}").unwrap();
        assert!(manifest.is_empty());
    }
}
