// src/config.rs

//! Configuration loading for the gitdeps CLI.
//!
//! Settings come from an optional TOML file (`gitdeps.toml` by default)
//! with every field defaulted, so a missing file just means defaults.
//! Command-line flags override whatever the file says.
//!
//! # Example gitdeps.toml
//!
//! ```toml
//! [workspace]
//! manifest = "manifest.json"
//! packages_dir = "packages"
//!
//! [resolver]
//! auto_resolve = true
//!
//! [watch]
//! poll_interval = "30s"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default path for the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "gitdeps.toml";

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Workspace layout
    #[serde(default)]
    pub workspace: WorkspaceSettings,

    /// Resolver behavior
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Watch daemon behavior
    #[serde(default)]
    pub watch: WatchSettings,
}

/// Where the workspace keeps its manifest and installed packages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Workspace manifest file the resolver edits
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Directory of installed package descriptions
    #[serde(default = "default_packages_dir")]
    pub packages_dir: PathBuf,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("manifest.json")
}

fn default_packages_dir() -> PathBuf {
    PathBuf::from("packages")
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            packages_dir: default_packages_dir(),
        }
    }
}

/// Resolver behavior switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// React to registration changes. The watch command refuses to start
    /// when this is off.
    #[serde(default = "default_true")]
    pub auto_resolve: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self { auto_resolve: true }
    }
}

/// Watch daemon settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSettings {
    /// Poll interval, with s/m/h/d/w suffix
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

fn default_poll_interval() -> String {
    "30s".to_string()
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
        }
    }
}

impl Settings {
    /// Load settings from the given path, or the default path
    ///
    /// A missing file yields default settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::IoError(format!("Failed to read {}: {e}", path.display())))?;
        toml::from_str(&text)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Poll interval as a duration
    pub fn poll_interval(&self) -> Result<Duration> {
        parse_duration(&self.watch.poll_interval)
    }
}

/// Parse a duration string like "30s", "5m", "2h", "1d", "1w"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Duration::from_secs(0));
    }

    let (num_str, unit) = match s.split_at_checked(s.len() - 1) {
        Some(parts) => parts,
        None => return Err(Error::Config(format!("Invalid duration unit: {}", s))),
    };
    let num: u64 = num_str
        .parse()
        .map_err(|_| Error::Config(format!("Invalid duration number: {}", num_str)))?;

    let seconds = match unit {
        "s" => num,
        "m" => num * 60,
        "h" => num * 3600,
        "d" => num * 86400,
        "w" => num * 604800,
        _ => return Err(Error::Config(format!("Invalid duration unit: {}", unit))),
    };

    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86400));
        assert_eq!(parse_duration("1w").unwrap(), Duration::from_secs(604800));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("30x").is_err());
        assert!(parse_duration("abc").is_err());
    }

    #[test]
    fn test_parse_duration_rejects_multibyte_suffix() {
        assert!(parse_duration("30µ").is_err());
        assert!(parse_duration("µ").is_err());
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.workspace.manifest, PathBuf::from("manifest.json"));
        assert_eq!(settings.workspace.packages_dir, PathBuf::from("packages"));
        assert!(settings.resolver.auto_resolve);
        assert_eq!(settings.watch.poll_interval, "30s");
    }

    #[test]
    fn test_parse_full_settings() {
        let settings: Settings = toml::from_str(
            r#"
            [workspace]
            manifest = "Packages/manifest.json"
            packages_dir = "Packages"

            [resolver]
            auto_resolve = false

            [watch]
            poll_interval = "5m"
            "#,
        )
        .unwrap();

        assert_eq!(
            settings.workspace.manifest,
            PathBuf::from("Packages/manifest.json")
        );
        assert!(!settings.resolver.auto_resolve);
        assert_eq!(settings.poll_interval().unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn test_missing_sections_are_defaulted() {
        let settings: Settings = toml::from_str(
            r#"
            [watch]
            poll_interval = "1h"
            "#,
        )
        .unwrap();

        assert_eq!(settings.workspace.manifest, PathBuf::from("manifest.json"));
        assert!(settings.resolver.auto_resolve);
        assert_eq!(settings.watch.poll_interval, "1h");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let settings = Settings::load(Some(Path::new("/nonexistent/gitdeps.toml"))).unwrap();
        assert!(settings.resolver.auto_resolve);
    }
}
