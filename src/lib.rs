// src/lib.rs

//! gitdeps
//!
//! Keeps a workspace manifest in sync with git dependencies declared by
//! installed packages. Each package describes the git repositories it
//! needs; gitdeps detects which declarations are not yet satisfied by the
//! installed set and adds them through a package client.
//!
//! # Architecture
//!
//! - Change detection is a pure function over a package snapshot
//! - Application goes through an injected `PackageClient` capability
//! - Diagnostics flow through an injected `DiagnosticSink`
//! - One resolution pass runs at a time; passes are idempotent per snapshot

pub mod client;
pub mod config;
pub mod detector;
pub mod diag;
mod error;
pub mod package;
pub mod resolver;
pub mod watch;

pub use client::{DirectoryClient, PackageClient};
pub use config::{parse_duration, Settings, DEFAULT_CONFIG_PATH};
pub use detector::{detect_changes, ResolutionResult};
pub use diag::{ConsoleSink, DiagnosticSink, MemorySink, TracingSink};
pub use error::{Error, Result};
pub use package::{
    PackageManifest, PackageRecord, RegistrationChange, WorkspaceManifest,
};
pub use resolver::{DependencyResolver, PassOutcome};
pub use watch::{diff_snapshots, Watcher};
