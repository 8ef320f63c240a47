// src/cli.rs
//! CLI definitions for gitdeps
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitdeps")]
#[command(author = "Gitdeps Project")]
#[command(version)]
#[command(about = "Keep a workspace manifest in sync with git dependencies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve missing git dependencies now
    Resolve {
        /// Path to the configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Workspace manifest to edit (overrides configuration)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Directory of installed package descriptions (overrides configuration)
        #[arg(short, long)]
        packages: Option<PathBuf>,
    },

    /// Show what a resolution pass would add, without applying
    Status {
        /// Path to the configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Workspace manifest to inspect (overrides configuration)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Directory of installed package descriptions (overrides configuration)
        #[arg(short, long)]
        packages: Option<PathBuf>,
    },

    /// Watch for package changes and resolve automatically
    Watch {
        /// Path to the configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Workspace manifest to edit (overrides configuration)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Directory of installed package descriptions (overrides configuration)
        #[arg(short, long)]
        packages: Option<PathBuf>,

        /// Poll interval, e.g. 30s or 5m (overrides configuration)
        #[arg(short, long)]
        interval: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
