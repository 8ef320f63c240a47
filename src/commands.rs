// src/commands.rs
//! Command handlers for the gitdeps CLI

use anyhow::Result;
use chrono::Local;
use clap::CommandFactory;
use clap_complete::Shell;
use gitdeps::{
    detect_changes, ConsoleSink, DependencyResolver, DirectoryClient, PackageClient, Settings,
    TracingSink, Watcher,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

/// Load settings and apply CLI overrides
fn load_settings(
    config: Option<&Path>,
    manifest: Option<PathBuf>,
    packages: Option<PathBuf>,
) -> Result<Settings> {
    let mut settings = Settings::load(config)?;
    if let Some(path) = manifest {
        settings.workspace.manifest = path;
    }
    if let Some(path) = packages {
        settings.workspace.packages_dir = path;
    }
    Ok(settings)
}

/// Build the directory-backed client for the configured workspace
fn build_client(settings: &Settings) -> Arc<DirectoryClient> {
    Arc::new(DirectoryClient::new(
        &settings.workspace.manifest,
        &settings.workspace.packages_dir,
    ))
}

/// Run one resolution pass and report the outcome
pub async fn cmd_resolve(
    config: Option<PathBuf>,
    manifest: Option<PathBuf>,
    packages: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(config.as_deref(), manifest, packages)?;
    let client = build_client(&settings);
    let resolver = DependencyResolver::new(client, Arc::new(ConsoleSink::new()));

    let outcome = resolver.refresh().await?;
    println!("Resolution finished: {}", outcome);
    Ok(())
}

/// Show what a resolution pass would add, without applying anything
pub async fn cmd_status(
    config: Option<PathBuf>,
    manifest: Option<PathBuf>,
    packages: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(config.as_deref(), manifest, packages)?;
    let client = build_client(&settings);

    let records = client.list().await?;
    let result = detect_changes(&records);

    println!(
        "Checked {} package(s) at {}",
        records.len(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    for record in &records {
        match &record.version {
            Some(version) => println!("  {} {}", record.identifier, version),
            None => println!("  {}", record.identifier),
        }
    }

    if result.is_empty() {
        println!("All git dependencies are satisfied");
    } else {
        println!("Would add {} package(s):", result.to_add.len());
        for reference in &result.to_add {
            println!("  {}", reference);
        }
    }

    for message in &result.messages {
        println!("  note: {}", message);
    }

    Ok(())
}

/// Watch for package changes, resolving additions as they appear
pub async fn cmd_watch(
    config: Option<PathBuf>,
    manifest: Option<PathBuf>,
    packages: Option<PathBuf>,
    interval: Option<String>,
) -> Result<()> {
    let mut settings = load_settings(config.as_deref(), manifest, packages)?;
    if let Some(interval) = interval {
        settings.watch.poll_interval = interval;
    }

    if !settings.resolver.auto_resolve {
        anyhow::bail!("auto_resolve is disabled in the configuration; refusing to watch");
    }

    let interval = settings.poll_interval()?;
    let client = build_client(&settings);
    let resolver = Arc::new(DependencyResolver::new(
        client.clone(),
        Arc::new(TracingSink::new()),
    ));
    let watcher = Watcher::new(resolver, client, interval);

    let shutdown = watcher.shutdown_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, stopping watcher");
            shutdown.store(true, Ordering::Relaxed);
        }
    });

    println!(
        "Watching {} every {} since {} (press Ctrl-C to stop)",
        settings.workspace.packages_dir.display(),
        settings.watch.poll_interval,
        Local::now().format("%Y-%m-%d %H:%M:%S"),
    );
    watcher.run().await?;
    Ok(())
}

/// Generate shell completions on stdout
pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
