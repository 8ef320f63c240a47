// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: configuration file path
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .help("Configuration file path")
}

/// Common argument: workspace manifest path
fn manifest_arg() -> Arg {
    Arg::new("manifest")
        .short('m')
        .long("manifest")
        .value_name("PATH")
        .help("Workspace manifest to edit")
}

/// Common argument: packages directory
fn packages_arg() -> Arg {
    Arg::new("packages")
        .short('p')
        .long("packages")
        .value_name("PATH")
        .help("Directory of installed package descriptions")
}

fn build_cli() -> Command {
    Command::new("gitdeps")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gitdeps Contributors")
        .about("Keeps a workspace manifest in sync with declared git dependencies")
        .subcommand_required(false)
        .subcommand(
            Command::new("resolve")
                .about("Resolve missing git dependencies now")
                .arg(config_arg())
                .arg(manifest_arg())
                .arg(packages_arg()),
        )
        .subcommand(
            Command::new("status")
                .about("Show what a resolution pass would add, without applying")
                .arg(config_arg())
                .arg(manifest_arg())
                .arg(packages_arg()),
        )
        .subcommand(
            Command::new("watch")
                .about("Watch for package changes and resolve automatically")
                .arg(config_arg())
                .arg(manifest_arg())
                .arg(packages_arg())
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("DURATION")
                        .help("Poll interval, e.g. 30s or 5m"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("gitdeps.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
