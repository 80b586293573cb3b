//! Headless command layer for scripting
//!
//! Usage:
//!   graphics-presets list                 List available presets
//!   graphics-presets select <name>        Apply a preset to every profile
//!   graphics-presets restore              Restore presets from the backup
//!
//! Options:
//!   --launcher-root <path>   Override the launcher directory
//!   --backup-root <path>     Override the backup directory
//!   --modpack-root <path>    Override the modpack directory
//!   --json                   Output in JSON format
//!   --verbose                Log debug output to stderr

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use graphics_presets_core::{
    BackupOutcome, GraphicsService, JsonPreferenceStore, LauncherPaths, ModpackProfiles,
};

/// Preferences file kept next to the launcher's presets
const PREFERENCES_FILE: &str = "preferences.json";

/// CLI command to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    List,
    Default,
    Current,
    Validate(String),
    Files(String),
    Select(String),
    Backup,
    Restore,
}

/// CLI options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub json: bool,
    pub verbose: bool,
    pub launcher_root: Option<PathBuf>,
    pub backup_root: Option<PathBuf>,
    pub modpack_root: Option<PathBuf>,
}

const COMMANDS: &str = "list, default, current, validate, files, select, backup, or restore";

/// Parse CLI arguments and return command + options
pub fn parse_args(args: &[String]) -> Result<(CliCommand, CliOptions), String> {
    let mut options = CliOptions::default();
    let mut command: Option<CliCommand> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--json" => options.json = true,
            "--verbose" | "-v" => options.verbose = true,
            "--launcher-root" => {
                options.launcher_root = Some(take_value(args, &mut i, arg)?.into())
            }
            "--backup-root" => {
                options.backup_root = Some(take_value(args, &mut i, arg)?.into())
            }
            "--modpack-root" => {
                options.modpack_root = Some(take_value(args, &mut i, arg)?.into())
            }
            "list" => command = Some(CliCommand::List),
            "default" => command = Some(CliCommand::Default),
            "current" => command = Some(CliCommand::Current),
            "backup" => command = Some(CliCommand::Backup),
            "restore" => command = Some(CliCommand::Restore),
            "validate" => command = Some(CliCommand::Validate(take_value(args, &mut i, arg)?)),
            "files" => command = Some(CliCommand::Files(take_value(args, &mut i, arg)?)),
            "select" => command = Some(CliCommand::Select(take_value(args, &mut i, arg)?)),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
        i += 1;
    }

    let command = command.ok_or_else(|| format!("No command specified. Use: {}", COMMANDS))?;

    Ok((command, options))
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{} requires a value", flag))
}

/// Location of the persisted launcher paths
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("graphics-presets").join("config.json"))
}

/// Resolve launcher paths from the config file, overridden by flags
pub fn resolve_paths(
    options: &CliOptions,
    config_file: Option<&Path>,
) -> anyhow::Result<LauncherPaths> {
    let stored = match config_file {
        Some(path) if path.exists() => Some(
            LauncherPaths::load_from(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
        ),
        _ => None,
    };

    let pick = |flag: &Option<PathBuf>, from_config: Option<&PathBuf>, name: &str| {
        flag.clone()
            .or_else(|| from_config.cloned())
            .with_context(|| format!("No {} configured; pass --{}", name, name))
    };

    Ok(LauncherPaths {
        launcher_root: pick(
            &options.launcher_root,
            stored.as_ref().map(|p| &p.launcher_root),
            "launcher-root",
        )?,
        backup_root: pick(
            &options.backup_root,
            stored.as_ref().map(|p| &p.backup_root),
            "backup-root",
        )?,
        modpack_root: pick(
            &options.modpack_root,
            stored.as_ref().map(|p| &p.modpack_root),
            "modpack-root",
        )?,
    })
}

/// Run CLI command
pub async fn run(command: CliCommand, options: CliOptions) -> anyhow::Result<()> {
    let paths = resolve_paths(&options, config_path().as_deref())?;
    tracing::debug!("Using launcher paths {:?}", paths);
    let service = GraphicsService::new(
        paths.clone(),
        JsonPreferenceStore::new(paths.launcher_root.join(PREFERENCES_FILE)),
        ModpackProfiles::from_paths(&paths),
    );

    match command {
        CliCommand::List => run_list(&service, &options).await,
        CliCommand::Default => {
            let preset = service.default_preset().await?;
            print_value(&options, "default", &preset);
            Ok(())
        }
        CliCommand::Current => {
            let preset = service.resolve_preference().await?;
            print_value(&options, "current", &preset);
            Ok(())
        }
        CliCommand::Validate(name) => {
            let valid = service.is_valid_preset(&name).await?;
            if options.json {
                println!("{}", serde_json::json!({ "preset": name, "valid": valid }));
            } else {
                println!("{}: {}", name, if valid { "valid" } else { "not a known preset" });
            }
            Ok(())
        }
        CliCommand::Files(name) => {
            let files = service.files_for_preset(&name).await?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else {
                for file in files {
                    println!("{}", file.display());
                }
            }
            Ok(())
        }
        CliCommand::Select(name) => run_select(&service, &name, &options).await,
        CliCommand::Backup => {
            match service.backup_original_graphics().await? {
                BackupOutcome::Created { files } => println!(
                    "Backed up {} files to {}",
                    files,
                    service.backup_directory().display()
                ),
                BackupOutcome::AlreadyExists => println!(
                    "Backup already exists at {}",
                    service.backup_directory().display()
                ),
            }
            Ok(())
        }
        CliCommand::Restore => {
            let summary = service.restore_graphics().await?;
            println!(
                "Restored {} files and re-applied '{}' to {} profiles",
                summary.restored_files, summary.preset, summary.sync.profiles
            );
            Ok(())
        }
    }
}

async fn run_list(
    service: &GraphicsService<JsonPreferenceStore, ModpackProfiles>,
    options: &CliOptions,
) -> anyhow::Result<()> {
    let catalog = service.catalog().await?;
    if options.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let current = service.graphics_preference()?;
    println!("Graphics presets:");
    for entry in catalog {
        let marker = if current.as_deref() == Some(entry.real.as_str()) {
            "*"
        } else {
            " "
        };
        if entry.real == entry.friendly {
            println!(" {} {}", marker, entry.real);
        } else {
            println!(" {} {} ({})", marker, entry.friendly, entry.real);
        }
    }
    Ok(())
}

async fn run_select(
    service: &GraphicsService<JsonPreferenceStore, ModpackProfiles>,
    name: &str,
    options: &CliOptions,
) -> anyhow::Result<()> {
    // The service persists whatever it is given, so reject unknown names here.
    if !service.is_valid_preset(name).await? {
        bail!("'{}' is not a known graphics preset", name);
    }

    service.backup_original_graphics().await?;
    let summary = service.select_preset(name).await?;

    if options.json {
        println!(
            "{}",
            serde_json::json!({
                "preset": name,
                "profiles": summary.profiles,
                "files": summary.files,
                "copied": summary.copied,
            })
        );
    } else {
        println!(
            "Applied '{}' ({} files) to {} profiles",
            name, summary.files, summary.profiles
        );
    }
    Ok(())
}

fn print_value(options: &CliOptions, key: &str, value: &str) {
    if options.json {
        println!("{}", serde_json::json!({ key: value }));
    } else {
        println!("{}", value);
    }
}

pub fn print_help() {
    println!("graphics-presets v{}", env!("CARGO_PKG_VERSION"));
    println!("Manage modpack graphics presets");
    println!();
    println!("USAGE:");
    println!("    graphics-presets [OPTIONS] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    list               List available presets (* marks the selected one)");
    println!("    default            Print the default preset");
    println!("    current            Print the selected preset, or the default if unset");
    println!("    validate <name>    Check whether a preset exists");
    println!("    files <name>       List the files of a preset");
    println!("    select <name>      Apply a preset to every profile");
    println!("    backup             Back up the original presets (once)");
    println!("    restore            Restore presets from the backup");
    println!();
    println!("OPTIONS:");
    println!("    --launcher-root <path>    Launcher directory");
    println!("    --backup-root <path>      Backup directory");
    println!("    --modpack-root <path>     Modpack directory");
    println!("    --json                    Output in JSON format");
    println!("    --verbose, -v             Log debug output to stderr");
    println!("    --help, -h                Show this help message");
    println!();
    if let Some(path) = config_path() {
        println!("Paths not given as flags are read from {}", path.display());
    }
}
