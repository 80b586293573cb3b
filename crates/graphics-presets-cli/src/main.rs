//! graphics-presets - Graphics preset manager for modpack launchers
//!
//! Usage:
//!   graphics-presets <command>     Run a command
//!   graphics-presets --help        Show help

use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        cli::print_help();
        return Ok(());
    }

    match cli::parse_args(&args) {
        Ok((command, options)) => {
            init_logging(options.verbose);
            cli::run(command, options).await
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            cli::print_help();
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins over --verbose when set
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
