//! nightlight — command-line control for the Windows 10/11 Night Light.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

mod cli;

#[derive(Parser)]
#[command(
    name = "nightlight",
    version,
    about = "Turn the Windows Night Light on/off and set its strength"
)]
struct Args {
    /// Output as JSON (for status, strength, config, dump)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<cli::Command>,
}

/// Print the usage text to stdout.
pub(crate) fn print_usage() {
    let _ = Args::command().print_help();
    println!();
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let Some(command) = args.command else {
        print_usage();
        return;
    };

    if let Err(e) = cli::run(command, args.json, args.config.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
