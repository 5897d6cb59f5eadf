//! CLI subcommands — Night Light state, strength, and diagnostics.

mod config_cmd;
mod dump;
mod power;
mod status;
mod strength;

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

pub(super) use nightlight_lib::NightLightError;
pub(super) use nightlight_lib::config::Config;
pub(super) use nightlight_lib::controller::NightLight;
pub(super) use nightlight_lib::error::Result;
pub(super) use nightlight_lib::record;
pub(super) use nightlight_lib::settings;
pub(super) use nightlight_lib::store::RecordKey;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Serialize `value` as pretty JSON and print it.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| NightLightError::Config(format!("JSON serialization failed: {e}")))?;
    println!("{json_str}");
    Ok(())
}

/// Load the config from `custom_path`, or the default location.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub supported: bool,
    pub enabled: bool,
}

#[derive(Serialize)]
pub(super) struct StrengthOutput {
    pub supported: bool,
    pub strength: u32,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
}

#[derive(Serialize)]
pub(super) struct DumpOutput {
    pub supported: bool,
    pub state: Option<StateDumpJson>,
    pub settings: Option<SettingsDumpJson>,
}

#[derive(Serialize)]
pub(super) struct StateDumpJson {
    pub len: usize,
    pub hex: String,
    pub flag: Option<u8>,
    pub enabled: bool,
    pub signatures: usize,
    pub sequence: Option<String>,
    pub looks_valid: bool,
}

#[derive(Serialize)]
pub(super) struct SettingsDumpJson {
    pub len: usize,
    pub hex: String,
    pub sequence: Option<String>,
    pub kelvin: Option<f64>,
    pub strength: Option<f64>,
}

/// Lowercase hex without separators, the form `reg add /t REG_BINARY` takes.
pub(super) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[derive(Subcommand)]
pub enum Command {
    /// Show version number
    Version,

    /// Turn on Night Light
    On,

    /// Turn off Night Light
    Off,

    /// Toggle Night Light on/off
    Toggle,

    /// Show current Night Light status
    Status,

    /// Show current strength percentage, or set it (0=coolest, 100=warmest)
    Strength {
        /// New strength percentage (0-100)
        #[arg(allow_hyphen_values = true)]
        percentage: Option<String>,
    },

    /// Dump the raw state and settings records
    Dump,

    /// Show current configuration and file path
    Config,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Version => {
            if json {
                warn_json_unsupported("version");
            }
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Config => config_cmd::cmd_config(json, config_path),
        cmd => {
            let config = load_config(config_path);
            let nl = NightLight::open(&config);
            run_with(&nl, cmd, json)
        }
    }
}

/// Dispatch commands that need the controller.
fn run_with<K: RecordKey>(nl: &NightLight<K>, cmd: Command, json: bool) -> Result<()> {
    match cmd {
        Command::On | Command::Off | Command::Toggle => {
            if json {
                warn_json_unsupported("on/off/toggle");
            }
            let action = match cmd {
                Command::On => power::PowerAction::On,
                Command::Off => power::PowerAction::Off,
                _ => power::PowerAction::Toggle,
            };
            power::cmd_power(nl, action)
        }
        Command::Status => status::cmd_status(nl, json),
        Command::Strength { percentage } => strength::cmd_strength(nl, percentage.as_deref(), json),
        Command::Dump => dump::cmd_dump(nl, json),
        Command::Version | Command::Config => Ok(()),
    }
}
