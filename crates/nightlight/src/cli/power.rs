//! `on` / `off` / `toggle` subcommands — change Night Light state.

use super::{NightLight, RecordKey, Result};

pub(super) enum PowerAction {
    On,
    Off,
    Toggle,
}

/// Apply the action. Silent on success, including when the feature is
/// unavailable or already in the requested state.
pub(super) fn cmd_power<K: RecordKey>(nl: &NightLight<K>, action: PowerAction) -> Result<()> {
    match action {
        PowerAction::On => nl.enable(),
        PowerAction::Off => nl.disable(),
        PowerAction::Toggle => nl.toggle(),
    }
}
