//! Night Light controller — glues the record codecs to the record store.
//!
//! Every operation is a single fetch → transform → store with no locking:
//! another process writing between our read and our write loses its update.
//!
//! A missing key (feature absent, non-Windows host) or a missing value makes
//! the controller behave as if Night Light were permanently off: queries
//! return `false` / `0.0` and mutations do nothing.

use crate::config::Config;
use crate::error::Result;
use crate::settings;
use crate::state;
use crate::store::{RecordKey, RegistryKey};

/// Night Light on/off and strength control over two record keys.
pub struct NightLight<K: RecordKey> {
    state: Option<K>,
    settings: Option<K>,
}

impl NightLight<RegistryKey> {
    /// Open both registry keys named by `config`.
    ///
    /// Failure to open either key is not an error; the controller is then
    /// unsupported (see [`NightLight::is_supported`]).
    pub fn open(config: &Config) -> Self {
        let open = |path: &str| match RegistryKey::open(path, &config.value_name) {
            Ok(key) => Some(key),
            Err(e) => {
                log::info!("{e}");
                None
            }
        };
        NightLight::new(open(&config.state_key), open(&config.settings_key))
    }
}

impl<K: RecordKey> NightLight<K> {
    pub fn new(state: Option<K>, settings: Option<K>) -> Self {
        NightLight { state, settings }
    }

    /// True iff both keys were opened.
    pub fn is_supported(&self) -> bool {
        self.state.is_some() && self.settings.is_some()
    }

    /// Both keys, or `None` when unsupported.
    fn keys(&self) -> Option<(&K, &K)> {
        match (&self.state, &self.settings) {
            (Some(state), Some(settings)) => Some((state, settings)),
            _ => None,
        }
    }

    /// Raw state record, if supported and present.
    pub fn raw_state(&self) -> Result<Option<Vec<u8>>> {
        match self.keys() {
            Some((key, _)) => Ok(key.read()?),
            None => Ok(None),
        }
    }

    /// Raw settings record, if supported and present.
    pub fn raw_settings(&self) -> Result<Option<Vec<u8>>> {
        match self.keys() {
            Some((_, key)) => Ok(key.read()?),
            None => Ok(None),
        }
    }

    /// Whether Night Light is currently on.
    pub fn enabled(&self) -> Result<bool> {
        Ok(self.raw_state()?.is_some_and(|rec| state::is_enabled(&rec)))
    }

    /// Turn Night Light on. No-op if already on.
    pub fn enable(&self) -> Result<()> {
        self.apply_state(Some(true))
    }

    /// Turn Night Light off. No-op if already off.
    pub fn disable(&self) -> Result<()> {
        self.apply_state(Some(false))
    }

    /// Flip Night Light on/off.
    pub fn toggle(&self) -> Result<()> {
        self.apply_state(None)
    }

    /// `target = None` toggles unconditionally.
    fn apply_state(&self, target: Option<bool>) -> Result<()> {
        let Some((key, _)) = self.keys() else {
            log::info!("Night Light not supported, nothing to change");
            return Ok(());
        };
        let Some(current) = key.read()? else {
            log::warn!("state record missing, nothing to change");
            return Ok(());
        };
        let updated = match target {
            Some(on) => state::set_enabled(&current, on)?,
            None => Some(state::toggle(&current)?),
        };
        match updated {
            Some(data) => {
                key.write(&data)?;
                log::info!(
                    "Night Light turned {}",
                    if state::is_enabled(&data) { "on" } else { "off" }
                );
            }
            None => log::debug!("Night Light already in requested state"),
        }
        Ok(())
    }

    /// Current strength percentage (0–100).
    pub fn strength(&self) -> Result<f64> {
        match self.raw_settings()? {
            Some(rec) => Ok(settings::strength_percentage(&rec)?),
            None => Ok(0.0),
        }
    }

    /// Set the strength percentage. Values outside 0–100 are clamped.
    pub fn set_strength(&self, percentage: f64) -> Result<()> {
        let Some((_, key)) = self.keys() else {
            log::info!("Night Light not supported, strength unchanged");
            return Ok(());
        };
        let Some(current) = key.read()? else {
            log::warn!("settings record missing, strength unchanged");
            return Ok(());
        };
        let data = settings::set_strength_percentage(&current, percentage)?;
        key.write(&data)?;
        log::info!("Night Light strength set to {percentage}%");
        Ok(())
    }
}
