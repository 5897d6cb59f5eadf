//! Settings record codec — Night Light strength.
//!
//! Strength is stored as a color temperature split across two bytes at
//! 0x23/0x24: `kelvin = hi * 64 + (lo - 128) / 2`. 100% strength is the
//! warmest setting Windows offers (1200 K), 0% is neutral (6500 K).
//! The record length never changes.

use crate::record::{self, OFF_TEMP_HI, OFF_TEMP_LO, RecordKind, SETTINGS_MIN_LEN};

/// Warmest color temperature (100% strength).
pub const MIN_KELVIN: u32 = 1200;

/// Neutral color temperature (0% strength).
pub const MAX_KELVIN: u32 = 6500;

/// The two temperature bytes as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperaturePair {
    pub lo: u8,
    pub hi: u8,
}

/// Decode a temperature pair into kelvin.
pub fn bytes_to_kelvin(pair: TemperaturePair) -> f64 {
    f64::from(pair.hi) * 64.0 + (f64::from(pair.lo) - 128.0) / 2.0
}

/// Encode kelvin (clamped to `MIN_KELVIN..=MAX_KELVIN`) as a temperature pair.
pub fn kelvin_to_bytes(kelvin: u32) -> TemperaturePair {
    let kelvin = kelvin.clamp(MIN_KELVIN, MAX_KELVIN);
    let hi = kelvin / 64;
    // (kelvin % 64) * 2 + 128 stays within 128..=254.
    let lo = (kelvin - hi * 64) * 2 + 128;
    TemperaturePair {
        lo: lo as u8,
        hi: hi as u8,
    }
}

/// Map kelvin onto the inverted 0–100 strength scale.
pub fn kelvin_to_percentage(kelvin: f64) -> f64 {
    let span = f64::from(MAX_KELVIN - MIN_KELVIN);
    let pct = 100.0 - (kelvin - f64::from(MIN_KELVIN)) / span * 100.0;
    pct.clamp(0.0, 100.0)
}

/// Map a strength percentage (clamped to 0–100, NaN as 0) onto whole kelvin.
pub fn percentage_to_kelvin(percentage: f64) -> u32 {
    let pct = if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    };
    let span = f64::from(MAX_KELVIN - MIN_KELVIN);
    (f64::from(MAX_KELVIN) - pct / 100.0 * span).round() as u32
}

/// Read the temperature pair from a settings record.
pub fn temperature(record: &[u8]) -> record::Result<TemperaturePair> {
    record::require_len(record, RecordKind::Settings, SETTINGS_MIN_LEN)?;
    Ok(TemperaturePair {
        lo: record[OFF_TEMP_LO],
        hi: record[OFF_TEMP_HI],
    })
}

/// Current strength percentage stored in a settings record.
pub fn strength_percentage(record: &[u8]) -> record::Result<f64> {
    let kelvin = bytes_to_kelvin(temperature(record)?);
    Ok(kelvin_to_percentage(kelvin))
}

/// Copy of `record` with the strength set to `percentage`.
///
/// Out-of-range percentages are clamped, never rejected.
pub fn set_strength_percentage(record: &[u8], percentage: f64) -> record::Result<Vec<u8>> {
    record::require_len(record, RecordKind::Settings, SETTINGS_MIN_LEN)?;

    let kelvin = percentage_to_kelvin(percentage);
    let pair = kelvin_to_bytes(kelvin);
    log::debug!("strength {percentage}% -> {kelvin} K -> {pair:?}");

    let mut out = record.to_vec();
    out[OFF_TEMP_LO] = pair.lo;
    out[OFF_TEMP_HI] = pair.hi;
    record::bump_sequence(&mut out);
    Ok(out)
}
