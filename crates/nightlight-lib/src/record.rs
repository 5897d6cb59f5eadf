//! Record layout shared by the Night Light state and settings blobs.
//!
//! Both records live in the CloudStore part of the per-user registry and are
//! stored as `REG_BINARY` under the value name `Data`. Only the bytes listed
//! here are understood; everything else is carried through untouched.
//!
//! ## Sequence counter
//!
//! Bytes 10..15 of both records act as a change marker. Windows ignores a
//! rewritten record unless the marker moved, so every mutation bumps it with
//! the rule in [`bump_sequence`].

use std::fmt;

// ── Shared layout ──

/// First byte of the sequence counter.
pub const SEQ_START: usize = 10;

/// One past the last byte of the sequence counter.
pub const SEQ_END: usize = 15;

/// Marker that appears twice in a well-formed state record (`"CB\x01\x00"`).
pub const SIGNATURE: [u8; 4] = [0x43, 0x42, 0x01, 0x00];

// ── State record ──

/// Offset of the enabled flag.
pub const OFF_STATE_FLAG: usize = 18;

/// Flag value while Night Light is on.
pub const FLAG_ENABLED: u8 = 0x15;

/// Flag value while Night Light is off.
pub const FLAG_DISABLED: u8 = 0x13;

/// Length of a state record while Night Light is off.
pub const STATE_LEN_DISABLED: usize = 41;

/// Length of a state record while Night Light is on (two extra marker bytes).
pub const STATE_LEN_ENABLED: usize = 43;

/// Bytes copied verbatim on every toggle (`[0, 22)`).
pub const STATE_HEAD_LEN: usize = 22;

/// Offset of the `10 00` marker that only exists in the enabled form.
pub const OFF_ENABLED_MARKER: usize = 23;

/// The two bytes inserted at [`OFF_ENABLED_MARKER`] when enabling.
pub const ENABLED_MARKER: [u8; 2] = [0x10, 0x00];

// ── Settings record ──

/// Low byte of the color temperature.
pub const OFF_TEMP_LO: usize = 0x23;

/// High byte of the color temperature.
pub const OFF_TEMP_HI: usize = 0x24;

/// Shortest settings record that still holds the temperature pair.
pub const SETTINGS_MIN_LEN: usize = OFF_TEMP_HI + 1;

// ── Errors ──

/// Which of the two records an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    State,
    Settings,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::State => write!(f, "state"),
            RecordKind::Settings => write!(f, "settings"),
        }
    }
}

/// A fetched record does not have the bytes an operation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    TooShort {
        kind: RecordKind,
        needed: usize,
        actual: usize,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::TooShort {
                kind,
                needed,
                actual,
            } => write!(
                f,
                "Malformed {kind} record: need at least {needed} bytes, got {actual}"
            ),
        }
    }
}

impl std::error::Error for RecordError {}

pub type Result<T> = std::result::Result<T, RecordError>;

/// Fail unless `record` holds at least `needed` bytes.
pub fn require_len(record: &[u8], kind: RecordKind, needed: usize) -> Result<()> {
    if record.len() < needed {
        return Err(RecordError::TooShort {
            kind,
            needed,
            actual: record.len(),
        });
    }
    Ok(())
}

// ── Sequence counter ──

/// Increment the sequence counter in place.
///
/// The first counter byte below `0xff` is incremented and the rest are left
/// alone; there is no carry. Returns `false` (and changes nothing) when every
/// counter byte is saturated or the record is too short to hold the counter.
pub fn bump_sequence(record: &mut [u8]) -> bool {
    let Some(counter) = record.get_mut(SEQ_START..SEQ_END) else {
        return false;
    };
    match counter.iter_mut().find(|b| **b != 0xff) {
        Some(b) => {
            *b += 1;
            true
        }
        None => {
            log::debug!("sequence counter saturated, left unchanged");
            false
        }
    }
}

// ── Sanity check ──

/// Count non-overlapping occurrences of [`SIGNATURE`].
pub fn signature_count(record: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i + SIGNATURE.len() <= record.len() {
        if record[i..i + SIGNATURE.len()] == SIGNATURE {
            count += 1;
            i += SIGNATURE.len();
        } else {
            i += 1;
        }
    }
    count
}

/// Summary of the bytes this crate understands in a state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSummary {
    pub len: usize,
    /// Raw byte at [`OFF_STATE_FLAG`], if present.
    pub flag: Option<u8>,
    pub signatures: usize,
    pub sequence: Option<[u8; 5]>,
}

impl StateSummary {
    /// Whether the record looks like one Windows wrote: a known length,
    /// a known flag matching that length, and two signatures.
    pub fn looks_valid(&self) -> bool {
        let shape = matches!(
            (self.len, self.flag),
            (STATE_LEN_ENABLED, Some(FLAG_ENABLED)) | (STATE_LEN_DISABLED, Some(FLAG_DISABLED))
        );
        shape && self.signatures == 2
    }
}

/// Inspect a state record without interpreting anything beyond known offsets.
pub fn inspect_state(record: &[u8]) -> StateSummary {
    StateSummary {
        len: record.len(),
        flag: record.get(OFF_STATE_FLAG).copied(),
        signatures: signature_count(record),
        sequence: sequence_bytes(record),
    }
}

/// Copy of the five counter bytes, if the record is long enough.
pub fn sequence_bytes(record: &[u8]) -> Option<[u8; 5]> {
    record.get(SEQ_START..SEQ_END)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_counter(counter: [u8; 5]) -> Vec<u8> {
        let mut rec = vec![0u8; 20];
        rec[SEQ_START..SEQ_END].copy_from_slice(&counter);
        rec
    }

    #[test]
    fn bump_increments_first_byte() {
        let mut rec = with_counter([0x10, 0x20, 0x30, 0x40, 0x50]);
        assert!(bump_sequence(&mut rec));
        assert_eq!(
            sequence_bytes(&rec),
            Some([0x11, 0x20, 0x30, 0x40, 0x50])
        );
    }

    #[test]
    fn bump_skips_saturated_bytes_without_carry() {
        let mut rec = with_counter([0xff, 0xff, 0x07, 0x00, 0x00]);
        assert!(bump_sequence(&mut rec));
        // Earlier bytes stay at 0xff, no wrap to zero.
        assert_eq!(
            sequence_bytes(&rec),
            Some([0xff, 0xff, 0x08, 0x00, 0x00])
        );
    }

    #[test]
    fn bump_saturated_counter_is_noop() {
        let mut rec = with_counter([0xff; 5]);
        let before = rec.clone();
        assert!(!bump_sequence(&mut rec));
        assert_eq!(rec, before);
    }

    #[test]
    fn bump_short_record_is_noop() {
        let mut rec = vec![0u8; 12];
        assert!(!bump_sequence(&mut rec));
        assert_eq!(rec, vec![0u8; 12]);
    }

    #[test]
    fn bump_only_touches_counter_range() {
        let mut rec = vec![0xffu8; 20];
        rec[SEQ_START + 4] = 0x01;
        assert!(bump_sequence(&mut rec));
        assert_eq!(rec[SEQ_START + 4], 0x02);
        assert!(rec[..SEQ_START].iter().all(|&b| b == 0xff));
        assert!(rec[SEQ_END..].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn require_len_reports_sizes() {
        let err = require_len(&[0; 10], RecordKind::Settings, SETTINGS_MIN_LEN).unwrap_err();
        assert_eq!(
            err,
            RecordError::TooShort {
                kind: RecordKind::Settings,
                needed: 0x25,
                actual: 10,
            }
        );
        assert_eq!(
            err.to_string(),
            "Malformed settings record: need at least 37 bytes, got 10"
        );
        assert!(require_len(&[0; 37], RecordKind::Settings, SETTINGS_MIN_LEN).is_ok());
    }

    #[test]
    fn signature_count_finds_both_markers() {
        let mut rec = vec![0u8; 43];
        rec[0..4].copy_from_slice(&SIGNATURE);
        rec[30..34].copy_from_slice(&SIGNATURE);
        assert_eq!(signature_count(&rec), 2);
        assert_eq!(signature_count(&rec[..20]), 1);
        assert_eq!(signature_count(&[]), 0);
    }

    #[test]
    fn inspect_state_recognises_shapes() {
        let mut rec = vec![0u8; STATE_LEN_DISABLED];
        rec[0..4].copy_from_slice(&SIGNATURE);
        rec[30..34].copy_from_slice(&SIGNATURE);
        rec[OFF_STATE_FLAG] = FLAG_DISABLED;
        let summary = inspect_state(&rec);
        assert_eq!(summary.len, 41);
        assert_eq!(summary.flag, Some(FLAG_DISABLED));
        assert!(summary.looks_valid());

        // Enabled flag with the disabled length is not a shape Windows writes.
        rec[OFF_STATE_FLAG] = FLAG_ENABLED;
        assert!(!inspect_state(&rec).looks_valid());
    }

    #[test]
    fn inspect_empty_record() {
        let summary = inspect_state(&[]);
        assert_eq!(summary.flag, None);
        assert_eq!(summary.sequence, None);
        assert!(!summary.looks_valid());
    }
}
