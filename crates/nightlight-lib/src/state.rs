//! State record codec — on/off flag and the toggle transform.
//!
//! The enabled form is two bytes longer than the disabled form: a `10 00`
//! marker sits at offset 23. Toggling rebuilds the record at the other length,
//! moving the tail across the marker gap, flipping the flag at offset 18 and
//! bumping the sequence counter.

use crate::record::{
    self, ENABLED_MARKER, FLAG_DISABLED, FLAG_ENABLED, OFF_ENABLED_MARKER, OFF_STATE_FLAG,
    RecordKind, STATE_HEAD_LEN, STATE_LEN_DISABLED, STATE_LEN_ENABLED,
};

/// Whether the record says Night Light is on.
///
/// Records too short to hold the flag, or holding an unknown flag value,
/// read as off.
pub fn is_enabled(record: &[u8]) -> bool {
    record.get(OFF_STATE_FLAG) == Some(&FLAG_ENABLED)
}

/// Build the record for the opposite state.
pub fn toggle(record: &[u8]) -> record::Result<Vec<u8>> {
    let mut out = if is_enabled(record) {
        disabled_from(record)?
    } else {
        enabled_from(record)?
    };
    record::bump_sequence(&mut out);
    log::debug!("state record {:02X?} -> {:02X?}", record, out);
    Ok(out)
}

/// Build the record for `target`, or `None` if the record is already there.
pub fn set_enabled(record: &[u8], target: bool) -> record::Result<Option<Vec<u8>>> {
    if is_enabled(record) == target {
        return Ok(None);
    }
    toggle(record).map(Some)
}

/// Enabled (43 bytes) → disabled (41 bytes): drop the marker gap.
fn disabled_from(src: &[u8]) -> record::Result<Vec<u8>> {
    record::require_len(src, RecordKind::State, STATE_LEN_ENABLED)?;

    let marker = &src[OFF_ENABLED_MARKER..OFF_ENABLED_MARKER + 2];
    if marker != ENABLED_MARKER {
        log::warn!("state record marker is {marker:02X?}, expected {ENABLED_MARKER:02X?}");
    }

    let mut out = vec![0u8; STATE_LEN_DISABLED];
    out[..STATE_HEAD_LEN].copy_from_slice(&src[..STATE_HEAD_LEN]);
    out[OFF_ENABLED_MARKER..].copy_from_slice(&src[OFF_ENABLED_MARKER + 2..STATE_LEN_ENABLED]);
    out[OFF_STATE_FLAG] = FLAG_DISABLED;
    Ok(out)
}

/// Disabled (41 bytes) → enabled (43 bytes): reopen the marker gap.
fn enabled_from(src: &[u8]) -> record::Result<Vec<u8>> {
    record::require_len(src, RecordKind::State, STATE_LEN_DISABLED)?;

    if src[OFF_STATE_FLAG] != FLAG_DISABLED {
        log::warn!(
            "state flag is {:#04X}, treating record as disabled",
            src[OFF_STATE_FLAG]
        );
    }

    let mut out = vec![0u8; STATE_LEN_ENABLED];
    out[..STATE_HEAD_LEN].copy_from_slice(&src[..STATE_HEAD_LEN]);
    out[OFF_ENABLED_MARKER + 2..].copy_from_slice(&src[OFF_ENABLED_MARKER..STATE_LEN_DISABLED]);
    out[OFF_STATE_FLAG] = FLAG_ENABLED;
    out[OFF_ENABLED_MARKER..OFF_ENABLED_MARKER + 2].copy_from_slice(&ENABLED_MARKER);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordError, SEQ_END, SEQ_START, sequence_bytes};

    /// A disabled record with distinct bytes so moved ranges are traceable.
    fn disabled_record() -> Vec<u8> {
        let mut rec: Vec<u8> = (0..STATE_LEN_DISABLED as u8).map(|i| i + 0x40).collect();
        rec[SEQ_START..SEQ_END].copy_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        rec[OFF_STATE_FLAG] = FLAG_DISABLED;
        rec
    }

    fn enabled_record() -> Vec<u8> {
        let mut rec: Vec<u8> = (0..STATE_LEN_ENABLED as u8).map(|i| i + 0x80).collect();
        rec[SEQ_START..SEQ_END].copy_from_slice(&[0xff, 0x09, 0x00, 0x00, 0x00]);
        rec[OFF_STATE_FLAG] = FLAG_ENABLED;
        rec[OFF_ENABLED_MARKER..OFF_ENABLED_MARKER + 2].copy_from_slice(&ENABLED_MARKER);
        rec
    }

    #[test]
    fn is_enabled_reads_flag() {
        assert!(is_enabled(&enabled_record()));
        assert!(!is_enabled(&disabled_record()));
    }

    #[test]
    fn is_enabled_tolerates_bad_input() {
        assert!(!is_enabled(&[]));
        assert!(!is_enabled(&[0x15; 18]));
        let mut rec = disabled_record();
        rec[OFF_STATE_FLAG] = 0x42;
        assert!(!is_enabled(&rec));
    }

    #[test]
    fn enabling_grows_record_and_inserts_marker() {
        let src = disabled_record();
        let out = toggle(&src).unwrap();

        assert_eq!(out.len(), 43);
        assert!(is_enabled(&out));
        assert_eq!(out[18], 0x15);
        assert_eq!(out[22], 0x00);
        assert_eq!(out[23], 0x10);
        assert_eq!(out[24], 0x00);
        assert_eq!(out[25..43], src[23..41]);
        // Head is preserved apart from the counter and the flag.
        assert_eq!(out[..SEQ_START], src[..SEQ_START]);
        assert_eq!(out[SEQ_END..18], src[SEQ_END..18]);
        assert_eq!(out[19..22], src[19..22]);
    }

    #[test]
    fn disabling_shrinks_record_and_drops_marker() {
        let src = enabled_record();
        let out = toggle(&src).unwrap();

        assert_eq!(out.len(), 41);
        assert!(!is_enabled(&out));
        assert_eq!(out[18], 0x13);
        assert_eq!(out[22], 0x00);
        assert_eq!(out[23..41], src[25..43]);
        assert_eq!(out[..SEQ_START], src[..SEQ_START]);
        assert_eq!(out[19..22], src[19..22]);
    }

    #[test]
    fn toggle_bumps_sequence_counter() {
        let out = toggle(&disabled_record()).unwrap();
        assert_eq!(sequence_bytes(&out), Some([0x02, 0x02, 0x03, 0x04, 0x05]));

        let out = toggle(&enabled_record()).unwrap();
        assert_eq!(sequence_bytes(&out), Some([0xff, 0x0a, 0x00, 0x00, 0x00]));
    }

    #[test]
    fn double_toggle_restores_flag_and_length() {
        for src in [disabled_record(), enabled_record()] {
            let back = toggle(&toggle(&src).unwrap()).unwrap();
            assert_eq!(back.len(), src.len());
            assert_eq!(back[OFF_STATE_FLAG], src[OFF_STATE_FLAG]);
            assert_ne!(sequence_bytes(&back), sequence_bytes(&src));
        }
    }

    #[test]
    fn short_disabled_record_is_malformed() {
        let err = toggle(&disabled_record()[..30]).unwrap_err();
        assert!(matches!(
            err,
            RecordError::TooShort {
                kind: RecordKind::State,
                needed: 41,
                actual: 30,
            }
        ));
    }

    #[test]
    fn short_enabled_record_is_malformed() {
        let mut rec = enabled_record();
        rec.truncate(41);
        let err = toggle(&rec).unwrap_err();
        assert!(matches!(err, RecordError::TooShort { needed: 43, .. }));
    }

    #[test]
    fn unknown_flag_is_treated_as_disabled() {
        let mut rec = disabled_record();
        rec[OFF_STATE_FLAG] = 0x00;
        let out = toggle(&rec).unwrap();
        assert_eq!(out.len(), 43);
        assert!(is_enabled(&out));
    }

    #[test]
    fn set_enabled_is_guarded() {
        assert_eq!(set_enabled(&enabled_record(), true).unwrap(), None);
        assert_eq!(set_enabled(&disabled_record(), false).unwrap(), None);

        let on = set_enabled(&disabled_record(), true).unwrap().unwrap();
        assert!(is_enabled(&on));
        let off = set_enabled(&enabled_record(), false).unwrap().unwrap();
        assert!(!is_enabled(&off));
    }
}
