//! `dump` subcommand — dump the raw state and settings records.

use super::{
    DumpOutput, NightLight, RecordKey, Result, SettingsDumpJson, StateDumpJson, kv_indent,
    kv_width, print_json, record, settings, to_hex,
};

fn state_json(rec: &[u8]) -> StateDumpJson {
    let summary = record::inspect_state(rec);
    StateDumpJson {
        len: summary.len,
        hex: to_hex(rec),
        flag: summary.flag,
        enabled: nightlight_lib::state::is_enabled(rec),
        signatures: summary.signatures,
        sequence: summary.sequence.map(|s| to_hex(&s)),
        looks_valid: summary.looks_valid(),
    }
}

fn settings_json(rec: &[u8]) -> SettingsDumpJson {
    let kelvin = settings::temperature(rec).ok().map(settings::bytes_to_kelvin);
    SettingsDumpJson {
        len: rec.len(),
        hex: to_hex(rec),
        sequence: record::sequence_bytes(rec).map(|s| to_hex(&s)),
        kelvin,
        strength: kelvin.map(settings::kelvin_to_percentage),
    }
}

fn print_bytes(data: &[u8]) {
    for (i, chunk) in data.chunks(16).enumerate() {
        print!("  {:04X}: ", i * 16);
        for b in chunk {
            print!("{b:02X} ");
        }
        println!();
    }
}

pub(super) fn cmd_dump<K: RecordKey>(nl: &NightLight<K>, json: bool) -> Result<()> {
    let state = nl.raw_state()?;
    let settings_rec = nl.raw_settings()?;

    if json {
        return print_json(&DumpOutput {
            supported: nl.is_supported(),
            state: state.as_deref().map(state_json),
            settings: settings_rec.as_deref().map(settings_json),
        });
    }

    if !nl.is_supported() {
        println!("Night Light: not supported on this system");
        return Ok(());
    }

    let w = kv_width(
        &[],
        &["Length:", "Flag:", "Signatures:", "Sequence:", "Kelvin:", "Strength:"],
    );

    match state.as_deref().map(|rec| (rec, state_json(rec))) {
        Some((rec, info)) => {
            println!("State record ({} bytes):", info.len);
            print_bytes(rec);
            let flag = match info.flag {
                Some(f) => format!("{f:#04X} ({})", if info.enabled { "on" } else { "off" }),
                None => "(missing)".to_string(),
            };
            kv_indent("Flag:", flag, w);
            let validity = if info.looks_valid { "" } else { " (unexpected)" };
            kv_indent("Signatures:", format_args!("{}{validity}", info.signatures), w);
            kv_indent("Sequence:", info.sequence.as_deref().unwrap_or("(missing)"), w);
        }
        None => println!("State record: (missing)"),
    }
    println!();

    match settings_rec.as_deref().map(|rec| (rec, settings_json(rec))) {
        Some((rec, info)) => {
            println!("Settings record ({} bytes):", info.len);
            print_bytes(rec);
            kv_indent("Sequence:", info.sequence.as_deref().unwrap_or("(missing)"), w);
            match (info.kelvin, info.strength) {
                (Some(k), Some(s)) => {
                    kv_indent("Kelvin:", k, w);
                    kv_indent("Strength:", format_args!("{}%", s.round()), w);
                }
                _ => kv_indent("Strength:", "(record too short)", w),
            }
        }
        None => println!("Settings record: (missing)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightlight_lib::store::mock::MemoryKey;

    #[test]
    fn state_json_reports_fields() {
        let mut rec = vec![0u8; 43];
        rec[18] = record::FLAG_ENABLED;
        rec[10] = 0xAB;
        let info = state_json(&rec);
        assert_eq!(info.len, 43);
        assert_eq!(info.flag, Some(0x15));
        assert!(info.enabled);
        assert_eq!(info.sequence.as_deref(), Some("ab00000000"));
        assert!(!info.looks_valid);
    }

    #[test]
    fn settings_json_short_record_has_no_strength() {
        let info = settings_json(&[0u8; 20]);
        assert_eq!(info.kelvin, None);
        assert_eq!(info.strength, None);
    }

    #[test]
    fn dump_reads_both_records() {
        let state_key = MemoryKey::new(vec![0u8; 41]);
        let settings_key = MemoryKey::new(vec![0u8; 0x30]);
        let nl = NightLight::new(Some(&state_key), Some(&settings_key));

        assert!(cmd_dump(&nl, false).is_ok());
        assert!(cmd_dump(&nl, true).is_ok());
        assert_eq!(state_key.reads.get(), 2);
        assert!(state_key.writes.borrow().is_empty());
    }

    #[test]
    fn dump_missing_values_succeeds() {
        let state_key = MemoryKey::empty();
        let settings_key = MemoryKey::empty();
        let nl = NightLight::new(Some(&state_key), Some(&settings_key));
        assert!(cmd_dump(&nl, false).is_ok());
    }

    #[test]
    fn dump_unsupported_succeeds() {
        let nl = NightLight::<&MemoryKey>::new(None, None);
        assert!(cmd_dump(&nl, false).is_ok());
        assert!(cmd_dump(&nl, true).is_ok());
    }
}
