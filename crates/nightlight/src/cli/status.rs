//! `status` subcommand — print whether Night Light is on.

use super::{NightLight, RecordKey, Result, StatusOutput, print_json};

fn status_word(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

pub(super) fn cmd_status<K: RecordKey>(nl: &NightLight<K>, json: bool) -> Result<()> {
    let enabled = nl.enabled()?;
    if json {
        return print_json(&StatusOutput {
            supported: nl.is_supported(),
            enabled,
        });
    }
    println!("{}", status_word(enabled));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightlight_lib::store::mock::MemoryKey;

    #[test]
    fn status_words() {
        assert_eq!(status_word(true), "on");
        assert_eq!(status_word(false), "off");
    }

    #[test]
    fn status_unsupported_succeeds() {
        let nl = NightLight::<&MemoryKey>::new(None, None);
        assert!(cmd_status(&nl, false).is_ok());
        assert!(cmd_status(&nl, true).is_ok());
    }

    #[test]
    fn status_read_failure_is_error() {
        let key = MemoryKey::new(vec![0u8; 41]);
        key.fail_read.set(true);
        let nl = NightLight::new(Some(&key), Some(&key));
        assert!(cmd_status(&nl, false).is_err());
    }
}
