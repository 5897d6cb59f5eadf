//! `strength` subcommand — show or set the Night Light strength.

use super::{NightLight, NightLightError, RecordKey, Result, StrengthOutput, print_json};

const STRENGTH_RANGE_MSG: &str = "Strength must be a number between 0 and 100";

/// Parse a whole-number percentage in `0..=100`.
fn parse_percentage(input: &str) -> Option<u8> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|p| *p <= 100)
}

pub(super) fn cmd_strength<K: RecordKey>(
    nl: &NightLight<K>,
    percentage: Option<&str>,
    json: bool,
) -> Result<()> {
    let Some(input) = percentage else {
        let strength = nl.strength()?.round() as u32;
        if json {
            return print_json(&StrengthOutput {
                supported: nl.is_supported(),
                strength,
            });
        }
        println!("{strength}%");
        return Ok(());
    };

    let Some(pct) = parse_percentage(input) else {
        crate::print_usage();
        return Err(NightLightError::InvalidArgument(format!(
            "{STRENGTH_RANGE_MSG} (got \"{input}\")"
        )));
    };
    nl.set_strength(f64::from(pct))
}
