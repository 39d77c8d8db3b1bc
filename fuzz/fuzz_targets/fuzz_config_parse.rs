// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz AfeConfig TOML parsing and validation.
//!
//! 1. `parse_toml` never panics on arbitrary input.
//! 2. Parsed configs validate without panics and warnings Display cleanly.
//! 3. Serializing back to TOML and re-parsing gives the same config.
#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    let config = match afe_config::parse_toml(s) {
        Ok(c) => c,
        Err(_) => return,
    };

    match afe_config::validate_config(&config) {
        Ok(warnings) => {
            for w in &warnings {
                let _ = format!("{w}");
            }
        }
        Err(e) => {
            let _ = format!("{e}");
        }
    }

    let _ = config.error_factory().raw(0, "fuzz");

    if let Ok(toml_str) = toml::to_string(&config)
        && let Ok(rt) = afe_config::parse_toml(&toml_str)
    {
        assert_eq!(config, rt, "TOML round-trip must be lossless");
    }
});
