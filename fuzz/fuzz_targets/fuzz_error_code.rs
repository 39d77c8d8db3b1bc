// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz ErrorCode lookup, deserialization, and AfeError construction.
//!
//! Verifies:
//! 1. Reverse lookup of arbitrary integers never panics and only resolves
//!    published codes.
//! 2. Deserializing arbitrary strings as ErrorCode never panics.
//! 3. AfeError construction with arbitrary domain/code/reason keeps them verbatim.
//! 4. AfeErrorDto round-trips through JSON.
#![no_main]
use afe_error::{AfeError, AfeErrorDto, ErrorCode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // --- Property 1: reverse lookup ---
    if data.len() >= 8 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&data[..8]);
        let code = i64::from_le_bytes(raw);
        if let Some(kind) = ErrorCode::from_code(code) {
            assert_eq!(i64::from(kind.code()), code);
        }
    }

    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    // --- Property 2: JSON deserialization never panics ---
    if let Ok(code) = serde_json::from_str::<ErrorCode>(s) {
        assert_eq!(format!("{code}"), code.as_str());
        let json = serde_json::to_string(&code).expect("ErrorCode must serialize");
        let rt: ErrorCode = serde_json::from_str(&json).expect("ErrorCode round-trip must succeed");
        assert_eq!(code, rt);
    }

    // --- Property 3: construction keeps inputs verbatim ---
    let code = data.first().copied().map(i64::from).unwrap_or(0) - 6000;
    let err = AfeError::with_raw_code(s, code, s).with_user_info("fuzz_key", s);
    assert_eq!(err.domain, s);
    assert_eq!(err.code, code);
    assert_eq!(err.failure_reason(), Some(s));
    assert!(!format!("{err}").is_empty());

    // --- Property 4: AfeErrorDto JSON round-trip ---
    let dto = AfeErrorDto::from(&err);
    if let Ok(json) = serde_json::to_string(&dto) {
        let rt: AfeErrorDto =
            serde_json::from_str(&json).expect("AfeErrorDto round-trip must succeed");
        assert_eq!(dto, rt);
    }
});
