//! Fuzz target: email shape check.
//!
//! Accepted addresses must never contain whitespace and must contain exactly
//! one `@`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roster_core::validate::is_valid_email;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if is_valid_email(s) {
        assert!(!s.chars().any(char::is_whitespace), "accepted address with whitespace: {s:?}");
        assert_eq!(s.matches('@').count(), 1, "accepted address without exactly one @: {s:?}");
    }
});
