//! Fuzz target: decoding and validating a create-student body.
//!
//! Arbitrary bytes go through the same decoder and validator the
//! `POST /api/students` handler uses. Errors are expected; panics are not.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roster_gateway::routes::decode_create_body;

fuzz_target!(|data: &[u8]| {
    if let Ok(candidate) = decode_create_body(data) {
        if let Err(errs) = candidate.validate() {
            assert!(!errs.fields().is_empty(), "a failed validation must name a field");
            assert!(!errs.to_string().is_empty());
        }
    }
});
