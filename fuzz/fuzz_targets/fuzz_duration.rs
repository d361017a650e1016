//! Fuzz target: duration parsing
//!
//! Any string `parse_duration` accepts must render through
//! `format_duration` and parse back to the same value.
//!
//! cargo fuzz run fuzz_duration

#![no_main]

use libfuzzer_sys::fuzz_target;
use sprinkler::config::{format_duration, parse_duration};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(d) = parse_duration(text) {
        let rendered = format_duration(d);
        assert_eq!(parse_duration(&rendered).ok(), Some(d), "{text:?} -> {rendered:?}");
    }
});
