//! Fuzz target: zone list parsing and validation
//!
//! Feeds arbitrary `--zone` text through `parse_zone_list` and `validate`
//! and checks:
//! - No panics under arbitrary input
//! - Every accepted zone is in 1..=8 and maps to a mask with one bit clear
//! - An accepted plan has at least one zone and a non-zero repeat
//!
//! cargo fuzz run fuzz_zone_list

#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use sprinkler::config::{parse_zone_list, validate};

fuzz_target!(|data: &[u8]| {
    let Some((&repeat, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let Ok(zones) = parse_zone_list(text) else {
        return;
    };

    if let Ok(config) = validate(&zones, Duration::from_secs(5), u64::from(repeat % 4)) {
        assert!(!config.zones().is_empty());
        assert!(config.repeat() > 0);
        for zone in config.zones() {
            assert!((1..=8).contains(&zone.get()));
            assert_eq!(zone.mask().bits().count_zeros(), 1);
        }
    }
});
