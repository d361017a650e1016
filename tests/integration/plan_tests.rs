//! Integration tests: JSON plan files load through the same validation as
//! the command line.

use std::io::Write;
use std::time::Duration;

use sprinkler::config::Configuration;
use sprinkler::zone::ZoneId;
use tempfile::NamedTempFile;

fn plan_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn load(file: &NamedTempFile) -> serde_json::Result<Configuration> {
    let text = std::fs::read_to_string(file.path()).unwrap();
    serde_json::from_str(&text)
}

#[test]
fn plan_file_loads_and_normalizes() {
    let file = plan_file(r#"{ "zones": [2, 9, 5], "timeout": "2s", "repeat": 3 }"#);
    let config = load(&file).unwrap();

    let zones: Vec<u8> = config.zones().iter().map(|z| z.get()).collect();
    assert_eq!(zones, vec![2, 5], "zone 9 is dropped");
    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(config.repeat(), 3);
    assert_eq!(config.planned_writes(), 6);
}

#[test]
fn omitted_fields_take_defaults() {
    let file = plan_file(r#"{ "zones": [7] }"#);
    let config = load(&file).unwrap();
    assert_eq!(config.zones(), &[ZoneId::new(7).unwrap()]);
    assert_eq!(config.timeout(), Duration::from_secs(10));
    assert_eq!(config.repeat(), 1);
}

#[test]
fn invalid_plans_are_rejected() {
    for json in [
        r#"{ "zones": [] }"#,
        r#"{ "zones": [1, 2], "timeout": "0" }"#,
        r#"{ "zones": [4], "repeat": 2 }"#,
        r#"{ "zones": [1], "repeat": 0 }"#,
        r#"{ "zones": [1], "timeout": "ten seconds" }"#,
        r#"{ "timeout": "10s" }"#,
        "not json",
    ] {
        let file = plan_file(json);
        assert!(load(&file).is_err(), "accepted {json}");
    }
}

#[test]
fn saved_configuration_reloads_identically() {
    let file = plan_file(r#"{ "zones": [3, 1], "timeout": "90s", "repeat": 2 }"#);
    let config = load(&file).unwrap();

    let saved = plan_file(&serde_json::to_string(&config).unwrap());
    assert_eq!(load(&saved).unwrap(), config);
}
