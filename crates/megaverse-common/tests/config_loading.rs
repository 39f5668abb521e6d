//! ---
//! mv_section: "15-testing-qa"
//! mv_subsection: "integration-tests"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Configuration discovery and override tests."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use std::fs;
use std::time::Duration;

use megaverse_common::config::{AppConfig, ConfigOverrides, DEFAULT_BASE_URL};

#[test]
fn first_existing_candidate_wins() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let present = dir.path().join("megaverse.toml");
    fs::write(
        &present,
        "[api]\ncandidate_id = \"from-file\"\nmin_request_interval_ms = 1500\n",
    )
    .unwrap();

    let loaded = AppConfig::load_with_source(&[missing, present.clone()]).unwrap();
    assert_eq!(loaded.source.as_deref(), Some(present.as_path()));
    assert_eq!(loaded.config.api.candidate_id, "from-file");
    assert_eq!(
        loaded.config.api.min_request_interval,
        Duration::from_millis(1500)
    );
}

#[test]
fn defaults_used_when_no_candidate_exists() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = AppConfig::load_with_source(&[dir.path().join("nope.toml")]).unwrap();
    assert!(loaded.source.is_none());
    assert_eq!(loaded.config.api.base_url, DEFAULT_BASE_URL);
}

#[test]
fn resolve_applies_overrides_before_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("megaverse.toml");
    fs::write(&path, "[api]\nbase_url = \"http://127.0.0.1:9/api\"\n").unwrap();

    let without = AppConfig::resolve(&[path.clone()], &ConfigOverrides::default());
    assert!(without.is_err(), "candidate id is mandatory");

    let overrides = ConfigOverrides {
        candidate_id: Some("cli-candidate".into()),
        ..ConfigOverrides::default()
    };
    let loaded = AppConfig::resolve(&[path], &overrides).unwrap();
    assert_eq!(loaded.config.api.candidate_id, "cli-candidate");
    assert_eq!(loaded.config.api.base_url, "http://127.0.0.1:9/api");
}

#[test]
fn malformed_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[api\ncandidate_id = ").unwrap();
    let err = AppConfig::load_with_source(&[path.clone()]).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}
