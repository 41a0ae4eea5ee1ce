//! Config Validation Tests
//!
//! Typo detection and range validation of `noise_checker.toml`, exercised
//! through the public config API.

use noise_checker::config::validation::{
    known_config_keys, suggest_correction, validate_ranges, validate_unknown_keys,
};
use noise_checker::config::{ConfigError, NoiseCheckerConfig};
use noise_checker::types::ZoneType;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_site_section_warns_with_suggestion() {
    let toml_str = r#"
[site]
zone_tpye = "commercial"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert_eq!(warnings[0].field, "site.zone_tpye");
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("site.zone_type"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn typo_in_section_name_warns() {
    let toml_str = r#"
[calibraton]
metering_scale = 0.6
"#;
    let warnings = validate_unknown_keys(toml_str);
    let section = warnings
        .iter()
        .find(|w| w.field == "calibraton")
        .expect("section typo should be reported");
    assert_eq!(section.suggestion.as_deref(), Some("calibration"));
}

#[test]
fn valid_full_config_has_no_warnings() {
    let toml_str = r#"
[site]
name = "Maple Court"
address = "1-2-3 Example St"
room_number = "201"
zone_type = "residential"

[recording]
auto_record = false
record_threshold_db = 65.0
notification_enabled = true
sample_interval_ms = 250

[calibration]
metering_floor_db = -160.0
metering_scale = 0.625

[storage]
path = "/var/lib/noise-checker/sessions"
recent_limit = 50
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");
}

#[test]
fn suggestion_requires_close_match() {
    let known = known_config_keys();
    assert_eq!(suggest_correction("storage.pth", &known).as_deref(), Some("storage.path"));
    assert_eq!(suggest_correction("completely.unrelated.key", &known), None);
}

#[test]
fn unknown_keys_do_not_fail_loading() {
    let (config, _) = NoiseCheckerConfig::parse_with_provenance(
        "[site]\nzone_type = \"commercial\"\nfloor = 3\n",
    )
    .unwrap();
    assert_eq!(config.site.zone_type, ZoneType::Commercial);
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn all_range_errors_are_reported_together() {
    let mut config = NoiseCheckerConfig::default();
    config.recording.record_threshold_db = f64::NAN;
    config.recording.sample_interval_ms = 0;
    config.calibration.metering_scale = -1.0;
    config.storage.path = "   ".to_string();
    config.storage.recent_limit = 0;

    let (errors, _) = validate_ranges(&config);
    assert_eq!(errors.len(), 5, "Expected one error per bad field: {errors:?}");
}

#[test]
fn positive_metering_floor_only_warns() {
    let mut config = NoiseCheckerConfig::default();
    config.calibration.metering_floor_db = 10.0;
    let (errors, warnings) = validate_ranges(&config);
    assert!(errors.is_empty());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "calibration.metering_floor_db");
}

#[test]
fn validation_error_display_lists_every_problem() {
    let result = NoiseCheckerConfig::parse_with_provenance(
        "[storage]\npath = \"\"\nrecent_limit = 0\n",
    );
    let Err(err @ ConfigError::Validation(_)) = result else {
        panic!("expected validation failure");
    };
    let text = err.to_string();
    assert!(text.contains("storage.path"));
    assert!(text.contains("storage.recent_limit"));
}

#[test]
fn saved_config_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise_checker.toml");

    let mut config = NoiseCheckerConfig::default();
    config.site.name = "Maple Court".to_string();
    config.site.zone_type = ZoneType::Commercial;
    config.recording.record_threshold_db = 58.5;
    config.save_to_file(&path).unwrap();

    let (loaded, provenance) = NoiseCheckerConfig::load_from_file_with_provenance(&path).unwrap();
    assert_eq!(loaded.site.name, "Maple Court");
    assert_eq!(loaded.site.zone_type, ZoneType::Commercial);
    assert_eq!(loaded.recording.record_threshold_db, 58.5);
    assert!(provenance.is_user_set("recording.record_threshold_db"));
}
