//! Integration tests for Settings layered loading.
//!
//! Layers: defaults -> config file -> environment. Environment values are
//! injected through an explicit source map so tests never touch the process
//! environment.

use std::fs;

use config::{Environment, Map};
use rstest::rstest;
use tempfile::TempDir;

use polyfold::application::ApplicationError;
use polyfold::config::{Settings, DEFAULT_MAX_DEPTH};

fn env_with(pairs: &[(&str, &str)]) -> Environment {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v.to_string());
    }
    Settings::env_source().source(Some(map))
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("polyfold.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn given_no_file_and_no_env_when_load_then_defaults() {
    let settings = Settings::load_layers(None, env_with(&[])).expect("load settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.tax.rate_bps, 4_000);
    assert_eq!(settings.tree.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn given_file_with_partial_section_when_load_then_other_fields_default() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[tax]\nrate_bps = 2500\n");

    let settings = Settings::load_layers(Some(&path), env_with(&[])).expect("load settings");

    assert_eq!(settings.tax.rate_bps, 2_500);
    assert_eq!(settings.tree.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn given_file_and_env_when_load_then_env_wins() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[tax]\nrate_bps = 2500\n\n[tree]\nmax_depth = 64\n");

    let settings = Settings::load_layers(
        Some(&path),
        env_with(&[("POLYFOLD_TAX__RATE_BPS", "3000")]),
    )
    .expect("load settings");

    assert_eq!(settings.tax.rate_bps, 3_000);
    assert_eq!(settings.tree.max_depth, 64);
}

#[rstest]
#[case("[tax]\nrate_bps = 10001\n")]
#[case("[tree]\nmax_depth = 0\n")]
fn given_out_of_range_values_when_load_then_config_error(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, content);

    let err = Settings::load_layers(Some(&path), env_with(&[])).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }), "got {:?}", err);
}

#[test]
fn given_malformed_toml_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[tax\nrate_bps = ");

    let err = Settings::load_layers(Some(&path), env_with(&[])).unwrap_err();
    assert!(err.to_string().contains("polyfold.toml"), "got {}", err);
}

#[test]
fn given_non_numeric_env_when_load_then_config_error() {
    let err = Settings::load_layers(None, env_with(&[("POLYFOLD_TREE__MAX_DEPTH", "deep")]))
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }), "got {:?}", err);
}
