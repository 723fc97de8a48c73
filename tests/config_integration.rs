//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;

use firecell::config::{AppConfig, ComputationKind};
use firecell_render::RenderMode;
use serial_test::serial;

#[test]
#[serial]
fn test_default_file_matches_defaults() {
    std::env::remove_var("FIRECELL_SIMULATION__MAX_STEPS");

    let config = AppConfig::load_from("config").unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.simulation.step_time, defaults.simulation.step_time);
    assert_eq!(config.simulation.max_steps, defaults.simulation.max_steps);
    assert_eq!(config.simulation.computation, defaults.simulation.computation);
    assert_eq!(config.storage.rooms_dir, defaults.storage.rooms_dir);
    assert_eq!(config.camera.fov, defaults.camera.fov);
    assert_eq!(config.rendering.mode().unwrap(), RenderMode::Standard);
    assert!(config.platform.natives.is_none());
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("FIRECELL_SIMULATION__MAX_STEPS", "7");
    let config = AppConfig::load_from("config");
    std::env::remove_var("FIRECELL_SIMULATION__MAX_STEPS");

    assert_eq!(config.unwrap().simulation.max_steps, 7);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        "[simulation]\nstep_time = 1.0\nmax_steps = 10\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("user.toml"),
        "[simulation]\ncomputation = \"sequential\"\n\n[rendering]\nrender_mode = \"oxygen\"\n",
    )
    .unwrap();

    let config = AppConfig::load_from(dir.path()).unwrap();
    assert_eq!(config.simulation.step_time, 1.0);
    assert_eq!(config.simulation.max_steps, 10);
    assert_eq!(config.simulation.computation, ComputationKind::Sequential);
    assert_eq!(config.rendering.mode().unwrap(), RenderMode::Oxygen);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_from(dir.path().join("nowhere")).unwrap();
    assert_eq!(config.debug.log_level, "info");
}

#[test]
#[serial]
fn test_invalid_render_mode_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("user.toml"), "[rendering]\nrender_mode = \"xray\"\n").unwrap();

    let err = AppConfig::load_from(dir.path()).unwrap_err();
    assert!(err.to_string().contains("xray"));
}
