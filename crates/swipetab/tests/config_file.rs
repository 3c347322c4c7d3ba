//! Tests for loading swipe configuration from TOML files.

use std::io::Write;
use std::time::Duration;

use swipetab::config::{AllowedSwipeDirection, InteractionConfig, SwipeConfig};
use swipetab::{AnimationStyle, ConfigError, Easing, TabSwitchCoordinator};
use swipetab_core::{Rect, Size};
use tempfile::{NamedTempFile, TempDir};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("swipe.toml");

    let config = SwipeConfig {
        cycling_enabled: true,
        allowed_swipe_direction: AllowedSwipeDirection::Right,
        maximum_touches: Some(2),
        animation_duration: Duration::from_millis(250),
        swipe_animation: AnimationStyle::Push,
        tap_animation: AnimationStyle::Overlap,
        easing: Easing::EaseOutCubic,
        interaction: InteractionConfig {
            completion_velocity: 300.0,
            ..InteractionConfig::default()
        },
        ..SwipeConfig::default()
    };
    config.save(&path).unwrap();

    let loaded = SwipeConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let file = write_config(
        r#"
        swipe_enabled = false
        animation_duration_ms = 100

        [interaction]
        maximum_fraction = 0.95
        "#,
    );

    let config = SwipeConfig::load(file.path()).unwrap();
    assert!(!config.swipe_enabled);
    assert_eq!(config.animation_duration, Duration::from_millis(100));
    assert_eq!(config.interaction.maximum_fraction, 0.95);
    assert_eq!(config.interaction.completion_fraction, 0.5);
    assert_eq!(config.minimum_touches, 1);
    assert_eq!(config.maximum_touches, None);

    let tabs = TabSwitchCoordinator::with_config(Rect::from_size(Size::new(320.0, 480.0)), config)
        .unwrap();
    assert!(!tabs.recognizer().is_enabled());
}

#[test]
fn test_invalid_values_rejected() {
    let file = write_config("minimum_touches = 0\n");
    assert!(matches!(
        SwipeConfig::load(file.path()),
        Err(ConfigError::Invalid(_))
    ));

    let file = write_config("minimum_touches = 3\nmaximum_touches = 2\n");
    assert!(matches!(
        SwipeConfig::load(file.path()),
        Err(ConfigError::Invalid(_))
    ));

    let file = write_config("[interaction]\ncompletion_fraction = 1.5\n");
    assert!(matches!(
        SwipeConfig::load(file.path()),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_malformed_file_rejected() {
    let file = write_config("allowed_swipe_direction = \"up\"\n");
    assert!(matches!(
        SwipeConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = SwipeConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}
