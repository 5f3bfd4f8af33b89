use std::path::PathBuf;

use approx::assert_relative_eq;

use sharkie::{GameConfig, GameError};

fn scratch_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sharkie-{}-{name}.json", std::process::id()));
    std::fs::write(&path, content).expect("write scratch config");
    path
}

#[test]
fn defaults_match_reference_level() {
    let c = GameConfig::default();
    assert_relative_eq!(c.gameplay_tick_ms, 200.0);
    assert_relative_eq!(c.invulnerability_ms, 600.0);
    assert_relative_eq!(c.status_duration_ms, 800.0);
    assert_relative_eq!(c.boss_trigger_x, 4100.0);
    assert_eq!(c.coins_target, 10);
    assert_eq!(c.poison_max, 6);
    assert!(c.boss_contact_damage > c.contact_damage);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let path = scratch_file("partial", r#"{ "coins_target": 12, "boss_contact_damage": 15 }"#);
    let c = GameConfig::load(&path).expect("valid config");
    assert_eq!(c.coins_target, 12);
    assert_eq!(c.boss_contact_damage, 15);
    assert_eq!(c.poison_max, 6);
    let _ = std::fs::remove_file(path);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let path = scratch_file("malformed", "{ coins_target: ");
    assert!(matches!(GameConfig::load(&path), Err(GameError::ConfigParse(_))));
    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("sharkie-does-not-exist.json");
    assert!(matches!(GameConfig::load(path), Err(GameError::ConfigIo { .. })));
}

#[test]
fn out_of_range_values_rejected() {
    let path = scratch_file("invalid", r#"{ "gameplay_tick_ms": 0 }"#);
    assert!(matches!(GameConfig::load(&path), Err(GameError::InvalidConfig(_))));
    let _ = std::fs::remove_file(path);

    let negative = GameConfig { contact_damage: -1, ..GameConfig::default() };
    assert!(negative.validate().is_err());
}
