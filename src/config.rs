//! Tunable gameplay constants.
//!
//! `GameConfig::default()` reproduces the reference level. A JSON file can
//! override any subset of fields; missing fields keep their defaults.
//!
//! ```json
//! { "coins_target": 12, "boss_contact_damage": 15 }
//! ```

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "SHARKIE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Loop periods (ms) ────────────────────────────────────────────────────
    /// Physics sub-tick: movement, oscillation, projectile travel.
    pub physics_step_ms: f64,
    /// Gameplay tick: collisions, pickups, triggers, sweep.
    pub gameplay_tick_ms: f64,
    /// Character animation-state evaluation.
    pub character_anim_ms: f64,

    // ── Damage ───────────────────────────────────────────────────────────────
    pub invulnerability_ms: f64,
    pub status_duration_ms: f64,
    pub contact_damage: i32,
    pub boss_contact_damage: i32,

    // ── HUD / inventory ──────────────────────────────────────────────────────
    pub coins_target: u32,
    pub poison_max: u32,

    // ── Character ────────────────────────────────────────────────────────────
    /// Pixels moved per physics sub-tick per pressed direction.
    pub character_speed: f64,
    pub sleep_threshold_ms: f64,
    pub sleep_loop_delay_ms: f64,
    pub normal_attack_frame_ms: f64,
    pub poison_attack_frame_ms: f64,

    // ── Projectiles ──────────────────────────────────────────────────────────
    /// Pixels per millisecond.
    pub projectile_speed: f64,
    pub projectile_lifetime_ms: f64,

    // ── Boss ─────────────────────────────────────────────────────────────────
    pub boss_trigger_x: f64,
    pub boss_hits: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            physics_step_ms: 1000.0 / 60.0,
            gameplay_tick_ms: 200.0,
            character_anim_ms: 120.0,
            invulnerability_ms: 600.0,
            status_duration_ms: 800.0,
            contact_damage: 5,
            boss_contact_damage: 10,
            coins_target: 10,
            poison_max: 6,
            character_speed: 10.0,
            sleep_threshold_ms: 4000.0,
            sleep_loop_delay_ms: 400.0,
            normal_attack_frame_ms: 80.0,
            poison_attack_frame_ms: 120.0,
            // 8 px every 30 ms
            projectile_speed: 8.0 / 30.0,
            projectile_lifetime_ms: 3000.0,
            boss_trigger_x: 4100.0,
            boss_hits: 5,
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$SHARKIE_CONFIG`, or fall back to defaults.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("physics_step_ms", self.physics_step_ms),
            ("gameplay_tick_ms", self.gameplay_tick_ms),
            ("character_anim_ms", self.character_anim_ms),
            ("normal_attack_frame_ms", self.normal_attack_frame_ms),
            ("poison_attack_frame_ms", self.poison_attack_frame_ms),
        ];
        for (name, value) in periods {
            if !(value > 0.0) {
                return Err(GameError::InvalidConfig(format!("{name} must be positive")));
            }
        }
        if self.coins_target == 0 {
            return Err(GameError::InvalidConfig("coins_target must be non-zero".into()));
        }
        if self.poison_max == 0 {
            return Err(GameError::InvalidConfig("poison_max must be non-zero".into()));
        }
        if self.contact_damage < 0 || self.boss_contact_damage < 0 {
            return Err(GameError::InvalidConfig("damage cannot be negative".into()));
        }
        if self.boss_hits <= 0 {
            return Err(GameError::InvalidConfig("boss_hits must be positive".into()));
        }
        Ok(())
    }
}
