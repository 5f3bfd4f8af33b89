//! Game entities: the player character, enemies, projectiles, pickups.
//!
//! Entities mutate only their own fields. Cross-entity effects (damage to the
//! character, pickups, projectile hits) are applied by the world.

pub mod boss;
pub mod bubble;
pub mod character;
pub mod collectable;
pub mod enemy;
pub mod fish;
pub mod jelly;
pub mod puffer;

pub use boss::{Boss, BossHit, BossState};
pub use bubble::Bubble;
pub use character::{AttackKind, Character, CharacterPose, Status, WindUpEnd};
pub use collectable::{Collectable, CollectableKind};
pub use enemy::{Contact, Enemy, EnemyKind, ProjectileHit};
pub use fish::DriftingFish;
pub use jelly::JellyFish;
pub use puffer::{PufferFish, PufferMode};

use crate::geometry::Body;

/// Sub-tick length the per-tick speeds of the reference game were tuned for.
pub const REFERENCE_STEP_MS: f64 = 1000.0 / 60.0;

/// Corpses rise this far per float step.
pub(crate) const FLOAT_STEP_PX: f64 = 5.0;
pub(crate) const FLOAT_STEP_MS: f64 = 16.0;
pub(crate) const FLOAT_STEPS: u32 = 36;
pub(crate) const DEATH_FRAME_MS: f64 = 120.0;

// ── Health ───────────────────────────────────────────────────────────────────

/// Health in `[0, 100]` plus the timestamp of the last accepted hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Vitals {
    health: i32,
    last_hit_at_ms: Option<f64>,
}

impl Vitals {
    pub const MAX_HEALTH: i32 = 100;

    pub fn new() -> Self {
        Vitals { health: Self::MAX_HEALTH, last_hit_at_ms: None }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn last_hit_at_ms(&self) -> Option<f64> {
        self.last_hit_at_ms
    }

    /// Inside the invulnerability window of the last accepted hit.
    pub fn is_hurt(&self, now_ms: f64, window_ms: f64) -> bool {
        self.last_hit_at_ms.is_some_and(|t| now_ms - t < window_ms)
    }

    /// Apply damage unless still invulnerable. Returns whether the hit landed.
    pub fn hit(&mut self, damage: i32, now_ms: f64, window_ms: f64) -> bool {
        if self.is_hurt(now_ms, window_ms) {
            return false;
        }
        self.health = self.health.saturating_sub(damage).clamp(0, Self::MAX_HEALTH);
        self.last_hit_at_ms = Some(now_ms);
        true
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new()
    }
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Body plus horizontal velocity, facing and health.
#[derive(Clone, Debug)]
pub struct Movable {
    pub body: Body,
    /// Pixels per millisecond; negative moves left.
    pub velocity_x: f64,
    pub facing_left: bool,
    pub vitals: Vitals,
}

impl Movable {
    pub fn new(body: Body) -> Self {
        Movable { body, velocity_x: 0.0, facing_left: false, vitals: Vitals::new() }
    }

    pub fn with_velocity(mut self, velocity_x: f64) -> Self {
        self.velocity_x = velocity_x;
        self
    }

    pub fn step(&mut self, dt_ms: f64) {
        self.body.x += self.velocity_x * dt_ms;
    }
}

/// Convert a per-sub-tick speed into pixels per millisecond.
pub fn per_ms(px_per_step: f64) -> f64 {
    px_per_step / REFERENCE_STEP_MS
}

// ── Death sequence ───────────────────────────────────────────────────────────

/// Shared corpse behaviour for puffer fish and jellyfish: death frames play
/// once, then the body floats upward in fixed steps before removal.
#[derive(Clone, Debug)]
pub(crate) struct DeathFloat {
    frames: crate::anim::OneShot,
    float_acc_ms: f64,
    steps_left: u32,
}

impl DeathFloat {
    pub(crate) fn new(clip: crate::anim::Clip) -> Self {
        DeathFloat {
            frames: crate::anim::OneShot::new(clip, DEATH_FRAME_MS),
            float_acc_ms: 0.0,
            steps_left: FLOAT_STEPS,
        }
    }

    /// Advance the sequence, moving `body` up while floating. Returns `true`
    /// once the float has finished.
    pub(crate) fn advance(&mut self, dt_ms: f64, body: &mut Body) -> bool {
        if self.steps_left == 0 {
            return true;
        }
        if !self.frames.is_finished() {
            self.frames.advance(dt_ms);
            if !self.frames.is_finished() {
                return false;
            }
            self.float_acc_ms += self.frames.overshoot_ms();
        } else {
            self.float_acc_ms += dt_ms;
        }
        while self.float_acc_ms >= FLOAT_STEP_MS && self.steps_left > 0 {
            self.float_acc_ms -= FLOAT_STEP_MS;
            body.y -= FLOAT_STEP_PX;
            self.steps_left -= 1;
        }
        self.steps_left == 0
    }

    pub(crate) fn sprite(&self) -> crate::anim::Sprite {
        self.frames.sprite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{Clip, PufferColor};

    #[test]
    fn vitals_ignore_hits_inside_window() {
        let mut v = Vitals::new();
        assert!(v.hit(5, 1000.0, 600.0));
        assert!(!v.hit(5, 1599.0, 600.0));
        assert!(v.hit(5, 1600.0, 600.0));
        assert_eq!(v.health(), 90);
    }

    #[test]
    fn corpse_floats_fixed_distance() {
        let mut body = Body::new(0.0, 100.0, 10.0, 10.0);
        let mut death = DeathFloat::new(Clip::PufferDead(PufferColor::Red));
        let mut done = false;
        for _ in 0..200 {
            done = death.advance(16.0, &mut body);
            if done {
                break;
            }
        }
        assert!(done);
        assert_eq!(body.y, 100.0 - 180.0);
    }
}
