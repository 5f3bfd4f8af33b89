//! The player character.
//!
//! Movement runs every physics sub-tick. The visible pose is re-evaluated on
//! a slower animation step using a strict priority order, so a higher-priority
//! state (death, attack wind-up, status effects) starves the lower ones.

use crate::anim::{Clip, FrameCounter, OneShot, Sprite};
use crate::config::GameConfig;
use crate::entities::Movable;
use crate::geometry::{Body, Inset};
use crate::input::InputState;
use crate::level::Bounds;
use crate::render::Drawable;
use crate::schedule::FixedStep;

/// Horizontal distance between the character and the left screen edge.
pub const CAMERA_LEAD_PX: f64 = 20.0;

/// Frames at the end of the sleep clip that loop once the intro has played.
const SLEEP_LOOP_FRAMES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackKind {
    Normal,
    Poison,
}

/// Animation state, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterPose {
    Dead,
    Attacking,
    Electrocuted,
    Poisoned,
    Swimming,
    Sleeping,
    Idle,
}

/// Timed status applied by enemy contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Poisoned,
    Electrocuted,
}

/// Result of a finished or aborted wind-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindUpEnd {
    pub kind: AttackKind,
    /// `false` when the wind-up was aborted by death.
    pub released: bool,
}

#[derive(Clone, Debug)]
struct WindUp {
    kind: AttackKind,
    anim: OneShot,
}

#[derive(Clone, Debug, Default)]
struct Sleep {
    asleep: bool,
    intro_index: usize,
    loop_index: usize,
    last_frame_at_ms: f64,
}

#[derive(Clone, Debug)]
pub struct Character {
    pub motion: Movable,
    idle_accum_ms: f64,
    poisoned_ms: f64,
    electrocuted_ms: f64,
    wind_up: Option<WindUp>,
    pose: CharacterPose,
    sprite: Sprite,
    frames: FrameCounter,
    sleep: Sleep,
    death_frames_shown: usize,
    anim_step: FixedStep,
}

impl Character {
    pub fn new(config: &GameConfig) -> Self {
        let body = Body::new(10.0, 40.0, 230.0, 280.0).with_inset(Inset::new(140.0, 50.0, 50.0, 70.0));
        Character {
            motion: Movable::new(body),
            idle_accum_ms: 0.0,
            poisoned_ms: 0.0,
            electrocuted_ms: 0.0,
            wind_up: None,
            pose: CharacterPose::Idle,
            sprite: Sprite::new(Clip::CharacterIdle),
            frames: FrameCounter::new(),
            sleep: Sleep::default(),
            death_frames_shown: 0,
            anim_step: FixedStep::new(config.character_anim_ms),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn health(&self) -> i32 {
        self.motion.vitals.health()
    }

    pub fn is_dead(&self) -> bool {
        self.motion.vitals.is_dead()
    }

    pub fn is_attacking(&self) -> bool {
        self.wind_up.is_some()
    }

    pub fn attack_kind(&self) -> Option<AttackKind> {
        self.wind_up.as_ref().map(|w| w.kind)
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned_ms > 0.0
    }

    pub fn is_electrocuted(&self) -> bool {
        self.electrocuted_ms > 0.0
    }

    pub fn idle_ms(&self) -> f64 {
        self.idle_accum_ms
    }

    pub fn pose(&self) -> CharacterPose {
        self.pose
    }

    pub fn is_asleep(&self) -> bool {
        self.sleep.asleep
    }

    /// The death clip has been shown through to its last frame.
    pub fn death_animation_finished(&self) -> bool {
        self.is_dead() && self.death_frames_shown >= Clip::CharacterDead.frame_count()
    }

    // ── Effects applied by the world ─────────────────────────────────────────

    pub fn hit(&mut self, damage: i32, now_ms: f64, config: &GameConfig) -> bool {
        self.motion.vitals.hit(damage, now_ms, config.invulnerability_ms)
    }

    /// Set a timed status. Poisoned and electrocuted exclude each other.
    pub fn apply_status(&mut self, status: Status, duration_ms: f64) {
        match status {
            Status::Poisoned => {
                self.poisoned_ms = duration_ms;
                self.electrocuted_ms = 0.0;
            }
            Status::Electrocuted => {
                self.electrocuted_ms = duration_ms;
                self.poisoned_ms = 0.0;
            }
        }
    }

    /// Begin an attack wind-up. No-op while another wind-up runs or when dead.
    pub fn start_attack(&mut self, kind: AttackKind, config: &GameConfig) -> bool {
        if self.is_attacking() || self.is_dead() {
            return false;
        }
        let (clip, frame_ms) = match kind {
            AttackKind::Normal => (Clip::CharacterBubbleAttack, config.normal_attack_frame_ms),
            AttackKind::Poison => (Clip::CharacterPoisonAttack, config.poison_attack_frame_ms),
        };
        self.wind_up = Some(WindUp { kind, anim: OneShot::new(clip, frame_ms) });
        true
    }

    // ── Per-sub-tick update ──────────────────────────────────────────────────

    /// Move, run timers and wind-ups, and step the animation. Returns the
    /// wind-up that ended during this sub-tick, if any.
    pub fn update(
        &mut self,
        dt_ms: f64,
        now_ms: f64,
        input: &InputState,
        bounds: &Bounds,
        config: &GameConfig,
    ) -> Option<WindUpEnd> {
        self.poisoned_ms = (self.poisoned_ms - dt_ms).max(0.0);
        self.electrocuted_ms = (self.electrocuted_ms - dt_ms).max(0.0);

        let mut moving = false;
        if !self.is_dead() {
            moving = self.steer(input, bounds, config.character_speed);
        }
        if self.is_attacking() {
            moving = true;
        }
        self.idle_accum_ms = if moving { 0.0 } else { self.idle_accum_ms + dt_ms };

        let ended = self.advance_wind_up(dt_ms);

        for _ in 0..self.anim_step.advance(dt_ms) {
            self.evaluate_pose(now_ms, input, config);
        }
        ended
    }

    /// Apply directional input and clamp to the level bounds.
    fn steer(&mut self, input: &InputState, bounds: &Bounds, speed: f64) -> bool {
        let body = &mut self.motion.body;
        let mut moving = false;
        if input.right && body.x < bounds.end_x {
            body.x += speed;
            self.motion.facing_left = false;
            moving = true;
        }
        if input.left && body.x > 0.0 {
            body.x -= speed;
            self.motion.facing_left = true;
            moving = true;
        }
        if input.up && body.y > bounds.top_y {
            body.y -= speed;
            moving = true;
        }
        if input.down && body.y < bounds.bottom_y {
            body.y += speed;
            moving = true;
        }
        body.x = body.x.clamp(0.0, bounds.end_x);
        body.y = body.y.clamp(bounds.top_y, bounds.bottom_y);
        moving
    }

    fn advance_wind_up(&mut self, dt_ms: f64) -> Option<WindUpEnd> {
        let kind = self.wind_up.as_ref()?.kind;
        if self.is_dead() {
            self.wind_up = None;
            return Some(WindUpEnd { kind, released: false });
        }
        let wind_up = self.wind_up.as_mut()?;
        wind_up.anim.advance(dt_ms);
        if !wind_up.anim.is_finished() {
            return None;
        }
        self.wind_up = None;
        Some(WindUpEnd { kind, released: true })
    }

    /// Camera offset that keeps the character near the left edge.
    pub fn camera_x(&self) -> f64 {
        -self.motion.body.x + CAMERA_LEAD_PX
    }

    // ── Animation ────────────────────────────────────────────────────────────

    fn evaluate_pose(&mut self, now_ms: f64, input: &InputState, config: &GameConfig) {
        let moving = input.any_direction();
        let hurt = self.motion.vitals.is_hurt(now_ms, config.invulnerability_ms);

        if self.is_dead() {
            self.pose = CharacterPose::Dead;
            let last = Clip::CharacterDead.frame_count() - 1;
            self.sprite = Sprite::at(Clip::CharacterDead, self.death_frames_shown.min(last));
            self.death_frames_shown = (self.death_frames_shown + 1).min(last + 1);
        } else if self.is_attacking() {
            // Frames belong to the wind-up.
            self.pose = CharacterPose::Attacking;
        } else if self.is_electrocuted() {
            self.pose = CharacterPose::Electrocuted;
            self.sprite = self.frames.step(Clip::CharacterShock);
        } else if self.is_poisoned() || hurt {
            self.pose = CharacterPose::Poisoned;
            self.sprite = self.frames.step(Clip::CharacterPoisoned);
        } else if moving {
            self.pose = CharacterPose::Swimming;
            self.sprite = self.frames.step(Clip::CharacterSwim);
            self.idle_accum_ms = 0.0;
            self.sleep.asleep = false;
        } else if self.idle_accum_ms > config.sleep_threshold_ms {
            self.pose = CharacterPose::Sleeping;
            self.step_sleep(now_ms, config.sleep_loop_delay_ms);
        } else {
            self.pose = CharacterPose::Idle;
            self.sprite = self.frames.step(Clip::CharacterIdle);
        }
    }

    /// Intro frames once, then the last few frames on a slower loop.
    fn step_sleep(&mut self, now_ms: f64, loop_delay_ms: f64) {
        let total = Clip::CharacterSleep.frame_count();
        let intro_len = total - (SLEEP_LOOP_FRAMES - 1);
        let loop_start = total - SLEEP_LOOP_FRAMES;

        if !self.sleep.asleep {
            self.sleep = Sleep { asleep: true, intro_index: 0, loop_index: 0, last_frame_at_ms: now_ms };
        }

        if self.sleep.intro_index < intro_len {
            self.sprite = Sprite::at(Clip::CharacterSleep, self.sleep.intro_index);
            self.sleep.intro_index += 1;
            self.sleep.last_frame_at_ms = now_ms;
        } else if now_ms - self.sleep.last_frame_at_ms >= loop_delay_ms {
            self.sprite = Sprite::at(Clip::CharacterSleep, loop_start + self.sleep.loop_index);
            self.sleep.loop_index = (self.sleep.loop_index + 1) % SLEEP_LOOP_FRAMES;
            self.sleep.last_frame_at_ms = now_ms;
        }
    }

    // ── Projectile spawn point ───────────────────────────────────────────────

    /// Spawn position and direction for a bubble leaving the mouth.
    pub fn mouth(&self) -> (f64, f64, bool) {
        let b = &self.motion.body;
        let left = self.motion.facing_left;
        let x = if left { b.x - 10.0 } else { b.x + b.width - 10.0 };
        let y = b.y + b.height * 0.5 - 20.0;
        (x, y, left)
    }
}

impl Drawable for Character {
    fn body(&self) -> &Body {
        &self.motion.body
    }

    fn sprite(&self) -> Sprite {
        match &self.wind_up {
            Some(w) if !self.is_dead() => w.anim.sprite(),
            _ => self.sprite,
        }
    }

    fn mirrored(&self) -> bool {
        self.motion.facing_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds { end_x: 4300.0, top_y: -130.0, bottom_y: 270.0 }
    }

    #[test]
    fn sleep_intro_then_loop() {
        let config = GameConfig::default();
        let mut c = Character::new(&config);
        let input = InputState::default();
        let mut now = 0.0;
        let mut frames = Vec::new();
        // well past the sleep threshold
        for _ in 0..600 {
            now += config.physics_step_ms;
            c.update(config.physics_step_ms, now, &input, &bounds(), &config);
            if c.pose() == CharacterPose::Sleeping {
                let f = c.sprite().frame;
                if frames.last() != Some(&f) {
                    frames.push(f);
                }
            }
        }
        assert_eq!(&frames[..11], &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert!(frames[11..].iter().all(|f| (10..14).contains(f)));
    }
}
