//! Puffer fish: drifts left while cycling normal → inflating → inflated.
//!
//! The first cycle starts after a random offset so neighbouring fish do not
//! inflate in lock-step. Contact while inflating or inflated poisons the
//! player.

use rand::Rng;

use crate::anim::{Clip, FrameCounter, OneShot, PufferColor, Sprite};
use crate::entities::{per_ms, DeathFloat, Movable};
use crate::geometry::{Body, Inset};
use crate::render::Drawable;
use crate::schedule::{Countdown, FixedStep};

const FRAME_MS: f64 = 150.0;
const MAX_START_DELAY_MS: f64 = 5000.0;
const NORMAL_MIN_MS: f64 = 4000.0;
const NORMAL_SPREAD_MS: f64 = 3000.0;
const INFLATED_MS: f64 = 8000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PufferMode {
    Normal,
    Transitioning,
    Inflated,
}

#[derive(Clone, Debug)]
pub struct PufferFish {
    pub motion: Movable,
    pub color: PufferColor,
    mode: PufferMode,
    /// `false` until the desync offset has elapsed.
    cycling: bool,
    phase_timer: Countdown,
    transition: Option<OneShot>,
    death: Option<DeathFloat>,
    pending_removal: bool,
    frames: FrameCounter,
    anim_step: FixedStep,
    sprite: Sprite,
}

impl PufferFish {
    pub fn new(x: f64, y: f64, color: PufferColor, rng: &mut impl Rng) -> Self {
        let speed = 0.15 + rng.gen::<f64>() * 0.45;
        let start_delay = rng.gen::<f64>() * MAX_START_DELAY_MS;
        let body = Body::new(x, y, 110.0, 90.0).with_inset(Inset::new(0.0, 0.0, 0.0, 5.0));
        PufferFish {
            motion: Movable::new(body).with_velocity(-per_ms(speed)),
            color,
            mode: PufferMode::Normal,
            cycling: false,
            phase_timer: Countdown::new(start_delay),
            transition: None,
            death: None,
            pending_removal: false,
            frames: FrameCounter::new(),
            anim_step: FixedStep::new(FRAME_MS),
            sprite: Sprite::new(Clip::PufferSwim(color)),
        }
    }

    /// Random placement in the opening stretch of the level.
    pub fn random(color: PufferColor, rng: &mut impl Rng) -> Self {
        let x = 550.0 + rng.gen::<f64>() * 500.0;
        let y = 150.0 + rng.gen::<f64>() * 200.0;
        Self::new(x, y, color, rng)
    }

    pub fn mode(&self) -> PufferMode {
        self.mode
    }

    pub fn is_dead(&self) -> bool {
        self.death.is_some()
    }

    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }

    /// Contact in these modes poisons the player.
    pub fn is_toxic(&self) -> bool {
        matches!(self.mode, PufferMode::Transitioning | PufferMode::Inflated)
    }

    pub fn update(&mut self, dt_ms: f64, rng: &mut impl Rng) {
        if let Some(death) = self.death.as_mut() {
            if death.advance(dt_ms, &mut self.motion.body) {
                self.pending_removal = true;
            }
            self.sprite = death.sprite();
            return;
        }

        self.motion.step(dt_ms);
        self.advance_cycle(dt_ms, rng);

        let steps = self.anim_step.advance(dt_ms);
        match self.mode {
            PufferMode::Normal => {
                for _ in 0..steps {
                    self.sprite = self.frames.step(Clip::PufferSwim(self.color));
                }
            }
            PufferMode::Inflated => {
                for _ in 0..steps {
                    self.sprite = self.frames.step(Clip::PufferInflated(self.color));
                }
            }
            PufferMode::Transitioning => {
                if let Some(t) = &self.transition {
                    self.sprite = t.sprite();
                }
            }
        }
    }

    fn advance_cycle(&mut self, dt_ms: f64, rng: &mut impl Rng) {
        match self.mode {
            PufferMode::Normal => {
                if !self.phase_timer.advance(dt_ms) {
                    return;
                }
                if self.cycling {
                    self.mode = PufferMode::Transitioning;
                    self.transition = Some(OneShot::new(Clip::PufferTransition(self.color), FRAME_MS));
                } else {
                    self.cycling = true;
                    self.phase_timer = Self::normal_phase(rng);
                }
            }
            PufferMode::Transitioning => {
                // One playthrough, then inflate.
                let Some(t) = self.transition.as_mut() else {
                    self.mode = PufferMode::Inflated;
                    self.phase_timer = Countdown::new(INFLATED_MS);
                    return;
                };
                t.advance(dt_ms);
                if t.is_finished() {
                    self.transition = None;
                    self.mode = PufferMode::Inflated;
                    self.phase_timer = Countdown::new(INFLATED_MS);
                }
            }
            PufferMode::Inflated => {
                if self.phase_timer.advance(dt_ms) {
                    self.mode = PufferMode::Normal;
                    self.phase_timer = Self::normal_phase(rng);
                }
            }
        }
    }

    fn normal_phase(rng: &mut impl Rng) -> Countdown {
        Countdown::new(NORMAL_MIN_MS + rng.gen::<f64>() * NORMAL_SPREAD_MS)
    }

    /// Stop the cycle and start the death sequence. Returns `false` when
    /// already dead.
    pub fn die(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.motion.velocity_x = 0.0;
        self.transition = None;
        self.death = Some(DeathFloat::new(Clip::PufferDead(self.color)));
        true
    }
}

impl Drawable for PufferFish {
    fn body(&self) -> &Body {
        &self.motion.body
    }

    fn sprite(&self) -> Sprite {
        self.sprite
    }
}
