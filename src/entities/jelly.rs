//! Jellyfish: bobs vertically on a sine wave and flips between a harmless
//! and a dangerous phase on a fixed period.

use std::f64::consts::TAU;

use rand::Rng;

use crate::anim::{Clip, FrameCounter, Sprite};
use crate::entities::{DeathFloat, Movable};
use crate::geometry::{Body, Inset};
use crate::render::Drawable;
use crate::schedule::FixedStep;

pub const DANGER_PERIOD_MS: f64 = 6000.0;
const AMPLITUDE_PX: f64 = 155.0;
/// Radians per millisecond.
const FREQUENCY: f64 = 0.001;
const FRAME_MS: f64 = 150.0;

#[derive(Clone, Debug)]
pub struct JellyFish {
    pub motion: Movable,
    pub baseline_y: f64,
    pub amplitude: f64,
    pub phase_offset: f64,
    elapsed_ms: f64,
    dangerous: bool,
    danger_step: FixedStep,
    death: Option<DeathFloat>,
    pending_removal: bool,
    frames: FrameCounter,
    anim_step: FixedStep,
    sprite: Sprite,
}

impl JellyFish {
    pub fn new(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        let phase_offset = rng.gen::<f64>() * TAU;
        Self::with_phase(x, y, phase_offset)
    }

    pub fn with_phase(x: f64, y: f64, phase_offset: f64) -> Self {
        let body = Body::new(x, y, 100.0, 90.0).with_inset(Inset::uniform(5.0));
        JellyFish {
            motion: Movable::new(body),
            baseline_y: y,
            amplitude: AMPLITUDE_PX,
            phase_offset,
            elapsed_ms: 0.0,
            dangerous: false,
            danger_step: FixedStep::new(DANGER_PERIOD_MS),
            death: None,
            pending_removal: false,
            frames: FrameCounter::new(),
            anim_step: FixedStep::new(FRAME_MS),
            sprite: Sprite::new(Clip::JellySwim),
        }
    }

    pub fn is_dangerous(&self) -> bool {
        self.dangerous
    }

    pub fn is_dead(&self) -> bool {
        self.death.is_some()
    }

    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }

    pub fn update(&mut self, dt_ms: f64) {
        if let Some(death) = self.death.as_mut() {
            if death.advance(dt_ms, &mut self.motion.body) {
                self.pending_removal = true;
            }
            self.sprite = death.sprite();
            return;
        }

        self.elapsed_ms += dt_ms;
        self.motion.body.y =
            self.baseline_y + self.amplitude * (self.elapsed_ms * FREQUENCY + self.phase_offset).sin();

        if self.danger_step.advance(dt_ms) % 2 == 1 {
            self.dangerous = !self.dangerous;
        }

        for _ in 0..self.anim_step.advance(dt_ms) {
            let clip = if self.dangerous { Clip::JellyDangerous } else { Clip::JellySwim };
            self.sprite = self.frames.step(clip);
        }
    }

    /// Freeze motion and play the death clip matching the current phase.
    /// Returns `false` when already dead.
    pub fn die(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        let clip = if self.dangerous { Clip::JellyDeadGreen } else { Clip::JellyDeadLila };
        self.death = Some(DeathFloat::new(clip));
        true
    }
}

impl Drawable for JellyFish {
    fn body(&self) -> &Body {
        &self.motion.body
    }

    fn sprite(&self) -> Sprite {
        self.sprite
    }
}
