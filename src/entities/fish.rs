//! Drifting fish: swims left forever, no state machine.

use rand::Rng;

use crate::anim::{Clip, FrameCounter, Sprite};
use crate::entities::{per_ms, Movable};
use crate::geometry::Body;
use crate::render::Drawable;
use crate::schedule::FixedStep;

const SWIM_FRAME_MS: f64 = 150.0;

#[derive(Clone, Debug)]
pub struct DriftingFish {
    pub motion: Movable,
    /// Pixels per physics sub-tick.
    pub drift_speed: f64,
    frames: FrameCounter,
    anim_step: FixedStep,
    sprite: Sprite,
}

impl DriftingFish {
    pub fn new(x: f64, y: f64, drift_speed: f64) -> Self {
        DriftingFish {
            motion: Movable::new(Body::new(x, y, 80.0, 70.0)).with_velocity(-per_ms(drift_speed)),
            drift_speed,
            frames: FrameCounter::new(),
            anim_step: FixedStep::new(SWIM_FRAME_MS),
            sprite: Sprite::new(Clip::FishSwim),
        }
    }

    /// Random placement in the opening stretch of the level.
    pub fn random(rng: &mut impl Rng) -> Self {
        let x = 250.0 + rng.gen::<f64>() * 500.0;
        let y = 100.0 + rng.gen::<f64>() * 200.0;
        let speed = 0.15 + rng.gen::<f64>() * 0.45;
        Self::new(x, y, speed)
    }

    pub fn update(&mut self, dt_ms: f64) {
        self.motion.step(dt_ms);
        for _ in 0..self.anim_step.advance(dt_ms) {
            self.sprite = self.frames.step(Clip::FishSwim);
        }
    }
}

impl Drawable for DriftingFish {
    fn body(&self) -> &Body {
        &self.motion.body
    }

    fn sprite(&self) -> Sprite {
        self.sprite
    }
}
