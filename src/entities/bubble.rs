//! Bubble projectiles.

use crate::anim::{Clip, Sprite};
use crate::entities::Movable;
use crate::geometry::{Body, Inset};
use crate::render::Drawable;

#[derive(Clone, Debug)]
pub struct Bubble {
    pub motion: Movable,
    pub poison: bool,
    age_ms: f64,
    pending_removal: bool,
}

impl Bubble {
    /// `speed` is in pixels per millisecond; the sign follows `left`.
    pub fn new(x: f64, y: f64, poison: bool, left: bool, speed: f64) -> Self {
        let velocity = if left { -speed } else { speed };
        let mut motion = Movable::new(Body::new(x, y, 50.0, 50.0).with_inset(Inset::uniform(8.0)))
            .with_velocity(velocity);
        motion.facing_left = left;
        Bubble { motion, poison, age_ms: 0.0, pending_removal: false }
    }

    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }

    pub fn age_ms(&self) -> f64 {
        self.age_ms
    }

    /// Travel; expire once older than `lifetime_ms`.
    pub fn update(&mut self, dt_ms: f64, lifetime_ms: f64) {
        if self.pending_removal {
            return;
        }
        self.motion.step(dt_ms);
        self.age_ms += dt_ms;
        if self.age_ms >= lifetime_ms {
            self.pending_removal = true;
        }
    }

    /// Stop and flag for the next sweep. Idempotent.
    pub fn destroy(&mut self) {
        self.motion.velocity_x = 0.0;
        self.pending_removal = true;
    }
}

impl Drawable for Bubble {
    fn body(&self) -> &Body {
        &self.motion.body
    }

    fn sprite(&self) -> Sprite {
        Sprite::new(if self.poison { Clip::PoisonBubble } else { Clip::Bubble })
    }

    fn mirrored(&self) -> bool {
        self.motion.facing_left
    }
}
