//! Coins and poison bottles.

use crate::anim::{Clip, Cycle, Sprite};
use crate::geometry::Body;
use crate::render::Drawable;

const COIN_FRAME_MS: f64 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectableKind {
    Coin,
    Poison,
}

#[derive(Clone, Debug)]
pub struct Collectable {
    pub body: Body,
    pub kind: CollectableKind,
    anim: Cycle,
}

impl Collectable {
    /// Animated coin.
    pub fn coin(x: f64, y: f64) -> Self {
        Collectable {
            body: Body::new(x, y, 40.0, 40.0),
            kind: CollectableKind::Coin,
            anim: Cycle::new(Clip::Coin, COIN_FRAME_MS),
        }
    }

    pub fn poison_left(x: f64, y: f64) -> Self {
        Self::bottle(x, y, Clip::PoisonLeft)
    }

    pub fn poison_right(x: f64, y: f64) -> Self {
        Self::bottle(x, y, Clip::PoisonRight)
    }

    fn bottle(x: f64, y: f64, clip: Clip) -> Self {
        Collectable {
            body: Body::new(x, y, 70.0, 90.0),
            kind: CollectableKind::Poison,
            anim: Cycle::new(clip, COIN_FRAME_MS),
        }
    }

    pub fn update(&mut self, dt_ms: f64) {
        self.anim.advance(dt_ms);
    }
}

impl Drawable for Collectable {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        self.anim.sprite()
    }
}
