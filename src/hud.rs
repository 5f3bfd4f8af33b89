//! HUD status bars.
//!
//! Each bar holds a percentage and picks one of six pre-baked frames. The
//! three bars use slightly different threshold rules.

use crate::anim::{BarKind, Clip, Sprite};
use crate::geometry::Body;
use crate::render::Drawable;

#[derive(Clone, Debug)]
pub struct StatusBar {
    pub kind: BarKind,
    pub body: Body,
    percentage: f64,
}

impl StatusBar {
    pub fn health() -> Self {
        StatusBar { kind: BarKind::Health, body: Body::new(20.0, 40.0, 200.0, 60.0), percentage: 100.0 }
    }

    pub fn coins() -> Self {
        StatusBar { kind: BarKind::Coins, body: Body::new(20.0, 80.0, 200.0, 60.0), percentage: 0.0 }
    }

    pub fn poison() -> Self {
        StatusBar { kind: BarKind::Poison, body: Body::new(20.0, 0.0, 200.0, 60.0), percentage: 0.0 }
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn set_percentage(&mut self, percentage: f64) {
        self.percentage = percentage.clamp(0.0, 100.0);
    }

    pub fn frame_index(&self) -> usize {
        let p = self.percentage;
        match self.kind {
            BarKind::Health | BarKind::Coins => {
                if p >= 100.0 {
                    5
                } else if p > 80.0 {
                    4
                } else if p > 60.0 {
                    3
                } else if p > 40.0 {
                    2
                } else if p > 20.0 {
                    1
                } else {
                    0
                }
            }
            // Inclusive thresholds
            BarKind::Poison => {
                if p >= 100.0 {
                    5
                } else if p >= 80.0 {
                    4
                } else if p >= 60.0 {
                    3
                } else if p >= 40.0 {
                    2
                } else if p >= 20.0 {
                    1
                } else {
                    0
                }
            }
        }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::at(Clip::StatusBar(self.kind), self.frame_index())
    }
}

impl Drawable for StatusBar {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        StatusBar::sprite(self)
    }
}

/// Fill percentage for `count` out of `capacity`, clamped to 100.
pub fn fill_percentage(count: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    (count as f64 / capacity as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poison_thresholds_are_inclusive() {
        let mut bar = StatusBar::poison();
        bar.set_percentage(20.0);
        assert_eq!(bar.frame_index(), 1);
        let mut coins = StatusBar::coins();
        coins.set_percentage(20.0);
        assert_eq!(coins.frame_index(), 0);
    }
}
