//! Level container and the reference level.

use rand::Rng;

use crate::anim::{BackgroundLayer, Clip, PufferColor, Sprite};
use crate::config::GameConfig;
use crate::entities::{Boss, Collectable, Enemy, EnemyKind, JellyFish, PufferFish};
use crate::error::{GameError, Result};
use crate::geometry::Body;
use crate::render::Drawable;

pub const BACKGROUND_TILE_PX: f64 = 880.0;

/// Movement limits for the character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub end_x: f64,
    pub top_y: f64,
    pub bottom_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds { end_x: 4300.0, top_y: -130.0, bottom_y: 270.0 }
    }
}

/// One parallax tile. Drawn only.
#[derive(Clone, Copy, Debug)]
pub struct Background {
    pub body: Body,
    pub layer: BackgroundLayer,
    pub variant: u8,
}

impl Background {
    pub fn new(layer: BackgroundLayer, variant: u8, x: f64) -> Self {
        Background { body: Body::new(x, 0.0, BACKGROUND_TILE_PX, 520.0), layer, variant }
    }
}

impl Drawable for Background {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        Sprite::new(Clip::Background(self.layer, self.variant))
    }
}

/// Static foreground rock. Drawn only; it does not collide.
#[derive(Clone, Copy, Debug)]
pub struct Barrier {
    pub body: Body,
}

impl Default for Barrier {
    fn default() -> Self {
        Barrier { body: Body::new(1000.0, 0.0, 780.0, 520.0) }
    }
}

impl Drawable for Barrier {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        Sprite::new(Clip::Barrier)
    }
}

#[derive(Clone, Debug)]
pub struct Level {
    pub enemies: Vec<Enemy>,
    pub backgrounds: Vec<Background>,
    pub collectables: Vec<Collectable>,
    pub barrier: Option<Barrier>,
    pub bounds: Bounds,
}

impl Level {
    pub fn new(enemies: Vec<Enemy>, backgrounds: Vec<Background>, collectables: Vec<Collectable>) -> Self {
        Level { enemies, backgrounds, collectables, barrier: None, bounds: Bounds::default() }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_barrier(mut self, barrier: Barrier) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let bosses = self.enemies.iter().filter(|e| e.kind() == EnemyKind::Boss).count();
        if bosses > 1 {
            return Err(GameError::InvalidLevel(format!("{bosses} bosses, at most one allowed")));
        }
        let b = &self.bounds;
        if !(b.top_y < b.bottom_y) {
            return Err(GameError::InvalidLevel("top bound must lie above bottom bound".into()));
        }
        if !(b.end_x > 0.0) {
            return Err(GameError::InvalidLevel("level end must be positive".into()));
        }
        Ok(())
    }
}

/// Five layers per tile, alternating variants, from one tile left of the
/// origin through `tiles` tiles to the right.
pub fn background_tiles(tiles: i32) -> Vec<Background> {
    const LAYERS: [BackgroundLayer; 5] = [
        BackgroundLayer::Water,
        BackgroundLayer::FarFloor,
        BackgroundLayer::NearFloor,
        BackgroundLayer::Floor,
        BackgroundLayer::Light,
    ];
    (-1..=tiles)
        .flat_map(|i| {
            let variant = if i.rem_euclid(2) == 0 { 1 } else { 2 };
            let x = f64::from(i) * BACKGROUND_TILE_PX;
            LAYERS.into_iter().map(move |layer| Background::new(layer, variant, x))
        })
        .collect()
}

/// The reference level: eight puffer fish, five jellyfish and the boss.
pub fn level_one(config: &GameConfig, rng: &mut impl Rng) -> Level {
    use PufferColor::{Green, Red};

    let mut enemies: Vec<Enemy> = vec![
        PufferFish::random(Red, rng).into(),
        PufferFish::random(Green, rng).into(),
    ];
    for (x, y, color) in [
        (550.0, 150.0, Red),
        (2150.0, 250.0, Green),
        (1750.0, 200.0, Red),
        (2850.0, 100.0, Red),
        (2850.0, 200.0, Green),
        (2850.0, 300.0, Red),
    ] {
        enemies.push(PufferFish::new(x, y, color, rng).into());
    }
    for x in [850.0, 2100.0, 2900.0, 3400.0, 3900.0] {
        enemies.push(JellyFish::new(x, 200.0, rng).into());
    }
    enemies.push(Boss::new(config.boss_hits).into());

    let mut collectables: Vec<Collectable> = [
        (600.0, 200.0),
        (675.0, 170.0),
        (750.0, 150.0),
        (825.0, 170.0),
        (900.0, 200.0),
        (2350.0, 310.0),
        (2425.0, 20.0),
        (2500.0, 20.0),
        (2575.0, 20.0),
        (2650.0, 310.0),
    ]
    .into_iter()
    .map(|(x, y)| Collectable::coin(x, y))
    .collect();
    collectables.extend([
        Collectable::poison_left(225.0, 390.0),
        Collectable::poison_left(730.0, 400.0),
        Collectable::poison_right(1930.0, 390.0),
        Collectable::poison_left(2530.0, 390.0),
        Collectable::poison_right(2900.0, 390.0),
        Collectable::poison_right(3750.0, 390.0),
    ]);

    Level::new(enemies, background_tiles(5), collectables)
        .with_bounds(Bounds::default())
        .with_barrier(Barrier::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn reference_level_is_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        let level = level_one(&GameConfig::default(), &mut rng);
        assert!(level.validate().is_ok());
        assert_eq!(level.enemies.len(), 14);
        assert_eq!(level.collectables.len(), 16);
        assert_eq!(level.backgrounds.len(), 35);
    }

    #[test]
    fn two_bosses_rejected() {
        let level = Level::new(vec![Boss::new(5).into(), Boss::new(5).into()], vec![], vec![]);
        assert!(matches!(level.validate(), Err(GameError::InvalidLevel(_))));
    }
}
