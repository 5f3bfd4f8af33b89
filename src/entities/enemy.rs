//! Closed set of enemy variants with per-variant contact and projectile
//! handlers.

use rand::Rng;

use crate::anim::Sprite;
use crate::config::GameConfig;
use crate::entities::{Boss, BossHit, BossState, DriftingFish, JellyFish, PufferFish, Status};
use crate::geometry::Body;
use crate::render::Drawable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Fish,
    Puffer,
    Jelly,
    Boss,
}

/// Effect of touching the character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    pub damage: i32,
    pub status: Option<Status>,
}

/// Effect of a bubble landing on an enemy. The bubble is consumed in every
/// case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileHit {
    /// Nothing happened to the enemy.
    Popped,
    /// The enemy started its death sequence.
    Killed,
    Boss(BossHit),
}

#[derive(Clone, Debug)]
pub enum Enemy {
    Fish(DriftingFish),
    Puffer(PufferFish),
    Jelly(JellyFish),
    Boss(Boss),
}

impl Enemy {
    pub fn kind(&self) -> EnemyKind {
        match self {
            Enemy::Fish(_) => EnemyKind::Fish,
            Enemy::Puffer(_) => EnemyKind::Puffer,
            Enemy::Jelly(_) => EnemyKind::Jelly,
            Enemy::Boss(_) => EnemyKind::Boss,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Enemy::Fish(f) => &f.motion.body,
            Enemy::Puffer(p) => &p.motion.body,
            Enemy::Jelly(j) => &j.motion.body,
            Enemy::Boss(b) => &b.motion.body,
        }
    }

    pub fn is_dead(&self) -> bool {
        match self {
            Enemy::Fish(_) => false,
            Enemy::Puffer(p) => p.is_dead(),
            Enemy::Jelly(j) => j.is_dead(),
            Enemy::Boss(b) => b.state() == BossState::Dead,
        }
    }

    pub fn is_pending_removal(&self) -> bool {
        match self {
            Enemy::Fish(_) => false,
            Enemy::Puffer(p) => p.is_pending_removal(),
            Enemy::Jelly(j) => j.is_pending_removal(),
            Enemy::Boss(b) => b.is_pending_removal(),
        }
    }

    /// Living, on stage and with sane geometry.
    pub fn is_collidable(&self) -> bool {
        if self.is_dead() || self.is_pending_removal() || !self.body().is_valid() {
            return false;
        }
        match self {
            Enemy::Boss(b) => b.is_active(),
            _ => true,
        }
    }

    pub fn as_boss(&self) -> Option<&Boss> {
        match self {
            Enemy::Boss(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_boss_mut(&mut self) -> Option<&mut Boss> {
        match self {
            Enemy::Boss(b) => Some(b),
            _ => None,
        }
    }

    /// Physics sub-tick. The boss is driven from the render loop instead.
    pub fn update(&mut self, dt_ms: f64, rng: &mut impl Rng) {
        match self {
            Enemy::Fish(f) => f.update(dt_ms),
            Enemy::Puffer(p) => p.update(dt_ms, rng),
            Enemy::Jelly(j) => j.update(dt_ms),
            Enemy::Boss(_) => {}
        }
    }

    /// What touching this enemy does to the character, if anything.
    pub fn contact(&self, config: &GameConfig) -> Option<Contact> {
        if !self.is_collidable() {
            return None;
        }
        let plain = config.contact_damage;
        match self {
            Enemy::Fish(_) => Some(Contact { damage: plain, status: None }),
            Enemy::Puffer(p) => {
                let status = p.is_toxic().then_some(Status::Poisoned);
                Some(Contact { damage: plain, status })
            }
            Enemy::Jelly(j) => {
                let status = if j.is_dangerous() { Status::Electrocuted } else { Status::Poisoned };
                Some(Contact { damage: plain, status: Some(status) })
            }
            Enemy::Boss(b) => (b.state() == BossState::Attack)
                .then_some(Contact { damage: config.boss_contact_damage, status: None }),
        }
    }

    /// Apply a bubble hit. Only poison bubbles hurt the boss; dangerous
    /// jellyfish shrug off every bubble.
    pub fn on_projectile(&mut self, poison: bool) -> ProjectileHit {
        match self {
            Enemy::Fish(_) => ProjectileHit::Popped,
            Enemy::Puffer(p) => {
                if p.die() {
                    ProjectileHit::Killed
                } else {
                    ProjectileHit::Popped
                }
            }
            Enemy::Jelly(j) => {
                if !j.is_dangerous() && j.die() {
                    ProjectileHit::Killed
                } else {
                    ProjectileHit::Popped
                }
            }
            Enemy::Boss(b) => {
                if poison {
                    ProjectileHit::Boss(b.take_hit())
                } else {
                    ProjectileHit::Boss(BossHit::Ignored)
                }
            }
        }
    }

    fn drawable(&self) -> &dyn Drawable {
        match self {
            Enemy::Fish(f) => f,
            Enemy::Puffer(p) => p,
            Enemy::Jelly(j) => j,
            Enemy::Boss(b) => b,
        }
    }
}

impl Drawable for Enemy {
    fn body(&self) -> &Body {
        Enemy::body(self)
    }

    fn sprite(&self) -> Sprite {
        self.drawable().sprite()
    }

    fn mirrored(&self) -> bool {
        self.drawable().mirrored()
    }

    fn is_visible(&self) -> bool {
        self.drawable().is_visible()
    }
}

impl From<DriftingFish> for Enemy {
    fn from(f: DriftingFish) -> Self {
        Enemy::Fish(f)
    }
}

impl From<PufferFish> for Enemy {
    fn from(p: PufferFish) -> Self {
        Enemy::Puffer(p)
    }
}

impl From<JellyFish> for Enemy {
    fn from(j: JellyFish) -> Self {
        Enemy::Jelly(j)
    }
}

impl From<Boss> for Enemy {
    fn from(b: Boss) -> Self {
        Enemy::Boss(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn normal_bubble_leaves_boss_untouched() {
        let mut boss = Boss::new(5);
        boss.start_intro();
        let mut enemy = Enemy::from(boss);
        assert_eq!(enemy.on_projectile(false), ProjectileHit::Boss(BossHit::Ignored));
        let b = enemy.as_boss().map(|b| (b.hits_remaining(), b.state()));
        assert_eq!(b, Some((5, BossState::Intro)));
    }

    #[test]
    fn corpses_are_harmless() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = GameConfig::default();
        let mut puffer = Enemy::from(PufferFish::new(0.0, 0.0, crate::anim::PufferColor::Red, &mut rng));
        assert!(puffer.contact(&config).is_some());
        assert_eq!(puffer.on_projectile(false), ProjectileHit::Killed);
        assert_eq!(puffer.contact(&config), None);
        assert_eq!(puffer.on_projectile(true), ProjectileHit::Popped);
    }
}
