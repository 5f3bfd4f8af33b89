//! The end boss and its state machine.
//!
//! ```text
//! Hidden ─▶ Intro ─▶ Swim ─▶ Chase ⇄ Attack
//!                      ▲               │
//!                      └───────────────┘ (out of range)
//! Chase/Attack ─(hit)─▶ Hurt ─▶ Chase
//! any ─(last hit)─▶ Dead
//! ```
//!
//! Movement is updated from the render loop with the frame's elapsed time,
//! so step sizes are scaled against the reference sub-tick.

use log::debug;

use crate::anim::{Clip, Cycle, OneShot, Sprite};
use crate::entities::{Movable, REFERENCE_STEP_MS};
use crate::geometry::{collides, Body, Inset};
use crate::render::Drawable;

const INTRO_FRAME_MS: f64 = 190.0;
const SWIM_FRAME_MS: f64 = 130.0;
const ATTACK_FRAME_MS: f64 = 120.0;
const HURT_FRAME_MS: f64 = 180.0;
const DEAD_FRAME_MS: f64 = 200.0;

const ATTACK_RANGE_PX: f64 = 220.0;
const CHASE_SPEED: f64 = 1.4;
const ATTACK_SPEED: f64 = 2.1;
/// Share of the remaining vertical distance closed per reference sub-tick.
const VERTICAL_EASING: f64 = 0.04;
const TOP_LIMIT_Y: f64 = -360.0;
const BOTTOM_LIMIT_Y: f64 = 270.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossState {
    Hidden,
    Intro,
    Swim,
    Chase,
    Attack,
    Hurt,
    Dead,
}

/// Outcome of a damaging hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossHit {
    Ignored,
    Hurt,
    Killed,
}

#[derive(Clone, Debug)]
enum Playback {
    Once(OneShot),
    Looping(Cycle),
    Still,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub motion: Movable,
    state: BossState,
    hits_remaining: i32,
    anim: Playback,
    /// The sprite art faces left; mirrored while the target is to the right.
    faces_right: bool,
    pending_removal: bool,
    defeat_reported: bool,
}

impl Boss {
    pub fn new(hits: i32) -> Self {
        Self::at(4650.0, -160.0, hits)
    }

    pub fn at(x: f64, y: f64, hits: i32) -> Self {
        let body = Body::new(x, y, 450.0, 600.0).with_inset(Inset::new(280.0, 10.0, 30.0, 100.0));
        Boss {
            motion: Movable::new(body),
            state: BossState::Hidden,
            hits_remaining: hits,
            anim: Playback::Still,
            faces_right: false,
            pending_removal: false,
            defeat_reported: false,
        }
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    pub fn hits_remaining(&self) -> i32 {
        self.hits_remaining
    }

    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }

    /// Hidden bosses neither draw nor collide.
    pub fn is_active(&self) -> bool {
        self.state != BossState::Hidden && !self.pending_removal
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// Leave `Hidden`. Returns `false` if the intro already ran.
    pub fn start_intro(&mut self) -> bool {
        if self.state != BossState::Hidden {
            return false;
        }
        self.state = BossState::Intro;
        self.anim = Playback::Once(OneShot::new(Clip::BossIntro, INTRO_FRAME_MS));
        true
    }

    fn start_swim(&mut self) {
        self.state = BossState::Swim;
        self.anim = Playback::Once(OneShot::new(Clip::BossFloat, SWIM_FRAME_MS));
    }

    fn start_chase(&mut self) {
        self.state = BossState::Chase;
        self.anim = Playback::Looping(Cycle::new(Clip::BossFloat, SWIM_FRAME_MS));
    }

    fn start_attack(&mut self) {
        self.state = BossState::Attack;
        self.anim = Playback::Looping(Cycle::new(Clip::BossAttack, ATTACK_FRAME_MS));
    }

    /// Register a damaging hit. Dead and hidden bosses ignore hits.
    pub fn take_hit(&mut self) -> BossHit {
        if matches!(self.state, BossState::Dead | BossState::Hidden) {
            return BossHit::Ignored;
        }
        self.hits_remaining = (self.hits_remaining - 1).max(0);
        debug!("boss hit, {} remaining", self.hits_remaining);
        if self.hits_remaining == 0 {
            self.state = BossState::Dead;
            self.anim = Playback::Once(OneShot::new(Clip::BossDead, DEAD_FRAME_MS));
            BossHit::Killed
        } else {
            self.state = BossState::Hurt;
            self.anim = Playback::Once(OneShot::new(Clip::BossHurt, HURT_FRAME_MS));
            BossHit::Hurt
        }
    }

    /// `true` exactly once, after the death clip has finished.
    pub fn take_defeat(&mut self) -> bool {
        if self.pending_removal && !self.defeat_reported {
            self.defeat_reported = true;
            return true;
        }
        false
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    pub fn update(&mut self, dt_ms: f64, target: &Body) {
        if self.state == BossState::Hidden || self.pending_removal {
            return;
        }

        let finished = match &mut self.anim {
            Playback::Once(once) => {
                once.advance(dt_ms);
                once.is_finished()
            }
            Playback::Looping(cycle) => {
                cycle.advance(dt_ms);
                false
            }
            Playback::Still => false,
        };

        match self.state {
            BossState::Intro if finished => self.start_swim(),
            BossState::Hurt if finished => self.start_chase(),
            BossState::Dead if finished => self.pending_removal = true,
            BossState::Intro | BossState::Hurt | BossState::Dead | BossState::Hidden => {}
            BossState::Swim | BossState::Chase | BossState::Attack => {
                if finished && self.state == BossState::Swim {
                    self.start_chase();
                }
                self.pursue(dt_ms, target);
            }
        }
    }

    fn pursue(&mut self, dt_ms: f64, target: &Body) {
        let body = self.motion.body;
        self.faces_right = body.x < target.x;

        let dx = target.x - body.x;
        let dy = target.y - body.y;
        let mut dist = dx.hypot(dy);
        if dist == 0.0 {
            dist = 1.0;
        }
        let touching = collides(&body, target);

        if touching || dist < ATTACK_RANGE_PX {
            if self.state != BossState::Attack {
                self.start_attack();
            }
        } else if self.state == BossState::Attack {
            self.start_swim();
        }

        let steps = dt_ms / REFERENCE_STEP_MS;
        let speed = if self.state == BossState::Attack { ATTACK_SPEED } else { CHASE_SPEED };
        let b = &mut self.motion.body;
        b.x += dx / dist * speed * steps;

        let target_y = target.y + (target.height - b.height) * 0.5;
        let easing = 1.0 - (1.0 - VERTICAL_EASING).powf(steps);
        b.y += (target_y - b.y) * easing;
        b.y = b.y.clamp(TOP_LIMIT_Y, BOTTOM_LIMIT_Y);
    }
}

impl Drawable for Boss {
    fn body(&self) -> &Body {
        &self.motion.body
    }

    fn sprite(&self) -> Sprite {
        match &self.anim {
            Playback::Once(once) => once.sprite(),
            Playback::Looping(cycle) => cycle.sprite(),
            Playback::Still => Sprite::new(Clip::BossFloat),
        }
    }

    fn mirrored(&self) -> bool {
        self.faces_right
    }

    fn is_visible(&self) -> bool {
        self.state != BossState::Hidden
    }
}
