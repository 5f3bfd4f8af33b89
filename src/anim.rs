//! Sprite clips and frame state.
//!
//! Asset loading lives outside the core, so a sprite is identified by its clip
//! and frame index. The host maps those onto real images.

// ── Clip catalogue ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PufferColor {
    Red,
    Green,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackgroundLayer {
    Water,
    FarFloor,
    NearFloor,
    Floor,
    Light,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarKind {
    Health,
    Coins,
    Poison,
}

/// An animation clip: an ordered list of frames owned by the host's sprite
/// cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Clip {
    CharacterIdle,
    CharacterSwim,
    CharacterSleep,
    CharacterDead,
    CharacterPoisoned,
    CharacterShock,
    CharacterBubbleAttack,
    CharacterPoisonAttack,

    FishSwim,

    PufferSwim(PufferColor),
    PufferTransition(PufferColor),
    PufferInflated(PufferColor),
    PufferDead(PufferColor),

    JellySwim,
    JellyDangerous,
    JellyDeadLila,
    JellyDeadGreen,

    BossFloat,
    BossIntro,
    BossAttack,
    BossHurt,
    BossDead,

    Bubble,
    PoisonBubble,

    Coin,
    PoisonLeft,
    PoisonRight,

    /// `variant` alternates 0/1 between neighbouring tiles.
    Background(BackgroundLayer, u8),
    Barrier,

    StatusBar(BarKind),
}

impl Clip {
    pub fn frame_count(self) -> usize {
        match self {
            Clip::CharacterIdle => 18,
            Clip::CharacterSwim => 6,
            Clip::CharacterSleep => 14,
            Clip::CharacterDead => 12,
            Clip::CharacterPoisoned => 5,
            Clip::CharacterShock => 3,
            Clip::CharacterBubbleAttack | Clip::CharacterPoisonAttack => 8,
            Clip::FishSwim => 5,
            Clip::PufferSwim(_) | Clip::PufferTransition(_) | Clip::PufferInflated(_) => 5,
            Clip::PufferDead(_) => 3,
            Clip::JellySwim | Clip::JellyDangerous | Clip::JellyDeadLila | Clip::JellyDeadGreen => 4,
            Clip::BossFloat => 13,
            Clip::BossIntro => 10,
            Clip::BossAttack => 6,
            Clip::BossHurt => 4,
            Clip::BossDead => 6,
            Clip::Coin => 4,
            Clip::StatusBar(_) => 6,
            Clip::Bubble
            | Clip::PoisonBubble
            | Clip::PoisonLeft
            | Clip::PoisonRight
            | Clip::Background(..)
            | Clip::Barrier => 1,
        }
    }
}

/// Image handle handed to the render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sprite {
    pub clip: Clip,
    pub frame: usize,
}

impl Sprite {
    pub const fn new(clip: Clip) -> Self {
        Sprite { clip, frame: 0 }
    }

    pub const fn at(clip: Clip, frame: usize) -> Self {
        Sprite { clip, frame }
    }
}

// ── Players ──────────────────────────────────────────────────────────────────

/// Step-driven looping: each `step` shows the next frame of whichever clip is
/// requested. The counter is shared between clips, so switching clips does
/// not restart at frame 0.
#[derive(Clone, Debug)]
pub struct FrameCounter {
    counter: usize,
}

impl FrameCounter {
    pub fn new() -> Self {
        FrameCounter { counter: 0 }
    }

    pub fn step(&mut self, clip: Clip) -> Sprite {
        let frame = self.counter % clip.frame_count().max(1);
        self.counter = self.counter.wrapping_add(1);
        Sprite::at(clip, frame)
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Time-driven loop restarting at frame 0 when created.
#[derive(Clone, Debug)]
pub struct Cycle {
    clip: Clip,
    frame_ms: f64,
    elapsed: f64,
}

impl Cycle {
    pub fn new(clip: Clip, frame_ms: f64) -> Self {
        Cycle { clip, frame_ms, elapsed: 0.0 }
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.elapsed += dt_ms;
    }

    pub fn sprite(&self) -> Sprite {
        let len = self.clip.frame_count().max(1);
        let frame = (self.elapsed / self.frame_ms) as usize % len;
        Sprite::at(self.clip, frame)
    }
}

/// Time-driven single playthrough. Holds the last frame once finished.
#[derive(Clone, Debug)]
pub struct OneShot {
    clip: Clip,
    frame_ms: f64,
    elapsed: f64,
}

impl OneShot {
    pub fn new(clip: Clip, frame_ms: f64) -> Self {
        OneShot { clip, frame_ms, elapsed: 0.0 }
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.elapsed += dt_ms;
    }

    pub fn duration_ms(&self) -> f64 {
        self.frame_ms * self.clip.frame_count() as f64
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration_ms()
    }

    /// Time carried past the end of the clip.
    pub fn overshoot_ms(&self) -> f64 {
        (self.elapsed - self.duration_ms()).max(0.0)
    }

    pub fn sprite(&self) -> Sprite {
        let last = self.clip.frame_count().saturating_sub(1);
        let frame = ((self.elapsed / self.frame_ms) as usize).min(last);
        Sprite::at(self.clip, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_wraps_per_clip_length() {
        let mut c = FrameCounter::new();
        let frames: Vec<usize> = (0..4).map(|_| c.step(Clip::CharacterShock).frame).collect();
        assert_eq!(frames, vec![0, 1, 2, 0]);
    }

    #[test]
    fn one_shot_holds_last_frame() {
        let mut once = OneShot::new(Clip::BossHurt, 180.0);
        once.advance(10_000.0);
        assert!(once.is_finished());
        assert_eq!(once.sprite().frame, 3);
    }
}
