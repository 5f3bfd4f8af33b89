//! World-space rectangles and hitbox overlap.
//!
//! Every entity is an axis-aligned box with its own collision inset. The inset
//! shrinks the box before overlap testing, so hitboxes can be asymmetric: the
//! character ignores its idle fin animation via a large top inset, bubbles
//! carry a small uniform padding.

/// Per-side padding removed from a body before collision tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Inset {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Inset {
    pub const ZERO: Inset = Inset { top: 0.0, left: 0.0, right: 0.0, bottom: 0.0 };

    pub const fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Inset { top, left, right, bottom }
    }

    pub const fn uniform(px: f64) -> Self {
        Inset { top: px, left: px, right: px, bottom: px }
    }
}

/// Position and size of an entity in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub inset: Inset,
}

impl Body {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Body { x, y, width, height, inset: Inset::ZERO }
    }

    pub const fn with_inset(mut self, inset: Inset) -> Self {
        self.inset = inset;
        self
    }

    /// Finite coordinates and non-negative size. Bodies failing this are
    /// skipped by collision passes for the current tick.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    pub fn hit_left(&self) -> f64 {
        self.x + self.inset.left
    }

    pub fn hit_right(&self) -> f64 {
        self.x + self.width - self.inset.right
    }

    pub fn hit_top(&self) -> f64 {
        self.y + self.inset.top
    }

    pub fn hit_bottom(&self) -> f64 {
        self.y + self.height - self.inset.bottom
    }
}

/// Strict overlap of the two inset-shrunk rectangles. Touching edges do not
/// collide.
pub fn collides(a: &Body, b: &Body) -> bool {
    a.hit_right() > b.hit_left()
        && a.hit_left() < b.hit_right()
        && a.hit_bottom() > b.hit_top()
        && a.hit_top() < b.hit_bottom()
}
