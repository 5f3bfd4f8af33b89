//! Render surface interface and per-frame command builder.
//!
//! The core knows nothing about a graphics API. Each frame it emits an
//! ordered list of draw commands in screen space; the camera translation is
//! already applied. Rendering reads simulation state and never mutates it.

use crate::anim::Sprite;
use crate::geometry::Body;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub sprite: Sprite,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Mirror horizontally within the destination rectangle.
    pub h_flip: bool,
}

pub trait RenderSurface {
    /// Start a new frame.
    fn clear(&mut self);

    fn draw(&mut self, cmd: &DrawCommand);

    /// Frame complete.
    fn present(&mut self) {}
}

/// Anything the world can place on screen.
pub trait Drawable {
    fn body(&self) -> &Body;

    fn sprite(&self) -> Sprite;

    /// Draw mirrored around the body's width.
    fn mirrored(&self) -> bool {
        false
    }

    fn is_visible(&self) -> bool {
        true
    }
}

/// Transform state for one frame: a horizontal translation plus a
/// save/restore stack, mirroring a canvas context.
pub struct Frame<'a> {
    surface: &'a mut dyn RenderSurface,
    offset_x: f64,
    flipped: bool,
    saved: Vec<(f64, bool)>,
}

impl<'a> Frame<'a> {
    pub fn begin(surface: &'a mut dyn RenderSurface) -> Self {
        surface.clear();
        Frame { surface, offset_x: 0.0, flipped: false, saved: Vec::new() }
    }

    pub fn translate(&mut self, dx: f64) {
        self.offset_x += dx;
    }

    pub fn save(&mut self) {
        self.saved.push((self.offset_x, self.flipped));
    }

    pub fn restore(&mut self) {
        if let Some((offset_x, flipped)) = self.saved.pop() {
            self.offset_x = offset_x;
            self.flipped = flipped;
        }
    }

    pub fn draw_sprite(&mut self, sprite: Sprite, body: &Body) {
        let cmd = DrawCommand {
            sprite,
            x: body.x + self.offset_x,
            y: body.y,
            width: body.width,
            height: body.height,
            h_flip: self.flipped,
        };
        self.surface.draw(&cmd);
    }

    /// Draw one entity, flipping it around its own width when mirrored.
    pub fn draw(&mut self, item: &dyn Drawable) {
        if !item.is_visible() {
            return;
        }
        let body = item.body();
        if !body.is_valid() {
            return;
        }
        if item.mirrored() {
            self.save();
            self.flipped = !self.flipped;
            self.draw_sprite(item.sprite(), body);
            self.restore();
        } else {
            self.draw_sprite(item.sprite(), body);
        }
    }

    pub fn draw_all<'i, T: Drawable + 'i>(&mut self, items: impl IntoIterator<Item = &'i T>) {
        for item in items {
            self.draw(item);
        }
    }

    pub fn finish(self) {
        self.surface.present();
    }
}
