//! Recording collaborators for driving a [`World`](crate::world::World) in
//! tests. Each double keeps a shared log so the test can inspect it after
//! handing the double itself to the world.

use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::{AudioSink, SoundCue};
use crate::error::{GameError, Result};
use crate::render::{DrawCommand, RenderSurface};
use crate::world::{GameEndListener, GameResult};

#[derive(Clone, Default)]
pub struct RecordingAudio {
    pub cues: Rc<RefCell<Vec<SoundCue>>>,
    /// Report every call as failed after recording it.
    pub failing: bool,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        RecordingAudio { failing: true, ..Self::default() }
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.borrow().iter().filter(|c| **c == cue).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) -> Result<()> {
        self.cues.borrow_mut().push(cue);
        if self.failing {
            return Err(GameError::Audio(format!("{cue:?} unavailable")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingEnd {
    pub results: Rc<RefCell<Vec<GameResult>>>,
}

impl RecordingEnd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<GameResult> {
        self.results.borrow().clone()
    }
}

impl GameEndListener for RecordingEnd {
    fn notify_game_end(&mut self, result: GameResult) {
        self.results.borrow_mut().push(result);
    }
}

/// Keeps the commands of the most recent frame.
#[derive(Default)]
pub struct RecordingSurface {
    pub frames: usize,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw(&mut self, cmd: &DrawCommand) {
        self.commands.push(*cmd);
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}
