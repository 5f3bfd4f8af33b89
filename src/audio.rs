//! Audio sink capability.
//!
//! The world is handed an optional sink at construction and forwards cues to
//! it. Every call is fire-and-forget: errors are logged and dropped.

use log::debug;

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Hurt,
    Coin,
    Poison,
    Bgm,
    StopBgm,
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue) -> Result<()>;
}

/// Owned, optional audio capability.
pub struct Audio {
    sink: Option<Box<dyn AudioSink>>,
}

impl Audio {
    pub fn new(sink: Option<Box<dyn AudioSink>>) -> Self {
        Audio { sink }
    }

    pub fn silent() -> Self {
        Audio { sink: None }
    }

    pub fn play(&mut self, cue: SoundCue) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Err(e) = sink.play(cue) {
            debug!("dropped {cue:?}: {e}");
        }
    }

    pub fn play_hurt(&mut self) {
        self.play(SoundCue::Hurt);
    }

    pub fn play_coin(&mut self) {
        self.play(SoundCue::Coin);
    }

    pub fn play_poison(&mut self) {
        self.play(SoundCue::Poison);
    }

    pub fn play_bgm(&mut self) {
        self.play(SoundCue::Bgm);
    }

    pub fn stop_bgm(&mut self) {
        self.play(SoundCue::StopBgm);
    }
}
