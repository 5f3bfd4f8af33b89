//! Simulation core for a side-scrolling underwater action game.
//!
//! The library owns entities, timing and gameplay rules; hosts supply input,
//! audio, a render surface and an end-of-game listener.

pub mod anim;
pub mod audio;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod level;
pub mod render;
pub mod schedule;
pub mod testing;
pub mod world;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use world::{GameEndListener, GameResult, World};
