//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of host concerns:
//! - One fixed step per tick, no wall-clock time
//! - Randomness only through an injected `GapSource`
//! - Stable iteration order (obstacles kept in spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod physics;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Verdict, boundary_breach, evaluate, obstacle_hit};
pub use rect::Rect;
pub use spawner::{GapSource, ScriptedGaps, SeededGaps};
pub use state::{Body, GameEvent, LossCause, Obstacle, Playfield, Session, SessionState};
pub use tick::tick;
