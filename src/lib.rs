//! Flappy Can - a frame-driven arcade mini-game
//!
//! Core modules:
//! - `sim`: Simulation (physics, obstacle generation, collisions, session state)
//! - `game_loop`: Frame scheduling and session lifecycle
//! - `audio`: Fire-and-forget sound cues
//! - `renderer`: Frame snapshots and drawable primitives
//! - `platform`: Host schedulers (manual stepping, browser animation frames)
//! - `settings`: Persisted user preferences

pub mod audio;
pub mod autopilot;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game_loop::{FrameHandle, FrameScheduler, FrameTicket, GameLoop};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical units)
    pub const PLAYFIELD_WIDTH: f32 = 320.0;
    pub const PLAYFIELD_HEIGHT: f32 = 480.0;

    /// Downward acceleration added to the body's velocity every tick
    pub const GRAVITY: f32 = 0.6;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -10.0;

    /// Body geometry - square, pinned horizontally
    pub const BODY_SIZE: f32 = 30.0;
    pub const BODY_X: f32 = 50.0;
    /// Body state at the start of every session
    pub const BODY_START_Y: f32 = 200.0;

    /// Obstacle geometry and motion
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const GAP_SIZE: f32 = 150.0;
    /// Minimum height of either segment
    pub const MIN_CLEARANCE: f32 = 50.0;
    /// Leftward movement per tick
    pub const OBSTACLE_SPEED: f32 = 3.0;
    /// Ticks between spawns (tick 0 always spawns)
    pub const SPAWN_INTERVAL: u64 = 100;

    /// Score that ends the session as a win
    pub const WIN_SCORE: u32 = 10;
}
