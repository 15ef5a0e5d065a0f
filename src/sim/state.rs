//! Session state and core simulation types

use serde::{Deserialize, Serialize};

use super::physics;
use super::rect::Rect;
use crate::consts::*;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Nothing started yet
    #[default]
    Idle,
    /// Ticks are running and jumps are accepted
    Playing,
    /// Body left the playfield or hit an obstacle
    GameOver,
    /// Score reached `WIN_SCORE`
    Won,
}

impl SessionState {
    /// Terminal states wait for a restart
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionState::GameOver | SessionState::Won)
    }
}

/// Why a session was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Top edge went above the playfield
    Ceiling,
    /// Bottom edge went below the playfield
    Floor,
    /// Hit the upper segment of an obstacle
    TopSegment { id: u32 },
    /// Hit the lower segment of an obstacle
    BottomSegment { id: u32 },
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, gap_top: f32 },
    Retired { id: u32 },
    Scored { id: u32, score: u32 },
    Lost { cause: LossCause },
    Won { score: u32 },
}

/// Logical size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Inclusive range of legal `gap_top` values
    pub fn gap_top_range(&self) -> (u32, u32) {
        let min = MIN_CLEARANCE as u32;
        let max = (self.height - GAP_SIZE - MIN_CLEARANCE).max(MIN_CLEARANCE) as u32;
        (min, max)
    }
}

/// The player-controlled body. Only moves vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top edge (y grows downward)
    pub y: f32,
    /// Vertical velocity per tick
    pub vel_y: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            y: BODY_START_Y,
            vel_y: 0.0,
        }
    }
}

impl Body {
    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + BODY_SIZE
    }

    /// Bounding box at the fixed horizontal position
    pub fn rect(&self) -> Rect {
        Rect::new(BODY_X, self.y, BODY_SIZE, BODY_SIZE)
    }
}

/// A top/bottom barrier pair with a gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Height of the top segment; the bottom segment starts at `gap_top + GAP_SIZE`
    pub gap_top: f32,
    /// Set once the body has fully cleared this obstacle
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, gap_top: f32) -> Self {
        Self {
            id,
            x,
            gap_top,
            passed: false,
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    /// Top of the bottom segment
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + GAP_SIZE
    }

    /// Full-height column occupied by this obstacle
    pub fn column(&self, playfield: &Playfield) -> Rect {
        Rect::new(self.x, 0.0, OBSTACLE_WIDTH, playfield.height)
    }

    pub fn top_segment(&self) -> Rect {
        Rect::new(self.x, 0.0, OBSTACLE_WIDTH, self.gap_top)
    }

    pub fn bottom_segment(&self, playfield: &Playfield) -> Rect {
        let top = self.gap_bottom();
        Rect::new(self.x, top, OBSTACLE_WIDTH, (playfield.height - top).max(0.0))
    }

    /// Off-screen to the left
    pub fn is_retired(&self) -> bool {
        self.x <= -OBSTACLE_WIDTH
    }
}

/// One play attempt. Replaced wholesale on restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub state: SessionState,
    pub score: u32,
    /// Ticks completed in this session
    pub tick_count: u64,
    pub body: Body,
    /// Live obstacles in spawn order (which is also left-to-right order)
    pub obstacles: Vec<Obstacle>,
    pub playfield: Playfield,
    /// Obstacles cleared this session, including ones already retired
    pub(super) cleared: u32,
    /// Next obstacle ID
    next_id: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::idle(Playfield::default())
    }
}

impl Session {
    /// A session that has not been started
    pub fn idle(playfield: Playfield) -> Self {
        Self {
            state: SessionState::Idle,
            score: 0,
            tick_count: 0,
            body: Body::default(),
            obstacles: Vec::new(),
            playfield,
            cleared: 0,
            next_id: 1,
        }
    }

    /// A fresh session already in `Playing`
    pub fn begin(playfield: Playfield) -> Self {
        let mut session = Self::idle(playfield);
        session.state = SessionState::Playing;
        session
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply a jump impulse. Ignored unless playing.
    pub fn request_jump(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        physics::jump(&mut self.body);
        true
    }

    /// Playing -> GameOver
    pub fn lose(&mut self, cause: LossCause) -> bool {
        if !self.is_playing() {
            return false;
        }
        log::info!("Session lost ({:?}) with score {}", cause, self.score);
        self.state = SessionState::GameOver;
        true
    }

    /// Playing -> Won
    pub fn win(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        log::info!("Session won with score {}", self.score);
        self.state = SessionState::Won;
        true
    }

    /// Obstacles the body has cleared, whether still on screen or not
    pub fn passed_count(&self) -> usize {
        self.cleared as usize
    }
}
