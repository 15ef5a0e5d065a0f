//! Rendering surface contract
//!
//! The core never draws. Each tick it captures a `Frame` (everything a host
//! needs to paint one picture) and hands it to whatever `Canvas` is attached.

use serde::Serialize;

use crate::sim::{Rect, Session, SessionState};

/// Fill colors for game elements, RGBA in 0..=1
pub mod colors {
    pub const SKY: [f32; 4] = [0.49, 0.83, 0.99, 1.0];
    pub const BODY: [f32; 4] = [0.23, 0.51, 0.96, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.13, 0.77, 0.37, 1.0];
    pub const OVERLAY_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const OVERLAY_WIN: [f32; 4] = [0.92, 0.7, 0.03, 0.8];

    /// CSS `rgba()` form for 2D canvas hosts
    pub fn css(color: [f32; 4]) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8,
            color[3]
        )
    }
}

/// Text layer shown over the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Overlay {
    None,
    Start,
    GameOver { score: u32 },
    Won { score: u32 },
}

impl Overlay {
    pub fn for_session(session: &Session) -> Self {
        match session.state {
            SessionState::Idle => Overlay::Start,
            SessionState::Playing => Overlay::None,
            SessionState::GameOver => Overlay::GameOver {
                score: session.score,
            },
            SessionState::Won => Overlay::Won {
                score: session.score,
            },
        }
    }

    /// Headline and subline
    pub fn lines(&self) -> Option<(&'static str, String)> {
        match self {
            Overlay::None => None,
            Overlay::Start => Some(("Start Game", "Tap or click to jump. Reach 10 to win!".into())),
            Overlay::GameOver { score } => Some(("Game Over", format!("Score: {}", score))),
            Overlay::Won { score } => Some(("You won!", format!("Score: {}", score))),
        }
    }
}

/// Everything needed to draw one picture of the game
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub body: Rect,
    /// Top and bottom segment for each live obstacle, in obstacle order
    pub segments: Vec<Rect>,
    pub score: u32,
    pub tick: u64,
    pub state: SessionState,
    pub overlay: Overlay,
}

impl Frame {
    pub fn capture(session: &Session) -> Self {
        let playfield = &session.playfield;
        let mut segments = Vec::with_capacity(session.obstacles.len() * 2);
        for obstacle in &session.obstacles {
            segments.push(obstacle.top_segment());
            segments.push(obstacle.bottom_segment(playfield));
        }

        Self {
            width: playfield.width,
            height: playfield.height,
            body: session.body.rect(),
            segments,
            score: session.score,
            tick: session.tick_count,
            state: session.state,
            overlay: Overlay::for_session(session),
        }
    }

    /// Whole playfield
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// A host drawing surface
pub trait Canvas {
    fn draw(&mut self, frame: &Frame);
}

/// Keeps only the most recent frame
#[derive(Debug, Default)]
pub struct LastFrame {
    pub frame: Option<Frame>,
    pub frames_drawn: u64,
}

impl Canvas for LastFrame {
    fn draw(&mut self, frame: &Frame) {
        self.frame = Some(frame.clone());
        self.frames_drawn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, Playfield};

    #[test]
    fn test_capture_idle_session() {
        let session = Session::default();
        let frame = Frame::capture(&session);
        assert_eq!(frame.overlay, Overlay::Start);
        assert_eq!(frame.body, Rect::new(50.0, 200.0, 30.0, 30.0));
        assert!(frame.segments.is_empty());
        assert_eq!(frame.bounds(), Rect::new(0.0, 0.0, 320.0, 480.0));
    }

    #[test]
    fn test_capture_segments_follow_obstacles() {
        let mut session = Session::begin(Playfield::default());
        session.obstacles.push(Obstacle::new(1, 200.0, 60.0));
        session.obstacles.push(Obstacle::new(2, 300.0, 280.0));
        session.score = 3;

        let frame = Frame::capture(&session);
        assert_eq!(frame.overlay, Overlay::None);
        assert_eq!(frame.segments.len(), 4);
        assert_eq!(frame.segments[0], Rect::new(200.0, 0.0, 50.0, 60.0));
        assert_eq!(frame.segments[1], Rect::new(200.0, 210.0, 50.0, 270.0));
        assert_eq!(frame.segments[3], Rect::new(300.0, 430.0, 50.0, 50.0));
        assert_eq!(frame.score, 3);
    }

    #[test]
    fn test_overlay_lines() {
        assert!(Overlay::None.lines().is_none());
        let (title, sub) = Overlay::GameOver { score: 4 }.lines().unwrap();
        assert_eq!(title, "Game Over");
        assert_eq!(sub, "Score: 4");
        assert_eq!(Overlay::Won { score: 10 }.lines().unwrap().0, "You won!");
    }

    #[test]
    fn test_css_color() {
        assert_eq!(colors::css([1.0, 0.0, 0.0, 0.5]), "rgba(255, 0, 0, 0.5)");
        assert_eq!(colors::css(colors::SKY), "rgba(125, 212, 252, 1)");
    }
}
