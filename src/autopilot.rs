//! Demo-mode controller
//!
//! Decides each frame whether to jump by aiming for the gap of the nearest
//! obstacle the body has not cleared yet. Good enough to play unattended; it
//! makes no attempt at optimal play.

use crate::consts::{BODY_X, GAP_SIZE, GRAVITY};
use crate::sim::{Obstacle, Session};

/// Distance kept between the body's bottom edge and the bottom of the gap
const SAFETY_MARGIN: f32 = 20.0;

/// Nearest obstacle still ahead of or under the body
pub fn next_obstacle(session: &Session) -> Option<&Obstacle> {
    session.obstacles.iter().find(|o| o.right() >= BODY_X)
}

/// Lowest y the body's bottom edge should reach before jumping
pub fn jump_line(session: &Session) -> f32 {
    let gap_bottom = match next_obstacle(session) {
        Some(obstacle) => obstacle.gap_bottom(),
        None => (session.playfield.height + GAP_SIZE) / 2.0,
    };
    gap_bottom - SAFETY_MARGIN
}

/// Whether to jump before the next tick
pub fn wants_jump(session: &Session) -> bool {
    if !session.is_playing() {
        return false;
    }
    let body = &session.body;
    if body.vel_y < 0.0 {
        return false;
    }
    // Where the bottom edge lands after the next physics step
    let next_bottom = body.bottom() + body.vel_y + GRAVITY;
    next_bottom > jump_line(session) || next_bottom > session.playfield.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Playfield, SessionState};

    #[test]
    fn test_aims_for_next_obstacle() {
        let mut session = Session::begin(Playfield::default());
        // Already cleared: ignored
        session.obstacles.push(Obstacle::new(1, -10.0, 50.0));
        session.obstacles.push(Obstacle::new(2, 120.0, 100.0));
        assert_eq!(next_obstacle(&session).map(|o| o.id), Some(2));
        assert_eq!(jump_line(&session), 230.0);
    }

    #[test]
    fn test_jumps_when_falling_below_line() {
        let mut session = Session::begin(Playfield::default());
        session.obstacles.push(Obstacle::new(1, 120.0, 100.0));

        session.body.y = 195.0;
        session.body.vel_y = 5.0;
        assert!(wants_jump(&session));

        session.body.vel_y = -3.0;
        assert!(!wants_jump(&session));

        session.body.y = 120.0;
        session.body.vel_y = 2.0;
        assert!(!wants_jump(&session));
    }

    #[test]
    fn test_idle_without_obstacles_uses_midline() {
        let mut session = Session::begin(Playfield::default());
        assert_eq!(jump_line(&session), 295.0);
        session.body.y = 270.0;
        session.body.vel_y = 1.0;
        assert!(wants_jump(&session));
    }

    #[test]
    fn test_never_jumps_when_not_playing() {
        let mut session = Session::default();
        session.body.y = 440.0;
        session.body.vel_y = 9.0;
        assert_eq!(session.state, SessionState::Idle);
        assert!(!wants_jump(&session));
    }
}
