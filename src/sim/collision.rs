//! Collision detection and scoring
//!
//! Order within a tick matters: playfield bounds first, then obstacles, then
//! scoring. Any loss ends evaluation for the tick, so no point is awarded on
//! the tick the body dies.

use super::rect::Rect;
use super::state::{Body, GameEvent, LossCause, Obstacle, Playfield, Session};
use crate::consts::{BODY_X, WIN_SCORE};

/// Result of evaluating one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Still playing
    Continue,
    Lost(LossCause),
    Won,
}

/// Check the body against the top and bottom of the playfield
pub fn boundary_breach(body: &Body, playfield: &Playfield) -> Option<LossCause> {
    if body.bottom() > playfield.height {
        Some(LossCause::Floor)
    } else if body.y < 0.0 {
        Some(LossCause::Ceiling)
    } else {
        None
    }
}

/// Check the body against one obstacle
///
/// Horizontal spans must overlap (touching is not overlap); then the body must
/// sit entirely inside the gap.
pub fn obstacle_hit(body: &Body, obstacle: &Obstacle, playfield: &Playfield) -> Option<LossCause> {
    let body_rect: Rect = body.rect();
    if !body_rect.overlaps_x(&obstacle.column(playfield)) {
        return None;
    }

    if body.y < obstacle.gap_top {
        Some(LossCause::TopSegment { id: obstacle.id })
    } else if body.bottom() > obstacle.gap_bottom() {
        Some(LossCause::BottomSegment { id: obstacle.id })
    } else {
        None
    }
}

/// Body has fully cleared the obstacle horizontally
#[inline]
pub fn has_cleared(obstacle: &Obstacle) -> bool {
    BODY_X > obstacle.right()
}

/// Mark newly cleared obstacles as passed and bump the score for each
pub fn award_passes(session: &mut Session, events: &mut Vec<GameEvent>) -> u32 {
    let mut awarded = 0;
    for obstacle in session.obstacles.iter_mut() {
        if obstacle.passed || !has_cleared(obstacle) {
            continue;
        }
        obstacle.passed = true;
        session.cleared += 1;
        session.score += 1;
        awarded += 1;
        log::debug!("Cleared obstacle {} (score {})", obstacle.id, session.score);
        events.push(GameEvent::Scored {
            id: obstacle.id,
            score: session.score,
        });
    }
    awarded
}

/// First loss condition for the current body position, if any
pub fn find_loss(session: &Session) -> Option<LossCause> {
    if let Some(cause) = boundary_breach(&session.body, &session.playfield) {
        return Some(cause);
    }
    session
        .obstacles
        .iter()
        .find_map(|o| obstacle_hit(&session.body, o, &session.playfield))
}

/// Evaluate collisions and scoring for the current tick, applying state transitions
pub fn evaluate(session: &mut Session, events: &mut Vec<GameEvent>) -> Verdict {
    if !session.is_playing() {
        return Verdict::Continue;
    }

    if let Some(cause) = find_loss(session) {
        session.lose(cause);
        events.push(GameEvent::Lost { cause });
        return Verdict::Lost(cause);
    }

    if award_passes(session, events) > 0 && session.score >= WIN_SCORE {
        session.win();
        events.push(GameEvent::Won {
            score: session.score,
        });
        return Verdict::Won;
    }

    Verdict::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SessionState;
    use proptest::prelude::*;

    fn playing() -> Session {
        Session::begin(Playfield::default())
    }

    #[test]
    fn test_boundary_breach() {
        let playfield = Playfield::default();
        assert_eq!(boundary_breach(&Body { y: 200.0, vel_y: 0.0 }, &playfield), None);
        assert_eq!(boundary_breach(&Body { y: 0.0, vel_y: 0.0 }, &playfield), None);
        assert_eq!(boundary_breach(&Body { y: 450.0, vel_y: 0.0 }, &playfield), None);
        assert_eq!(
            boundary_breach(&Body { y: -1.0, vel_y: 0.0 }, &playfield),
            Some(LossCause::Ceiling)
        );
        assert_eq!(
            boundary_breach(&Body { y: 450.5, vel_y: 0.0 }, &playfield),
            Some(LossCause::Floor)
        );
    }

    #[test]
    fn test_obstacle_hit_segments() {
        let playfield = Playfield::default();
        // Overlapping horizontally: body spans [50, 80], obstacle [40, 90]
        let obstacle = Obstacle::new(3, 40.0, 100.0);

        let inside = Body { y: 150.0, vel_y: 0.0 };
        assert_eq!(obstacle_hit(&inside, &obstacle, &playfield), None);

        let high = Body { y: 99.0, vel_y: 0.0 };
        assert_eq!(
            obstacle_hit(&high, &obstacle, &playfield),
            Some(LossCause::TopSegment { id: 3 })
        );

        // Bottom edge at 251 > 250
        let low = Body { y: 221.0, vel_y: 0.0 };
        assert_eq!(
            obstacle_hit(&low, &obstacle, &playfield),
            Some(LossCause::BottomSegment { id: 3 })
        );

        // Exactly filling the gap edges is fine
        let flush_top = Body { y: 100.0, vel_y: 0.0 };
        let flush_bottom = Body { y: 220.0, vel_y: 0.0 };
        assert_eq!(obstacle_hit(&flush_top, &obstacle, &playfield), None);
        assert_eq!(obstacle_hit(&flush_bottom, &obstacle, &playfield), None);
    }

    #[test]
    fn test_no_hit_without_horizontal_overlap() {
        let playfield = Playfield::default();
        let body = Body { y: 10.0, vel_y: 0.0 };
        // Obstacle starts exactly at body's right edge
        assert_eq!(obstacle_hit(&body, &Obstacle::new(1, 80.0, 200.0), &playfield), None);
        // Obstacle ends exactly at body's left edge
        assert_eq!(obstacle_hit(&body, &Obstacle::new(2, 0.0, 200.0), &playfield), None);
    }

    #[test]
    fn test_ceiling_loss_blocks_scoring() {
        let mut session = playing();
        session.body.y = -1.0;
        session.obstacles.push(Obstacle::new(1, -10.0, 100.0));

        let mut events = Vec::new();
        let verdict = evaluate(&mut session, &mut events);

        assert_eq!(verdict, Verdict::Lost(LossCause::Ceiling));
        assert_eq!(session.state, SessionState::GameOver);
        assert_eq!(session.score, 0);
        assert!(!session.obstacles[0].passed);
        assert_eq!(events, vec![GameEvent::Lost { cause: LossCause::Ceiling }]);
    }

    #[test]
    fn test_obstacle_loss_blocks_scoring_of_other_obstacle() {
        let mut session = playing();
        session.body.y = 20.0;
        // Already cleared, would score
        session.obstacles.push(Obstacle::new(1, -5.0, 100.0));
        // Overlapping and hit on the top segment
        session.obstacles.push(Obstacle::new(2, 60.0, 100.0));

        let mut events = Vec::new();
        let verdict = evaluate(&mut session, &mut events);

        assert_eq!(verdict, Verdict::Lost(LossCause::TopSegment { id: 2 }));
        assert_eq!(session.score, 0);
        assert_eq!(session.passed_count(), 0);
    }

    #[test]
    fn test_pass_flips_once() {
        let mut session = playing();
        session.obstacles.push(Obstacle::new(1, 0.0, 100.0));
        let mut events = Vec::new();

        // x + 50 == 50: not yet strictly past
        assert_eq!(evaluate(&mut session, &mut events), Verdict::Continue);
        assert!(!session.obstacles[0].passed);

        session.obstacles[0].x = -0.5;
        evaluate(&mut session, &mut events);
        assert!(session.obstacles[0].passed);
        assert_eq!(session.score, 1);

        session.obstacles[0].x = -3.5;
        evaluate(&mut session, &mut events);
        assert_eq!(session.score, 1);
        assert_eq!(events, vec![GameEvent::Scored { id: 1, score: 1 }]);
    }

    #[test]
    fn test_multiple_passes_in_one_tick() {
        let mut session = playing();
        session.obstacles.push(Obstacle::new(1, -2.0, 100.0));
        session.obstacles.push(Obstacle::new(2, -1.0, 100.0));
        let mut events = Vec::new();
        evaluate(&mut session, &mut events);
        assert_eq!(session.score, 2);
    }

    #[test]
    fn test_reaching_win_score() {
        let mut session = playing();
        session.score = 9;
        session.obstacles.push(Obstacle::new(1, -1.0, 100.0));
        let mut events = Vec::new();

        assert_eq!(evaluate(&mut session, &mut events), Verdict::Won);
        assert_eq!(session.state, SessionState::Won);
        assert_eq!(session.score, 10);
        assert_eq!(events.last(), Some(&GameEvent::Won { score: 10 }));
    }

    #[test]
    fn test_not_playing_is_inert() {
        let mut session = Session::default();
        session.body.y = -100.0;
        let mut events = Vec::new();
        assert_eq!(evaluate(&mut session, &mut events), Verdict::Continue);
        assert_eq!(session.state, SessionState::Idle);
        assert!(events.is_empty());
    }

    proptest! {
        #[test]
        fn prop_score_matches_passed(xs in proptest::collection::vec(-49.0f32..320.0, 0..8)) {
            let mut session = playing();
            for x in xs {
                let id = session.next_obstacle_id();
                // Gap wide open around the body so only scoring matters
                session.obstacles.push(Obstacle::new(id, x, 150.0));
            }
            session.body.y = 200.0;
            let mut events = Vec::new();
            evaluate(&mut session, &mut events);
            prop_assert_eq!(session.score as usize, session.passed_count());
            for o in &session.obstacles {
                prop_assert_eq!(o.passed, BODY_X > o.x + 50.0);
            }
        }
    }
}
