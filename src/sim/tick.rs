//! Fixed-order simulation tick
//!
//! One tick is: physics, obstacle generation, collision and scoring. The tick
//! counter advances after evaluation regardless of the outcome.

use super::collision::{self, Verdict};
use super::physics;
use super::spawner::{self, GapSource};
use super::state::{GameEvent, Session};

/// Advance a playing session by one tick
///
/// Returns the events produced, in order. A session that is not playing is
/// left untouched and yields no events.
pub fn tick<G: GapSource + ?Sized>(session: &mut Session, gaps: &mut G) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !session.is_playing() {
        return events;
    }

    physics::step(&mut session.body);
    spawner::update(session, gaps, &mut events);
    let verdict = collision::evaluate(session, &mut events);

    session.tick_count += 1;

    if verdict != Verdict::Continue {
        log::debug!(
            "Tick {} ended play: {:?} (score {})",
            session.tick_count,
            verdict,
            session.score
        );
    }
    events
}
