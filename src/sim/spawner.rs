//! Obstacle generation: periodic spawns, leftward motion and retirement

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GameEvent, Obstacle, Session};
use crate::consts::{OBSTACLE_SPEED, SPAWN_INTERVAL};

/// Source of gap placements
///
/// Returns a value in the inclusive range `[min, max]`. Implementations should
/// be uniform; the simulation never assumes more than that.
pub trait GapSource {
    fn gap_top(&mut self, min: u32, max: u32) -> u32;
}

impl<G: GapSource + ?Sized> GapSource for Box<G> {
    fn gap_top(&mut self, min: u32, max: u32) -> u32 {
        (**self).gap_top(min, max)
    }
}

/// PCG-backed uniform gap placement
#[derive(Debug, Clone)]
pub struct SeededGaps {
    seed: u64,
    rng: Pcg32,
}

impl SeededGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl GapSource for SeededGaps {
    fn gap_top(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Replays a fixed list of gap placements (clamped into range), then repeats the last
#[derive(Debug, Clone, Default)]
pub struct ScriptedGaps {
    queue: VecDeque<u32>,
    last: Option<u32>,
}

impl ScriptedGaps {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: values.into_iter().collect(),
            last: None,
        }
    }

    /// Always returns the same placement
    pub fn constant(value: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            last: Some(value),
        }
    }
}

impl GapSource for ScriptedGaps {
    fn gap_top(&mut self, min: u32, max: u32) -> u32 {
        let value = match self.queue.pop_front() {
            Some(v) => v,
            None => self.last.unwrap_or(min),
        };
        self.last = Some(value);
        value.clamp(min, max.max(min))
    }
}

/// Move every live obstacle left by one tick's worth
pub fn advance(session: &mut Session) {
    for obstacle in &mut session.obstacles {
        obstacle.x -= OBSTACLE_SPEED;
    }
}

/// Drop obstacles that are fully off-screen, keeping order
pub fn retire(session: &mut Session, events: &mut Vec<GameEvent>) {
    session.obstacles.retain(|o| {
        if o.is_retired() {
            log::trace!("Retired obstacle {}", o.id);
            events.push(GameEvent::Retired { id: o.id });
            false
        } else {
            true
        }
    });
}

/// True on ticks that spawn an obstacle (tick 0 included)
#[inline]
pub fn is_spawn_tick(tick_count: u64) -> bool {
    tick_count % SPAWN_INTERVAL == 0
}

/// Spawn one obstacle at the right edge if this tick is due
pub fn spawn_if_due<G: GapSource + ?Sized>(
    session: &mut Session,
    gaps: &mut G,
    events: &mut Vec<GameEvent>,
) -> Option<u32> {
    if !is_spawn_tick(session.tick_count) {
        return None;
    }

    let (min, max) = session.playfield.gap_top_range();
    let gap_top = gaps.gap_top(min, max).clamp(min, max) as f32;
    let id = session.next_obstacle_id();
    session
        .obstacles
        .push(Obstacle::new(id, session.playfield.width, gap_top));

    log::trace!(
        "Spawned obstacle {} at tick {} (gap_top {})",
        id,
        session.tick_count,
        gap_top
    );
    events.push(GameEvent::Spawned { id, gap_top });
    Some(id)
}

/// Full generator step: advance, retire, then spawn
pub fn update<G: GapSource + ?Sized>(
    session: &mut Session,
    gaps: &mut G,
    events: &mut Vec<GameEvent>,
) {
    advance(session);
    retire(session, events);
    spawn_if_due(session, gaps, events);
}
