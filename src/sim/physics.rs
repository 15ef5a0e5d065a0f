//! Vertical body physics: constant gravity plus instantaneous jump impulses

use super::state::Body;
use crate::consts::{GRAVITY, JUMP_IMPULSE};

/// Advance the body by one tick (semi-implicit Euler: velocity first, then position)
#[inline]
pub fn step(body: &mut Body) {
    body.vel_y += GRAVITY;
    body.y += body.vel_y;
}

/// Override velocity with the jump impulse. Position is untouched.
#[inline]
pub fn jump(body: &mut Body) {
    body.vel_y = JUMP_IMPULSE;
}
