//! Frame scheduler stepped by hand
//!
//! Scheduled frames queue up until the owner pulls them with `take_next` (or
//! `GameLoop::step`), so a whole game can run synchronously without a display.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::game_loop::{FrameHandle, FrameScheduler, FrameTicket, GameLoop};

#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    queue: VecDeque<(FrameHandle, FrameTicket)>,
    cancelled: Rc<RefCell<Vec<FrameHandle>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the oldest pending frame, handing back its ticket
    pub fn take_next(&mut self) -> Option<FrameTicket> {
        self.queue.pop_front().map(|(_, ticket)| ticket)
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled.borrow().len()
    }

    /// Shared record of every cancel call, still readable after the scheduler is dropped
    pub fn cancel_log(&self) -> Rc<RefCell<Vec<FrameHandle>>> {
        Rc::clone(&self.cancelled)
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self, ticket: FrameTicket) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.queue.push_back((handle, ticket));
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.queue.retain(|(h, _)| *h != handle);
        self.cancelled.borrow_mut().push(handle);
    }
}

impl GameLoop<ManualScheduler> {
    /// Fire the next pending frame. Returns whether a tick ran.
    pub fn step(&mut self) -> bool {
        match self.scheduler_mut().take_next() {
            Some(ticket) => self.on_frame(ticket),
            None => false,
        }
    }

    /// Step until nothing is scheduled or `max_frames` ticks have run
    pub fn run_until_idle(&mut self, max_frames: u64) -> u64 {
        let mut ran = 0;
        while ran < max_frames && self.step() {
            ran += 1;
        }
        ran
    }

    /// Like `run_until_idle`, asking `pilot` before every frame whether to jump
    pub fn run_with<F>(&mut self, max_frames: u64, mut pilot: F) -> u64
    where
        F: FnMut(&crate::sim::Session) -> bool,
    {
        let mut ran = 0;
        while ran < max_frames && self.is_scheduled() {
            if pilot(self.session()) {
                self.request_jump();
            }
            if !self.step() {
                break;
            }
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(sequence: u64) -> FrameTicket {
        FrameTicket {
            generation: 1,
            sequence,
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(ticket(1));
        scheduler.schedule(ticket(2));
        assert_eq!(scheduler.take_next(), Some(ticket(1)));
        assert_eq!(scheduler.take_next(), Some(ticket(2)));
        assert_eq!(scheduler.take_next(), None);
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.schedule(ticket(1));
        scheduler.schedule(ticket(2));
        scheduler.cancel(a);
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.take_next(), Some(ticket(2)));

        // Unknown handles are fine
        scheduler.cancel(FrameHandle(999));
        assert_eq!(scheduler.cancelled_count(), 2);
    }
}
