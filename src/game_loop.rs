//! Frame-driven game loop
//!
//! The host owns the real "next frame" primitive and exposes it through
//! `FrameScheduler`. Every scheduled frame carries a `FrameTicket`; when the
//! host fires it, it hands the ticket back to `GameLoop::on_frame`. Only the
//! ticket the loop is currently waiting on runs a tick. Anything else (a frame
//! from before a restart, or one that fired after `stop`) is dropped.

use crate::audio::{Cue, LogNotifier, Notifier};
use crate::renderer::{Canvas, Frame};
use crate::sim::{self, GameEvent, GapSource, Playfield, Session, SessionState};

/// Host-side identifier for a pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Identifies which session and which frame a callback belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket {
    pub generation: u64,
    pub sequence: u64,
}

/// The host's per-frame callback primitive
pub trait FrameScheduler {
    /// Request one callback on the next display frame that delivers `ticket`
    fn schedule(&mut self, ticket: FrameTicket) -> FrameHandle;
    /// Withdraw a pending request. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Owns the active session and drives it one tick per frame
pub struct GameLoop<S: FrameScheduler> {
    scheduler: S,
    session: Session,
    playfield: Playfield,
    gaps: Box<dyn GapSource>,
    notifier: Box<dyn Notifier>,
    canvas: Option<Box<dyn Canvas>>,
    /// Bumped on every start; tickets from older generations are stale
    generation: u64,
    sequence: u64,
    pending: Option<(FrameHandle, FrameTicket)>,
}

impl<S: FrameScheduler> GameLoop<S> {
    pub fn new(scheduler: S, gaps: impl GapSource + 'static) -> Self {
        Self::with_playfield(scheduler, gaps, Playfield::default())
    }

    pub fn with_playfield(
        scheduler: S,
        gaps: impl GapSource + 'static,
        playfield: Playfield,
    ) -> Self {
        Self {
            scheduler,
            session: Session::idle(playfield),
            playfield,
            gaps: Box::new(gaps),
            notifier: Box::new(LogNotifier::default()),
            canvas: None,
            generation: 0,
            sequence: 0,
            pending: None,
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_canvas(mut self, canvas: impl Canvas + 'static) -> Self {
        self.canvas = Some(Box::new(canvas));
        self
    }

    /// Replace the running session with a fresh one and schedule its first tick
    pub fn start(&mut self) {
        self.stop();
        self.generation += 1;
        self.session = Session::begin(self.playfield);
        log::info!("Session {} started", self.generation);
        self.redraw();
        self.schedule_next();
    }

    /// Cancel the pending frame, if any. Safe to call repeatedly.
    ///
    /// The session keeps whatever state it had; only ticking stops.
    pub fn stop(&mut self) {
        if let Some((handle, ticket)) = self.pending.take() {
            log::debug!(
                "Cancelling frame {:?} (generation {}, sequence {})",
                handle,
                ticket.generation,
                ticket.sequence
            );
            self.scheduler.cancel(handle);
        }
    }

    /// Host input. Accepted only while playing.
    pub fn request_jump(&mut self) -> bool {
        self.session.request_jump()
    }

    /// Frame callback from the host. Returns whether a tick ran.
    pub fn on_frame(&mut self, ticket: FrameTicket) -> bool {
        match self.pending {
            Some((_, expected)) if expected == ticket => {}
            _ => {
                log::debug!(
                    "Ignoring stale frame (generation {}, sequence {}; current generation {})",
                    ticket.generation,
                    ticket.sequence,
                    self.generation
                );
                return false;
            }
        }
        self.pending = None;

        let events = sim::tick(&mut self.session, &mut self.gaps);
        self.dispatch(&events);
        self.redraw();

        if self.session.is_playing() {
            self.schedule_next();
        }
        true
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    /// Snapshot for drawing
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.session)
    }

    /// Push the current frame to the attached canvas
    pub fn redraw(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.draw(&Frame::capture(&self.session));
        }
    }

    /// A frame request is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn schedule_next(&mut self) {
        self.sequence += 1;
        let ticket = FrameTicket {
            generation: self.generation,
            sequence: self.sequence,
        };
        let handle = self.scheduler.schedule(ticket);
        self.pending = Some((handle, ticket));
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            let cue = match event {
                GameEvent::Lost { .. } => Cue::Lose,
                GameEvent::Won { .. } => Cue::Win,
                _ => continue,
            };
            if let Err(err) = self.notifier.play(cue) {
                log::warn!("Failed to play {:?} cue: {}", cue, err);
            }
        }
    }
}

impl<S: FrameScheduler> Drop for GameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
