//! Sound cues
//!
//! The game loop only ever fires cues and forgets them. Playback lives behind
//! the `Notifier` trait so the simulation never depends on an output device,
//! and any failure is logged and dropped by the caller.

use std::fmt;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Session ended in a collision
    Lose,
    /// Session reached the winning score
    Win,
}

impl Cue {
    /// Asset path served next to the page
    pub fn asset_path(&self) -> &'static str {
        match self {
            Cue::Lose => "/audio/lose.mp3",
            Cue::Win => "/audio/win.mp3",
        }
    }
}

/// Why a cue could not be played
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No output available (no audio context, unsupported platform)
    Unavailable,
    /// Output exists but refused to play
    Playback(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "audio output unavailable"),
            AudioError::Playback(reason) => write!(f, "playback failed: {}", reason),
        }
    }
}

impl std::error::Error for AudioError {}

/// Fire-and-forget cue sink
pub trait Notifier {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        (**self).play(cue)
    }
}

/// Writes cues to the log instead of a speaker
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    muted: bool,
}

impl LogNotifier {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }
}

impl Notifier for LogNotifier {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        if !self.muted {
            log::info!("[audio] {:?} ({})", cue, cue.asset_path());
        }
        Ok(())
    }
}

/// Remembers every cue it was asked to play
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    played: std::rc::Rc<std::cell::RefCell<Vec<Cue>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far, shared with clones of this notifier
    pub fn played(&self) -> Vec<Cue> {
        self.played.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        self.played.borrow_mut().push(cue);
        Ok(())
    }
}

/// Plays nothing and always fails; for exercising the swallow path
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokenNotifier;

impl Notifier for BrokenNotifier {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
}

/// Effective volume for a cue given user settings
pub fn effective_volume(master_volume: f32, muted: bool) -> f32 {
    if muted {
        0.0
    } else {
        master_volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_history() {
        let recorder = RecordingNotifier::new();
        let mut clone = recorder.clone();
        clone.play(Cue::Lose).unwrap();
        clone.play(Cue::Win).unwrap();
        assert_eq!(recorder.played(), vec![Cue::Lose, Cue::Win]);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AudioError::Unavailable.to_string(), "audio output unavailable");
        assert_eq!(
            AudioError::Playback("NotAllowedError".into()).to_string(),
            "playback failed: NotAllowedError"
        );
    }

    #[test]
    fn test_effective_volume() {
        assert_eq!(effective_volume(0.8, true), 0.0);
        assert_eq!(effective_volume(1.7, false), 1.0);
        assert_eq!(effective_volume(0.5, false), 0.5);
    }

    #[test]
    fn test_asset_paths() {
        assert_eq!(Cue::Lose.asset_path(), "/audio/lose.mp3");
        assert_eq!(Cue::Win.asset_path(), "/audio/win.mp3");
    }
}
