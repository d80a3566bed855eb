use serde::{Deserialize, Serialize};

use obby_core::events::{DeathCause, SessionEvent};

/// Where the current attempt stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Playing,
    Dead,
    Won,
}

/// Attempt state plus counters for the current level.
///
/// Transitions only leave `Playing`; the first death or win in an attempt latches and
/// later triggers are ignored until [`GameSession::resume`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    state: SessionState,
    deaths: u32,
    wins: u32,
    attempt_frames: u64,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Simulated frames since the attempt started.
    pub fn attempt_frames(&self) -> u64 {
        self.attempt_frames
    }

    pub(crate) fn count_frame(&mut self) {
        self.attempt_frames += 1;
    }

    /// Enter `Dead` if still playing.
    pub fn die(&mut self, cause: DeathCause) -> Option<SessionEvent> {
        if !self.is_playing() {
            return None;
        }
        self.state = SessionState::Dead;
        self.deaths += 1;
        tracing::info!(?cause, deaths = self.deaths, "actor died");
        Some(SessionEvent::Died { cause })
    }

    /// Enter `Won` if still playing.
    pub fn win(&mut self) -> Option<SessionEvent> {
        if !self.is_playing() {
            return None;
        }
        self.state = SessionState::Won;
        self.wins += 1;
        tracing::info!(
            frames = self.attempt_frames,
            wins = self.wins,
            "level finished"
        );
        Some(SessionEvent::Won)
    }

    /// Start a new attempt, keeping the counters.
    pub fn resume(&mut self) {
        self.state = SessionState::Playing;
        self.attempt_frames = 0;
    }

    /// Forget everything, e.g. when a new level arrives.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Host hooks fired once per transition into `Dead` or `Won`.
pub trait SessionCallbacks {
    fn on_death(&mut self, _cause: DeathCause) {}

    fn on_win(&mut self) {}
}

/// Callbacks that ignore every transition.
#[derive(Debug, Default)]
pub struct NoCallbacks;

impl SessionCallbacks for NoCallbacks {}
