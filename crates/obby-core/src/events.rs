use serde::{Deserialize, Serialize};

/// Why the actor died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Lava,
    FellOutOfWorld,
}

/// Session transitions emitted by the simulation, at most once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Died { cause: DeathCause },
    Won,
    CheckpointReached { spawn_x: f32, spawn_y: f32 },
}

impl SessionEvent {
    /// Whether the event ends the current attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionEvent::Died { .. } | SessionEvent::Won)
    }
}
