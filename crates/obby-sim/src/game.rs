use obby_core::config::ObbyConfig;
use obby_core::events::SessionEvent;
use obby_core::level::LevelDescription;

use crate::actor::Actor;
use crate::camera::Camera;
use crate::input::{Action, InputState};
use crate::session::{GameSession, NoCallbacks, SessionCallbacks, SessionState};
use crate::simulator::Simulator;

/// Everything one running level needs: the level, the actor, the camera, the session
/// and the held keys. Hosts drive it with key events and one [`ObbyGame::frame`] per
/// display refresh.
pub struct ObbyGame {
    config: ObbyConfig,
    simulator: Simulator,
    level: LevelDescription,
    actor: Actor,
    camera: Camera,
    session: GameSession,
    input: InputState,
    callbacks: Box<dyn SessionCallbacks>,
}

impl ObbyGame {
    pub fn new(config: ObbyConfig, level: LevelDescription) -> Self {
        let simulator = Simulator::new(config.physics.clone(), config.viewport.clone());
        let actor = Actor::at_default_spawn(&config.viewport);
        let input = InputState::new(config.bindings.clone());
        let mut game = Self {
            config,
            simulator,
            level,
            actor,
            camera: Camera::default(),
            session: GameSession::new(),
            input,
            callbacks: Box::new(NoCallbacks),
        };
        game.camera.snap(&game.actor, game.config.viewport.width);
        game
    }

    pub fn with_callbacks(mut self, callbacks: impl SessionCallbacks + 'static) -> Self {
        self.callbacks = Box::new(callbacks);
        self
    }

    pub fn config(&self) -> &ObbyConfig {
        &self.config
    }

    pub fn level(&self) -> &LevelDescription {
        &self.level
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Run one simulation step and move the camera. Returns the transitions that
    /// happened, after the callbacks have seen them.
    pub fn frame(&mut self) -> Vec<SessionEvent> {
        if !self.session.is_playing() {
            return Vec::new();
        }
        let controls = self.input.snapshot();
        let events = self.simulator.step(
            &mut self.actor,
            controls,
            &self.level.blocks,
            &mut self.session,
        );
        self.camera.update(
            &self.actor,
            self.config.viewport.width,
            self.config.physics.camera_smoothing,
        );

        for event in &events {
            match event {
                SessionEvent::Died { cause } => self.callbacks.on_death(*cause),
                SessionEvent::Won => self.callbacks.on_win(),
                SessionEvent::CheckpointReached { .. } => {},
            }
        }
        events
    }

    /// Press a key. Restart fires only on the press itself, not while the key is held
    /// or auto-repeating.
    pub fn key_down(&mut self, code: &str) -> Option<Action> {
        let fresh = !self.input.is_key_down(code);
        let action = self.input.on_key_down(code);
        if fresh && action == Some(Action::Restart) {
            self.restart();
        }
        action
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.on_key_up(code);
    }

    /// Drop every held key, e.g. when the window loses focus.
    pub fn release_all_keys(&mut self) {
        self.input.clear();
    }

    /// Retry after a death from the last checkpoint; start over after a win.
    pub fn restart(&mut self) {
        match self.session.state() {
            SessionState::Dead => self.respawn(),
            SessionState::Won => self.full_reset(),
            SessionState::Playing => {},
        }
    }

    /// Back to the current spawn point with a fresh attempt.
    pub fn respawn(&mut self) {
        self.actor.respawn();
        self.session.resume();
        self.camera.snap(&self.actor, self.config.viewport.width);
        tracing::debug!(
            x = self.actor.x,
            y = self.actor.y,
            deaths = self.session.deaths(),
            "respawned"
        );
    }

    /// Forget checkpoints and respawn at the level's default spawn.
    pub fn full_reset(&mut self) {
        self.actor.reset_spawn(&self.config.viewport);
        self.respawn();
    }

    /// Start the current level over in any state, counters included.
    pub fn reset(&mut self) {
        self.session.reset();
        self.full_reset();
    }

    /// Swap in a new level and start it from scratch, whatever state the old one was in.
    pub fn load_level(&mut self, level: LevelDescription) {
        let stats = level.stats();
        self.level = level;
        self.reset();
        tracing::info!(
            blocks = stats.block_count,
            length = stats.length,
            "level loaded"
        );
    }
}

impl Default for ObbyGame {
    fn default() -> Self {
        Self::new(ObbyConfig::default(), LevelDescription::default())
    }
}

impl std::fmt::Debug for ObbyGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObbyGame")
            .field("level", &self.level.stats())
            .field("actor", &self.actor)
            .field("camera", &self.camera)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
