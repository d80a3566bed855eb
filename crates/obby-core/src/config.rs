use serde::{Deserialize, Serialize};

/// Per-frame downward acceleration.
pub const GRAVITY: f32 = 0.6;
/// Horizontal velocity multiplier applied when no direction is held.
pub const FRICTION: f32 = 0.8;
/// Horizontal speed cap.
pub const MAX_SPEED: f32 = 5.0;
/// Vertical velocity set on jump (negative is up).
pub const JUMP_POWER: f32 = -12.0;
/// Horizontal acceleration while a direction is held.
pub const MOVE_ACCEL: f32 = 0.5;
/// Fraction of the remaining camera distance closed each frame.
pub const CAMERA_SMOOTHING: f32 = 0.1;
/// Gap left between a checkpoint's top and the respawned actor's feet.
pub const CHECKPOINT_CLEARANCE: f32 = 10.0;
/// How far below the viewport the actor may fall before dying.
pub const WORLD_FLOOR_MARGIN: f32 = 200.0;

/// Fixed viewport width.
pub const VIEWPORT_WIDTH: f32 = 800.0;
/// Fixed viewport height.
pub const VIEWPORT_HEIGHT: f32 = 600.0;
/// Side length of the square actor.
pub const ACTOR_SIZE: f32 = 30.0;
/// Spawn point used for a fresh level.
pub const DEFAULT_SPAWN_X: f32 = 50.0;
pub const DEFAULT_SPAWN_Y: f32 = 400.0;

/// Movement and camera tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub jump_power: f32,
    pub move_accel: f32,
    pub camera_smoothing: f32,
    pub checkpoint_clearance: f32,
    pub world_floor_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            max_speed: MAX_SPEED,
            jump_power: JUMP_POWER,
            move_accel: MOVE_ACCEL,
            camera_smoothing: CAMERA_SMOOTHING,
            checkpoint_clearance: CHECKPOINT_CLEARANCE,
            world_floor_margin: WORLD_FLOOR_MARGIN,
        }
    }
}

/// Playfield and actor dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
    pub actor_size: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            actor_size: ACTOR_SIZE,
            spawn_x: DEFAULT_SPAWN_X,
            spawn_y: DEFAULT_SPAWN_Y,
        }
    }
}

/// Raw key codes bound to each action. Several codes may share an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub jump: Vec<String>,
    pub restart: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let codes = |list: &[&str]| list.iter().map(|c| c.to_string()).collect();
        Self {
            move_left: codes(&["ArrowLeft", "KeyA"]),
            move_right: codes(&["ArrowRight", "KeyD"]),
            jump: codes(&["Space", "ArrowUp", "KeyW"]),
            restart: codes(&["KeyR"]),
        }
    }
}

/// Top-level runtime configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObbyConfig {
    pub physics: PhysicsConfig,
    pub viewport: ViewportConfig,
    pub bindings: KeyBindings,
}

impl ObbyConfig {
    /// Load config from `OBBY_CONFIG` or `config/obby.toml`. Falls back to defaults if
    /// the file is missing or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("OBBY_CONFIG").unwrap_or_else(|_| "config/obby.toml".to_string());
        Self::load_from(&path)
    }

    /// Load config from an explicit path with the same fallback rules as [`Self::load`].
    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    ObbyConfig::default()
                },
            },
            Err(_) => ObbyConfig::default(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
