use serde::{Deserialize, Serialize};

use obby_core::config::ViewportConfig;
use obby_core::geometry::{Bounded, Rect};

/// The single controllable character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Actor {
    pub fn new(spawn_x: f32, spawn_y: f32, size: f32) -> Self {
        Self {
            x: spawn_x,
            y: spawn_y,
            vx: 0.0,
            vy: 0.0,
            width: size,
            height: size,
            grounded: false,
            spawn_x,
            spawn_y,
        }
    }

    /// Actor standing at the viewport's default spawn point.
    pub fn at_default_spawn(viewport: &ViewportConfig) -> Self {
        Self::new(viewport.spawn_x, viewport.spawn_y, viewport.actor_size)
    }

    /// Move back to the stored spawn point with no velocity.
    pub fn respawn(&mut self) {
        self.x = self.spawn_x;
        self.y = self.spawn_y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.grounded = false;
    }

    /// Returns true if the spawn point actually changed.
    pub fn set_spawn(&mut self, spawn_x: f32, spawn_y: f32) -> bool {
        if self.spawn_x == spawn_x && self.spawn_y == spawn_y {
            return false;
        }
        self.spawn_x = spawn_x;
        self.spawn_y = spawn_y;
        true
    }

    /// Forget any checkpoint and go back to the level's default spawn.
    pub fn reset_spawn(&mut self, viewport: &ViewportConfig) {
        self.spawn_x = viewport.spawn_x;
        self.spawn_y = viewport.spawn_y;
    }
}

impl Bounded for Actor {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
