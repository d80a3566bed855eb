use serde::{Deserialize, Serialize};

use crate::actor::Actor;

/// Horizontal scroll position. Only x scrolls; the world is always drawn at full height.
/// Never scrolls left of the world origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Where the camera wants to be: actor a third of the way across the viewport.
    pub fn target(actor: &Actor, viewport_width: f32) -> f32 {
        actor.x - viewport_width / 3.0
    }

    /// Ease towards the target by `smoothing` of the remaining distance.
    pub fn update(&mut self, actor: &Actor, viewport_width: f32, smoothing: f32) {
        let target = Self::target(actor, viewport_width);
        self.x += (target - self.x) * smoothing;
        self.x = self.x.max(0.0);
    }

    pub fn snap(&mut self, actor: &Actor, viewport_width: f32) {
        self.x = Self::target(actor, viewport_width).max(0.0);
    }

    /// Whole-pixel offset applied to world coordinates when drawing.
    pub fn draw_offset(&self) -> f32 {
        -self.x.floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_leads_actor_by_a_third() {
        let actor = Actor::new(350.0, 400.0, 30.0);
        assert_eq!(Camera::target(&actor, 600.0), 150.0);
    }

    #[test]
    fn update_closes_a_fraction_of_the_gap() {
        let actor = Actor::new(300.0, 400.0, 30.0);
        let mut camera = Camera::default();
        camera.update(&actor, 600.0, 0.5);
        assert_eq!(camera.x, 50.0);
        camera.update(&actor, 600.0, 0.5);
        assert_eq!(camera.x, 75.0);
    }

    #[test]
    fn update_converges_on_target() {
        let actor = Actor::new(1000.0, 400.0, 30.0);
        let mut camera = Camera::default();
        let mut gap = (Camera::target(&actor, 800.0) - camera.x).abs();
        for _ in 0..200 {
            camera.update(&actor, 800.0, 0.1);
            let next = (Camera::target(&actor, 800.0) - camera.x).abs();
            assert!(next <= gap);
            gap = next;
        }
        assert!(gap < 0.01);
    }

    #[test]
    fn snap_jumps_straight_to_target() {
        let actor = Actor::new(650.0, 400.0, 30.0);
        let mut camera = Camera { x: 900.0 };
        camera.snap(&actor, 600.0);
        assert_eq!(camera.x, 450.0);
    }

    #[test]
    fn never_scrolls_past_origin() {
        let actor = Actor::new(50.0, 400.0, 30.0);
        let mut camera = Camera { x: 900.0 };
        camera.snap(&actor, 800.0);
        assert_eq!(camera.x, 0.0);

        camera.x = 5.0;
        for _ in 0..50 {
            camera.update(&actor, 800.0, 0.1);
            assert!(camera.x >= 0.0);
        }
        assert_eq!(camera.x, 0.0);
    }

    #[test]
    fn draw_offset_floors() {
        assert_eq!(Camera { x: 12.7 }.draw_offset(), -12.0);
        assert_eq!(Camera { x: 0.0 }.draw_offset(), 0.0);
    }
}
