use obby_core::config::{PhysicsConfig, ViewportConfig};
use obby_core::events::{DeathCause, SessionEvent};
use obby_core::geometry::intersects;
use obby_core::level::Block;

use crate::actor::Actor;
use crate::collision::{Axis, Trigger, respond};
use crate::input::Controls;
use crate::session::GameSession;

/// Advances the actor one fixed frame against the level geometry.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    physics: PhysicsConfig,
    viewport: ViewportConfig,
}

impl Simulator {
    pub fn new(physics: PhysicsConfig, viewport: ViewportConfig) -> Self {
        Self { physics, viewport }
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Run one step. Does nothing unless the session is playing.
    ///
    /// Horizontal motion and collisions are resolved completely before vertical ones.
    /// Once a step kills the actor or finishes the level, the rest of that step is
    /// skipped; the session has latched and the actor stays where the trigger fired.
    pub fn step(
        &self,
        actor: &mut Actor,
        controls: Controls,
        blocks: &[Block],
        session: &mut GameSession,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if !session.is_playing() {
            return events;
        }
        session.count_frame();
        let physics = &self.physics;

        if controls.right {
            actor.vx += physics.move_accel;
        } else if controls.left {
            actor.vx -= physics.move_accel;
        } else {
            actor.vx *= physics.friction;
        }
        actor.vx = actor.vx.min(physics.max_speed).max(-physics.max_speed);
        actor.x += actor.vx;

        if self.resolve_pass(actor, blocks, Axis::Horizontal, session, &mut events) {
            return events;
        }

        actor.vy += physics.gravity;
        actor.y += actor.vy;

        if actor.y > self.viewport.height + physics.world_floor_margin {
            events.extend(session.die(DeathCause::FellOutOfWorld));
            return events;
        }

        actor.grounded = false;
        if self.resolve_pass(actor, blocks, Axis::Vertical, session, &mut events) {
            return events;
        }

        if controls.jump && actor.grounded {
            actor.vy = physics.jump_power;
            actor.grounded = false;
        }

        events
    }

    /// Resolve every overlapping block on one axis, in level order. Returns true if a
    /// terminal transition fired.
    fn resolve_pass(
        &self,
        actor: &mut Actor,
        blocks: &[Block],
        axis: Axis,
        session: &mut GameSession,
        events: &mut Vec<SessionEvent>,
    ) -> bool {
        for block in blocks {
            if !intersects(actor, block) {
                continue;
            }
            let resolution = respond(block, actor, axis, self.physics.checkpoint_clearance);
            resolution.apply(actor);

            match resolution.trigger {
                Some(Trigger::Death) => {
                    events.extend(session.die(DeathCause::Lava));
                    return true;
                },
                Some(Trigger::Win) => {
                    events.extend(session.win());
                    return true;
                },
                Some(Trigger::Checkpoint { spawn_x, spawn_y }) => {
                    if actor.set_spawn(spawn_x, spawn_y) {
                        tracing::debug!(spawn_x, spawn_y, "checkpoint activated");
                        events.push(SessionEvent::CheckpointReached { spawn_x, spawn_y });
                    }
                },
                None => {},
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use obby_core::test_helpers::{empty_level, flat_level, lava_gap_level};

    const RIGHT: Controls = Controls {
        left: false,
        right: true,
        jump: false,
    };
    const LEFT: Controls = Controls {
        left: true,
        right: false,
        jump: false,
    };
    const JUMP: Controls = Controls {
        left: false,
        right: false,
        jump: true,
    };
    const IDLE: Controls = Controls {
        left: false,
        right: false,
        jump: false,
    };

    /// Physics with power-of-two friendly numbers so float sums stay exact.
    fn exact_physics() -> PhysicsConfig {
        PhysicsConfig {
            gravity: 0.5,
            ..PhysicsConfig::default()
        }
    }

    /// Actor resting exactly on top of the flat level's floor.
    fn grounded_actor(x: f32) -> Actor {
        let mut actor = Actor::new(x, 520.0, 30.0);
        actor.grounded = true;
        actor
    }

    #[test]
    fn horizontal_speed_is_capped() {
        let sim = Simulator::default();
        let level = flat_level();
        let mut actor = grounded_actor(100.0);
        let mut session = GameSession::new();
        for _ in 0..50 {
            sim.step(&mut actor, RIGHT, &level.blocks, &mut session);
            assert!(actor.vx <= 5.0);
        }
        assert_eq!(actor.vx, 5.0);

        for _ in 0..50 {
            sim.step(&mut actor, LEFT, &level.blocks, &mut session);
            assert!(actor.vx >= -5.0);
        }
        assert_eq!(actor.vx, -5.0);
    }

    #[test]
    fn friction_decays_to_rest_while_grounded() {
        let sim = Simulator::default();
        let level = flat_level();
        let mut actor = grounded_actor(100.0);
        actor.vx = 5.0;
        let mut session = GameSession::new();

        let mut previous = actor.vx;
        for _ in 0..100 {
            sim.step(&mut actor, IDLE, &level.blocks, &mut session);
            assert!(actor.vx <= previous, "vx must not grow without input");
            assert!(actor.vx >= 0.0);
            assert!(actor.grounded, "actor must stay on the floor");
            assert_eq!(actor.y, 520.0);
            previous = actor.vx;
        }
        assert!(actor.vx < 1e-3, "vx should have decayed, got {}", actor.vx);
    }

    #[test]
    fn free_fall_matches_closed_form() {
        let physics = exact_physics();
        let sim = Simulator::new(physics.clone(), ViewportConfig::default());
        let level = empty_level();
        let mut actor = Actor::new(0.0, 0.0, 30.0);
        let mut session = GameSession::new();

        for n in 1..=20u32 {
            sim.step(&mut actor, IDLE, &level.blocks, &mut session);
            let n = n as f32;
            assert_eq!(actor.vy, physics.gravity * n);
            assert_eq!(actor.y, physics.gravity * n * (n + 1.0) / 2.0);
            assert!(!actor.grounded);
        }
    }

    #[test]
    fn landing_snaps_to_block_top() {
        let sim = Simulator::default();
        let level = flat_level();
        let mut actor = Actor::new(100.0, 400.0, 30.0);
        let mut session = GameSession::new();
        for _ in 0..60 {
            sim.step(&mut actor, IDLE, &level.blocks, &mut session);
        }
        assert!(actor.grounded);
        assert_eq!(actor.y, 520.0);
        assert_eq!(actor.vy, 0.0);
    }

    #[test]
    fn jump_requires_ground() {
        let sim = Simulator::default();
        let level = flat_level();
        let mut session = GameSession::new();

        let mut airborne = Actor::new(100.0, 100.0, 30.0);
        sim.step(&mut airborne, JUMP, &level.blocks, &mut session);
        assert_eq!(airborne.vy, sim.physics().gravity, "jump ignored in the air");

        let mut standing = grounded_actor(100.0);
        sim.step(&mut standing, JUMP, &level.blocks, &mut session);
        assert_eq!(standing.vy, sim.physics().jump_power);
        assert!(!standing.grounded);

        // Still holding jump on the way up does nothing extra.
        sim.step(&mut standing, JUMP, &level.blocks, &mut session);
        assert_eq!(
            standing.vy,
            sim.physics().jump_power + sim.physics().gravity
        );
    }

    #[test]
    fn wall_blocks_horizontal_motion() {
        let sim = Simulator::default();
        let mut level = flat_level();
        level.blocks.push(Block::platform(200.0, 400.0, 50.0, 150.0));
        let mut actor = grounded_actor(100.0);
        let mut session = GameSession::new();

        for _ in 0..60 {
            sim.step(&mut actor, RIGHT, &level.blocks, &mut session);
            assert!(actor.x + actor.width <= 200.0);
        }
        assert_eq!(actor.x, 170.0);
        assert!(actor.grounded);
    }

    #[test]
    fn ceiling_stops_rise() {
        let sim = Simulator::default();
        let mut level = flat_level();
        level.blocks.push(Block::platform(0.0, 490.0, 300.0, 20.0));
        let mut actor = grounded_actor(100.0);
        let mut session = GameSession::new();

        sim.step(&mut actor, JUMP, &level.blocks, &mut session);
        assert_eq!(actor.vy, -12.0);
        sim.step(&mut actor, IDLE, &level.blocks, &mut session);
        // Rising into the ceiling pushes the actor back under its bottom edge.
        assert_eq!(actor.y, 510.0);
        assert_eq!(actor.vy, 0.0);
    }

    #[test]
    fn lava_kills_exactly_once() {
        let sim = Simulator::default();
        let level = obby_core::test_helpers::level_of(vec![Block::lava(0.0, 550.0, 1000.0, 50.0)]);
        let mut actor = Actor::new(100.0, 500.0, 30.0);
        let mut session = GameSession::new();

        let mut deaths = 0;
        for _ in 0..120 {
            for event in sim.step(&mut actor, RIGHT, &level.blocks, &mut session) {
                if matches!(event, SessionEvent::Died { .. }) {
                    deaths += 1;
                }
            }
        }
        assert_eq!(deaths, 1);
        assert_eq!(session.state(), SessionState::Dead);
        assert_eq!(session.deaths(), 1);
    }

    #[test]
    fn dead_actor_is_frozen() {
        let sim = Simulator::default();
        let level = flat_level();
        let mut actor = Actor::new(100.0, 100.0, 30.0);
        let mut session = GameSession::new();
        session.die(DeathCause::Lava);

        let before = actor.clone();
        let events = sim.step(&mut actor, RIGHT, &level.blocks, &mut session);
        assert!(events.is_empty());
        assert_eq!(actor, before);
    }

    #[test]
    fn falling_out_of_world_dies() {
        let sim = Simulator::default();
        let level = empty_level();
        let mut actor = Actor::new(100.0, 400.0, 30.0);
        let mut session = GameSession::new();

        let mut events = Vec::new();
        for _ in 0..200 {
            events.extend(sim.step(&mut actor, IDLE, &level.blocks, &mut session));
        }
        assert_eq!(
            events,
            vec![SessionEvent::Died {
                cause: DeathCause::FellOutOfWorld
            }]
        );
        assert!(actor.y > 800.0);
    }

    #[test]
    fn checkpoint_updates_spawn_once_per_change() {
        let sim = Simulator::default();
        let mut level = flat_level();
        level.blocks.push(Block::checkpoint(150.0, 530.0, 40.0, 20.0));
        let mut actor = grounded_actor(100.0);
        let mut session = GameSession::new();

        let mut reached = Vec::new();
        for _ in 0..40 {
            for event in sim.step(&mut actor, RIGHT, &level.blocks, &mut session) {
                if let SessionEvent::CheckpointReached { spawn_x, spawn_y } = event {
                    reached.push((spawn_x, spawn_y));
                }
            }
        }
        assert_eq!(reached, vec![(150.0, 490.0)]);
        assert_eq!((actor.spawn_x, actor.spawn_y), (150.0, 490.0));
        assert!(actor.x > 190.0, "checkpoints are not solid");
    }

    #[test]
    fn finish_wins() {
        let sim = Simulator::default();
        let mut level = flat_level();
        level.blocks.push(Block::finish(200.0, 500.0, 100.0, 50.0));
        let mut actor = grounded_actor(100.0);
        let mut session = GameSession::new();

        let mut events = Vec::new();
        for _ in 0..60 {
            events.extend(sim.step(&mut actor, RIGHT, &level.blocks, &mut session));
        }
        assert_eq!(events, vec![SessionEvent::Won]);
        assert_eq!(session.state(), SessionState::Won);
    }

    #[test]
    fn walking_right_on_lava_gap_level_dies() {
        let sim = Simulator::default();
        let level = lava_gap_level();
        let mut actor = Actor::new(50.0, 400.0, 30.0);
        let mut session = GameSession::new();

        let mut deaths = 0;
        for _ in 0..400 {
            deaths += sim
                .step(&mut actor, RIGHT, &level.blocks, &mut session)
                .iter()
                .filter(|e| matches!(e, SessionEvent::Died { .. }))
                .count();
        }
        assert_eq!(deaths, 1);
        assert_eq!(session.state(), SessionState::Dead);
        assert!(actor.x > 200.0, "walked off the start platform first");
    }

    #[test]
    fn death_ends_the_step_before_later_blocks() {
        let sim = Simulator::default();
        let blocks = [
            Block::lava(40.0, 390.0, 50.0, 50.0),
            Block::checkpoint(40.0, 390.0, 50.0, 50.0),
        ];
        let mut actor = Actor::new(50.0, 400.0, 30.0);
        let mut session = GameSession::new();

        let events = sim.step(&mut actor, JUMP, &blocks, &mut session);
        assert_eq!(
            events,
            vec![SessionEvent::Died {
                cause: DeathCause::Lava
            }]
        );
        assert_eq!(session.state(), SessionState::Dead);
        assert_eq!((actor.spawn_x, actor.spawn_y), (50.0, 400.0));
        // Gravity and the jump never ran.
        assert_eq!((actor.y, actor.vy), (400.0, 0.0));
        assert!(!actor.grounded);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn control_sequence(max_len: usize) -> impl Strategy<Value = Vec<Controls>> {
            proptest::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>())
                    .prop_map(|(left, right, jump)| Controls { left, right, jump }),
                1..max_len,
            )
        }

        proptest! {
            #[test]
            fn speed_never_exceeds_cap(
                inputs in control_sequence(200)
            ) {
                let sim = Simulator::default();
                let level = flat_level();
                let mut actor = grounded_actor(100.0);
                let mut session = GameSession::new();
                for controls in inputs {
                    sim.step(&mut actor, controls, &level.blocks, &mut session);
                    prop_assert!(actor.vx.abs() <= sim.physics().max_speed);
                    prop_assert!(actor.x.is_finite() && actor.y.is_finite());
                }
            }

            #[test]
            fn never_sinks_into_flat_floor(
                inputs in control_sequence(300)
            ) {
                let sim = Simulator::default();
                let level = flat_level();
                let mut actor = Actor::new(100.0, 400.0, 30.0);
                let mut session = GameSession::new();
                for controls in inputs {
                    sim.step(&mut actor, controls, &level.blocks, &mut session);
                    prop_assert!(actor.y + actor.height <= 550.0);
                    prop_assert!(session.is_playing());
                }
            }
        }
    }
}
