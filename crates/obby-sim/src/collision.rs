use obby_core::level::{Block, BlockType};

use crate::actor::Actor;

/// Which collision pass is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Session-level effect of touching a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Death,
    Win,
    Checkpoint { spawn_x: f32, spawn_y: f32 },
}

/// What to do to the actor after overlapping one block on one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolution {
    pub push_x: Option<f32>,
    pub push_y: Option<f32>,
    pub zero_vx: bool,
    pub zero_vy: bool,
    pub set_grounded: bool,
    pub trigger: Option<Trigger>,
}

impl Resolution {
    fn trigger(trigger: Trigger) -> Self {
        Self {
            trigger: Some(trigger),
            ..Self::default()
        }
    }

    /// Apply the positional part. Triggers are left to the caller.
    pub fn apply(&self, actor: &mut Actor) {
        if let Some(x) = self.push_x {
            actor.x = x;
        }
        if let Some(y) = self.push_y {
            actor.y = y;
        }
        if self.zero_vx {
            actor.vx = 0.0;
        }
        if self.zero_vy {
            actor.vy = 0.0;
        }
        if self.set_grounded {
            actor.grounded = true;
        }
    }
}

/// Response to an actor overlapping `block`, shared by both passes.
pub fn respond(block: &Block, actor: &Actor, axis: Axis, checkpoint_clearance: f32) -> Resolution {
    match block.kind {
        BlockType::Lava => Resolution::trigger(Trigger::Death),
        BlockType::Finish => Resolution::trigger(Trigger::Win),
        BlockType::Checkpoint => Resolution::trigger(Trigger::Checkpoint {
            spawn_x: block.x,
            spawn_y: block.y - actor.height - checkpoint_clearance,
        }),
        BlockType::Platform => solid(block, actor, axis),
    }
}

fn solid(block: &Block, actor: &Actor, axis: Axis) -> Resolution {
    match axis {
        Axis::Horizontal => {
            let push_x = if actor.vx > 0.0 {
                Some(block.x - actor.width)
            } else if actor.vx < 0.0 {
                Some(block.x + block.width)
            } else {
                None
            };
            Resolution {
                push_x,
                zero_vx: true,
                ..Resolution::default()
            }
        },
        Axis::Vertical => {
            if actor.vy > 0.0 {
                // Falling: land on top.
                Resolution {
                    push_y: Some(block.y - actor.height),
                    zero_vy: true,
                    set_grounded: true,
                    ..Resolution::default()
                }
            } else if actor.vy < 0.0 {
                // Rising: bump head.
                Resolution {
                    push_y: Some(block.y + block.height),
                    zero_vy: true,
                    ..Resolution::default()
                }
            } else {
                Resolution::default()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_actor(vx: f32, vy: f32) -> Actor {
        let mut actor = Actor::new(100.0, 100.0, 30.0);
        actor.vx = vx;
        actor.vy = vy;
        actor
    }

    #[test]
    fn lava_and_finish_only_trigger() {
        let actor = moving_actor(3.0, 2.0);
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let lava = respond(&Block::lava(0.0, 0.0, 10.0, 10.0), &actor, axis, 10.0);
            assert_eq!(lava.trigger, Some(Trigger::Death));
            assert_eq!(lava.push_x, None);
            assert!(!lava.zero_vx && !lava.zero_vy);

            let finish = respond(&Block::finish(0.0, 0.0, 10.0, 10.0), &actor, axis, 10.0);
            assert_eq!(finish.trigger, Some(Trigger::Win));
        }
    }

    #[test]
    fn checkpoint_spawn_sits_above_block() {
        let actor = moving_actor(0.0, 0.0);
        let res = respond(
            &Block::checkpoint(900.0, 500.0, 40.0, 20.0),
            &actor,
            Axis::Vertical,
            10.0,
        );
        assert_eq!(
            res.trigger,
            Some(Trigger::Checkpoint {
                spawn_x: 900.0,
                spawn_y: 460.0
            })
        );
        assert_eq!(res.push_y, None);
    }

    #[test]
    fn horizontal_solid_pushes_against_motion() {
        let block = Block::platform(120.0, 0.0, 50.0, 200.0);
        let right = respond(&block, &moving_actor(4.0, 0.0), Axis::Horizontal, 10.0);
        assert_eq!(right.push_x, Some(90.0));
        assert!(right.zero_vx);

        let left = respond(&block, &moving_actor(-4.0, 0.0), Axis::Horizontal, 10.0);
        assert_eq!(left.push_x, Some(170.0));
        assert!(left.zero_vx);

        let still = respond(&block, &moving_actor(0.0, 0.0), Axis::Horizontal, 10.0);
        assert_eq!(still.push_x, None);
        assert!(still.zero_vx);
        assert!(still.trigger.is_none());
    }

    #[test]
    fn vertical_solid_lands_or_bumps() {
        let block = Block::platform(0.0, 120.0, 500.0, 20.0);
        let falling = respond(&block, &moving_actor(0.0, 3.0), Axis::Vertical, 10.0);
        assert_eq!(falling.push_y, Some(90.0));
        assert!(falling.set_grounded && falling.zero_vy);

        let rising = respond(&block, &moving_actor(0.0, -3.0), Axis::Vertical, 10.0);
        assert_eq!(rising.push_y, Some(140.0));
        assert!(rising.zero_vy);
        assert!(!rising.set_grounded);

        let resting = respond(&block, &moving_actor(0.0, 0.0), Axis::Vertical, 10.0);
        assert_eq!(resting, Resolution::default());
    }

    #[test]
    fn apply_moves_and_stops_actor() {
        let mut actor = moving_actor(4.0, 3.0);
        Resolution {
            push_y: Some(42.0),
            zero_vy: true,
            set_grounded: true,
            ..Resolution::default()
        }
        .apply(&mut actor);
        assert_eq!(actor.y, 42.0);
        assert_eq!(actor.vy, 0.0);
        assert_eq!(actor.vx, 4.0);
        assert!(actor.grounded);
    }
}
