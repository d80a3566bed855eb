pub mod config;
pub mod events;
pub mod geometry;
pub mod level;

pub use config::{KeyBindings, ObbyConfig, PhysicsConfig, ViewportConfig};
pub use events::{DeathCause, SessionEvent};
pub use geometry::{Bounded, Rect, intersects};
pub use level::{Block, BlockType, Difficulty, LevelDescription, LevelStats};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::level::{Block, LevelDescription};

    /// Background used by test levels.
    pub const TEST_BACKGROUND: &str = "#000000";

    /// Wrap blocks into a level with a plain background.
    pub fn level_of(blocks: Vec<Block>) -> LevelDescription {
        LevelDescription::new(blocks, TEST_BACKGROUND)
    }

    /// A single wide platform whose top sits at y=550.
    pub fn flat_level() -> LevelDescription {
        level_of(vec![Block::platform(-1000.0, 550.0, 10_000.0, 50.0)])
    }

    /// A level with no geometry at all.
    pub fn empty_level() -> LevelDescription {
        level_of(Vec::new())
    }

    /// Start platform, a lava pool, and a finish block far beyond jump range.
    pub fn lava_gap_level() -> LevelDescription {
        level_of(vec![
            Block::platform(0.0, 550.0, 200.0, 50.0),
            Block::lava(400.0, 550.0, 300.0, 50.0),
            Block::finish(750.0, 550.0, 100.0, 50.0),
        ])
    }

    /// Start platform, a short lava strip, and a finish block one jump away.
    pub fn short_jump_level() -> LevelDescription {
        level_of(vec![
            Block::platform(0.0, 550.0, 300.0, 50.0),
            Block::lava(300.0, 560.0, 100.0, 40.0),
            Block::finish(400.0, 550.0, 100.0, 50.0),
        ])
    }
}
