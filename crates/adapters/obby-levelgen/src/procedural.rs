use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use obby_core::config::{ACTOR_SIZE, VIEWPORT_HEIGHT};
use obby_core::level::{Block, Difficulty, LevelDescription};

use crate::prompt::{CHECKPOINT_SPACING, COURSE_LENGTH, MAX_JUMP_DISTANCE, MAX_JUMP_HEIGHT};
use crate::{GenerateError, LevelGenerator, validate_theme};

/// Top of the platform under the spawn point.
const START_Y: f32 = 470.0;
const START_WIDTH: f32 = 300.0;
const FLOAT_THICKNESS: f32 = 20.0;
const FINISH_WIDTH: f32 = 200.0;
const FINISH_HEIGHT: f32 = 60.0;
const CHECKPOINT_WIDTH: f32 = 40.0;
const CHECKPOINT_HEIGHT: f32 = 20.0;
/// Highest and lowest platform tops.
const TOP_RANGE: (f32, f32) = (250.0, 520.0);
/// Where the layout loop may stop, leaving room for the last platform and the finish.
const LAYOUT_END: (f32, f32) = (COURSE_LENGTH.0 - FINISH_WIDTH, COURSE_LENGTH.1 - 1000.0);
/// Long gaps only allow a small climb on the far side.
const LONG_GAP: f32 = 120.0;
const LONG_GAP_RISE: f32 = 40.0;

/// Shape parameters for one difficulty.
#[derive(Debug, Clone, Copy)]
struct Tuning {
    gap: (f32, f32),
    width: (f32, f32),
    rise: f32,
    lava_chance: f64,
    /// Platforms reach the bottom of the world instead of floating.
    grounded: bool,
    lava_y: f32,
}

impl Tuning {
    fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                gap: (30.0, 80.0),
                width: (220.0, 420.0),
                rise: MAX_JUMP_HEIGHT / 3.0,
                lava_chance: 0.4,
                grounded: true,
                lava_y: 590.0,
            },
            Difficulty::Medium => Self {
                gap: (50.0, 100.0),
                width: (110.0, 220.0),
                rise: MAX_JUMP_HEIGHT * 2.0 / 3.0,
                lava_chance: 0.5,
                grounded: false,
                lava_y: 560.0,
            },
            Difficulty::Hard => Self {
                gap: (120.0, 150.0),
                width: (70.0, 120.0),
                rise: MAX_JUMP_HEIGHT - 20.0,
                lava_chance: 0.85,
                grounded: false,
                lava_y: 560.0,
            },
        }
    }
}

/// Colors for one visual mood.
struct Palette {
    background: &'static str,
    platform: &'static str,
    lava: &'static str,
    checkpoint: &'static str,
    finish: &'static str,
}

const PALETTES: [Palette; 5] = [
    Palette {
        background: "#ecfeff",
        platform: "#86efac",
        lava: "#fda4af",
        checkpoint: "#94a3b8",
        finish: "#fbbf24",
    },
    Palette {
        background: "#1e1b4b",
        platform: "#818cf8",
        lava: "#f43f5e",
        checkpoint: "#c7d2fe",
        finish: "#facc15",
    },
    Palette {
        background: "#fff7ed",
        platform: "#fdba74",
        lava: "#dc2626",
        checkpoint: "#78716c",
        finish: "#a3e635",
    },
    Palette {
        background: "#f0f9ff",
        platform: "#bae6fd",
        lava: "#38bdf8",
        checkpoint: "#64748b",
        finish: "#f472b6",
    },
    Palette {
        background: "#fdf4ff",
        platform: "#f0abfc",
        lava: "#a21caf",
        checkpoint: "#6b7280",
        finish: "#34d399",
    },
];

/// Offline generator. The same seed, theme and difficulty always yield the same level.
#[derive(Debug, Clone, Copy)]
pub struct ProceduralGenerator {
    seed: u64,
}

impl ProceduralGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Build a linear course synchronously.
    pub fn build(&self, theme: &str, difficulty: Difficulty) -> LevelDescription {
        let theme_hash = fnv1a(theme.trim().to_lowercase().as_bytes());
        let mut rng =
            StdRng::seed_from_u64(self.seed ^ theme_hash ^ (difficulty as u64).rotate_left(32));
        let palette = &PALETTES[(theme_hash % PALETTES.len() as u64) as usize];
        let tuning = Tuning::for_difficulty(difficulty);

        let target_length = rng.random_range(LAYOUT_END.0..=LAYOUT_END.1);
        let mut next_checkpoint = rng.random_range(CHECKPOINT_SPACING.0..=CHECKPOINT_SPACING.1);
        let mut blocks = Vec::new();

        let mut top = START_Y;
        blocks.push(platform(0.0, top, START_WIDTH, &tuning, palette));
        let mut cursor = START_WIDTH;

        while cursor < target_length {
            let gap = rng.random_range(tuning.gap.0..=tuning.gap.1);
            let rise_limit = if gap > LONG_GAP {
                tuning.rise.min(LONG_GAP_RISE)
            } else {
                tuning.rise
            };
            let new_top = (top - rng.random_range(-tuning.rise..=rise_limit))
                .clamp(TOP_RANGE.0, TOP_RANGE.1);
            let width = rng.random_range(tuning.width.0..=tuning.width.1);

            if rng.random_bool(tuning.lava_chance) {
                blocks.push(
                    Block::lava(cursor, tuning.lava_y, gap, VIEWPORT_HEIGHT - tuning.lava_y)
                        .with_color(palette.lava),
                );
            }

            let x = cursor + gap;
            blocks.push(platform(x, new_top, width, &tuning, palette));

            if x >= next_checkpoint {
                blocks.push(
                    Block::checkpoint(
                        x + (width - CHECKPOINT_WIDTH) / 2.0,
                        new_top - CHECKPOINT_HEIGHT,
                        CHECKPOINT_WIDTH,
                        CHECKPOINT_HEIGHT,
                    )
                    .with_color(palette.checkpoint),
                );
                next_checkpoint = x + rng.random_range(CHECKPOINT_SPACING.0..=CHECKPOINT_SPACING.1);
            }

            top = new_top;
            cursor = x + width;
        }

        let gap = rng.random_range(tuning.gap.0..=tuning.gap.1.min(MAX_JUMP_DISTANCE - ACTOR_SIZE));
        let finish_top = (top + FINISH_HEIGHT / 2.0).min(VIEWPORT_HEIGHT - FINISH_HEIGHT);
        blocks.push(
            Block::finish(cursor + gap, finish_top, FINISH_WIDTH, FINISH_HEIGHT)
                .with_color(palette.finish),
        );

        tracing::debug!(
            seed = self.seed,
            %difficulty,
            blocks = blocks.len(),
            "procedural level built"
        );
        LevelDescription::new(blocks, palette.background)
    }
}

fn platform(x: f32, top: f32, width: f32, tuning: &Tuning, palette: &Palette) -> Block {
    let height = if tuning.grounded {
        VIEWPORT_HEIGHT - top
    } else {
        FLOAT_THICKNESS
    };
    Block::platform(x, top, width, height).with_color(palette.platform)
}

/// Stable 64-bit FNV-1a, so theme seeding does not depend on the std hasher.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}

impl LevelGenerator for ProceduralGenerator {
    async fn generate(
        &self,
        theme: &str,
        difficulty: Difficulty,
    ) -> Result<LevelDescription, GenerateError> {
        let theme = validate_theme(theme)?;
        Ok(self.build(theme, difficulty))
    }
}
