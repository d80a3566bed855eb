use obby_core::config::{DEFAULT_SPAWN_X, DEFAULT_SPAWN_Y, VIEWPORT_HEIGHT};
use obby_core::level::Difficulty;

/// Horizontal distance a running jump reliably clears.
pub const MAX_JUMP_DISTANCE: f32 = 180.0;
/// Height a standing jump reliably clears.
pub const MAX_JUMP_HEIGHT: f32 = 120.0;
/// Shortest and longest course the generators aim for.
pub const COURSE_LENGTH: (f32, f32) = (3000.0, 5000.0);
/// Spacing between checkpoints.
pub const CHECKPOINT_SPACING: (f32, f32) = (800.0, 1000.0);
/// Sampling temperature for remote generation.
pub const TEMPERATURE: f32 = 0.7;

/// Layout rules for one difficulty, shared by the prompt and the procedural generator.
pub fn difficulty_rules(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => {
            "Easy: continuous ground with few gaps; lava only along the very bottom at y=590."
        },
        Difficulty::Medium => {
            "Medium: floating platforms, gaps of 50-100 units, a few lava traps."
        },
        Difficulty::Hard => {
            "Hard: small platforms, gaps of 120-150 units, lots of height changes and lava."
        },
    }
}

/// Standing instructions for the level designer model.
pub fn system_instruction(theme: &str, difficulty: Difficulty) -> String {
    let (min_len, max_len) = COURSE_LENGTH;
    let (min_cp, max_cp) = CHECKPOINT_SPACING;
    format!(
        "You design levels for a 2D obstacle-course platformer.\n\
         Coordinates: x starts at 0 and grows to the right; y runs from 0 (top) to \
         {VIEWPORT_HEIGHT} (bottom). The player spawns at x={DEFAULT_SPAWN_X}, y={DEFAULT_SPAWN_Y}.\n\
         Rules:\n\
         1. Build a linear course from x=0 to somewhere between x={min_len} and x={max_len}.\n\
         2. The player jumps at most ~{MAX_JUMP_DISTANCE} units across and ~{MAX_JUMP_HEIGHT} \
         units up; never space platforms further apart than that.\n\
         3. Block types: 'platform' is safe ground in varied sizes; 'lava' kills on touch, \
         along the bottom of the world or as traps on platforms; 'checkpoint' saves progress, \
         one every {min_cp}-{max_cp} units on safe ground; 'finish' is one large block at the \
         very end.\n\
         4. Difficulty '{difficulty}'. {rules}\n\
         5. Pick a backgroundColor and block colors (hex) that fit the theme \"{theme}\".\n\
         Always put a platform directly under the spawn point (x=50, y between 450 and 500).\n\
         Reply with JSON only: {{\"blocks\": [{{\"x\", \"y\", \"width\", \"height\", \"type\", \
         \"color\"}}], \"backgroundColor\": \"#rrggbb\"}}.",
        rules = difficulty_rules(difficulty),
    )
}

/// The user turn for one request.
pub fn user_prompt(theme: &str) -> String {
    format!("Generate a level JSON based on this theme: {theme}")
}
