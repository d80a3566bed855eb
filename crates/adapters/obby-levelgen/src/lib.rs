//! Level generation for the obby runtime: a remote HTTP generator, an offline procedural
//! generator, and the slot that swaps the active level only on success.

pub mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod procedural;
pub mod prompt;
pub mod slot;

use std::future::Future;

use obby_core::level::{Difficulty, LevelDescription};

pub use config::GeneratorConfig;
pub use error::GenerateError;
#[cfg(feature = "http")]
pub use http::{HttpLevelGenerator, parse_level_response};
pub use procedural::ProceduralGenerator;
pub use slot::LevelSlot;

/// Anything that can turn a theme and difficulty into a complete level.
pub trait LevelGenerator {
    fn generate(
        &self,
        theme: &str,
        difficulty: Difficulty,
    ) -> impl Future<Output = Result<LevelDescription, GenerateError>> + Send;
}

/// Trim `theme`, rejecting it if nothing is left.
pub fn validate_theme(theme: &str) -> Result<&str, GenerateError> {
    let trimmed = theme.trim();
    if trimmed.is_empty() {
        return Err(GenerateError::EmptyTheme);
    }
    Ok(trimmed)
}

/// Reject levels that deserialized but cannot be played.
pub fn validate_level(level: LevelDescription) -> Result<LevelDescription, GenerateError> {
    if level.blocks.is_empty() {
        return Err(GenerateError::Parse("level has no blocks".to_string()));
    }
    if let Some(block) = level
        .blocks
        .iter()
        .find(|b| !(b.width > 0.0 && b.height > 0.0) || !b.x.is_finite() || !b.y.is_finite())
    {
        return Err(GenerateError::Parse(format!(
            "degenerate {:?} block at ({}, {})",
            block.kind, block.x, block.y
        )));
    }
    Ok(level)
}
