use obby_core::level::{Difficulty, LevelDescription};

use crate::{GenerateError, LevelGenerator};

/// The active level plus a counter of how many times it has been replaced.
///
/// Replacement is all-or-nothing: a failed generation leaves both the level and the
/// counter exactly as they were.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSlot {
    level: LevelDescription,
    generation: u64,
}

impl LevelSlot {
    pub fn new(level: LevelDescription) -> Self {
        Self {
            level,
            generation: 0,
        }
    }

    pub fn level(&self) -> &LevelDescription {
        &self.level
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Install a complete level. Returns the new generation.
    pub fn accept(&mut self, level: LevelDescription) -> u64 {
        let stats = level.stats();
        self.level = level;
        self.generation += 1;
        tracing::info!(
            generation = self.generation,
            blocks = stats.block_count,
            length = stats.length,
            "level accepted"
        );
        self.generation
    }

    /// Ask `generator` for a new level and install it on success.
    pub async fn regenerate<G: LevelGenerator>(
        &mut self,
        generator: &G,
        theme: &str,
        difficulty: Difficulty,
    ) -> Result<u64, GenerateError> {
        match generator.generate(theme, difficulty).await {
            Ok(level) => Ok(self.accept(level)),
            Err(e) => {
                tracing::warn!(theme, %difficulty, error = %e, "level generation failed");
                Err(e)
            },
        }
    }
}

impl Default for LevelSlot {
    fn default() -> Self {
        Self::new(LevelDescription::default())
    }
}
