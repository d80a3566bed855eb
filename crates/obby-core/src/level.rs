use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounded, Rect};

/// Block types a level is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Platform,
    Lava,
    Checkpoint,
    Finish,
}

/// One rectangle of level geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Block {
    pub fn new(kind: BlockType, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
            color: None,
        }
    }

    pub fn platform(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(BlockType::Platform, x, y, width, height)
    }

    pub fn lava(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(BlockType::Lava, x, y, width, height)
    }

    pub fn checkpoint(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(BlockType::Checkpoint, x, y, width, height)
    }

    pub fn finish(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(BlockType::Finish, x, y, width, height)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl Bounded for Block {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A complete level as produced by a generator: blocks in draw order plus sky color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescription {
    pub blocks: Vec<Block>,
    pub background_color: String,
}

impl LevelDescription {
    pub fn new(blocks: Vec<Block>, background_color: impl Into<String>) -> Self {
        Self {
            blocks,
            background_color: background_color.into(),
        }
    }

    /// Parse a level from its JSON wire form.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn stats(&self) -> LevelStats {
        LevelStats::of(&self.blocks)
    }
}

impl Default for LevelDescription {
    fn default() -> Self {
        sample_level()
    }
}

/// Summary numbers shown next to the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    pub block_count: usize,
    /// Rightmost extent of any block, 0 for an empty level.
    pub length: f32,
}

impl LevelStats {
    pub fn of(blocks: &[Block]) -> Self {
        let length = blocks
            .iter()
            .map(|b| b.x + b.width)
            .fold(0.0f32, f32::max);
        Self {
            block_count: blocks.len(),
            length,
        }
    }
}

/// Requested difficulty for a generated level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// Theme text used when the shell has nothing better.
pub const DEFAULT_THEME: &str =
    "A candy land obstacle course with chocolate rivers and cookie platforms.";

/// Background shown with the built-in level.
pub const SAMPLE_BACKGROUND: &str = "#ecfeff";

/// The built-in level loaded before anything has been generated.
pub fn sample_level() -> LevelDescription {
    LevelDescription::new(
        vec![
            Block::platform(0.0, 550.0, 200.0, 50.0).with_color("#86efac"),
            Block::platform(250.0, 450.0, 100.0, 20.0).with_color("#fca5a5"),
            Block::lava(400.0, 550.0, 300.0, 50.0).with_color("#fda4af"),
            Block::platform(450.0, 350.0, 80.0, 20.0).with_color("#fcd34d"),
            Block::platform(600.0, 250.0, 80.0, 20.0).with_color("#93c5fd"),
            Block::finish(750.0, 550.0, 100.0, 50.0).with_color("#fbbf24"),
        ],
        SAMPLE_BACKGROUND,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_json_uses_lowercase_type_tag() {
        let json = r##"{"x":0,"y":550,"width":200,"height":50,"type":"lava","color":"#ff0000"}"##;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind, BlockType::Lava);
        assert_eq!(block.color.as_deref(), Some("#ff0000"));
        assert_eq!(block.width, 200.0);
    }

    #[test]
    fn block_color_is_optional() {
        let json = r#"{"x":1,"y":2,"width":3,"height":4,"type":"checkpoint"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind, BlockType::Checkpoint);
        assert!(block.color.is_none());
        let back = serde_json::to_string(&block).unwrap();
        assert!(!back.contains("color"));
    }

    #[test]
    fn level_description_uses_camel_case_background() {
        let json = r##"{"blocks":[{"x":0,"y":550,"width":200,"height":50,"type":"platform"}],"backgroundColor":"#101010"}"##;
        let level = LevelDescription::from_json(json).unwrap();
        assert_eq!(level.blocks.len(), 1);
        assert_eq!(level.background_color, "#101010");
    }

    #[test]
    fn unknown_block_type_is_rejected() {
        let json = r##"{"blocks":[{"x":0,"y":0,"width":1,"height":1,"type":"spring"}],"backgroundColor":"#fff"}"##;
        assert!(LevelDescription::from_json(json).is_err());
    }

    #[test]
    fn stats_report_count_and_length() {
        let stats = sample_level().stats();
        assert_eq!(stats.block_count, 6);
        assert_eq!(stats.length, 850.0);
    }

    #[test]
    fn empty_level_has_zero_length() {
        let stats = LevelStats::of(&[]);
        assert_eq!(stats.block_count, 0);
        assert_eq!(stats.length, 0.0);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("brutal".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn sample_level_has_platform_under_spawn() {
        let level = sample_level();
        assert!(level.blocks.iter().any(|b| b.kind == BlockType::Platform
            && b.x <= 50.0
            && b.x + b.width >= 80.0
            && b.y > 400.0));
        assert_eq!(
            level.blocks.last().map(|b| b.kind),
            Some(BlockType::Finish)
        );
    }
}
