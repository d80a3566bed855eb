use glam::Vec4;
use serde::{Deserialize, Serialize};

use obby_core::level::{Block, BlockType};

/// Render palette. All colors are RGBA `[f32; 4]` in 0..=1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub blocks: BlockTheme,
    pub actor: ActorTheme,
    pub overlay: OverlayTheme,
}

/// Fallbacks for blocks without a usable color, plus the fixed decorations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTheme {
    pub platform: [f32; 4],
    pub lava: [f32; 4],
    pub checkpoint_base: [f32; 4],
    pub finish: [f32; 4],
    pub highlight: [f32; 4],
    pub highlight_height: f32,
    pub checkpoint_pole: [f32; 4],
    pub flag_active: [f32; 4],
    pub flag_inactive: [f32; 4],
    pub finish_label: [f32; 4],
    pub finish_border: [f32; 4],
    pub finish_border_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTheme {
    pub body: [f32; 4],
    pub corner_radius: f32,
    pub eye: [f32; 4],
    pub pupil: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayTheme {
    pub backdrop: [f32; 4],
    pub dead_title: [f32; 4],
    pub won_title: [f32; 4],
    pub subtitle: [f32; 4],
    pub title_size: f32,
    pub subtitle_size: f32,
}

impl Default for BlockTheme {
    fn default() -> Self {
        Self {
            platform: hex(0x666666),
            lava: hex(0xef4444),
            checkpoint_base: hex(0x334155),
            finish: hex(0x666666),
            highlight: [1.0, 1.0, 1.0, 0.3],
            highlight_height: 6.0,
            checkpoint_pole: hex(0x64748b),
            flag_active: hex(0x22c55e),
            flag_inactive: hex(0xcbd5e1),
            finish_label: [1.0, 1.0, 1.0, 1.0],
            finish_border: hex(0xfbbf24),
            finish_border_width: 3.0,
        }
    }
}

impl Default for ActorTheme {
    fn default() -> Self {
        Self {
            body: hex(0x06b6d4),
            corner_radius: 8.0,
            eye: [1.0, 1.0, 1.0, 1.0],
            pupil: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl Default for OverlayTheme {
    fn default() -> Self {
        Self {
            backdrop: [1.0, 1.0, 1.0, 0.7],
            dead_title: hex(0xf43f5e),
            won_title: hex(0x8b5cf6),
            subtitle: hex(0x64748b),
            title_size: 80.0,
            subtitle_size: 24.0,
        }
    }
}

impl Theme {
    /// Parse a theme, falling back to defaults for anything missing or malformed.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!("Failed to parse theme: {e}, using defaults");
                Self::default()
            },
        }
    }

    /// Fill color of a block: its own color if it parses, the per-type default otherwise.
    pub fn block_fill(&self, block: &Block) -> Vec4 {
        block
            .color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or_else(|| self.block_default(block.kind))
    }

    pub fn block_default(&self, kind: BlockType) -> Vec4 {
        rgba(match kind {
            BlockType::Platform => &self.blocks.platform,
            BlockType::Lava => &self.blocks.lava,
            BlockType::Checkpoint => &self.blocks.checkpoint_base,
            BlockType::Finish => &self.blocks.finish,
        })
    }
}

/// Convert an RGBA array to a glam vector.
pub fn rgba(c: &[f32; 4]) -> Vec4 {
    Vec4::from_array(*c)
}

/// Opaque color from a packed `0xRRGGBB` value.
const fn hex(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Parse a CSS hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(text: &str) -> Option<Vec4> {
    let digits = text.trim().strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    let short = |i: usize| channel(&digits[i..=i].repeat(2));
    let long = |i: usize| channel(&digits[2 * i..2 * i + 2]);

    match digits.len() {
        3 => Some(Vec4::new(short(0)?, short(1)?, short(2)?, 1.0)),
        4 => Some(Vec4::new(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Some(Vec4::new(long(0)?, long(1)?, long(2)?, 1.0)),
        8 => Some(Vec4::new(long(0)?, long(1)?, long(2)?, long(3)?)),
        _ => None,
    }
}

/// CSS `rgba()` string for a color, as canvas fill and stroke styles expect.
pub fn css_color(color: Vec4) -> String {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        byte(color.x),
        byte(color.y),
        byte(color.z),
        color.w.clamp(0.0, 1.0)
    )
}
