use glam::{Vec2, Vec4};

/// Drawing pass a command belongs to, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Blocks,
    Actor,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Primitive geometry in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        min: Vec2,
        size: Vec2,
    },
    RoundedRect {
        min: Vec2,
        size: Vec2,
        radius: f32,
    },
    Polygon {
        points: Vec<Vec2>,
    },
    Circle {
        center: Vec2,
        radius: f32,
    },
    Text {
        anchor: Vec2,
        text: String,
        size: f32,
        align: TextAlign,
    },
}

impl Shape {
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Shape::Rect {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Top-left corner, or the anchor point for circles and text.
    pub fn origin(&self) -> Vec2 {
        match self {
            Shape::Rect { min, .. } | Shape::RoundedRect { min, .. } => *min,
            Shape::Polygon { points } => points.first().copied().unwrap_or(Vec2::ZERO),
            Shape::Circle { center, .. } => *center,
            Shape::Text { anchor, .. } => *anchor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Vec4),
    Stroke { color: Vec4, width: f32 },
}

impl Paint {
    pub fn color(&self) -> Vec4 {
        match self {
            Paint::Fill(color) | Paint::Stroke { color, .. } => *color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub layer: Layer,
    pub shape: Shape,
    pub paint: Paint,
}

/// Ordered display list for one frame. Painting the commands in order reproduces the
/// frame; nothing else is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
        }
    }

    pub fn push(&mut self, layer: Layer, shape: Shape, paint: Paint) {
        self.commands.push(DrawCommand {
            layer,
            shape,
            paint,
        });
    }

    pub fn fill(&mut self, layer: Layer, shape: Shape, color: Vec4) {
        self.push(layer, shape, Paint::Fill(color));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn in_layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.layer == layer)
    }

    /// All text strings in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match &c.shape {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
