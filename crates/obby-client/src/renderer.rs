use glam::{Vec2, Vec4};

use obby_core::config::ViewportConfig;
use obby_core::geometry::Bounded;
use obby_core::level::{Block, BlockType, LevelDescription};
use obby_sim::{Actor, Camera, ObbyGame, SessionState};

use crate::scene::{Layer, Paint, Scene, Shape, TextAlign};
use crate::theme::{Theme, parse_hex_color, rgba};

const FINISH_LABEL: &str = "FINISH";
const FINISH_LABEL_SIZE: f32 = 20.0;
/// Horizontal shift that roughly centers the label over the block.
const FINISH_LABEL_INSET: f32 = 35.0;
const FINISH_BORDER_INSET: f32 = 4.0;
const POLE_HEIGHT: f32 = 40.0;
const EYE_RADIUS: f32 = 5.0;
const PUPIL_RADIUS: f32 = 2.0;

/// Projects game state into a [`Scene`]. Holds no per-frame state.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
    viewport: ViewportConfig,
}

impl Renderer {
    pub fn new(theme: Theme, viewport: ViewportConfig) -> Self {
        Self { theme, viewport }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render_game(&self, game: &ObbyGame, time_ms: f64) -> Scene {
        self.render(
            game.level(),
            game.actor(),
            game.camera(),
            game.state(),
            time_ms,
        )
    }

    /// Draw one frame. `time_ms` is wall-clock milliseconds and only drives the lava
    /// pulse and the walk bounce.
    pub fn render(
        &self,
        level: &LevelDescription,
        actor: &Actor,
        camera: &Camera,
        state: SessionState,
        time_ms: f64,
    ) -> Scene {
        let mut scene = Scene::new();
        let (width, height) = (self.viewport.width, self.viewport.height);

        let background = parse_hex_color(&level.background_color).unwrap_or(Vec4::ONE);
        scene.fill(Layer::Background, Shape::rect(0.0, 0.0, width, height), background);

        let offset = camera.draw_offset();
        for block in &level.blocks {
            self.draw_block(&mut scene, block, actor, offset, time_ms);
        }

        if state != SessionState::Dead {
            self.draw_actor(&mut scene, actor, offset, time_ms);
        }

        match state {
            SessionState::Dead => self.draw_overlay(
                &mut scene,
                "OOPS!",
                rgba(&self.theme.overlay.dead_title),
                "Press R to Retry",
            ),
            SessionState::Won => self.draw_overlay(
                &mut scene,
                "YAY!",
                rgba(&self.theme.overlay.won_title),
                "Press R to Play Again",
            ),
            SessionState::Playing => {},
        }

        scene
    }

    fn draw_block(
        &self,
        scene: &mut Scene,
        block: &Block,
        actor: &Actor,
        offset: f32,
        time_ms: f64,
    ) {
        let blocks = &self.theme.blocks;
        let x = block.x + offset;
        let body = Shape::rect(x, block.y, block.width, block.height);
        let fill = self.theme.block_fill(block);

        match block.kind {
            BlockType::Lava => {
                let pulse = lava_alpha(time_ms);
                scene.fill(Layer::Blocks, body, fill * Vec4::new(1.0, 1.0, 1.0, pulse));
            },
            BlockType::Checkpoint => {
                scene.fill(
                    Layer::Blocks,
                    Shape::rect(x + 5.0, block.y - POLE_HEIGHT, 4.0, POLE_HEIGHT),
                    rgba(&blocks.checkpoint_pole),
                );
                let flag = if actor.spawn_x == block.x {
                    &blocks.flag_active
                } else {
                    &blocks.flag_inactive
                };
                scene.fill(
                    Layer::Blocks,
                    Shape::Polygon {
                        points: vec![
                            Vec2::new(x + 9.0, block.y - 40.0),
                            Vec2::new(x + 35.0, block.y - 30.0),
                            Vec2::new(x + 9.0, block.y - 20.0),
                        ],
                    },
                    rgba(flag),
                );
                scene.fill(Layer::Blocks, body, fill);
            },
            BlockType::Platform | BlockType::Finish => {
                scene.fill(Layer::Blocks, body, fill);
                scene.fill(
                    Layer::Blocks,
                    Shape::rect(x, block.y, block.width, blocks.highlight_height),
                    rgba(&blocks.highlight),
                );
            },
        }

        if block.kind == BlockType::Finish {
            scene.fill(
                Layer::Blocks,
                Shape::Text {
                    anchor: Vec2::new(x + block.width / 2.0 - FINISH_LABEL_INSET, block.y - 15.0),
                    text: FINISH_LABEL.to_string(),
                    size: FINISH_LABEL_SIZE,
                    align: TextAlign::Left,
                },
                rgba(&blocks.finish_label),
            );
            let border = block.bounds().offset_x(offset).inflate(FINISH_BORDER_INSET);
            scene.push(
                Layer::Blocks,
                Shape::rect(border.x, border.y, border.width, border.height),
                Paint::Stroke {
                    color: rgba(&blocks.finish_border),
                    width: blocks.finish_border_width,
                },
            );
        }
    }

    fn draw_actor(&self, scene: &mut Scene, actor: &Actor, offset: f32, time_ms: f64) {
        let theme = &self.theme.actor;
        let bounce = walk_bounce(actor, time_ms);
        let x = actor.x + offset;
        let y = actor.y - bounce;

        scene.fill(
            Layer::Actor,
            Shape::RoundedRect {
                min: Vec2::new(x, y),
                size: Vec2::new(actor.width, actor.height + bounce),
                radius: theme.corner_radius,
            },
            rgba(&theme.body),
        );

        // Eyes shift towards the direction of travel.
        let (eyes, pupils) = if actor.vx >= 0.0 {
            ([20.0, 8.0], [22.0, 10.0])
        } else {
            ([8.0, 20.0], [6.0, 18.0])
        };
        for dx in eyes {
            scene.fill(
                Layer::Actor,
                Shape::Circle {
                    center: Vec2::new(x + dx, y + 10.0),
                    radius: EYE_RADIUS,
                },
                rgba(&theme.eye),
            );
        }
        for dx in pupils {
            scene.fill(
                Layer::Actor,
                Shape::Circle {
                    center: Vec2::new(x + dx, y + 10.0),
                    radius: PUPIL_RADIUS,
                },
                rgba(&theme.pupil),
            );
        }
    }

    fn draw_overlay(&self, scene: &mut Scene, title: &str, title_color: Vec4, subtitle: &str) {
        let overlay = &self.theme.overlay;
        let (width, height) = (self.viewport.width, self.viewport.height);
        scene.fill(
            Layer::Overlay,
            Shape::rect(0.0, 0.0, width, height),
            rgba(&overlay.backdrop),
        );
        scene.fill(
            Layer::Overlay,
            Shape::Text {
                anchor: Vec2::new(width / 2.0, height / 2.0 - 10.0),
                text: title.to_string(),
                size: overlay.title_size,
                align: TextAlign::Center,
            },
            title_color,
        );
        scene.fill(
            Layer::Overlay,
            Shape::Text {
                anchor: Vec2::new(width / 2.0, height / 2.0 + 50.0),
                text: subtitle.to_string(),
                size: overlay.subtitle_size,
                align: TextAlign::Center,
            },
            rgba(&overlay.subtitle),
        );
    }
}

/// Lava opacity, pulsing between 0.6 and 1.0.
pub fn lava_alpha(time_ms: f64) -> f32 {
    ((time_ms * 0.005).sin() * 0.2 + 0.8) as f32
}

/// Vertical squash while walking on the ground.
pub fn walk_bounce(actor: &Actor, time_ms: f64) -> f32 {
    if actor.grounded && actor.vx.abs() > 0.1 {
        ((time_ms * 0.02).sin() * 2.0) as f32
    } else {
        0.0
    }
}
