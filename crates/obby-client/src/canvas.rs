use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::scene::{Paint, Scene, Shape, TextAlign};
use crate::theme::css_color;

const FONT_FAMILY: &str = "\"Fredoka\", sans-serif";

/// Paints a [`Scene`] onto a 2D canvas context.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    pub fn paint(&self, scene: &Scene) {
        for command in scene.commands() {
            if let Err(e) = self.draw(&command.shape, &command.paint) {
                crate::diag::console_warn!("Draw failed: {e:?}");
            }
        }
    }

    fn draw(&self, shape: &Shape, paint: &Paint) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let style = css_color(paint.color());
        match paint {
            Paint::Fill(_) => ctx.set_fill_style_str(&style),
            Paint::Stroke { width, .. } => {
                ctx.set_stroke_style_str(&style);
                ctx.set_line_width(f64::from(*width));
            },
        }

        match shape {
            Shape::Rect { min, size } => {
                let (x, y, w, h) = (min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                match paint {
                    Paint::Fill(_) => ctx.fill_rect(x, y, w, h),
                    Paint::Stroke { .. } => ctx.stroke_rect(x, y, w, h),
                }
            },
            Shape::RoundedRect { min, size, radius } => {
                let (x, y, w, h) = (min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                let r = f64::from(*radius);
                ctx.begin_path();
                ctx.move_to(x + r, y);
                ctx.line_to(x + w - r, y);
                ctx.quadratic_curve_to(x + w, y, x + w, y + r);
                ctx.line_to(x + w, y + h - r);
                ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
                ctx.line_to(x + r, y + h);
                ctx.quadratic_curve_to(x, y + h, x, y + h - r);
                ctx.line_to(x, y + r);
                ctx.quadratic_curve_to(x, y, x + r, y);
                ctx.close_path();
                self.finish_path(paint);
            },
            Shape::Polygon { points } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                self.finish_path(paint);
            },
            Shape::Circle { center, radius } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, f64::from(*radius), 0.0, TAU)?;
                self.finish_path(paint);
            },
            Shape::Text {
                anchor,
                text,
                size,
                align,
            } => {
                ctx.set_font(&format!("bold {size}px {FONT_FAMILY}"));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.fill_text(text, anchor.x as f64, anchor.y as f64)?;
            },
        }
        Ok(())
    }

    fn finish_path(&self, paint: &Paint) {
        match paint {
            Paint::Fill(_) => self.ctx.fill(),
            Paint::Stroke { .. } => self.ctx.stroke(),
        }
    }
}
