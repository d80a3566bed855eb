use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Shift the rectangle horizontally.
    pub fn offset_x(&self, dx: f32) -> Self {
        Self {
            x: self.x + dx,
            ..*self
        }
    }
}

/// Anything with an axis-aligned bounding box.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Strict AABB overlap. Rectangles that only share an edge do not intersect.
pub fn intersects(a: &impl Bounded, b: &impl Bounded) -> bool {
    let a = a.bounds();
    let b = b.bounds();
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn edge_touch_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn corner_touch_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn contained_rect_intersects() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 2.0, 2.0);
        assert!(intersects(&outer, &inner));
    }

    #[test]
    fn inflate_grows_every_side() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0).inflate(4.0);
        assert_eq!(r, Rect::new(6.0, 16.0, 38.0, 48.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn intersection_is_symmetric(
                ax in -500.0f32..500.0, ay in -500.0f32..500.0,
                aw in 0.5f32..200.0, ah in 0.5f32..200.0,
                bx in -500.0f32..500.0, by in -500.0f32..500.0,
                bw in 0.5f32..200.0, bh in 0.5f32..200.0
            ) {
                let a = Rect::new(ax, ay, aw, ah);
                let b = Rect::new(bx, by, bw, bh);
                prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
            }

            #[test]
            fn horizontal_neighbour_never_intersects(
                x in -500i32..500, y in -500i32..500,
                w in 1i32..200, h in 1i32..200,
                other_w in 1i32..200, dy in -100i32..100
            ) {
                // Integer-valued inputs keep `a.x + a.width == b.x` exact.
                let a = Rect::new(x as f32, y as f32, w as f32, h as f32);
                let b = Rect::new((x + w) as f32, (y + dy) as f32, other_w as f32, h as f32);
                prop_assert!(!intersects(&a, &b));
            }

            #[test]
            fn vertical_neighbour_never_intersects(
                x in -500i32..500, y in -500i32..500,
                w in 1i32..200, h in 1i32..200,
                dx in -100i32..100, other_h in 1i32..200
            ) {
                let a = Rect::new(x as f32, y as f32, w as f32, h as f32);
                let b = Rect::new((x + dx) as f32, (y + h) as f32, w as f32, other_h as f32);
                prop_assert!(!intersects(&a, &b));
            }
        }
    }
}
