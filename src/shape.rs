//! Shape templates for layers
//!
//! A shape is immutable geometry with no position of its own. Layers
//! place it by passing a center, and many layers may share one template
//! (both projectiles use the same bolt rectangle).
//!
//! Every shape answers two questions for a given center:
//! - `bounds`: the smallest region enclosing all contained pixels
//! - `contains`: whether a pixel is painted by the shape

use serde::{Deserialize, Serialize};

use crate::geom::{Region, Vec2};

/// Closed set of drawable shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled rectangle spanning `center ± half`
    Rect { half: Vec2 },
    /// Filled circle, integer radius
    Circle { radius: i32 },
    /// One-pixel border of the rectangle spanning `center ± half`
    RectOutline { half: Vec2 },
}

impl Shape {
    pub const fn rect(half_w: i32, half_h: i32) -> Self {
        Shape::Rect {
            half: Vec2::new(half_w, half_h),
        }
    }

    pub const fn circle(radius: i32) -> Self {
        Shape::Circle { radius }
    }

    pub const fn outline(half_w: i32, half_h: i32) -> Self {
        Shape::RectOutline {
            half: Vec2::new(half_w, half_h),
        }
    }

    /// Half extents of the enclosing box
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        match *self {
            Shape::Rect { half } | Shape::RectOutline { half } => half,
            Shape::Circle { radius } => Vec2::splat(radius),
        }
    }

    /// Bounding region when placed at `center`
    pub fn bounds(&self, center: Vec2) -> Region {
        Region::around(center, self.half_extent())
    }

    /// Whether `point` is painted when the shape sits at `center`
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let rel = point - center;
        match *self {
            Shape::Rect { half } => rel.x.abs() <= half.x && rel.y.abs() <= half.y,
            Shape::Circle { radius } => rel.length_squared() <= radius * radius,
            Shape::RectOutline { half } => {
                let outer = rel.x.abs() <= half.x && rel.y.abs() <= half.y;
                // Inner box shrunk by one pixel on every side
                let inner = rel.x.abs() < half.x && rel.y.abs() < half.y;
                outer && !inner
            }
        }
    }
}
