//! Integer vector and axis-aligned region primitives
//!
//! Pixel space: x grows right, y grows down. Regions are inclusive on
//! both corners, so a region whose corners coincide covers one pixel.

use serde::{Deserialize, Serialize};

/// Two signed integer axes (x, y)
pub type Vec2 = glam::IVec2;

/// Axis-aligned bounding box, inclusive corners, always normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl Region {
    /// Build a region from any two opposite corners
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            top_left: a.min(b),
            bottom_right: a.max(b),
        }
    }

    /// Region spanning `center - half` to `center + half`
    pub fn around(center: Vec2, half: Vec2) -> Self {
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bottom_right.x - self.top_left.x + 1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom_right.y - self.top_left.y + 1
    }

    /// Number of pixels covered
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Smallest region covering both
    pub fn union(&self, other: &Region) -> Region {
        Region {
            top_left: self.top_left.min(other.top_left),
            bottom_right: self.bottom_right.max(other.bottom_right),
        }
    }

    /// Intersection with `bounds`, `None` when nothing is left
    pub fn clip(&self, bounds: &Region) -> Option<Region> {
        let top_left = self.top_left.max(bounds.top_left);
        let bottom_right = self.bottom_right.min(bounds.bottom_right);
        if top_left.x > bottom_right.x || top_left.y > bottom_right.y {
            return None;
        }
        Some(Region {
            top_left,
            bottom_right,
        })
    }

    /// Inclusive point test
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.top_left.x
            && p.x <= self.bottom_right.x
            && p.y >= self.top_left.y
            && p.y <= self.bottom_right.y
    }

    /// Inclusive overlap test (shared edges count)
    pub fn overlaps(&self, other: &Region) -> bool {
        self.top_left.x <= other.bottom_right.x
            && other.top_left.x <= self.bottom_right.x
            && self.top_left.y <= other.bottom_right.y
            && other.top_left.y <= self.bottom_right.y
    }

    /// Pixels in row-major order (the order the panel expects)
    pub fn points(&self) -> impl Iterator<Item = Vec2> + use<> {
        let Region {
            top_left,
            bottom_right,
        } = *self;
        (top_left.y..=bottom_right.y)
            .flat_map(move |y| (top_left.x..=bottom_right.x).map(move |x| Vec2::new(x, y)))
    }
}
