//! Collision tests on bounding regions
//!
//! Two questions are asked every step: which axes of a tentative box
//! leave the fence, and whether a projectile box touches a target box.

use crate::geom::Region;
use crate::layer::{LayerId, MoverId, Scene};

/// Per-axis fence violation of `bounds`: `[x, y]`
pub fn fence_crossing(bounds: &Region, fence: &Region) -> [bool; 2] {
    let mut crossed = [false; 2];
    for (axis, hit) in crossed.iter_mut().enumerate() {
        *hit = bounds.top_left[axis] < fence.top_left[axis]
            || bounds.bottom_right[axis] > fence.bottom_right[axis];
    }
    crossed
}

/// Whether the bottom edge of `bounds` sits exactly on the fence bottom
#[inline]
pub fn on_bottom_edge(bounds: &Region, fence: &Region) -> bool {
    bounds.bottom_right.y == fence.bottom_right.y
}

/// First target (in batch order) whose committed bounds touch the
/// projectile's committed bounds
pub fn first_hit(scene: &Scene, projectile: LayerId, targets: &[MoverId]) -> Option<MoverId> {
    let shot = scene.bounds(projectile);
    targets
        .iter()
        .copied()
        .find(|&target| scene.bounds(scene.mover(target).layer).overlaps(&shot))
}
