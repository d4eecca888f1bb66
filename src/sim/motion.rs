//! Motion engine: velocity steps with fence reflection
//!
//! Reflection is a single step. When the tentative box leaves the fence
//! on an axis, that velocity component is negated and the reversed
//! velocity is added once more on that axis, which can leave the box up
//! to one step past the fence edge. Loss detection relies on this, so
//! positions are never snapped to the edge.

use crate::geom::Region;
use crate::layer::{MoverId, Scene};

use super::collision::{fence_crossing, on_bottom_edge};

/// Advance one moving layer from its `pos_next`.
///
/// Returns true when the tentative box's bottom edge lands exactly on
/// the fence bottom (the defended edge was reached).
pub fn advance(scene: &mut Scene, mover: MoverId, fence: &Region) -> bool {
    let layer_id = scene.mover(mover).layer;
    let mut velocity = scene.mover(mover).velocity;
    let shape = *scene.shape_of(layer_id);

    let mut next = scene.layer(layer_id).pos_next + velocity;
    let bounds = shape.bounds(next);

    let crossed = fence_crossing(&bounds, fence);
    for axis in 0..2 {
        if crossed[axis] {
            velocity[axis] = -velocity[axis];
            next[axis] += velocity[axis];
        }
    }
    let breached = on_bottom_edge(&bounds, fence);

    scene.mover_mut(mover).velocity = velocity;
    scene.layer_mut(layer_id).pos_next = next;
    breached
}

/// Advance a fixed batch in lockstep. Returns true if any member
/// reached the fence bottom.
pub fn advance_batch(scene: &mut Scene, batch: &[MoverId], fence: &Region) -> bool {
    let mut breached = false;
    for &mover in batch {
        breached |= advance(scene, mover, fence);
    }
    breached
}
