//! Dirty-region compositor
//!
//! There is no framebuffer to patch: every pixel that may have changed
//! is recomputed from the scene and streamed to the panel. A pixel takes
//! the colour of the first layer in draw order whose shape contains it,
//! so earlier layers occlude later ones; if none do, it gets the
//! background.

use crate::Color;
use crate::geom::{Region, Vec2};
use crate::layer::Scene;
use crate::platform::{CriticalSection, DisplaySink, TickGate};

/// Colour of a single pixel given the committed layer positions
pub fn resolve_pixel(scene: &Scene, background: Color, pixel: Vec2) -> Color {
    scene
        .draw_order()
        .find(|(_, layer)| scene.shape(layer.shape).contains(layer.pos, pixel))
        .map_or(background, |(_, layer)| layer.color)
}

/// Recompose `region` (clipped to `screen`) as one bounded-area write.
///
/// Returns the number of pixels streamed.
pub fn composite_region<D: DisplaySink + ?Sized>(
    scene: &Scene,
    background: Color,
    region: Region,
    screen: &Region,
    display: &mut D,
) -> usize {
    let Some(area) = region.clip(screen) else {
        return 0;
    };
    display.set_draw_area(area);
    for pixel in area.points() {
        display.write_color(resolve_pixel(scene, background, pixel));
    }
    area.area()
}

/// Compose the whole screen (startup draw)
pub fn draw_all<D: DisplaySink + ?Sized>(
    scene: &Scene,
    background: Color,
    screen: &Region,
    display: &mut D,
) -> usize {
    composite_region(scene, background, *screen, screen, display)
}

/// Swap in the positions computed by the tick path.
///
/// The tick source is masked for the swap loop only, so the handler
/// never sees a half-committed list.
pub fn commit_positions<G: TickGate + ?Sized>(scene: &mut Scene, gate: &mut G) {
    let _masked = CriticalSection::enter(gate);
    scene.commit_positions();
}

/// Per-frame redraw statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawStats {
    pub regions: usize,
    pub pixels: usize,
}

/// Redraw the dirty region of every moving layer whose committed
/// position changed since the previous commit
pub fn redraw_moved<D: DisplaySink + ?Sized>(
    scene: &Scene,
    background: Color,
    screen: &Region,
    display: &mut D,
) -> RedrawStats {
    let mut stats = RedrawStats::default();
    for (_, mover) in scene.movers() {
        let layer = scene.layer(mover.layer);
        if layer.pos == layer.pos_last {
            continue;
        }
        let pixels = composite_region(
            scene,
            background,
            scene.dirty_region(mover.layer),
            screen,
            display,
        );
        if pixels > 0 {
            stats.regions += 1;
            stats.pixels += pixels;
        }
    }
    log::trace!(
        "redraw: {} regions, {} pixels",
        stats.regions,
        stats.pixels
    );
    stats
}

/// Commit then redraw: one foreground frame of the compositor
pub fn commit_and_redraw<D, G>(
    scene: &mut Scene,
    background: Color,
    screen: &Region,
    display: &mut D,
    gate: &mut G,
) -> RedrawStats
where
    D: DisplaySink + ?Sized,
    G: TickGate + ?Sized,
{
    commit_positions(scene, gate);
    redraw_moved(scene, background, screen, display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerId;
    use crate::platform::host::{FrameBuffer, HostTimer};
    use crate::shape::Shape;

    const BG: Color = 0;
    const FRONT: Color = 0xAAAA;
    const BACK: Color = 0x5555;

    fn screen() -> Region {
        Region::new(Vec2::ZERO, Vec2::new(31, 31))
    }

    /// Square in front of a larger circle, both moving
    fn overlapping() -> (Scene, LayerId, LayerId) {
        let mut scene = Scene::new();
        let square = scene.add_shape(Shape::rect(3, 3)).unwrap();
        let disc = scene.add_shape(Shape::circle(6)).unwrap();
        let front = scene.push_layer(square, Vec2::new(10, 10), FRONT).unwrap();
        let back = scene.push_layer(disc, Vec2::new(12, 12), BACK).unwrap();
        scene.push_mover(front, Vec2::ZERO).unwrap();
        scene.push_mover(back, Vec2::ZERO).unwrap();
        (scene, front, back)
    }

    #[test]
    fn test_earlier_layer_occludes_later() {
        let (scene, _, _) = overlapping();
        // Inside both shapes
        assert_eq!(resolve_pixel(&scene, BG, Vec2::new(12, 12)), FRONT);
        // Circle only
        assert_eq!(resolve_pixel(&scene, BG, Vec2::new(17, 12)), BACK);
        // Neither
        assert_eq!(resolve_pixel(&scene, BG, Vec2::new(30, 30)), BG);
    }

    #[test]
    fn test_draw_all_streams_every_pixel() {
        let (scene, _, _) = overlapping();
        let mut fb = FrameBuffer::new(32, 32);
        let n = draw_all(&scene, BG, &screen(), &mut fb);
        assert_eq!(n, 32 * 32);
        assert_eq!(fb.colors_written, 32 * 32);
        assert_eq!(fb.areas_set, 1);
        assert_eq!(fb.pixel(10, 10), Some(FRONT));
        assert_eq!(fb.pixel(12, 17), Some(BACK));
        assert_eq!(fb.pixel(0, 0), Some(BG));
    }

    #[test]
    fn test_moved_layer_leaves_no_trail() {
        let (mut scene, front, _) = overlapping();
        let mut fb = FrameBuffer::new(32, 32);
        let mut timer = HostTimer::new();
        draw_all(&scene, BG, &screen(), &mut fb);

        scene.layer_mut(front).pos_next = Vec2::new(25, 25);
        let stats = commit_and_redraw(&mut scene, BG, &screen(), &mut fb, &mut timer);

        assert_eq!(stats.regions, 1);
        // Vacated corner now shows background, overlap shows the circle
        assert_eq!(fb.pixel(7, 7), Some(BG));
        assert_eq!(fb.pixel(12, 12), Some(BACK));
        assert_eq!(fb.pixel(25, 25), Some(FRONT));
        assert_eq!(timer.masked_windows, 1);
        assert!(timer.is_enabled());
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let (mut scene, front, _) = overlapping();
        scene.layer_mut(front).pos_next = Vec2::new(14, 9);
        scene.commit_positions();

        let mut first = FrameBuffer::new(32, 32);
        let mut second = FrameBuffer::new(32, 32);
        let a = redraw_moved(&scene, BG, &screen(), &mut first);
        let b = redraw_moved(&scene, BG, &screen(), &mut second);
        assert_eq!(a, b);
        assert_eq!(first.pixels(), second.pixels());

        // Same buffer twice gives the same picture too
        redraw_moved(&scene, BG, &screen(), &mut first);
        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn test_stationary_layers_not_redrawn() {
        let (mut scene, _, _) = overlapping();
        let mut fb = FrameBuffer::new(32, 32);
        let mut timer = HostTimer::new();
        let stats = commit_and_redraw(&mut scene, BG, &screen(), &mut fb, &mut timer);
        assert_eq!(stats, RedrawStats::default());
        assert_eq!(fb.colors_written, 0);
    }

    #[test]
    fn test_dirty_region_clipped_to_screen() {
        let (mut scene, front, _) = overlapping();
        scene.layer_mut(front).pos_next = Vec2::new(31, 31);
        scene.commit_positions();
        let mut fb = FrameBuffer::new(32, 32);
        let stats = redraw_moved(&scene, BG, &screen(), &mut fb);
        // Union (7,7)-(34,34) clipped to (7,7)-(31,31)
        assert_eq!(stats.pixels, 25 * 25);
        assert_eq!(fb.pixel(31, 31), Some(FRONT));
    }
}
