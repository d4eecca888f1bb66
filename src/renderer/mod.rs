//! Rendering module
//!
//! Pixel-exact redraw for a panel with no framebuffer: the compositor
//! resolves dirty regions through the layer list, `text` draws status
//! messages with a 5x7 font.

pub mod compositor;
pub mod text;

pub use compositor::{
    RedrawStats, commit_and_redraw, commit_positions, composite_region, draw_all, redraw_moved,
    resolve_pixel,
};
pub use text::{draw_string, format_count};
