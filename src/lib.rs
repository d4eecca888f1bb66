//! Shape Motion - layered shapes on a framebuffer-less display
//!
//! Core modules:
//! - `geom`: Integer vectors and axis-aligned regions
//! - `shape`: Closed set of shape templates (rect, circle, outline)
//! - `layer`: Fixed-capacity scene arena (draw-order and moving-layer lists)
//! - `renderer`: Dirty-region compositor and 5x7 status text
//! - `sim`: Tick-driven motion, game rules and world state
//! - `platform`: Display, input, tone and tick seams plus host implementations
//! - `game`: Foreground loop tying input, redraw and the tick handler together

pub mod audio;
pub mod game;
pub mod geom;
pub mod layer;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod shape;
pub mod sim;

pub use game::Game;
pub use geom::{Region, Vec2};
pub use settings::{Pace, Settings};

/// 16-bit RGB565 pixel colour as streamed to the panel
pub type Color = u16;

/// Display and palette constants
pub mod consts {
    use super::{Color, Region, Vec2};

    /// Panel dimensions (portrait)
    pub const SCREEN_WIDTH: i32 = 128;
    pub const SCREEN_HEIGHT: i32 = 160;

    /// Every on-screen pixel, inclusive corners
    pub const SCREEN: Region = Region {
        top_left: Vec2::ZERO,
        bottom_right: Vec2::new(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1),
    };

    pub const COLOR_BLACK: Color = 0x0000;
    pub const COLOR_WHITE: Color = 0xFFFF;
    pub const COLOR_RED: Color = 0xF800;
    pub const COLOR_GREEN: Color = 0x07E0;
    pub const COLOR_GOLD: Color = 0xFEA0;
    pub const COLOR_SKY_BLUE: Color = 0x867D;
    pub const COLOR_VIOLET: Color = 0xEC1D;
    pub const COLOR_SEA_GREEN: Color = 0x2C4A;
}

/// Centre of the screen
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(consts::SCREEN_WIDTH / 2, consts::SCREEN_HEIGHT / 2)
}
