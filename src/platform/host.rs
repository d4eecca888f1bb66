//! In-memory collaborators for running the core off-device
//!
//! - `FrameBuffer`: panel model with an auto-advancing write cursor
//! - `ToneLog`: records every buzzer period written
//! - `HostTimer`: tick gate that latches ticks raised while masked
//! - `ScriptedInput` / `Autopilot`: button snapshots from a list or a seeded RNG

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Buttons, DisplaySink, InputSource, TickGate, ToneSink};
use crate::Color;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::geom::{Region, Vec2};

/// Panel contents plus the write-window state
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    area: Option<Region>,
    cursor: Vec2,
    /// Draw areas declared so far
    pub areas_set: u64,
    /// Colours written so far (including ones outside any area)
    pub colors_written: u64,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
            area: None,
            cursor: Vec2::ZERO,
            areas_set: 0,
            colors_written: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Colour at `(x, y)`, `None` when off-panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// One character per `cell` x `cell` block: `.` if the block is
    /// entirely `background`, `#` otherwise
    pub fn ascii_preview(&self, cell: i32, background: Color) -> String {
        let cell = cell.max(1);
        let mut out = String::new();
        for by in (0..self.height).step_by(cell as usize) {
            for bx in (0..self.width).step_by(cell as usize) {
                let lit = (by..(by + cell).min(self.height)).any(|y| {
                    (bx..(bx + cell).min(self.width))
                        .any(|x| self.pixel(x, y) != Some(background))
                });
                out.push(if lit { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl DisplaySink for FrameBuffer {
    fn set_draw_area(&mut self, area: Region) {
        self.area = Some(area);
        self.cursor = area.top_left;
        self.areas_set += 1;
    }

    fn write_color(&mut self, color: Color) {
        self.colors_written += 1;
        let Some(area) = self.area else { return };

        let Vec2 { x, y } = self.cursor;
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }

        // Advance row-major, wrapping back to the top of the window
        self.cursor.x += 1;
        if self.cursor.x > area.bottom_right.x {
            self.cursor.x = area.top_left.x;
            self.cursor.y += 1;
            if self.cursor.y > area.bottom_right.y {
                self.cursor.y = area.top_left.y;
            }
        }
    }
}

/// Buzzer that remembers what it was told
#[derive(Debug, Clone, Default)]
pub struct ToneLog {
    pub periods: Vec<u16>,
}

impl ToneLog {
    /// Count of non-silent tones started
    pub fn blips(&self) -> usize {
        self.periods.iter().filter(|&&p| p != 0).count()
    }

    /// Whether the buzzer is currently silent
    pub fn is_silent(&self) -> bool {
        self.periods.last().is_none_or(|&p| p == 0)
    }
}

impl ToneSink for ToneLog {
    fn set_tone(&mut self, period: u16) {
        self.periods.push(period);
    }
}

/// Periodic tick source with an interrupt-enable flag.
///
/// Ticks raised while masked stay pending until the caller drains them
/// after the mask is lifted, like a latched interrupt flag.
#[derive(Debug, Clone)]
pub struct HostTimer {
    enabled: bool,
    pending: u32,
    /// Completed disable/enable windows
    pub masked_windows: u32,
}

impl Default for HostTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl HostTimer {
    pub fn new() -> Self {
        Self {
            enabled: true,
            pending: 0,
            masked_windows: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Raise one tick. Returns true when it should be dispatched now.
    pub fn raise(&mut self) -> bool {
        if self.enabled {
            true
        } else {
            self.pending += 1;
            false
        }
    }

    /// Ticks latched while masked, cleared on read. Always 0 while masked.
    pub fn take_pending(&mut self) -> u32 {
        if !self.enabled {
            return 0;
        }
        std::mem::take(&mut self.pending)
    }
}

impl TickGate for HostTimer {
    fn disable_tick(&mut self) {
        self.enabled = false;
    }

    fn enable_tick(&mut self) {
        if !self.enabled {
            self.masked_windows += 1;
        }
        self.enabled = true;
    }
}

/// Replays a fixed list of snapshots, then reports nothing pressed
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: Vec<Buttons>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(script: Vec<Buttons>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn read_buttons(&mut self) -> Buttons {
        let b = self.script.get(self.cursor).copied().unwrap_or(Buttons::NONE);
        self.cursor += 1;
        b
    }
}

/// Seeded random player: holds a direction for a few frames at a time
/// and taps fire now and then
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    held: Buttons,
    hold_frames: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: Buttons::NONE,
            hold_frames: 0,
        }
    }
}

impl InputSource for Autopilot {
    fn read_buttons(&mut self) -> Buttons {
        if self.hold_frames == 0 {
            self.held = match self.rng.random_range(0..3) {
                0 => Buttons::LEFT,
                1 => Buttons::RIGHT,
                _ => Buttons::NONE,
            };
            self.hold_frames = self.rng.random_range(2..12);
        }
        self.hold_frames -= 1;

        if self.rng.random_bool(0.2) {
            self.held.union(Buttons::FIRE_A)
        } else {
            self.held
        }
    }
}
