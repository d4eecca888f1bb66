//! Platform abstraction layer
//!
//! The core never touches hardware. It talks to four collaborators:
//! - Display: declare a draw area, then stream colours row-major
//! - Input: a debounced snapshot of pressed buttons
//! - Tone: set a buzzer period (0 silences it)
//! - Tick gate: mask/unmask the periodic tick interrupt
//!
//! `host` provides in-memory implementations of all four.

pub mod host;

use crate::Color;
use crate::geom::Region;

/// Panel write path
pub trait DisplaySink {
    /// Declare the inclusive area the following colours fill
    fn set_draw_area(&mut self, area: Region);
    /// Write the next pixel; the panel advances its cursor row-major
    /// within the declared area
    fn write_color(&mut self, color: Color);
}

/// Source of the current button snapshot
pub trait InputSource {
    fn read_buttons(&mut self) -> Buttons;
}

/// Buzzer output
pub trait ToneSink {
    /// Drive the buzzer with the given period in timer cycles; 0 is silence
    fn set_tone(&mut self, period: u16);
}

/// Mask for the periodic tick interrupt
pub trait TickGate {
    fn disable_tick(&mut self);
    fn enable_tick(&mut self);
}

/// Tick interrupt masked for the lifetime of the guard.
///
/// Hold it only around the position swap; the masked time must stay
/// bounded by the moving-layer count.
pub struct CriticalSection<'a, G: TickGate + ?Sized> {
    gate: &'a mut G,
}

impl<'a, G: TickGate + ?Sized> CriticalSection<'a, G> {
    pub fn enter(gate: &'a mut G) -> Self {
        gate.disable_tick();
        Self { gate }
    }
}

impl<G: TickGate + ?Sized> Drop for CriticalSection<'_, G> {
    fn drop(&mut self) {
        self.gate.enable_tick();
    }
}

/// Debounced snapshot of the four buttons, one bit per pressed button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const LEFT: Buttons = Buttons(1 << 0);
    pub const FIRE_A: Buttons = Buttons(1 << 1);
    pub const FIRE_B: Buttons = Buttons(1 << 2);
    pub const RIGHT: Buttons = Buttons(1 << 3);

    const MASK: u8 = 0x0F;

    pub const fn from_bits(bits: u8) -> Self {
        Buttons(bits & Self::MASK)
    }

    /// Convert a raw switch port value (pull-ups, 0 = pressed)
    pub const fn from_active_low(raw: u8) -> Self {
        Buttons(!raw & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn union(self, other: Buttons) -> Self {
        Buttons(self.0 | other.0)
    }

    /// Any button of `other` pressed
    pub const fn intersects(self, other: Buttons) -> bool {
        self.0 & other.0 != 0
    }

    pub fn left(self) -> bool {
        self.intersects(Buttons::LEFT)
    }

    pub fn right(self) -> bool {
        self.intersects(Buttons::RIGHT)
    }

    pub fn fire(self) -> bool {
        self.intersects(Buttons::FIRE_A.union(Buttons::FIRE_B))
    }
}
