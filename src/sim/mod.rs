//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the
//! display: the tick path only writes `pos_next`, scores and flags.
//! - Integer arithmetic only
//! - Fixed batch order for targets
//! - Tone output is the single side effect, through `ToneSink`

pub mod collision;
pub mod motion;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::{fence_crossing, first_hit, on_bottom_edge};
pub use motion::{advance, advance_batch};
pub use rules::{Direction, ShotOutcome, drive_shot, fire, translate_ship};
pub use state::{GamePhase, SHOT_COUNT, Ship, Shot, TARGET_COUNT, World};
pub use tick::{StepReport, TickHandler, step};
