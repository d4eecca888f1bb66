//! Periodic tick handler
//!
//! Runs in interrupt context on the device: it must finish quickly and
//! never block. Raw ticks are divided down; every Nth one runs a single
//! simulation step.

use crate::platform::ToneSink;
use crate::settings::Settings;

use super::motion::advance_batch;
use super::rules::{ShotOutcome, drive_shot};
use super::state::{GamePhase, SHOT_COUNT, World};

/// What one simulation step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// The step ran (false once the game has ended)
    pub advanced: bool,
    /// Targets struck this step
    pub hits: u32,
    /// A target reached the fence bottom this step
    pub breached: bool,
    /// The win score was reached this step
    pub won: bool,
}

/// Raw tick counter and divider
#[derive(Debug, Clone, Default)]
pub struct TickHandler {
    count: u32,
}

impl TickHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one raw tick. Returns the step report on ticks that ran
    /// the simulation.
    pub fn on_tick<T: ToneSink + ?Sized>(
        &mut self,
        world: &mut World,
        settings: &Settings,
        tone: &mut T,
    ) -> Option<StepReport> {
        self.count += 1;
        if self.count < settings.tick_divisor {
            return None;
        }
        self.count = 0;
        Some(step(world, settings, tone))
    }
}

/// One simulation step: advance the target batch, then fly every fired
/// projectile. A no-op once the game has ended.
pub fn step<T: ToneSink + ?Sized>(world: &mut World, settings: &Settings, tone: &mut T) -> StepReport {
    let mut report = StepReport::default();
    if world.is_over() {
        return report;
    }
    report.advanced = true;

    if advance_batch(&mut world.scene, &world.targets, &world.fence) {
        report.breached = world.finish(GamePhase::GameOver);
        return report;
    }

    for slot in 0..SHOT_COUNT {
        if let ShotOutcome::Hit(_) = drive_shot(world, slot, settings, tone) {
            report.hits += 1;
        }
    }

    if world.score >= settings.win_score {
        report.won = world.finish(GamePhase::Won);
    }
    report
}
