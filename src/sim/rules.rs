//! Game rules: ship translation, firing and projectile flight
//!
//! Out-of-range requests are policy, not errors: the ship stops at the
//! edge of its range and a fire request for a busy slot is dropped.

use crate::audio::{self, SoundEffect};
use crate::geom::Vec2;
use crate::layer::MoverId;
use crate::platform::ToneSink;
use crate::settings::Settings;

use super::collision::first_hit;
use super::state::World;

/// Horizontal move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// What a projectile did during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Slot not fired
    Idle,
    /// Moved up by one shot step
    Climbing,
    /// Reached the ceiling and went back to the ship
    Recycled,
    /// Struck a target and went back to the ship
    Hit(MoverId),
}

/// Move the ship one step, clamped to the playable x range.
///
/// Hull, mast and every projectile still docked follow with the same
/// delta; projectiles in flight are left alone. The delta is added to
/// `pos_next`, so a snap-back written by the tick path since the last
/// commit is kept. Returns the delta applied.
pub fn translate_ship(world: &mut World, direction: Direction, settings: &Settings) -> i32 {
    let hull_x = world.scene.layer(world.ship.hull).pos.x;
    let step = match direction {
        Direction::Left => -settings.ship_step,
        Direction::Right => settings.ship_step,
    };
    let target_x = (hull_x + step).clamp(settings.ship_min_x, settings.ship_max_x);
    let dx = target_x - hull_x;
    if dx == 0 {
        return 0;
    }

    let delta = Vec2::new(dx, 0);
    let docked = world.shots.map(|s| (!s.fired).then_some(s.layer));
    let companions = [Some(world.ship.hull), Some(world.ship.mast)];
    for id in companions.into_iter().chain(docked).flatten() {
        world.scene.layer_mut(id).pos_next += delta;
    }
    dx
}

/// Handle one fire edge. The parity counter picks the slot; a slot
/// already in flight ignores the request. Returns the slot launched.
pub fn fire(world: &mut World) -> Option<usize> {
    let slot = world.take_shot_slot();
    if world.shots[slot].fired {
        log::debug!("fire ignored: slot {slot} still in flight");
        return None;
    }
    world.shots[slot].fired = true;
    log::debug!("fired slot {slot}");
    Some(slot)
}

/// Drive one projectile for a simulation step (tick path).
pub fn drive_shot<T: ToneSink + ?Sized>(
    world: &mut World,
    slot: usize,
    settings: &Settings,
    tone: &mut T,
) -> ShotOutcome {
    let shot = world.shots[slot];
    if !shot.fired {
        return ShotOutcome::Idle;
    }

    let pos = world.scene.layer(shot.layer).pos;
    let dock = world.scene.layer(world.ship.hull).pos_next;

    let (mut next, mut outcome) = if pos.y > settings.shot_ceiling {
        (Vec2::new(pos.x, pos.y - settings.shot_step), ShotOutcome::Climbing)
    } else {
        world.shots[slot].fired = false;
        log::debug!("slot {slot} reached the ceiling");
        (dock, ShotOutcome::Recycled)
    };

    if let Some(target) = first_hit(&world.scene, shot.layer, &world.targets) {
        world.score += 1;
        audio::play(tone, SoundEffect::Hit, settings);
        world.shots[slot].fired = false;
        next = dock;
        let target_layer = world.scene.mover(target).layer;
        world.scene.layer_mut(target_layer).pos_next = settings.target_respawn;
        log::debug!("slot {slot} hit target, score {}", world.score);
        outcome = ShotOutcome::Hit(target);
    }

    world.scene.layer_mut(shot.layer).pos_next = next;
    outcome
}
