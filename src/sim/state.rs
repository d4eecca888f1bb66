//! World state and the standard scene
//!
//! All mutable game state lives in one `World` value that is passed by
//! reference to the compositor, the motion engine and the rules. The
//! tick path writes `pos_next`, scores and flags; the foreground loop
//! commits positions and reads input.

use serde::{Deserialize, Serialize};

use crate::Color;
use crate::consts::*;
use crate::geom::{Region, Vec2};
use crate::layer::{LayerId, MoverId, Scene, SceneError};
use crate::screen_center;
use crate::settings::Settings;
use crate::shape::Shape;

/// Targets advanced together every simulation step
pub const TARGET_COUNT: usize = 3;
/// Projectile slots, fired alternately
pub const SHOT_COUNT: usize = 2;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation and redraw running
    Playing,
    /// A target breached the bottom of the fence
    GameOver,
    /// Win score reached
    Won,
}

/// A projectile slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub layer: LayerId,
    /// In flight: driven by the tick path instead of following the ship
    pub fired: bool,
}

/// Layers that translate together as the player's ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    pub hull: LayerId,
    pub mast: LayerId,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct World {
    pub scene: Scene,
    /// Region moving targets reflect off
    pub fence: Region,
    pub background: Color,
    pub score: u32,
    pub phase: GamePhase,
    pub ship: Ship,
    pub shots: [Shot; SHOT_COUNT],
    /// Fixed batch advanced by the motion engine, in list order
    pub targets: [MoverId; TARGET_COUNT],
    /// Slot the next fire request goes to
    shot_parity: usize,
}

impl World {
    /// Build the standard scene.
    ///
    /// Draw order, front to back: three target circles with the field
    /// outline slotted before the smallest one, then the ship hull and
    /// mast, then both projectiles (hidden behind the hull until fired).
    pub fn new(settings: &Settings) -> Result<Self, SceneError> {
        let mut scene = Scene::new();
        let center = screen_center();

        let circle14 = scene.add_shape(Shape::circle(14))?;
        let circle20 = scene.add_shape(Shape::circle(20))?;
        let circle8 = scene.add_shape(Shape::circle(8))?;
        let field = scene.add_shape(Shape::outline(
            SCREEN_WIDTH / 2 - 10,
            SCREEN_HEIGHT / 2 - 10,
        ))?;
        let hull_rect = scene.add_shape(Shape::rect(8, 5))?;
        let mast_rect = scene.add_shape(Shape::rect(2, 8))?;
        let bolt = scene.add_shape(Shape::rect(1, 2))?;

        let sky = scene.push_layer(circle14, Vec2::new(center.x + 10, 35), COLOR_SKY_BLUE)?;
        let gold = scene.push_layer(circle20, Vec2::new(30, 30), COLOR_GOLD)?;
        let field_layer = scene.push_layer(field, center, COLOR_WHITE)?;
        let violet = scene.push_layer(circle8, Vec2::new(70, 33), COLOR_VIOLET)?;
        let hull = scene.push_layer(hull_rect, center + Vec2::new(0, 65), COLOR_SEA_GREEN)?;
        let mast = scene.push_layer(mast_rect, center + Vec2::new(0, 62), COLOR_SEA_GREEN)?;
        let shot_a = scene.push_layer(bolt, center + Vec2::new(0, 62), COLOR_RED)?;
        let shot_b = scene.push_layer(bolt, center + Vec2::new(0, 62), COLOR_RED)?;

        let targets = [
            scene.push_mover(sky, Vec2::new(2, 1))?,
            scene.push_mover(gold, Vec2::new(1, 2))?,
            scene.push_mover(violet, Vec2::new(1, 1))?,
        ];
        // Moved by the rules, not the motion engine
        for layer in [hull, mast, shot_a, shot_b] {
            scene.push_mover(layer, Vec2::ZERO)?;
        }

        let fence = scene.bounds(field_layer);

        Ok(Self {
            scene,
            fence,
            background: settings.background,
            score: 0,
            phase: GamePhase::Playing,
            ship: Ship { hull, mast },
            shots: [
                Shot {
                    layer: shot_a,
                    fired: false,
                },
                Shot {
                    layer: shot_b,
                    fired: false,
                },
            ],
            targets,
            shot_parity: 0,
        })
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Enter a terminal phase. Returns false if the game had already
    /// ended, so side effects fire once.
    pub fn finish(&mut self, phase: GamePhase) -> bool {
        if self.is_over() || phase == GamePhase::Playing {
            return false;
        }
        self.phase = phase;
        log::info!("Game ended: {:?} with score {}", phase, self.score);
        true
    }

    /// Slot for the next fire request; alternates A, B, A, ...
    pub fn take_shot_slot(&mut self) -> usize {
        let slot = self.shot_parity;
        self.shot_parity = (self.shot_parity + 1) % SHOT_COUNT;
        slot
    }

    pub fn layer_of_target(&self, index: usize) -> LayerId {
        self.scene.mover(self.targets[index]).layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scene() {
        let world = World::new(&Settings::default()).unwrap();
        assert_eq!(world.scene.layer_count(), 8);
        assert_eq!(world.scene.mover_count(), 7);
        assert_eq!(world.fence, Region::new(Vec2::new(10, 10), Vec2::new(118, 150)));
        assert_eq!(world.scene.layer(world.ship.hull).pos, Vec2::new(64, 145));
        assert_eq!(world.phase, GamePhase::Playing);

        // Every moving layer is also drawn
        for (_, mover) in world.scene.movers() {
            assert!(world.scene.is_drawn(mover.layer));
        }
        // Both projectiles share one template
        assert_eq!(
            world.scene.layer(world.shots[0].layer).shape,
            world.scene.layer(world.shots[1].layer).shape
        );
    }

    #[test]
    fn test_shot_slots_alternate() {
        let mut world = World::new(&Settings::default()).unwrap();
        let slots: Vec<_> = (0..5).map(|_| world.take_shot_slot()).collect();
        assert_eq!(slots, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_finish_only_once() {
        let mut world = World::new(&Settings::default()).unwrap();
        assert!(world.finish(GamePhase::GameOver));
        assert!(!world.finish(GamePhase::GameOver));
        assert!(!world.finish(GamePhase::Won));
        assert_eq!(world.phase, GamePhase::GameOver);
    }
}
