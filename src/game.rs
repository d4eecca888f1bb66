//! Foreground loop and tick entry point
//!
//! `Game` owns the world and is driven from two places: `on_tick` from
//! the periodic tick source, `frame` from the main loop. The frame path
//! polls the buttons, requests ship moves and shots, then commits and
//! redraws. Status text is redrawn only when it changes.

use thiserror::Error;

use crate::consts::*;
use crate::geom::Vec2;
use crate::layer::SceneError;
use crate::platform::{Buttons, DisplaySink, InputSource, TickGate, ToneSink};
use crate::renderer::{RedrawStats, commit_and_redraw, draw_all, draw_string, format_count};
use crate::settings::{Settings, SettingsError};
use crate::sim::{Direction, GamePhase, StepReport, TickHandler, World, fire, translate_ship};

/// Top-left of the score line
const SCORE_ORIGIN: Vec2 = Vec2::new(10, 0);
/// Top-left of the end-of-game message
const MESSAGE_ORIGIN: Vec2 = Vec2::new(40, 70);

#[derive(Debug, Error)]
pub enum GameError {
    #[error("scene setup failed: {0}")]
    Scene(#[from] SceneError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

pub struct Game {
    pub world: World,
    pub settings: Settings,
    ticks: TickHandler,
    last_buttons: Buttons,
    drawn_score: Option<u32>,
    drawn_phase: GamePhase,
}

impl Game {
    pub fn new(settings: Settings) -> Result<Self, GameError> {
        settings.validate()?;
        let world = World::new(&settings)?;
        log::info!(
            "New game: pace {}, tick divisor {}, win at {}",
            settings.pace.as_str(),
            settings.tick_divisor,
            settings.win_score
        );
        Ok(Self {
            world,
            settings,
            ticks: TickHandler::new(),
            last_buttons: Buttons::NONE,
            drawn_score: None,
            drawn_phase: GamePhase::Playing,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    pub fn is_over(&self) -> bool {
        self.world.is_over()
    }

    /// Full-screen draw of the initial scene plus the score line
    pub fn start<D: DisplaySink + ?Sized>(&mut self, display: &mut D) -> usize {
        let pixels = draw_all(&self.world.scene, self.world.background, &SCREEN, display);
        self.draw_status(display);
        pixels
    }

    /// Periodic tick entry point
    pub fn on_tick<T: ToneSink + ?Sized>(&mut self, tone: &mut T) -> Option<StepReport> {
        self.ticks.on_tick(&mut self.world, &self.settings, tone)
    }

    /// One pass of the foreground loop
    pub fn frame<D, I, G>(&mut self, display: &mut D, input: &mut I, gate: &mut G) -> RedrawStats
    where
        D: DisplaySink + ?Sized,
        I: InputSource + ?Sized,
        G: TickGate + ?Sized,
    {
        let buttons = input.read_buttons();
        let fire_edge = buttons.fire() && !self.last_buttons.fire();
        self.last_buttons = buttons;

        let mut stats = RedrawStats::default();
        if !self.world.is_over() {
            if buttons.left() {
                translate_ship(&mut self.world, Direction::Left, &self.settings);
            } else if buttons.right() {
                translate_ship(&mut self.world, Direction::Right, &self.settings);
            }
            if fire_edge {
                fire(&mut self.world);
            }
            stats = commit_and_redraw(
                &mut self.world.scene,
                self.world.background,
                &SCREEN,
                display,
                gate,
            );
        }

        self.draw_status(display);
        stats
    }

    fn draw_status<D: DisplaySink + ?Sized>(&mut self, display: &mut D) {
        let bg = self.world.background;
        if self.drawn_score != Some(self.world.score) {
            let mut buf = [0u8; 16];
            let line = format_count(&mut buf, "Score: ", self.world.score);
            draw_string(display, &SCREEN, SCORE_ORIGIN, line, COLOR_GREEN, bg);
            self.drawn_score = Some(self.world.score);
        }

        if self.drawn_phase != self.world.phase {
            match self.world.phase {
                GamePhase::GameOver => {
                    draw_string(display, &SCREEN, MESSAGE_ORIGIN, "GAME OVER", COLOR_RED, bg)
                }
                GamePhase::Won => {
                    draw_string(display, &SCREEN, MESSAGE_ORIGIN, "YOU WIN!", COLOR_GREEN, bg)
                }
                GamePhase::Playing => {}
            }
            self.drawn_phase = self.world.phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::host::{FrameBuffer, HostTimer, ScriptedInput, ToneLog};

    fn game() -> Game {
        Game::new(Settings::default()).unwrap()
    }

    /// Pixels of `color` inside the message box
    fn message_pixels(fb: &FrameBuffer, color: u16) -> usize {
        (70..78)
            .flat_map(|y| (40..94).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.pixel(x, y) == Some(color))
            .count()
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            tick_divisor: 0,
            ..Settings::default()
        };
        assert!(matches!(Game::new(settings), Err(GameError::Settings(_))));
    }

    #[test]
    fn test_start_draws_scene_and_score() {
        let mut g = game();
        let mut fb = FrameBuffer::default();
        assert_eq!(g.start(&mut fb), 128 * 160);
        // Hull centre
        assert_eq!(fb.pixel(64, 145), Some(COLOR_SEA_GREEN));
        // Field outline corner
        assert_eq!(fb.pixel(10, 10), Some(COLOR_WHITE));
        // Score line lit somewhere in its row band
        let lit = (0..8)
            .flat_map(|y| (10..60).map(move |x| (x, y)))
            .any(|(x, y)| fb.pixel(x, y) == Some(COLOR_GREEN));
        assert!(lit);
    }

    #[test]
    fn test_held_right_moves_ship_each_frame() {
        let mut g = game();
        let mut fb = FrameBuffer::default();
        let mut timer = HostTimer::new();
        let mut input = ScriptedInput::new(vec![Buttons::RIGHT; 3]);
        g.start(&mut fb);

        for _ in 0..3 {
            g.frame(&mut fb, &mut input, &mut timer);
        }
        assert_eq!(g.world.scene.layer(g.world.ship.hull).pos.x, 79);
        assert_eq!(fb.pixel(79, 145), Some(COLOR_SEA_GREEN));
        // Old hull position cleared
        assert_eq!(fb.pixel(57, 145), Some(COLOR_BLACK));
        assert_eq!(timer.masked_windows, 3);
        assert!(timer.is_enabled());
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut g = game();
        let mut fb = FrameBuffer::default();
        let mut timer = HostTimer::new();
        let held = Buttons::FIRE_A;
        let mut input = ScriptedInput::new(vec![held, held, held, Buttons::NONE, Buttons::FIRE_B]);

        g.frame(&mut fb, &mut input, &mut timer);
        assert!(g.world.shots[0].fired);
        g.frame(&mut fb, &mut input, &mut timer);
        g.frame(&mut fb, &mut input, &mut timer);
        // Held button: still one shot
        assert!(!g.world.shots[1].fired);

        g.frame(&mut fb, &mut input, &mut timer);
        g.frame(&mut fb, &mut input, &mut timer);
        assert!(g.world.shots[1].fired);
    }

    #[test]
    fn test_recycle_then_held_right_keeps_shot_on_ship() {
        let mut g = game();
        let mut fb = FrameBuffer::default();
        let mut timer = HostTimer::new();
        let mut tone = ToneLog::default();
        let mut input = ScriptedInput::new(vec![Buttons::RIGHT; 2]);
        g.start(&mut fb);

        fire(&mut g.world);
        let shot = g.world.shots[0].layer;
        // At the ceiling, clear of every target
        g.world.scene.layer_mut(shot).pos = Vec2::new(112, 15);
        let report = (0..g.settings.tick_divisor)
            .filter_map(|_| g.on_tick(&mut tone))
            .last()
            .unwrap();
        assert!(report.advanced);
        assert!(!g.world.shots[0].fired);

        g.frame(&mut fb, &mut input, &mut timer);
        let hull = g.world.scene.layer(g.world.ship.hull).pos;
        assert_eq!(hull, Vec2::new(69, 145));
        assert_eq!(g.world.scene.layer(shot).pos, hull);

        g.frame(&mut fb, &mut input, &mut timer);
        assert_eq!(g.world.scene.layer(shot).pos, Vec2::new(74, 145));
        // Nothing left drawn at the old ceiling spot
        assert_eq!(fb.pixel(112, 15), Some(COLOR_BLACK));
    }

    #[test]
    fn test_ticks_divided_into_steps() {
        let mut g = game();
        let mut tone = ToneLog::default();
        let steps = (0..90).filter_map(|_| g.on_tick(&mut tone)).count();
        assert_eq!(steps, 3);
    }

    #[test]
    fn test_game_over_message_drawn_once() {
        let mut g = game();
        let mut fb = FrameBuffer::default();
        let mut timer = HostTimer::new();
        let mut input = ScriptedInput::new(vec![Buttons::RIGHT; 4]);
        g.start(&mut fb);

        g.world.finish(GamePhase::GameOver);
        g.frame(&mut fb, &mut input, &mut timer);
        assert!(message_pixels(&fb, COLOR_RED) > 0);

        let writes = fb.colors_written;
        let hull_x = g.world.scene.layer(g.world.ship.hull).pos.x;
        g.frame(&mut fb, &mut input, &mut timer);
        // Frozen: no ship motion, no redraw, no status redraw
        assert_eq!(fb.colors_written, writes);
        assert_eq!(g.world.scene.layer(g.world.ship.hull).pos.x, hull_x);
    }

    #[test]
    fn test_win_message() {
        let mut g = game();
        let mut fb = FrameBuffer::default();
        let mut timer = HostTimer::new();
        let mut input = ScriptedInput::new(Vec::new());
        g.start(&mut fb);

        g.world.score = g.settings.win_score;
        g.world.finish(GamePhase::Won);
        g.frame(&mut fb, &mut input, &mut timer);
        assert!(message_pixels(&fb, COLOR_GREEN) > 0);
        assert!(g.is_over());
    }
}
