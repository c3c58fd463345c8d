//! Seeded stand-in for a player, used by the headless loop.

use face_invaders_core::{Button, Command, GameState, UiGroup};
use face_invaders_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Frames spent looking at a menu before confirming it.
const MENU_PAUSE: u32 = 25;
const FIRE_CHANCE: f64 = 0.3;
const THRUST_CHANCE: f64 = 0.4;

/// Produces button commands from what a player could see on screen.
#[derive(Debug)]
pub(crate) struct Autopilot {
    rng: ChaCha8Rng,
    held: Vec<Button>,
    hold_frames: u32,
    menu_wait: u32,
}

impl Autopilot {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            held: Vec::new(),
            hold_frames: 0,
            menu_wait: MENU_PAUSE,
        }
    }

    /// Appends this frame's presses and releases to `out`.
    pub(crate) fn commands(&mut self, world: &World, out: &mut Vec<Command>) {
        match query::state(world) {
            GameState::ActiveGame if query::ship(world).is_visible() => self.fly(out),
            GameState::ActiveGame => self.release_all(out),
            GameState::StartMenu | GameState::HighScores => self.confirm_after_pause(out),
            GameState::GameOver if query::is_visible(world, UiGroup::GameOverPrompt) => {
                self.confirm_after_pause(out);
            }
            GameState::ScoreInput => {
                tap(Button::Up, out);
                tap(Button::Fire, out);
            }
            _ => {}
        }
    }

    fn fly(&mut self, out: &mut Vec<Command>) {
        if self.hold_frames == 0 {
            self.release_all(out);
            match self.rng.gen_range(0..3) {
                0 => self.hold(Button::Left, out),
                1 => self.hold(Button::Right, out),
                _ => {}
            }
            if self.rng.gen_bool(THRUST_CHANCE) {
                self.hold(Button::Thrust, out);
            }
            self.hold_frames = self.rng.gen_range(5..40);
        }
        self.hold_frames -= 1;

        if self.rng.gen_bool(FIRE_CHANCE) {
            tap(Button::Fire, out);
        }
    }

    fn hold(&mut self, button: Button, out: &mut Vec<Command>) {
        out.push(Command::Button {
            button,
            pressed: true,
        });
        self.held.push(button);
    }

    fn release_all(&mut self, out: &mut Vec<Command>) {
        for button in self.held.drain(..) {
            out.push(Command::Button {
                button,
                pressed: false,
            });
        }
        self.hold_frames = 0;
    }

    fn confirm_after_pause(&mut self, out: &mut Vec<Command>) {
        self.release_all(out);
        if self.menu_wait > 0 {
            self.menu_wait -= 1;
            return;
        }
        self.menu_wait = MENU_PAUSE;
        tap(Button::Fire, out);
    }
}

fn tap(button: Button, out: &mut Vec<Command>) {
    out.push(Command::Button {
        button,
        pressed: true,
    });
    out.push(Command::Button {
        button,
        pressed: false,
    });
}
