//! Per-button handlers dispatched by the current game state.
//!
//! Every handler receives the press (`true`) or release (`false`) of one
//! logical button. Combinations of state and button without a branch below
//! are ignored.

use face_invaders_core::{AudioCue, Event, GameState, Sound, UiGroup};
use face_invaders_system_scoring::ConfirmOutcome;

use crate::World;

pub(crate) fn fire(world: &mut World, pressed: bool, out_events: &mut Vec<Event>) {
    if !pressed {
        return;
    }

    match world.state {
        GameState::StartMenu => {
            world.new_game(out_events);
            world.play(Sound::NewShip, out_events);
        }
        GameState::ActiveGame if world.ship.is_visible() => world.try_fire(out_events),
        GameState::GameOver if world.groups.contains(&UiGroup::GameOverPrompt) => {
            if world.leaderboard.is_high_score(world.session.score()) {
                world.enter_score_input(out_events);
            } else {
                world.enter_high_scores(out_events);
            }
            world.play(Sound::Continue, out_events);
        }
        GameState::ScoreInput => {
            if let ConfirmOutcome::Complete(initials) = world.initials.confirm() {
                world.commit_initials(initials, out_events);
                world.enter_high_scores(out_events);
            }
            world.play(Sound::Continue, out_events);
        }
        GameState::HighScores => {
            world.enter_start_menu(out_events);
            world.play(Sound::Continue, out_events);
        }
        _ => {}
    }
}

pub(crate) fn thrust(world: &mut World, pressed: bool, out_events: &mut Vec<Event>) {
    match world.state {
        GameState::ActiveGame if world.ship.is_visible() => {
            world.ship.set_thrusting(pressed);
            let sound = Sound::ShipThrust;
            out_events.push(Event::Audio(if pressed {
                AudioCue::Play {
                    sound,
                    looping: true,
                }
            } else {
                AudioCue::End { sound }
            }));
        }
        GameState::ScoreInput if pressed => world.initials.back(),
        _ => {}
    }
}

pub(crate) fn select(world: &mut World, pressed: bool, out_events: &mut Vec<Event>) {
    if !pressed || world.state == GameState::ControlsMenu {
        return;
    }
    world.release_controls(out_events);
    world.toggle_overlay(GameState::OptionsMenu, UiGroup::OptionsMenu, out_events);
    world.play(Sound::Continue, out_events);
}

pub(crate) fn start(world: &mut World, pressed: bool, out_events: &mut Vec<Event>) {
    if !pressed || world.state == GameState::OptionsMenu {
        return;
    }
    world.release_controls(out_events);
    world.toggle_overlay(GameState::ControlsMenu, UiGroup::ControlsMenu, out_events);
    world.play(Sound::Continue, out_events);
}

pub(crate) fn left(world: &mut World, pressed: bool, out_events: &mut Vec<Event>) {
    steer(world, pressed, -1, out_events);
}

pub(crate) fn right(world: &mut World, pressed: bool, out_events: &mut Vec<Event>) {
    steer(world, pressed, 1, out_events);
}

fn steer(world: &mut World, pressed: bool, direction: i8, out_events: &mut Vec<Event>) {
    match world.state {
        GameState::ActiveGame if world.ship.is_visible() => {
            world.ship.set_turning(if pressed { direction } else { 0 });
        }
        GameState::OptionsMenu if pressed => {
            out_events.push(world.options.adjust(direction > 0));
            world.play(Sound::Click, out_events);
        }
        _ => {}
    }
}

pub(crate) fn up(world: &mut World, pressed: bool, out_events: &mut Vec<Event>) {
    cycle(world, pressed, true, out_events);
}

pub(crate) fn down(world: &mut World, pressed: bool, out_events: &mut Vec<Event>) {
    cycle(world, pressed, false, out_events);
}

fn cycle(world: &mut World, pressed: bool, forward: bool, out_events: &mut Vec<Event>) {
    if !pressed {
        return;
    }
    match world.state {
        // two entries, so either direction lands on the other one
        GameState::OptionsMenu => world.options.cycle(),
        GameState::ScoreInput => {
            if forward {
                world.initials.increment();
            } else {
                world.initials.decrement();
            }
            world.play(Sound::Click, out_events);
        }
        _ => {}
    }
}
