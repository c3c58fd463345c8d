//! Frame driver: update, resolve collisions, reap, and refill the field.

use std::time::Duration;

use face_invaders_core::{AudioCue, BodySeed, Event, GameState, ParticleSeed, Sound, UiGroup};
use face_invaders_system_spawning::{BurstKind, BurstSource};
use tracing::{debug, info};

use crate::{
    collision::detect_hit,
    entities::{Body, Particle},
    World, RESPAWN_BUFFER, RESPAWN_DELAY,
};

pub(crate) fn advance(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    world.tick_index = world.tick_index.saturating_add(1);
    world.clock = world.clock.saturating_add(dt);
    world.respawn.advance(dt);
    world.game_over_prompt.advance(dt);
    world.bullet_cooldown.advance(dt);
    out_events.push(Event::TimeAdvanced { dt });

    if !world.state.is_overlay() {
        update_entities(world, dt);

        match world.state {
            GameState::ActiveGame => {
                resolve_collisions(world, out_events);
                resolve_ship(world, out_events);
            }
            GameState::GameOver => reveal_prompt(world, out_events),
            _ => {}
        }

        reap(world);

        if world.bodies.is_empty() {
            let count = world.session.advance_level();
            world.spawn_wave(count, out_events);
        }
    }

    out_events.push(Event::FrameReady);
}

fn update_entities(world: &mut World, dt: Duration) {
    let seconds = dt.as_secs_f32();
    let screen = world.screen;
    let clock = world.clock.as_secs_f32();

    world.ship.update(seconds, screen, clock);
    for body in &mut world.bodies {
        body.update(seconds, screen);
    }
    for bullet in &mut world.bullets {
        bullet.update(seconds, screen);
    }
    for particle in &mut world.particles {
        particle.update(seconds, screen);
    }
}

fn resolve_collisions(world: &mut World, out_events: &mut Vec<Event>) {
    let World {
        atlas,
        ship,
        bodies,
        bullets,
        director,
        particles,
        session,
        respawn,
        ..
    } = world;

    let mut children: Vec<BodySeed> = Vec::new();
    let mut debris: Vec<ParticleSeed> = Vec::new();

    let mut index = 0;
    while index < bodies.len() {
        let body = &mut bodies[index];
        if !ship.is_hit() && detect_hit(atlas, body, ship) {
            out_events.push(Event::Audio(AudioCue::Stop {
                sound: Sound::ShipThrust,
            }));
            out_events.push(Event::Audio(AudioCue::Play {
                sound: Sound::ShipExplosion,
                looping: false,
            }));
            ship.set_visible(false);

            let motion = ship.motion();
            director.burst_particles(
                BurstSource {
                    x: motion.x(),
                    y: motion.y(),
                    width: ship.width(),
                    height: ship.height(),
                    kind: BurstKind::Ship,
                },
                &mut debris,
            );
            respawn.start(RESPAWN_DELAY);

            let lives = session.lose_life();
            info!(lives, "ship destroyed");
            out_events.push(Event::ShipDestroyed { lives });
        }

        if !body.is_hit() {
            for bullet in bullets.iter_mut().filter(|bullet| !bullet.is_hit()) {
                if detect_hit(atlas, body, bullet) {
                    break;
                }
            }
        }

        if body.is_hit() {
            let size = body.size();
            if !ship.is_hit() {
                out_events.push(Event::Audio(AudioCue::Play {
                    sound: Sound::explosion_for(size),
                    looping: false,
                }));
            }

            let points = session.award_hit(size);
            debug!(?size, points, "body destroyed");
            out_events.push(Event::BodyDestroyed { size, points });
            out_events.push(Event::ScoreChanged {
                score: session.score(),
            });

            let sheet = atlas.sheet(size.sprite());
            let motion = body.motion();
            director.burst_particles(
                BurstSource {
                    x: motion.x(),
                    y: motion.y(),
                    width: body.width(),
                    height: body.height(),
                    kind: BurstKind::Body {
                        sprite: size.sprite(),
                        palette_len: u8::try_from(sheet.palette().len()).unwrap_or(u8::MAX),
                    },
                },
                &mut debris,
            );
            director.fragment(&body.seed(), session.level(), &mut children);
        }
        index += 1;

        // fragments are visited later in this same pass
        bodies.extend(
            children
                .drain(..)
                .map(|seed| Body::from_seed(seed, atlas.sheet(seed.size.sprite()))),
        );
    }

    particles.extend(debris.into_iter().map(Particle::from_seed));
}

fn resolve_ship(world: &mut World, out_events: &mut Vec<Event>) {
    if !world.ship.is_hit() {
        return;
    }

    if world.session.is_out_of_lives() {
        world.enter_game_over(out_events);
        return;
    }

    if !world.respawn.is_elapsed() || respawn_blocked(world) {
        return;
    }

    let (x, y) = world.screen.center();
    world.ship.reset(x as f32, y as f32, world.screen);
    world.ship.set_visible(true);
    info!(lives = world.session.lives(), "ship respawned");
    out_events.push(Event::ShipRespawned);
    world.play(Sound::NewShip, out_events);
}

fn respawn_blocked(world: &World) -> bool {
    let (x, y) = world.screen.center();
    let (x, y) = (x as f32, y as f32);
    world.bodies.iter().any(|body| {
        let motion = body.motion();
        (x - RESPAWN_BUFFER..=x + RESPAWN_BUFFER).contains(&motion.x())
            && (y - RESPAWN_BUFFER..=y + RESPAWN_BUFFER).contains(&motion.y())
    })
}

fn reveal_prompt(world: &mut World, out_events: &mut Vec<Event>) {
    if world.groups.contains(&UiGroup::GameOverPrompt) || !world.game_over_prompt.is_elapsed() {
        return;
    }
    let _ = world.groups.insert(UiGroup::GameOverPrompt);
    debug!("continue prompt shown");
    out_events.push(Event::GameOverPromptShown);
}

fn reap(world: &mut World) {
    world.bodies.retain(|body| !body.is_hit());
    world.particles.retain(|particle| !particle.is_expired());
    world
        .bullets
        .retain(|bullet| !bullet.is_expired() && !bullet.is_hit());
}
