use std::f32::consts::PI;

use face_invaders_core::{
    BodySeed, BodySize, ParticleColor, ParticleSeed, ParticleShape, ScreenSize, SpriteKey,
};
use face_invaders_system_spawning::{BurstKind, BurstSource, Config, Director};

const SCREEN: ScreenSize = ScreenSize::new(160, 128);

fn parent(size: BodySize) -> BodySeed {
    BodySeed {
        x: 80.0,
        y: 64.0,
        v: 20.0,
        angle: PI / 2.0,
        size,
        flip_x: false,
    }
}

#[test]
fn waves_spawn_large_bodies_just_outside_the_screen() {
    let mut director = Director::new(Config::new(0x5eed));
    let mut seeds = Vec::new();
    director.spawn_wave(40, SCREEN, 40, 48, &mut seeds);

    assert_eq!(seeds.len(), 40);
    for seed in &seeds {
        assert_eq!(seed.size, BodySize::Large);
        let on_vertical_edge = seed.x == -20.0 || seed.x == 180.0;
        let on_horizontal_edge = seed.y == -24.0 || seed.y == 152.0;
        assert!(
            on_vertical_edge || on_horizontal_edge,
            "seed {seed:?} is not on the spawn border"
        );
        assert!((-20.0..=180.0).contains(&seed.x));
        assert!((-24.0..=152.0).contains(&seed.y));
        assert!((10.0..30.0).contains(&seed.v));
    }
}

#[test]
fn large_and_medium_bodies_split_into_two_children() {
    let mut director = Director::new(Config::new(11));

    let mut children = Vec::new();
    director.fragment(&parent(BodySize::Large), 1, &mut children);
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|child| child.size == BodySize::Medium));

    children.clear();
    director.fragment(&parent(BodySize::Medium), 1, &mut children);
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|child| child.size == BodySize::Small));

    children.clear();
    director.fragment(&parent(BodySize::Small), 1, &mut children);
    assert!(children.is_empty());
}

#[test]
fn children_inherit_position_and_deflect_to_both_sides() {
    let mut director = Director::new(Config::new(3));
    let source = parent(BodySize::Large);

    for _ in 0..50 {
        let mut children = Vec::new();
        director.fragment(&source, 1, &mut children);

        let left = children[0];
        let right = children[1];
        assert_eq!((left.x, left.y), (source.x, source.y));
        assert_eq!((right.x, right.y), (source.x, source.y));

        let left_turn = (source.angle - left.angle).to_degrees();
        let right_turn = (right.angle - source.angle).to_degrees();
        assert!((14.9..70.0).contains(&left_turn), "left turn {left_turn}");
        assert!((14.9..70.0).contains(&right_turn), "right turn {right_turn}");
    }
}

#[test]
fn fragment_speed_scales_with_level() {
    let mut director = Director::new(Config::new(5));
    let source = parent(BodySize::Large);

    let mut level_one = Vec::new();
    director.fragment(&source, 1, &mut level_one);
    let mut level_ten = Vec::new();
    director.fragment(&source, 10, &mut level_ten);

    assert!((level_one[0].v - 20.0 * 1.15).abs() < 1e-4);
    assert!((level_ten[0].v - 20.0 * 1.6).abs() < 1e-4);
}

#[test]
fn recursive_destruction_yields_four_terminal_bodies() {
    let mut director = Director::new(Config::new(99));
    let mut generation = vec![parent(BodySize::Large)];
    let mut terminal = 0;
    let mut per_generation = Vec::new();

    while !generation.is_empty() {
        let mut next = Vec::new();
        for body in &generation {
            let before = next.len();
            director.fragment(body, 1, &mut next);
            if next.len() == before {
                terminal += 1;
            }
        }
        per_generation.push(next.len());
        generation = next;
    }

    assert_eq!(per_generation, vec![2, 4, 0]);
    assert_eq!(terminal, 4);
}

#[test]
fn ship_bursts_emit_dots_and_line_debris() {
    let mut director = Director::new(Config::new(17));
    let mut particles = Vec::new();
    director.burst_particles(
        BurstSource {
            x: 80.0,
            y: 64.0,
            width: 20,
            height: 20,
            kind: BurstKind::Ship,
        },
        &mut particles,
    );

    let dots: Vec<&ParticleSeed> = particles
        .iter()
        .filter(|particle| particle.shape == ParticleShape::Dot)
        .collect();
    assert_eq!(dots.len(), 5);
    assert_eq!(particles.len(), 8);

    for particle in &particles {
        assert_eq!(particle.color, ParticleColor::Highlight);
        assert!((10.0..15.0).contains(&particle.v));
        assert!(particle.max_age == 1.0 || particle.max_age == 1.5);
        if let ParticleShape::Line { dx, dy } = particle.shape {
            assert!(((dx * dx + dy * dy).sqrt() - 6.0).abs() < 1e-3);
        }
    }

    for dot in dots {
        assert!((73.0..86.0).contains(&dot.x));
        assert!((57.0..70.0).contains(&dot.y));
    }
}

#[test]
fn dot_offsets_lean_one_pixel_left_and_up() {
    let mut director = Director::new(Config::new(31));
    let mut particles = Vec::new();
    for _ in 0..200 {
        director.burst_particles(
            BurstSource {
                x: 0.0,
                y: 0.0,
                width: 20,
                height: 20,
                kind: BurstKind::Ship,
            },
            &mut particles,
        );
    }

    let offsets: Vec<i32> = particles
        .iter()
        .filter(|particle| particle.shape == ParticleShape::Dot)
        .map(|particle| particle.x as i32)
        .collect();
    assert_eq!(offsets.iter().min(), Some(&-7));
    assert_eq!(offsets.iter().max(), Some(&5));
    assert!(particles
        .iter()
        .any(|particle| particle.max_age == 1.0));
    assert!(particles
        .iter()
        .any(|particle| particle.max_age == 1.5));
}

#[test]
fn body_bursts_draw_colors_from_the_body_palette() {
    let mut director = Director::new(Config::new(23));
    let mut particles = Vec::new();
    director.burst_particles(
        BurstSource {
            x: 10.0,
            y: 10.0,
            width: 30,
            height: 36,
            kind: BurstKind::Body {
                sprite: SpriteKey::BodyMedium,
                palette_len: 4,
            },
        },
        &mut particles,
    );

    assert_eq!(particles.len(), 5);
    for particle in particles {
        assert_eq!(particle.shape, ParticleShape::Dot);
        match particle.color {
            ParticleColor::Palette { sprite, index } => {
                assert_eq!(sprite, SpriteKey::BodyMedium);
                assert!(index < 4);
            }
            ParticleColor::Highlight => panic!("body debris must use the body palette"),
        }
    }
}

#[test]
fn identical_seeds_replay_identically() {
    let run = |seed| {
        let mut director = Director::new(Config::new(seed));
        let mut bodies = Vec::new();
        director.spawn_wave(3, SCREEN, 40, 48, &mut bodies);
        let first = bodies[0];
        director.fragment(&first, 2, &mut bodies);
        bodies
    };

    assert_eq!(run(0xabc), run(0xabc));
    assert_ne!(run(0xabc), run(0xabd));
}
