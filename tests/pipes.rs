use std::time::Duration;

use bevy_ecs::system::RunSystemOnce;
use flappy::{
    constants::{pipes::PIPE_HEIGHT, CANVAS_SIZE},
    systems::{
        components::{Pipe, PipeSide, Position, SceneClock, SpawnTimer, SpeedMultiplier, Sprite, Velocity},
        pipes::{gap_height, pipe_centers, pipe_offset, pipe_spawn_system, pipe_velocity},
        stage::GameStage,
    },
};
use glam::Vec2;
use pretty_assertions::assert_eq;
use rand::{rngs::SmallRng, SeedableRng};
use speculoos::prelude::*;

mod common;

fn playing_world() -> bevy_ecs::world::World {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Playing);
    world
}

fn set_clock(world: &mut bevy_ecs::world::World, millis: u64) {
    world.resource_mut::<SceneClock>().now = Duration::from_millis(millis);
}

fn run_spawn(world: &mut bevy_ecs::world::World) {
    world
        .run_system_once(pipe_spawn_system)
        .expect("System should run successfully");
}

#[test]
fn test_gap_height_is_a_third_of_the_sky() {
    // 512 tall viewport, 112 tall ground
    assert_that(&(gap_height() - 400.0 / 3.0).abs()).is_less_than(1e-4);
}

#[test]
fn test_pipe_centers_without_offset() {
    let gap = 400.0 / 3.0;
    let (upper, lower) = pipe_centers(0.0);

    assert_that(&(upper - (gap - 160.0)).abs()).is_less_than(1e-4);
    assert_that(&(lower - (2.0 * gap + 160.0)).abs()).is_less_than(1e-4);
}

#[test]
fn test_pipe_centers_share_offset() {
    let (upper, lower) = pipe_centers(0.0);
    let (upper_shifted, lower_shifted) = pipe_centers(-75.0);

    assert_that(&(upper_shifted - (upper - 75.0)).abs()).is_less_than(1e-4);
    assert_that(&(lower_shifted - (lower - 75.0)).abs()).is_less_than(1e-4);

    // The opening between the pipes' inner edges is always one gap
    let opening = (lower_shifted - PIPE_HEIGHT / 2.0) - (upper_shifted + PIPE_HEIGHT / 2.0);
    assert_that(&(opening - gap_height()).abs()).is_less_than(1e-3);
}

#[test]
fn test_pipe_offset_distribution() {
    let mut rng = SmallRng::seed_from_u64(1234);
    let offsets: Vec<f32> = (0..1000).map(|_| pipe_offset(&mut rng)).collect();

    assert!(offsets.iter().all(|offset| offset.abs() <= PIPE_HEIGHT / 2.0));
    assert!(offsets.iter().any(|offset| *offset < 0.0));
    assert!(offsets.iter().any(|offset| *offset > 0.0));
    assert!(offsets.iter().any(|offset| *offset == 0.0));
}

#[test]
fn test_pipe_velocity_scales_with_multiplier() {
    assert_eq!(pipe_velocity(1.0), Vec2::new(-150.0, 0.0));
    assert_eq!(pipe_velocity(1.5), Vec2::new(-225.0, 0.0));
    assert_eq!(pipe_velocity(0.7).x, -150.0 * 0.7);
}

#[test]
fn test_spawn_places_pair_at_right_edge() {
    let mut world = playing_world();
    run_spawn(&mut world);

    let mut query = world.query::<(&Pipe, &Position, &Velocity, &Sprite)>();
    let pipes: Vec<_> = query.iter(&world).map(|(p, pos, v, s)| (*p, *pos, *v, *s)).collect();
    assert_that(&pipes.len()).is_equal_to(2);

    for (pipe, position, velocity, sprite) in &pipes {
        assert_that(&position.0.x).is_equal_to(CANVAS_SIZE.x as f32);
        assert_that(&velocity.0).is_equal_to(Vec2::new(-150.0, 0.0));
        assert_that(&pipe.has_passed).is_false();
        assert_that(&sprite.rotated).is_equal_to(pipe.side == PipeSide::Upper);
    }

    let center_of = |side: PipeSide| {
        pipes
            .iter()
            .find(|(pipe, ..)| pipe.side == side)
            .map(|(_, position, ..)| position.0.y)
            .expect("Pair should have both sides")
    };
    let spread = center_of(PipeSide::Lower) - center_of(PipeSide::Upper);
    assert_that(&(spread - (gap_height() + PIPE_HEIGHT)).abs()).is_less_than(1e-3);
}

#[test]
fn test_spawn_velocity_uses_multiplier() {
    let mut world = playing_world();
    world.insert_resource(SpeedMultiplier(1.5));
    run_spawn(&mut world);

    let mut query = world.query::<(&Pipe, &Velocity)>();
    for (_, velocity) in query.iter(&world) {
        assert_that(&velocity.0.x).is_equal_to(-225.0);
    }
}

#[test]
fn test_spawn_interval() {
    let mut world = playing_world();

    set_clock(&mut world, 0);
    run_spawn(&mut world);
    assert_that(&common::count::<Pipe>(&mut world)).is_equal_to(2);
    assert_that(&world.resource::<SpawnTimer>().next).is_equal_to(Duration::from_millis(1500));

    set_clock(&mut world, 1499);
    run_spawn(&mut world);
    assert_that(&common::count::<Pipe>(&mut world)).is_equal_to(2);

    set_clock(&mut world, 1500);
    run_spawn(&mut world);
    assert_that(&common::count::<Pipe>(&mut world)).is_equal_to(4);
    assert_that(&world.resource::<SpawnTimer>().next).is_equal_to(Duration::from_millis(3000));
}

#[test]
fn test_spawn_schedules_from_spawn_time() {
    let mut world = playing_world();

    // A late frame pushes the schedule back rather than spawning twice
    set_clock(&mut world, 0);
    run_spawn(&mut world);
    set_clock(&mut world, 3200);
    run_spawn(&mut world);
    run_spawn(&mut world);

    assert_that(&common::count::<Pipe>(&mut world)).is_equal_to(4);
    assert_that(&world.resource::<SpawnTimer>().next).is_equal_to(Duration::from_millis(4700));
}

#[test]
fn test_no_spawn_outside_play() {
    for stage in [GameStage::Menu, GameStage::GameOver] {
        let mut world = common::create_test_world();
        world.insert_resource(stage);
        run_spawn(&mut world);
        assert_that(&common::count::<Pipe>(&mut world)).is_equal_to(0);
    }
}

#[test]
fn test_seeded_spawns_are_reproducible() {
    let positions = |seed: u64| {
        let mut world = playing_world();
        world.insert_resource(flappy::systems::components::GameRng(SmallRng::seed_from_u64(seed)));
        for millis in [0, 1500, 3000] {
            set_clock(&mut world, millis);
            run_spawn(&mut world);
        }
        let mut ys: Vec<f32> = world.query::<(&Pipe, &Position)>().iter(&world).map(|(_, p)| p.0.y).collect();
        ys.sort_by(f32::total_cmp);
        ys
    };

    assert_eq!(positions(99), positions(99));
}
