use bevy_ecs::system::RunSystemOnce;
use flappy::systems::{
    components::{Pipe, PipeSide, Position, ScoreResource},
    pipes::{pipe_progress_system, right_edge},
};
use glam::Vec2;
use speculoos::prelude::*;

mod common;

fn run_progress(world: &mut bevy_ecs::world::World) {
    world
        .run_system_once(pipe_progress_system)
        .expect("System should run successfully");
}

#[test]
fn test_right_edge_adds_pipe_width() {
    assert_that(&right_edge(&Position(Vec2::new(100.0, 0.0)))).is_equal_to(152.0);
}

#[test]
fn test_pair_passed_in_one_frame_scores_once() {
    let mut world = common::create_test_world();
    common::spawn_default_bird(&mut world);
    // Right edge at 62, behind the bird at x = 72
    let upper = common::spawn_test_pipe(&mut world, PipeSide::Upper, Vec2::new(10.0, 0.0), Vec2::ZERO);
    let lower = common::spawn_test_pipe(&mut world, PipeSide::Lower, Vec2::new(10.0, 400.0), Vec2::ZERO);

    run_progress(&mut world);

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(1);
    assert_that(&world.get::<Pipe>(upper).unwrap().has_passed).is_true();
    assert_that(&world.get::<Pipe>(lower).unwrap().has_passed).is_true();
}

#[test]
fn test_passed_pipes_never_score_again() {
    let mut world = common::create_test_world();
    common::spawn_default_bird(&mut world);
    common::spawn_test_pipe(&mut world, PipeSide::Upper, Vec2::new(10.0, 0.0), Vec2::ZERO);
    common::spawn_test_pipe(&mut world, PipeSide::Lower, Vec2::new(10.0, 400.0), Vec2::ZERO);

    for _ in 0..5 {
        run_progress(&mut world);
    }

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(1);
}

#[test]
fn test_two_pairs_passed_in_one_frame_score_once() {
    let mut world = common::create_test_world();
    common::spawn_default_bird(&mut world);
    for x in [0.0, 15.0] {
        common::spawn_test_pipe(&mut world, PipeSide::Upper, Vec2::new(x, 0.0), Vec2::ZERO);
        common::spawn_test_pipe(&mut world, PipeSide::Lower, Vec2::new(x, 400.0), Vec2::ZERO);
    }

    run_progress(&mut world);
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(1);
}

#[test]
fn test_pipe_ahead_of_bird_is_not_passed() {
    let mut world = common::create_test_world();
    common::spawn_default_bird(&mut world);
    // Right edge at 82, still ahead of the bird
    let pipe = common::spawn_test_pipe(&mut world, PipeSide::Lower, Vec2::new(30.0, 400.0), Vec2::ZERO);

    run_progress(&mut world);

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(0);
    assert_that(&world.get::<Pipe>(pipe).unwrap().has_passed).is_false();
}

#[test]
fn test_score_counts_successive_pairs() {
    let mut world = common::create_test_world();
    common::spawn_default_bird(&mut world);

    for expected in 1..=3 {
        common::spawn_test_pipe(&mut world, PipeSide::Upper, Vec2::new(10.0, 0.0), Vec2::ZERO);
        common::spawn_test_pipe(&mut world, PipeSide::Lower, Vec2::new(10.0, 400.0), Vec2::ZERO);
        run_progress(&mut world);
        assert_that(&world.resource::<ScoreResource>().0).is_equal_to(expected);
    }
}

#[test]
fn test_off_screen_pipes_are_despawned() {
    let mut world = common::create_test_world();
    common::spawn_default_bird(&mut world);
    // Right edges at -8 and 2
    let gone = common::spawn_test_pipe(&mut world, PipeSide::Upper, Vec2::new(-60.0, 0.0), Vec2::ZERO);
    let kept = common::spawn_test_pipe(&mut world, PipeSide::Upper, Vec2::new(-50.0, 0.0), Vec2::ZERO);

    run_progress(&mut world);

    assert_that(&world.get_entity(gone).is_ok()).is_false();
    assert_that(&world.get_entity(kept).is_ok()).is_true();
    assert_that(&common::count::<Pipe>(&mut world)).is_equal_to(1);
}

#[test]
fn test_no_bird_no_progress() {
    let mut world = common::create_test_world();
    common::spawn_test_pipe(&mut world, PipeSide::Upper, Vec2::new(-60.0, 0.0), Vec2::ZERO);

    run_progress(&mut world);

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(0);
    assert_that(&common::count::<Pipe>(&mut world)).is_equal_to(1);
}
