use std::time::Duration;

use bevy_ecs::system::RunSystemOnce;
use flappy::events::{GameCommand, GameEvent};
use flappy::systems::{
    components::{
        Bird, GlobalState, Gravity, Ground, MenuItem, Pipe, PipeSide, SceneClock, SceneEntity, ScoreReadout,
        ScoreResource, SpawnTimer, SpeedButton, SpeedMultiplier,
    },
    menu::SpeedOption,
    stage::{setup_scene_system, stage_command_system, GameStage},
};
use glam::Vec2;
use speculoos::prelude::*;

mod common;

fn create_scene_world() -> bevy_ecs::world::World {
    let mut world = common::create_test_world();
    world
        .run_system_once(setup_scene_system)
        .expect("System should run successfully");
    world
}

fn run_command(world: &mut bevy_ecs::world::World, command: GameCommand) {
    common::send_game_event(world, GameEvent::Command(command));
    world
        .run_system_once(stage_command_system)
        .expect("System should run successfully");
}

#[test]
fn test_scene_setup() {
    let mut world = create_scene_world();

    assert_that(&common::count::<Bird>(&mut world)).is_equal_to(1);
    assert_that(&common::count::<Ground>(&mut world)).is_equal_to(1);
    assert_that(&common::count::<MenuItem>(&mut world)).is_equal_to(5);
    assert_that(&common::count::<SpeedButton>(&mut world)).is_equal_to(3);
    assert_that(&common::count::<Pipe>(&mut world)).is_equal_to(0);
    // The bird hovers until a speed is picked
    assert_that(&common::count::<Gravity>(&mut world)).is_equal_to(0);
}

#[test]
fn test_select_speed_starts_round() {
    let mut world = create_scene_world();
    world.resource_mut::<SceneClock>().now = Duration::from_millis(2400);

    run_command(&mut world, GameCommand::SelectSpeed(SpeedOption::Hard));

    assert_that(&*world.resource::<GameStage>()).is_equal_to(GameStage::Playing);
    assert_that(&world.resource::<SpeedMultiplier>().0).is_equal_to(1.5);
    assert_that(&world.resource::<SpawnTimer>().next).is_equal_to(Duration::from_millis(2400));
    assert_that(&common::count::<MenuItem>(&mut world)).is_equal_to(0);
    assert_that(&common::count::<Gravity>(&mut world)).is_equal_to(1);
    assert_that(&common::count::<ScoreReadout>(&mut world)).is_equal_to(1);
}

#[test]
fn test_select_speed_ignored_while_playing() {
    let mut world = create_scene_world();
    run_command(&mut world, GameCommand::SelectSpeed(SpeedOption::Easy));

    run_command(&mut world, GameCommand::SelectSpeed(SpeedOption::Hard));

    assert_that(&world.resource::<SpeedMultiplier>().0).is_equal_to(0.7);
    assert_that(&common::count::<ScoreReadout>(&mut world)).is_equal_to(1);
}

#[test]
fn test_retry_resets_scene() {
    let mut world = create_scene_world();
    run_command(&mut world, GameCommand::SelectSpeed(SpeedOption::Hard));
    common::spawn_test_pipe(&mut world, PipeSide::Upper, Vec2::new(100.0, 0.0), Vec2::ZERO);
    world.insert_resource(GameStage::GameOver);
    world.insert_resource(ScoreResource(12));
    world.resource_mut::<SceneClock>().now = Duration::from_secs(30);
    world.resource_mut::<SpawnTimer>().next = Duration::from_millis(31500);

    run_command(&mut world, GameCommand::Retry);

    assert_that(&*world.resource::<GameStage>()).is_equal_to(GameStage::Menu);
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(0);
    assert_that(&world.resource::<SpeedMultiplier>().0).is_equal_to(1.0);
    assert_that(&world.resource::<SceneClock>().now).is_equal_to(Duration::ZERO);
    assert_that(&world.resource::<SpawnTimer>().next).is_equal_to(Duration::ZERO);

    assert_that(&common::count::<Pipe>(&mut world)).is_equal_to(0);
    assert_that(&common::count::<ScoreReadout>(&mut world)).is_equal_to(0);
    assert_that(&common::count::<Bird>(&mut world)).is_equal_to(1);
    assert_that(&common::count::<Gravity>(&mut world)).is_equal_to(0);
    assert_that(&common::count::<MenuItem>(&mut world)).is_equal_to(5);
    // Background, ground, bird and the menu
    assert_that(&common::count::<SceneEntity>(&mut world)).is_equal_to(8);
}

#[test]
fn test_retry_ignored_outside_game_over() {
    let mut world = create_scene_world();
    world.insert_resource(ScoreResource(3));

    run_command(&mut world, GameCommand::Retry);

    assert_that(&*world.resource::<GameStage>()).is_equal_to(GameStage::Menu);
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(3);
    assert_that(&common::count::<SceneEntity>(&mut world)).is_equal_to(8);
}

#[test]
fn test_exit_sets_flag() {
    let mut world = create_scene_world();

    run_command(&mut world, GameCommand::Exit);

    assert_that(&world.resource::<GlobalState>().exit).is_true();
}

#[test]
fn test_speed_options() {
    assert_that(&SpeedOption::Easy.multiplier()).is_equal_to(0.7);
    assert_that(&SpeedOption::Normal.multiplier()).is_equal_to(1.0);
    assert_that(&SpeedOption::Hard.multiplier()).is_equal_to(1.5);

    assert_that(&SpeedOption::Easy.label()).is_equal_to("70 (Easy)");
    assert_that(&SpeedOption::Normal.label()).is_equal_to("100 (Normal)");
    assert_that(&SpeedOption::Hard.label()).is_equal_to("150 (Hard)");

    assert_that(&SpeedOption::Easy.position()).is_equal_to(Vec2::new(144.0, 190.0));
    assert_that(&SpeedOption::Hard.position()).is_equal_to(Vec2::new(144.0, 290.0));
}
