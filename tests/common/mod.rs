#![allow(dead_code)]

use std::time::Duration;

use bevy_ecs::{entity::Entity, event::Events, world::World};
use flappy::{
    asset::Asset,
    constants::bird,
    error::GameError,
    events::GameEvent,
    game::Game,
    systems::{
        animation::BirdAnimation,
        components::{
            Bird, Collider, CollisionLayer, DeltaTime, GameRng, GlobalState, Gravity, Ground, Pipe, PipeSide,
            PointerQueue, Position, SceneClock, SceneEntity, ScoreResource, SpawnTimer, SpeedMultiplier, Sprite,
            TileScroll, Velocity,
        },
        stage::{ground_position, GameStage},
    },
    texture::font::BitmapFont,
};
use glam::Vec2;
use rand::{rngs::SmallRng, SeedableRng};

pub const FRAME: Duration = Duration::from_millis(16);

pub fn load_font() -> BitmapFont {
    let bytes = Asset::FontDescriptor.get_bytes().expect("Font descriptor should be embedded");
    BitmapFont::parse(&bytes).expect("Font descriptor should parse")
}

/// A world with every resource the gameplay systems expect, and no entities.
pub fn create_test_world() -> World {
    let mut world = World::default();

    world.init_resource::<Events<GameEvent>>();
    world.init_resource::<Events<GameError>>();

    world.insert_resource(load_font());
    world.insert_resource(GameRng(SmallRng::seed_from_u64(7)));
    world.insert_resource(GameStage::default());
    world.insert_resource(GlobalState::default());
    world.insert_resource(ScoreResource::default());
    world.insert_resource(SpeedMultiplier::default());
    world.insert_resource(DeltaTime::from_duration(FRAME));
    world.insert_resource(SceneClock::default());
    world.insert_resource(SpawnTimer::default());
    world.insert_resource(PointerQueue::default());

    world
}

pub fn spawn_test_bird(world: &mut World, position: Vec2) -> Entity {
    world
        .spawn((
            Position(position),
            Velocity::default(),
            Sprite::new(Asset::BirdMidFlap, 3),
            Collider::new(Asset::BirdMidFlap.size().as_vec2(), CollisionLayer::BIRD),
            BirdAnimation::default(),
            Gravity,
            Bird,
            SceneEntity,
        ))
        .id()
}

pub fn spawn_test_pipe(world: &mut World, side: PipeSide, position: Vec2, velocity: Vec2) -> Entity {
    world
        .spawn((
            Pipe::new(side),
            Position(position),
            Velocity(velocity),
            Collider::new(Asset::Pipe.size().as_vec2(), CollisionLayer::PIPE),
            Sprite::new(Asset::Pipe, 1),
            SceneEntity,
        ))
        .id()
}

pub fn spawn_test_ground(world: &mut World) -> Entity {
    world
        .spawn((
            Position(ground_position()),
            Sprite::new(Asset::Base, 2),
            TileScroll::default(),
            Collider::new(Asset::Base.size().as_vec2(), CollisionLayer::GROUND),
            Ground,
            SceneEntity,
        ))
        .id()
}

pub fn spawn_default_bird(world: &mut World) -> Entity {
    spawn_test_bird(world, bird::START)
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}

/// Events written since the last `Events::update`.
pub fn current_events(world: &World) -> Vec<GameEvent> {
    world
        .resource::<Events<GameEvent>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

pub fn count<T: bevy_ecs::component::Component>(world: &mut World) -> usize {
    world.query::<&T>().iter(world).count()
}

pub fn create_game(seed: u64) -> Game {
    Game::new(SmallRng::seed_from_u64(seed)).expect("Game should build headlessly")
}
