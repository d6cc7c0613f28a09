//! Pipe pairs: gap geometry, the spawn timer, scoring and off-screen cleanup.

use bevy_ecs::{
    entity::Entity,
    query::With,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::asset::Asset;
use crate::constants::{layer, physics, pipes::PIPE_HEIGHT, pipes::SPAWN_INTERVAL, CANVAS_SIZE};
use crate::systems::components::{
    Bird, Collider, CollisionLayer, GameRng, Pipe, PipeBundle, PipeSide, Position, SceneClock, ScoreResource, SpawnTimer,
    SpeedMultiplier, Sprite, Velocity,
};
use crate::systems::stage::GameStage;

/// Vertical opening between the upper and lower pipe: a third of the sky above the ground.
pub fn gap_height() -> f32 {
    (CANVAS_SIZE.y as f32 - Asset::Base.size().y as f32) / 3.0
}

/// A random vertical shift for a pair: up to half a pipe, either direction, or none at all.
pub fn pipe_offset<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let magnitude = rng.random::<f32>() * PIPE_HEIGHT / 2.0;
    let direction = rng.random_range(0..3i32) as f32 - 1.0;
    magnitude * direction
}

/// Center y of the upper and lower pipe for a given offset.
pub fn pipe_centers(offset: f32) -> (f32, f32) {
    let gap = gap_height();
    let upper = gap - PIPE_HEIGHT / 2.0 + offset;
    let lower = 2.0 * gap + PIPE_HEIGHT / 2.0 + offset;
    (upper, lower)
}

/// Horizontal pipe velocity for a speed multiplier.
pub fn pipe_velocity(multiplier: f32) -> Vec2 {
    Vec2::new(physics::PIPE_SPEED * multiplier, 0.0)
}

/// The x past which a pipe counts as passed, and below zero as gone.
pub fn right_edge(position: &Position) -> f32 {
    position.0.x + Asset::Pipe.size().x as f32
}

/// Spawns an upper and a lower pipe at the right edge of the viewport, returning `(upper, lower)`.
pub fn spawn_pipe_pair(commands: &mut Commands, offset: f32, multiplier: f32) -> (Entity, Entity) {
    let (upper_y, lower_y) = pipe_centers(offset);
    let x = CANVAS_SIZE.x as f32;

    let pipe = |side: PipeSide, y: f32| {
        let sprite = Sprite::new(Asset::Pipe, layer::PIPES);
        PipeBundle {
            pipe: Pipe::new(side),
            position: Position(Vec2::new(x, y)),
            velocity: Velocity(pipe_velocity(multiplier)),
            collider: Collider::new(Asset::Pipe.size().as_vec2(), CollisionLayer::PIPE),
            sprite: match side {
                PipeSide::Upper => sprite.rotated(),
                PipeSide::Lower => sprite,
            },
            scene: Default::default(),
        }
    };

    let upper = commands.spawn(pipe(PipeSide::Upper, upper_y)).id();
    let lower = commands.spawn(pipe(PipeSide::Lower, lower_y)).id();
    (upper, lower)
}

/// Spawns a pair whenever the scene clock reaches the scheduled time, then schedules the next.
pub fn pipe_spawn_system(
    mut commands: Commands,
    stage: Res<GameStage>,
    clock: Res<SceneClock>,
    multiplier: Res<SpeedMultiplier>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<GameRng>,
) {
    if *stage != GameStage::Playing || clock.now < timer.next {
        return;
    }

    let offset = pipe_offset(&mut rng.0);
    let (upper, lower) = spawn_pipe_pair(&mut commands, offset, multiplier.0);
    timer.next = clock.now + SPAWN_INTERVAL;

    debug!(?upper, ?lower, offset, at = ?clock.now, next = ?timer.next, "Spawned pipe pair");
}

/// Marks pipes the bird has passed, scoring at most once per frame, and despawns pipes that left the screen.
pub fn pipe_progress_system(
    mut commands: Commands,
    mut score: ResMut<ScoreResource>,
    birds: Query<&Position, With<Bird>>,
    mut pipes: Query<(Entity, &Position, &mut Pipe)>,
) {
    let Ok(bird) = birds.single() else {
        return;
    };

    let mut scored = false;
    for (entity, position, mut pipe) in pipes.iter_mut() {
        let edge = right_edge(position);

        if !pipe.has_passed && edge < bird.0.x {
            pipe.has_passed = true;
            scored = true;
        }

        if edge < 0.0 {
            commands.entity(entity).despawn();
            trace!(?entity, "Despawned off-screen pipe");
        }
    }

    if scored {
        score.0 += 1;
        info!(score = score.0, "Scored");
    }
}
