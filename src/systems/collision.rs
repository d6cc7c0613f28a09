use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::{Has, With, Without},
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use tracing::{debug, info};

use crate::events::GameEvent;
use crate::systems::animation::{BirdAnimation, BirdAnimationState};
use crate::systems::components::{
    Bird, Collider, CollisionLayer, Gravity, Ground, Pipe, Position, ScoreReadout, ScoreResource, Velocity,
};
use crate::systems::hud::spawn_summary;
use crate::systems::stage::GameStage;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x && self.min.y < other.max.y && other.min.y < self.max.y
    }
}

/// Reports every overlap between the bird and an enabled pipe or ground collider.
pub fn collision_system(
    birds: Query<(Entity, &Position, &Collider), With<Bird>>,
    others: Query<(Entity, &Position, &Collider), Without<Bird>>,
    mut writer: EventWriter<GameEvent>,
) {
    for (bird, bird_position, bird_collider) in birds.iter() {
        if !bird_collider.enabled {
            continue;
        }
        let bird_box = Aabb::from_center(bird_position.0, bird_collider.size);

        for (other, position, collider) in others.iter() {
            if !collider.enabled || !collider.layer.intersects(CollisionLayer::PIPE | CollisionLayer::GROUND) {
                continue;
            }

            if bird_box.overlaps(&Aabb::from_center(position.0, collider.size)) {
                debug!(?bird, ?other, layer = ?collider.layer, "Collision detected");
                writer.write(GameEvent::Collision(bird, other));
            }
        }
    }
}

/// Ends the round on pipe or ground contact.
///
/// A pipe hit only counts while playing. A ground hit counts once per round, guarded by the
/// ground collider, so falling onto the ground after a pipe hit still brings up the summary.
#[allow(clippy::type_complexity)]
pub fn collision_response_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut stage: ResMut<GameStage>,
    score: Res<ScoreResource>,
    mut birds: Query<(&mut Position, &mut Velocity, &mut BirdAnimation, &Collider), With<Bird>>,
    mut others: Query<(&mut Collider, &Position, Has<Pipe>, Has<Ground>), Without<Bird>>,
    mut pipe_velocities: Query<&mut Velocity, (With<Pipe>, Without<Bird>)>,
    readouts: Query<Entity, With<ScoreReadout>>,
) {
    for event in events.read() {
        let GameEvent::Collision(bird, other) = *event else {
            continue;
        };
        let Ok((mut bird_position, mut bird_velocity, mut animation, bird_collider)) = birds.get_mut(bird) else {
            continue;
        };
        let Ok((mut collider, position, is_pipe, is_ground)) = others.get_mut(other) else {
            continue;
        };

        if is_pipe {
            if *stage != GameStage::Playing {
                continue;
            }

            animation.play(BirdAnimationState::Falling);
            bird_velocity.0.x = 0.0;
            collider.enabled = false;
            for mut velocity in pipe_velocities.iter_mut() {
                velocity.0.x = 0.0;
            }

            *stage = GameStage::GameOver;
            info!(score = score.0, "Bird hit a pipe");
        } else if is_ground {
            if !collider.enabled {
                continue;
            }

            animation.play(BirdAnimationState::Falling);
            bird_velocity.0 = Vec2::ZERO;
            commands.entity(bird).remove::<Gravity>();
            collider.enabled = false;

            // Rest the bird on top of the ground
            let ground_top = position.0.y - collider.size.y / 2.0;
            bird_position.0.y = ground_top - bird_collider.size.y / 2.0;

            for mut velocity in pipe_velocities.iter_mut() {
                velocity.0.x = 0.0;
            }

            *stage = GameStage::GameOver;
            for readout in readouts.iter() {
                commands.entity(readout).despawn();
            }
            spawn_summary(&mut commands, score.0);
            info!(score = score.0, "Bird hit the ground");
        }
    }
}
