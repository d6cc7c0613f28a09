//! Arcade physics: gravity, velocity integration, world bounds and the flap impulse.

use bevy_ecs::{
    event::EventReader,
    query::With,
    system::{Query, Res},
};
use tracing::trace;

use crate::constants::{physics, CANVAS_SIZE};
use crate::events::{GameCommand, GameEvent};
use crate::systems::components::{Bird, Collider, DeltaTime, Gravity, Position, Velocity};
use crate::systems::stage::GameStage;

pub fn gravity_system(delta_time: Res<DeltaTime>, mut bodies: Query<&mut Velocity, With<Gravity>>) {
    for mut velocity in bodies.iter_mut() {
        velocity.0.y += physics::GRAVITY * delta_time.seconds;
    }
}

/// Semi-implicit Euler: runs after gravity, so positions use this frame's velocity.
pub fn movement_system(delta_time: Res<DeltaTime>, mut bodies: Query<(&mut Position, &Velocity)>) {
    for (mut position, velocity) in bodies.iter_mut() {
        position.0 += velocity.0 * delta_time.seconds;
    }
}

/// Keeps the bird inside the viewport, stopping its vertical motion at the edge.
pub fn world_bounds_system(mut birds: Query<(&mut Position, &mut Velocity, &Collider), With<Bird>>) {
    let height = CANVAS_SIZE.y as f32;

    for (mut position, mut velocity, collider) in birds.iter_mut() {
        let half = collider.size.y / 2.0;
        let clamped = position.0.y.clamp(half, height - half);
        if clamped != position.0.y {
            position.0.y = clamped;
            velocity.0.y = 0.0;
        }
    }
}

/// Sets the bird's vertical velocity on every flap while the round is live.
pub fn flap_system(
    mut events: EventReader<GameEvent>,
    stage: Res<GameStage>,
    mut birds: Query<&mut Velocity, With<Bird>>,
) {
    for event in events.read() {
        if !matches!(event, GameEvent::Command(GameCommand::Flap)) || *stage != GameStage::Playing {
            continue;
        }

        if let Ok(mut velocity) = birds.single_mut() {
            velocity.0.y = physics::FLAP_SPEED;
            trace!("Flap");
        }
    }
}
