//! Time-based movement of an entity between two positions.

use std::time::Duration;

use bevy_ecs::{
    component::Component,
    entity::Entity,
    system::{Commands, Query, Res},
};
use glam::Vec2;

use crate::systems::components::{DeltaTime, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-out: fast start, slowing into the end.
    QuadOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Moves the entity's [`Position`] from `start` to `end`; removed once it arrives.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub start: Vec2,
    pub end: Vec2,
    pub duration: Duration,
    pub elapsed: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(start: Vec2, end: Vec2, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        }
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> Vec2 {
        if self.finished() {
            return self.end;
        }
        self.start.lerp(self.end, self.easing.apply(self.progress()))
    }
}

pub fn tween_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    mut tweens: Query<(Entity, &mut Tween, &mut Position)>,
) {
    for (entity, mut tween, mut position) in tweens.iter_mut() {
        tween.elapsed = (tween.elapsed + delta_time.duration).min(tween.duration);
        position.0 = tween.value();

        if tween.finished() {
            commands.entity(entity).remove::<Tween>();
        }
    }
}
