use std::collections::VecDeque;
use std::time::Duration;

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use bitflags::bitflags;
use glam::Vec2;
use rand::rngs::SmallRng;

use crate::asset::Asset;
use crate::systems::menu::SpeedOption;

/// Marks every entity that belongs to the current round, so a restart can despawn them all.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SceneEntity;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bird;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Ground;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Background;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeSide {
    /// Hangs from the top, drawn rotated.
    Upper,
    Lower,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipe {
    pub side: PipeSide,
    /// Set once, when the bird first gets past the pipe's right edge.
    pub has_passed: bool,
}

impl Pipe {
    pub fn new(side: PipeSide) -> Self {
        Self { side, has_passed: false }
    }
}

/// Center of the entity, in logical pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Pixels per second.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// Tag: the entity is pulled down by gravity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Gravity;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u8 {
        const BIRD = 1 << 0;
        const PIPE = 1 << 1;
        const GROUND = 1 << 2;
    }
}

/// An axis-aligned collision body centered on the entity's [`Position`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: Vec2,
    pub enabled: bool,
    pub layer: CollisionLayer,
}

impl Collider {
    pub fn new(size: Vec2, layer: CollisionLayer) -> Self {
        Self {
            size,
            enabled: true,
            layer,
        }
    }
}

/// An image drawn centered on the entity's position.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub asset: Asset,
    pub scale: f32,
    /// Drawn rotated by 180 degrees.
    pub rotated: bool,
    pub layer: u8,
}

impl Sprite {
    pub fn new(asset: Asset, layer: u8) -> Self {
        Self {
            asset,
            scale: 1.0,
            rotated: false,
            layer,
        }
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotated(mut self) -> Self {
        self.rotated = true;
        self
    }

    /// Size on screen, after scaling.
    pub fn size(&self) -> Vec2 {
        self.asset.size().as_vec2() * self.scale
    }
}

/// Bitmap-font text centered on the entity's position.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub size: f32,
    pub layer: u8,
}

/// The sprite is tiled horizontally, with its texture shifted left by `offset` pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct TileScroll {
    pub offset: f32,
}

/// A pointer-down inside this box, centered on the entity's position, hits the entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Interactive {
    pub size: Vec2,
}

impl Interactive {
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let half = self.size / 2.0;
        (point.x - center.x).abs() <= half.x && (point.y - center.y).abs() <= half.y
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpeedButton(pub SpeedOption);

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct RetryButton;

/// Torn down when the round starts.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MenuItem;

/// The live score shown during play.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ScoreReadout;

#[derive(Bundle)]
pub struct PipeBundle {
    pub pipe: Pipe,
    pub position: Position,
    pub velocity: Velocity,
    pub collider: Collider,
    pub sprite: Sprite,
    pub scene: SceneEntity,
}

#[derive(Resource, Default)]
pub struct GlobalState {
    pub exit: bool,
    /// Set while the window is in the background; the frame limiter stops spinning.
    pub focus_lost: bool,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResource(pub u32);

/// Scales pipe velocity and ground scrolling; fixed for the whole round.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpeedMultiplier(pub f32);

impl Default for SpeedMultiplier {
    fn default() -> Self {
        Self(1.0)
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct DeltaTime {
    /// Floating-point delta time in seconds, used by the physics step
    pub seconds: f32,
    /// Exact delta, used to advance the scene clock without drift
    pub duration: Duration,
}

impl DeltaTime {
    pub fn from_duration(duration: Duration) -> Self {
        Self {
            seconds: duration.as_secs_f32(),
            duration,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::from_duration(Duration::from_millis(millis))
    }
}

/// Time elapsed in the current round, advanced by each frame's delta.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneClock {
    pub now: Duration,
}

/// Scene time at which the next pipe pair spawns.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnTimer {
    pub next: Duration,
}

/// Randomness for pipe placement. Seeded once so a round can be replayed.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);

/// Pointer-down positions in logical pixels, oldest first, drained once per frame.
#[derive(Resource, Debug, Default)]
pub struct PointerQueue(pub VecDeque<Vec2>);

impl PointerQueue {
    pub fn push(&mut self, point: Vec2) {
        self.0.push_back(point);
    }
}
