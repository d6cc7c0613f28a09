//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

use bevy_ecs::event::EventReader;
use tracing::error;

use crate::error::GameError;

pub mod animation;
pub mod collision;
pub mod components;
pub mod ground;
pub mod hud;
pub mod input;
pub mod menu;
pub mod physics;
pub mod pipes;
#[cfg(feature = "sdl")]
pub mod render;
#[cfg(feature = "sdl")]
pub mod sdl_input;
pub mod stage;
pub mod tween;

/// Logs errors raised by systems during the frame.
pub fn error_log_system(mut errors: EventReader<GameError>) {
    for err in errors.read() {
        error!(error = %err, "System error");
    }
}
