//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{UVec2, Vec2};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the canvas, in logical pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(288, 512);

/// The scale factor for the window
pub const SCALE: f32 = 1.5;

/// Arcade physics tuning, in pixels and seconds.
pub mod physics {
    /// Downward acceleration applied to bodies with gravity enabled.
    pub const GRAVITY: f32 = 600.0;
    /// Vertical velocity the bird is set to on every flap.
    pub const FLAP_SPEED: f32 = -230.0;
    /// Horizontal velocity of pipes before the speed multiplier is applied.
    pub const PIPE_SPEED: f32 = -150.0;
}

pub mod pipes {
    use std::time::Duration;

    /// Time between pipe pair spawns, measured on the scene clock.
    pub const SPAWN_INTERVAL: Duration = Duration::from_millis(1500);
    /// Height of the pipe sprite, used by the gap geometry.
    pub const PIPE_HEIGHT: f32 = 320.0;
}

pub mod ground {
    /// Tile offset advanced per frame, before the speed multiplier.
    pub const SCROLL_STEP: f32 = 1.0;
}

pub mod bird {
    use glam::Vec2;

    use super::CANVAS_SIZE;

    /// The bird's spawn point; x never changes during a round.
    pub const START: Vec2 = Vec2::new(CANVAS_SIZE.x as f32 / 4.0, CANVAS_SIZE.y as f32 / 2.0);
    /// Frames per second of the flying animation.
    pub const FLAP_FRAME_RATE: f32 = 9.0;
}

/// Layout of the menu, HUD and game-over summary.
pub mod ui {
    use std::time::Duration;

    use glam::Vec2;

    use super::CANVAS_SIZE;

    const CENTER_X: f32 = CANVAS_SIZE.x as f32 / 2.0;
    const HEIGHT: f32 = CANVAS_SIZE.y as f32;

    pub const LOGO_POSITION: Vec2 = Vec2::new(CENTER_X, 80.0);
    pub const LOGO_SCALE: f32 = 0.6;

    pub const TITLE_TEXT: &str = "Select Speed:";
    pub const TITLE_POSITION: Vec2 = Vec2::new(CENTER_X, 140.0);
    pub const TITLE_SIZE: f32 = 24.0;

    /// Vertical center of the first speed option.
    pub const OPTION_TOP: f32 = 190.0;
    pub const OPTION_SPACING: f32 = 50.0;
    pub const OPTION_SIZE: f32 = 20.0;

    pub const SCORE_POSITION: Vec2 = Vec2::new(CENTER_X, 30.0);
    pub const SCORE_SIZE: f32 = 32.0;

    pub const GAME_OVER_POSITION: Vec2 = Vec2::new(CENTER_X, HEIGHT / 4.0);

    /// Both summary widgets start at the bottom edge and tween upward.
    pub const SUMMARY_START_Y: f32 = HEIGHT;
    pub const PANEL_REST_Y: f32 = HEIGHT / 2.2;
    pub const FINAL_SCORE_REST_Y: f32 = HEIGHT / 2.1;
    pub const SUMMARY_TWEEN: Duration = Duration::from_millis(500);

    pub const RETRY_POSITION: Vec2 = Vec2::new(CENTER_X, HEIGHT / 1.5);
    pub const RETRY_SCALE: f32 = 0.25;
}

/// Draw order of scene layers, lowest first.
pub mod layer {
    pub const BACKGROUND: u8 = 0;
    pub const PIPES: u8 = 1;
    pub const GROUND: u8 = 2;
    pub const BIRD: u8 = 3;
    pub const UI: u8 = 4;
    pub const UI_TEXT: u8 = 5;
}

/// The center of the canvas, in logical pixels.
pub fn canvas_center() -> Vec2 {
    CANVAS_SIZE.as_vec2() / 2.0
}
