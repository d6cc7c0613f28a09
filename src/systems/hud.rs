//! The live score readout and the game-over summary.

use bevy_ecs::{
    change_detection::DetectChanges,
    query::With,
    system::{Commands, Query, Res},
};
use glam::Vec2;

use crate::asset::Asset;
use crate::constants::{layer, ui, CANVAS_SIZE};
use crate::systems::components::{
    Interactive, Label, Position, RetryButton, SceneEntity, ScoreReadout, ScoreResource, Sprite,
};
use crate::systems::tween::{Easing, Tween};

/// Keeps the readout text in step with the score.
pub fn score_readout_system(score: Res<ScoreResource>, mut readouts: Query<&mut Label, With<ScoreReadout>>) {
    if !score.is_changed() {
        return;
    }

    for mut label in readouts.iter_mut() {
        label.text = score.0.to_string();
    }
}

/// Spawns the game-over banner, the score panel and final score sliding up from the bottom, and the retry button.
pub fn spawn_summary(commands: &mut Commands, score: u32) {
    let center_x = CANVAS_SIZE.x as f32 / 2.0;
    let start = Vec2::new(center_x, ui::SUMMARY_START_Y);

    commands.spawn((
        Position(ui::GAME_OVER_POSITION),
        Sprite::new(Asset::GameOver, layer::UI),
        SceneEntity,
    ));

    commands.spawn((
        Position(start),
        Sprite::new(Asset::ScorePanel, layer::UI),
        Tween::new(
            start,
            Vec2::new(center_x, ui::PANEL_REST_Y),
            ui::SUMMARY_TWEEN,
            Easing::QuadOut,
        ),
        SceneEntity,
    ));

    commands.spawn((
        Position(start),
        Label {
            text: score.to_string(),
            size: ui::SCORE_SIZE,
            layer: layer::UI_TEXT,
        },
        Tween::new(
            start,
            Vec2::new(center_x, ui::FINAL_SCORE_REST_Y),
            ui::SUMMARY_TWEEN,
            Easing::QuadOut,
        ),
        SceneEntity,
    ));

    let retry = Sprite::new(Asset::Retry, layer::UI).scaled(ui::RETRY_SCALE);
    commands.spawn((
        Position(ui::RETRY_POSITION),
        Interactive { size: retry.size() },
        retry,
        RetryButton,
        SceneEntity,
    ));
}
