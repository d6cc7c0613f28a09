use bevy_ecs::{
    query::With,
    system::{Query, Res, ResMut},
};

use crate::asset::Asset;
use crate::constants::ground::SCROLL_STEP;
use crate::systems::components::{DeltaTime, Ground, SceneClock, SpeedMultiplier, TileScroll};
use crate::systems::stage::GameStage;

/// Advances the scene clock by this frame's delta.
pub fn clock_system(delta_time: Res<DeltaTime>, mut clock: ResMut<SceneClock>) {
    clock.now = clock.now.saturating_add(delta_time.duration);
}

/// Scrolls the ground texture by a fixed step per frame until the round is over.
pub fn ground_scroll_system(
    stage: Res<GameStage>,
    multiplier: Res<SpeedMultiplier>,
    mut grounds: Query<&mut TileScroll, With<Ground>>,
) {
    if *stage == GameStage::GameOver {
        return;
    }

    let width = Asset::Base.size().x as f32;
    for mut scroll in grounds.iter_mut() {
        scroll.offset = (scroll.offset + SCROLL_STEP * multiplier.0).rem_euclid(width);
    }
}
