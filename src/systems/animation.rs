use bevy_ecs::{
    component::Component,
    system::{Query, Res},
};

use crate::asset::Asset;
use crate::constants::bird::FLAP_FRAME_RATE;
use crate::systems::components::{DeltaTime, Sprite};

const FLYING_FRAMES: [Asset; 3] = [Asset::BirdMidFlap, Asset::BirdDownFlap, Asset::BirdUpFlap];
const FALLING_FRAMES: [Asset; 1] = [Asset::BirdFall];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BirdAnimationState {
    #[default]
    Flying,
    Falling,
}

impl BirdAnimationState {
    fn frames(&self) -> &'static [Asset] {
        match self {
            BirdAnimationState::Flying => &FLYING_FRAMES,
            BirdAnimationState::Falling => &FALLING_FRAMES,
        }
    }
}

/// Looping frame animation for the bird.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct BirdAnimation {
    pub state: BirdAnimationState,
    pub current_frame: usize,
    /// Seconds accumulated toward the next frame.
    pub time_bank: f32,
}

impl BirdAnimation {
    /// Switches to `state`, restarting from its first frame. Playing the current state is a no-op.
    pub fn play(&mut self, state: BirdAnimationState) {
        if self.state != state {
            self.state = state;
            self.current_frame = 0;
            self.time_bank = 0.0;
        }
    }

    pub fn advance(&mut self, seconds: f32) {
        let frame_duration = 1.0 / FLAP_FRAME_RATE;
        let frames = self.state.frames().len();

        self.time_bank += seconds;
        while self.time_bank >= frame_duration {
            self.time_bank -= frame_duration;
            self.current_frame = (self.current_frame + 1) % frames;
        }
    }

    pub fn current_asset(&self) -> Asset {
        let frames = self.state.frames();
        frames[self.current_frame % frames.len()]
    }
}

pub fn bird_animation_system(delta_time: Res<DeltaTime>, mut query: Query<(&mut BirdAnimation, &mut Sprite)>) {
    for (mut animation, mut sprite) in query.iter_mut() {
        animation.advance(delta_time.seconds);

        let asset = animation.current_asset();
        if sprite.asset != asset {
            sprite.asset = asset;
        }
    }
}
