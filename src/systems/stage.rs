//! The round's high-level state machine: menu, playing, game over, and back to the menu on retry.

use bevy_ecs::{
    entity::Entity,
    event::EventReader,
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use tracing::{debug, info};

use crate::asset::Asset;
use crate::constants::{bird, layer, ui, CANVAS_SIZE};
use crate::events::{GameCommand, GameEvent};
use crate::systems::animation::BirdAnimation;
use crate::systems::components::{
    Background, Bird, Collider, CollisionLayer, GlobalState, Gravity, Ground, Label, MenuItem, Position, SceneClock,
    SceneEntity, ScoreReadout, ScoreResource, SpawnTimer, SpeedMultiplier, Sprite, TileScroll, Velocity,
};
use crate::texture::font::BitmapFont;

#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// Choosing a speed; the bird hovers and the ground scrolls.
    #[default]
    Menu,
    Playing,
    /// A collision ended the round; waiting for retry.
    GameOver,
}

/// Center of the ground strip; its top edge sits `Base` height above the bottom of the viewport.
pub fn ground_position() -> Vec2 {
    let height = Asset::Base.size().y as f32;
    Vec2::new(CANVAS_SIZE.x as f32 / 2.0, CANVAS_SIZE.y as f32 - height / 2.0)
}

/// Spawns the static scene (background, ground, bird) and the menu.
pub fn spawn_scene(commands: &mut Commands, font: &BitmapFont) {
    commands.spawn((
        Position(CANVAS_SIZE.as_vec2() / 2.0),
        Sprite::new(Asset::Background, layer::BACKGROUND),
        Background,
        SceneEntity,
    ));

    commands.spawn((
        Position(ground_position()),
        Sprite::new(Asset::Base, layer::GROUND),
        TileScroll::default(),
        Collider::new(Asset::Base.size().as_vec2(), CollisionLayer::GROUND),
        Ground,
        SceneEntity,
    ));

    commands.spawn((
        Position(bird::START),
        Velocity::default(),
        Sprite::new(Asset::BirdMidFlap, layer::BIRD),
        Collider::new(Asset::BirdMidFlap.size().as_vec2(), CollisionLayer::BIRD),
        BirdAnimation::default(),
        Bird,
        SceneEntity,
    ));

    crate::systems::menu::spawn_menu(commands, font);
}

pub fn setup_scene_system(mut commands: Commands, font: Res<BitmapFont>) {
    spawn_scene(&mut commands, &font);
}

/// Applies the stage-changing commands: speed selection, retry and exit.
#[allow(clippy::too_many_arguments)]
pub fn stage_command_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut stage: ResMut<GameStage>,
    mut multiplier: ResMut<SpeedMultiplier>,
    mut score: ResMut<ScoreResource>,
    mut clock: ResMut<SceneClock>,
    mut timer: ResMut<SpawnTimer>,
    mut state: ResMut<GlobalState>,
    font: Res<BitmapFont>,
    menu_items: Query<Entity, With<MenuItem>>,
    birds: Query<Entity, With<Bird>>,
    scene: Query<Entity, With<SceneEntity>>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event else {
            continue;
        };

        match *command {
            GameCommand::SelectSpeed(option) if *stage == GameStage::Menu => {
                multiplier.0 = option.multiplier();

                for entity in menu_items.iter() {
                    commands.entity(entity).despawn();
                }
                for entity in birds.iter() {
                    commands.entity(entity).insert(Gravity);
                }

                commands.spawn((
                    Position(ui::SCORE_POSITION),
                    Label {
                        text: "0".to_string(),
                        size: ui::SCORE_SIZE,
                        layer: layer::UI_TEXT,
                    },
                    ScoreReadout,
                    SceneEntity,
                ));

                // The first pair spawns this frame
                timer.next = clock.now;
                *stage = GameStage::Playing;
                info!(speed = ?option, multiplier = multiplier.0, "Round started");
            }
            GameCommand::Retry if *stage == GameStage::GameOver => {
                let despawned = scene.iter().count();
                for entity in scene.iter() {
                    commands.entity(entity).despawn();
                }

                score.0 = 0;
                multiplier.0 = 1.0;
                *clock = SceneClock::default();
                *timer = SpawnTimer::default();
                *stage = GameStage::Menu;

                spawn_scene(&mut commands, &font);
                info!(despawned, "Scene restarted");
            }
            GameCommand::Exit => {
                info!("Exit requested");
                state.exit = true;
            }
            GameCommand::SelectSpeed(_) | GameCommand::Retry => {
                debug!(command = ?command, stage = ?*stage, "Ignoring command outside its stage");
            }
            GameCommand::Flap => {}
        }
    }
}
