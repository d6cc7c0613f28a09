//! This module contains the main game logic and state.

use std::time::Duration;

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use glam::Vec2;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::asset::Asset;
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::systems::{
    self,
    animation::bird_animation_system,
    collision::{collision_response_system, collision_system},
    components::{
        DeltaTime, GameRng, GlobalState, PointerQueue, SceneClock, ScoreResource, SpawnTimer, SpeedMultiplier,
    },
    ground::{clock_system, ground_scroll_system},
    hud::score_readout_system,
    input::pointer_dispatch_system,
    physics::{flap_system, gravity_system, movement_system, world_bounds_system},
    pipes::{pipe_progress_system, pipe_spawn_system},
    stage::{setup_scene_system, stage_command_system, GameStage},
    tween::tween_system,
};
use crate::texture::font::BitmapFont;

#[cfg(feature = "sdl")]
use sdl2::{
    render::{Canvas, TextureCreator},
    video::{Window, WindowContext},
    EventPump,
};

/// Ordered phases of a frame's gameplay.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Turn queued pointer presses into commands
    Input,
    /// Apply commands: stage changes and flaps
    Command,
    /// Advance time, physics and the pipe field
    Update,
    /// React to this frame's movement: collisions, HUD, animation
    Respond,
}

/// Core game state: an ECS `World` holding the scene, and the `Schedule` run once per frame.
///
/// The world is complete without a display, so gameplay can be driven headlessly by pushing
/// pointer presses and ticking. [`Game::with_display`] adds SDL input and rendering on top.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds the world, its resources and the initial menu scene.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the font descriptor cannot be loaded or parsed, or if spawning
    /// the scene fails.
    pub fn new(rng: SmallRng) -> GameResult<Game> {
        info!("Starting game initialization");

        debug!("Loading bitmap font");
        let font_bytes = Asset::FontDescriptor.get_bytes()?;
        let font = BitmapFont::parse(&font_bytes)?;
        debug!(face = %font.face, size = font.size, glyphs = font.glyph_count(), "Parsed bitmap font");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, font, rng);
        Self::configure_schedule(&mut schedule);

        debug!("Spawning scene");
        world
            .run_system_once(setup_scene_system)
            .map_err(|e| GameError::InvalidState(format!("Failed to spawn scene: {}", e)))?;

        info!("Game initialization completed successfully");
        Ok(Game { world, schedule })
    }

    /// Builds the game and attaches an SDL window: textures are loaded, input is polled before
    /// gameplay and the scene is drawn after it.
    #[cfg(feature = "sdl")]
    pub fn with_display(
        canvas: Canvas<Window>,
        texture_creator: TextureCreator<WindowContext>,
        event_pump: EventPump,
        rng: SmallRng,
    ) -> GameResult<Game> {
        use crate::systems::render::render_system;
        use crate::systems::sdl_input::sdl_input_system;
        use crate::texture::sprite::TextureStore;

        let mut game = Self::new(rng)?;

        debug!("Loading textures");
        let store = TextureStore::load(&texture_creator)?;

        game.world.insert_non_send_resource(canvas);
        // Textures are only valid while their creator lives
        game.world.insert_non_send_resource(texture_creator);
        game.world.insert_non_send_resource(store);
        game.world.insert_non_send_resource(event_pump);

        game.schedule.add_systems((
            sdl_input_system.before(GameplaySet::Input),
            render_system.after(GameplaySet::Respond),
        ));

        Ok(game)
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
    }

    fn insert_resources(world: &mut World, font: BitmapFont, rng: SmallRng) {
        world.insert_resource(font);
        world.insert_resource(GameRng(rng));
        world.insert_resource(GameStage::default());
        world.insert_resource(GlobalState::default());
        world.insert_resource(ScoreResource::default());
        world.insert_resource(SpeedMultiplier::default());
        world.insert_resource(DeltaTime::default());
        world.insert_resource(SceneClock::default());
        world.insert_resource(SpawnTimer::default());
        world.insert_resource(PointerQueue::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                pointer_dispatch_system.in_set(GameplaySet::Input),
                (stage_command_system, flap_system).chain().in_set(GameplaySet::Command),
                (
                    clock_system,
                    ground_scroll_system,
                    gravity_system,
                    movement_system,
                    world_bounds_system,
                    pipe_spawn_system,
                    pipe_progress_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (
                    collision_system,
                    collision_response_system,
                    score_readout_system,
                    tween_system,
                    bird_animation_system,
                    systems::error_log_system,
                )
                    .chain()
                    .in_set(GameplaySet::Respond),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Command,
                    GameplaySet::Update,
                    GameplaySet::Respond,
                )
                    .chain(),
            );
    }

    /// Queues a pointer press, in logical canvas pixels, for the next tick.
    pub fn push_pointer(&mut self, point: Vec2) {
        self.world.resource_mut::<PointerQueue>().push(point);
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn is_focused(&self) -> bool {
        !self.world.resource::<GlobalState>().focus_lost
    }

    /// Runs one frame of `dt` and returns whether the game asked to exit.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.world.insert_resource(DeltaTime::from_duration(dt));
        self.schedule.run(&mut self.world);

        // Events live for two frames; readers have consumed this frame's by now
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<GameError>>().update();

        self.world.resource::<GlobalState>().exit
    }
}
