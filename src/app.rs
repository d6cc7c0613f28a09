use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use sdl2::Sdl;
use tracing::{debug, info, trace, warn};

use crate::constants::{CANVAS_SIZE, LOOP_TIME, SCALE};
use crate::error::{GameError, GameResult};
use crate::formatter;
use crate::game::Game;
use crate::platform;

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    last_tick: Instant,
    // Keep SDL alive for the app lifetime
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL, creates the window and canvas, and builds the game on top of them.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::with_display()` during game setup.
    pub fn new(rng: SmallRng) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;
        trace!("Yielding after subsystem init");
        platform::yield_to_browser();

        let width = (CANVAS_SIZE.x as f32 * SCALE).round() as u32;
        let height = (CANVAS_SIZE.y as f32 * SCALE).round() as u32;
        trace!(width, height, scale = SCALE, "Creating game window");
        let window = video_subsystem
            .window("Flappy", width, height)
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");
        platform::yield_to_browser();

        let texture_creator = canvas.texture_creator();
        let game = Game::with_display(canvas, texture_creator, event_pump, rng)?;

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            last_tick: Instant::now(),
            _sdl_context: sdl_context,
        })
    }

    /// Executes a single frame: ticks the game with the time since the last frame, then sleeps
    /// off whatever is left of `LOOP_TIME`.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let dt = start.duration_since(self.last_tick);
        self.last_tick = start;

        formatter::increment_tick();

        if self.game.tick(dt) {
            return false;
        }

        let elapsed = start.elapsed();
        if elapsed < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(elapsed);
            if time != Duration::ZERO {
                platform::sleep(time, self.game.is_focused());
            }
        } else {
            warn!(behind = ?(elapsed - LOOP_TIME), "Game loop behind schedule");
        }

        true
    }
}
