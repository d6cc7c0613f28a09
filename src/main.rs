#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;

use flappy::app::App;
use flappy::constants::LOOP_TIME;
use flappy::platform;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

/// Reads `--seed <u64>` from the command line, if present.
fn parse_seed(args: &[String]) -> Option<u64> {
    args.iter()
        .position(|arg| arg == "--seed")
        .and_then(|index| args.get(index + 1))
        .and_then(|value| value.parse().ok())
}

// Emscripten-specific: static storage for the App instance
// Required because emscripten_set_main_loop_arg needs a persistent pointer
#[cfg(target_os = "emscripten")]
static mut APP: Option<App> = None;

/// Emscripten main loop callback - runs once per frame
#[cfg(target_os = "emscripten")]
#[allow(static_mut_refs)]
unsafe extern "C" fn main_loop_callback(_arg: *mut std::ffi::c_void) {
    if let Some(ref mut app) = APP {
        if !app.run() {
            platform::emscripten_cancel_main_loop();
        }
    }
}

/// The main entry point of the application.
///
/// Initializes logging, SDL, the window and the game, then enters the main loop.
pub fn main() {
    let args: Vec<String> = env::args().collect();
    let seed = parse_seed(&args);

    platform::init_console().expect("Could not initialize console");

    let rng = match seed {
        Some(seed) => {
            info!(seed, "Using fixed seed");
            SmallRng::seed_from_u64(seed)
        }
        None => platform::rng(),
    };

    let app = App::new(rng).expect("Could not create app");

    info!(loop_time = ?LOOP_TIME, "Starting game loop");

    #[cfg(target_os = "emscripten")]
    {
        use std::ptr;

        unsafe {
            APP = Some(app);
        }

        platform::run_script("if (window.flappyReady) window.flappyReady()");

        // fps=0 uses requestAnimationFrame; simulate_infinite_loop=1 never returns
        unsafe {
            platform::emscripten_set_main_loop_arg(main_loop_callback, ptr::null_mut(), 0, 1);
        }
    }

    #[cfg(not(target_os = "emscripten"))]
    {
        let mut app = app;
        while app.run() {}
        info!("Exiting");
    }
}
