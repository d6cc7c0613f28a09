//! Emscripten platform implementation.

use std::borrow::Cow;
use std::ffi::{c_void, CString};
use std::io::{self, Write};
use std::os::raw::c_int;
use std::time::Duration;

use rand::{rngs::SmallRng, SeedableRng};

use crate::asset::Asset;
use crate::error::{AssetError, PlatformError};
use crate::formatter::CustomFormatter;

/// Callback function type for emscripten main loop
pub type EmMainLoopCallback = unsafe extern "C" fn(*mut c_void);

extern "C" {
    fn emscripten_sleep(ms: u32);
    fn printf(format: *const u8, ...) -> i32;

    /// Runs `func` once per browser frame. `fps = 0` uses requestAnimationFrame;
    /// `simulate_infinite_loop = 1` never returns.
    pub fn emscripten_set_main_loop_arg(func: EmMainLoopCallback, arg: *mut c_void, fps: c_int, simulate_infinite_loop: c_int);

    pub fn emscripten_cancel_main_loop();

    fn emscripten_run_script(script: *const i8);
}

/// Execute a JavaScript snippet, used to signal the page.
pub fn run_script(script: &str) {
    if let Ok(cstr) = CString::new(script) {
        unsafe {
            emscripten_run_script(cstr.as_ptr());
        }
    }
}

pub fn sleep(duration: Duration, _focused: bool) {
    unsafe {
        emscripten_sleep(duration.as_millis() as u32);
    }
}

/// Lets the browser process events during long initialization (requires ASYNCIFY).
pub fn yield_to_browser() {
    unsafe {
        emscripten_sleep(0);
    }
}

pub fn init_console() -> Result<(), PlatformError> {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(|| EmscriptenConsoleWriter)
                .with_ansi(false)
                .event_format(CustomFormatter),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set tracing subscriber: {}", e)))
}

/// Writes each log line to the browser console through `printf`.
struct EmscriptenConsoleWriter;

impl Write for EmscriptenConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(line) = std::str::from_utf8(buf) {
            if let Ok(cstr) = CString::new(line.trim_end_matches('\n')) {
                unsafe {
                    printf(c"%s\n".as_ptr().cast(), cstr.as_ptr());
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Assets are preloaded into the virtual filesystem under `assets/game/`.
pub fn get_asset_bytes(asset: Asset) -> Result<Cow<'static, [u8]>, AssetError> {
    let path = format!("assets/game/{}", asset.path());
    match std::fs::read(&path) {
        Ok(bytes) => Ok(Cow::Owned(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AssetError::NotFound(asset.path().to_string())),
        Err(e) => Err(AssetError::Io(e)),
    }
}

pub fn rng() -> SmallRng {
    SmallRng::from_os_rng()
}
