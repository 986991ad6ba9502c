//! Grid Dash entry point

use std::path::Path;

use grid_dash::app::AppState;
use grid_dash::config::{EngineConfig, CONFIG_FILE};
use grid_dash::draw::MacroquadSurface;
use grid_dash::input::InputState;
use grid_dash::storage::LocalStorage;
use grid_dash::VERSION;
use macroquad::prelude::*;

fn window_conf() -> Conf {
    // Errors are reported again, with logging up, once main starts
    let window = EngineConfig::load(Path::new(CONFIG_FILE)).unwrap_or_default().window;
    Conf {
        window_title: format!("{} v{}", window.title, VERSION),
        window_width: window.width as i32,
        window_height: window.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Log `message` and quit.
fn fatal(message: impl std::fmt::Display) -> ! {
    log::error!("{}", message);
    std::process::exit(1);
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EngineConfig::load(Path::new(CONFIG_FILE)).unwrap_or_else(|e| fatal(e));
    let mut app = AppState::new(config, LocalStorage::new()).unwrap_or_else(|e| fatal(e));
    let mut input = InputState::new();
    let mut surface = MacroquadSurface::new();
    log::info!("Grid Dash v{} started in {}", VERSION, app.scene.name());

    loop {
        let snapshot = input.poll();
        app.update(get_frame_time(), &snapshot).unwrap_or_else(|e| fatal(e));
        app.draw(&mut surface);
        next_frame().await;
    }
}
