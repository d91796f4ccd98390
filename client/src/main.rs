use macroquad::prelude::*;

use treasure_hunt_client::{storage, window_conf, App};

#[macroquad::main(window_conf)]
async fn main() {
    let config = storage::load_config();

    // Initialize logging, RUST_LOG overrides the configured filter
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();

    // Set panic hook for native builds to capture crash info
    #[cfg(not(target_arch = "wasm32"))]
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        if let Some(location) = panic_info.location() {
            eprintln!("  at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    log::info!("Starting treasure hunt (tile size {}, autosave every {}s)", config.tile_size, config.autosave_secs);

    let mut app = match App::new(config).await {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to load game data: {}", e);
            return;
        }
    };

    loop {
        app.frame();
        next_frame().await;
    }
}
