//! Hand Asteroids entry point

use std::process::ExitCode;

use frame_engine::config::Config;
use frame_engine::foundation::logging;
use frame_engine::ExitReason;
use hand_asteroids::config::CONFIG_PATH;
use hand_asteroids::GameConfig;

fn main() -> ExitCode {
    let config = match GameConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            log::error!("Failed to load {}: {}", CONFIG_PATH, e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.log_level);

    log::info!(
        "Starting {} ({}x{})",
        config.display.window_title, config.display.width, config.display.height
    );

    match hand_asteroids::run(&config) {
        Ok(ExitReason::CaptureFailed) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
