//! Shoe surface viewer.
//!
//! Renders `z = x³/3 − y²/2` over `[-1, 1]²` with a small sphere marking an
//! orbiting point light. Drag with the left button to rotate, Escape to quit.

mod config;
mod scene;
mod trackball;

use std::process::ExitCode;

use shoe_engine::device::GpuInit;
use shoe_engine::logging::{init_logging, LoggingConfig};
use shoe_engine::window::{Runtime, RuntimeConfig};

use config::SceneConfig;
use scene::Scene;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let scene = Scene::new(SceneConfig::default());
    match Runtime::run(RuntimeConfig::default(), GpuInit::default(), scene) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Sorry, {e:#}");
            ExitCode::FAILURE
        }
    }
}
