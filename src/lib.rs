//! Reverse Pac-Man: a sprite that chases the pointer around the page.

#[cfg(target_arch = "wasm32")]
pub mod app;
pub mod clock;
pub mod constants;
pub mod error;
pub mod formatter;
pub mod game;
pub mod platform;
pub mod render;
pub mod sprite;
pub mod throttle;
pub mod vector;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Called automatically when the module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    platform::init_console().map_err(|e| JsValue::from_str(&e.to_string()))?;
    app::run(constants::CANVAS_ID, constants::PELLET_ID).map_err(|e| {
        tracing::error!("Failed to start: {e}");
        JsValue::from_str(&e.to_string())
    })
}
