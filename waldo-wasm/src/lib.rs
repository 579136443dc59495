//! Browser front end for the hidden-character picture game.
//!
//! The host page decides what runs: a `#picture` element starts a game
//! session, a `#scores` list loads the score board. Both may be present.

use wasm_bindgen::prelude::*;

pub mod fetch;
mod game;
pub mod render;
mod scoreboard;
mod state;
pub mod utils;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let config = utils::load_config(&window);
    utils::init_logging(config.log_level);
    log::debug!("api base {}", config.api_url);

    if document.get_element_by_id("scores").is_some() {
        scoreboard::load(window.clone(), document.clone(), config.clone());
    }
    if document.get_element_by_id("picture").is_some() {
        game::start_game(window, document, config)?;
    }
    Ok(())
}
