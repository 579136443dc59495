use waldo_core::GameConfig;
use waldo_core::api;
use waldo_core::scores::ranked;
use web_sys::{Document, Window};

use crate::fetch::FetchBackend;
use crate::render::render_scores;

/// Fetch the public score list and render it into `#scores`. Fire and
/// forget; failures only reach the console.
pub fn load(window: Window, document: Document, config: GameConfig) {
    let backend = FetchBackend::new(window, config);
    wasm_bindgen_futures::spawn_local(async move {
        let rows = match api::fetch_scores(&backend).await {
            Ok(rows) => ranked(rows),
            Err(err) => {
                log::warn!("could not load scores: {}", err);
                return;
            }
        };
        if let Some(best) = rows.first() {
            log::debug!("{} scores, best: {}", rows.len(), best.label());
        }
        if let Err(err) = render_scores(&document, &rows) {
            log::error!("could not render scores: {:?}", err);
        }
    });
}
