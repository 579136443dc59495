// Browser checks for the DOM rendering helpers.
// Run with `wasm-pack test --headless --firefox waldo-wasm`.

use waldo_core::{CharacterId, GameSession, NormalizedClick, ScoreEntry, TargetMenu};
use waldo_wasm::render;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(doc: &Document, tag: &str, id: &str) -> HtmlElement {
    if let Some(old) = doc.get_element_by_id(id) {
        old.remove();
    }
    let el: HtmlElement = doc.create_element(tag).unwrap().dyn_into().unwrap();
    el.set_id(id);
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn menu_follows_visibility() {
    let doc = document();
    let el = mount(&doc, "div", "menu");
    el.style().set_property("position", "absolute").unwrap();
    el.style().set_property("width", "100px").unwrap();

    let mut menu = TargetMenu::new();
    render::render_menu(&el, &menu, 25.0).unwrap();
    assert_eq!(el.style().get_property_value("display").unwrap(), "none");

    menu.show_at(300.0, 200.0, NormalizedClick { x_percent: 50, y_percent: 50 });
    render::render_menu(&el, &menu, 25.0).unwrap();
    assert_eq!(el.style().get_property_value("display").unwrap(), "flex");
    assert_eq!(el.style().get_property_value("left").unwrap(), "250px");
    assert_eq!(el.style().get_property_value("top").unwrap(), "175px");

    menu.select(CharacterId::Waldo);
    render::render_menu(&el, &menu, 25.0).unwrap();
    assert_eq!(el.style().get_property_value("display").unwrap(), "none");
}

#[wasm_bindgen_test]
fn found_character_gets_check_mark() {
    let doc = document();
    let card = mount(&doc, "div", "character-odlaw");
    let label = mount(&doc, "h2", "label-odlaw");

    let mut session = GameSession::begin(0.0);
    render::render_characters(&doc, &session);
    assert_eq!(label.text_content().unwrap(), "Odlaw");
    assert!(!card.class_list().contains("found"));

    session.apply_verification(CharacterId::Odlaw, &Ok(true), 1_000.0);
    render::render_characters(&doc, &session);
    assert_eq!(label.text_content().unwrap(), "Odlaw✓");
    assert!(card.class_list().contains("found"));
}

#[wasm_bindgen_test]
fn score_names_are_text() {
    let doc = document();
    let list = mount(&doc, "ul", "scores");
    let rows = vec![
        ScoreEntry { id: "1".into(), name: "<b>eve</b>".into(), duration_in_seconds: Some(12.0) },
        ScoreEntry { id: "2".into(), name: String::new(), duration_in_seconds: None },
    ];
    render::render_scores(&doc, &rows).unwrap();
    assert_eq!(list.children().length(), 2);
    let first = list.children().item(0).unwrap();
    assert_eq!(first.text_content().unwrap(), "<b>eve</b>12s");
    assert_eq!(first.children().length(), 2);
    assert_eq!(list.children().item(1).unwrap().children().length(), 0);
}

#[wasm_bindgen_test]
fn config_defaults_without_host_overrides() {
    let window = web_sys::window().unwrap();
    let cfg = waldo_wasm::utils::load_config(&window);
    assert_eq!(cfg.hide_delay_ms, 200);
    assert!(!cfg.api_url.is_empty());
}
