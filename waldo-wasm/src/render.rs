//! Writes core state into the page. Nothing here decides anything; each
//! function mirrors one piece of state onto its elements.

use waldo_core::{Completion, GameSession, ScoreEntry, Stopwatch, TargetMenu};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::utils::element_by_id;

pub fn render_menu(el: &HtmlElement, menu: &TargetMenu, lift: f64) -> Result<(), JsValue> {
    let style = el.style();
    if !menu.is_visible() {
        return style.set_property("display", "none");
    }
    // Width is only measurable once the menu is laid out.
    style.set_property("display", "flex")?;
    let (left, top) = menu.placement(el.offset_width() as f64, lift);
    style.set_property("left", &format!("{}px", left))?;
    style.set_property("top", &format!("{}px", top))
}

/// Character cards: `#character-<slug>` gets `found` / `pending` classes,
/// `#label-<slug>` gets a check mark once found.
pub fn render_characters(document: &Document, session: &GameSession) {
    for (character, found) in session.found().iter() {
        let slug = character.slug();
        if let Some(card) = document.get_element_by_id(&format!("character-{}", slug)) {
            let classes = card.class_list();
            let _ = classes.toggle_with_force("found", found);
            let _ = classes.toggle_with_force("pending", session.is_pending(character));
        }
        if let Some(label) = document.get_element_by_id(&format!("label-{}", slug)) {
            let mark = if found { "✓" } else { "" };
            label.set_text_content(Some(&format!("{}{}", character.display_name(), mark)));
        }
    }
}

pub fn render_stopwatch(document: &Document, stopwatch: &Stopwatch) {
    if let Some(el) = document.get_element_by_id("stopwatch") {
        el.set_text_content(Some(&stopwatch.display()));
    }
}

pub fn open_popup(document: &Document, completion: &Completion) -> Result<(), JsValue> {
    if let Some(el) = document.get_element_by_id("final-time") {
        el.set_text_content(Some(&format!("{}s", completion.duration_seconds)));
    }
    let popup: HtmlElement = element_by_id(document, "win-popup")?;
    popup.style().set_property("display", "flex")?;
    if let Some(input) = document.get_element_by_id("nickname")
        && let Ok(input) = input.dyn_into::<HtmlElement>()
    {
        let _ = input.focus();
    }
    Ok(())
}

/// Fill `#scores` with one `<li>` per entry. Names go in as text, never as
/// markup.
pub fn render_scores(document: &Document, entries: &[ScoreEntry]) -> Result<(), JsValue> {
    let list = document
        .get_element_by_id("scores")
        .ok_or_else(|| JsValue::from_str("#scores not found"))?;
    list.set_inner_html("");
    for entry in entries {
        let li = document.create_element("li")?;
        if !entry.name.is_empty() {
            let span = document.create_element("span")?;
            span.set_text_content(Some(&entry.name));
            li.append_child(&span)?;
        }
        if let Some(duration) = entry.display_duration() {
            let span = document.create_element("span")?;
            span.set_text_content(Some(&duration));
            li.append_child(&span)?;
        }
        list.append_child(&li)?;
    }
    Ok(())
}
