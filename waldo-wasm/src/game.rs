use std::cell::RefCell;
use std::rc::Rc;

use waldo_core::{
    CharacterId, Completion, ElementBox, GameConfig, GameError, GameSession, TargetMenu,
    VerifyOutcome, api,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement,
    MouseEvent, Window,
};

use crate::fetch::FetchBackend;
use crate::render;
use crate::state::{STATE, State};
use crate::utils::{element_by_id, now_ms};

/// Wire up the game page: `#picture`, `#menu` with `#pick-<slug>` buttons,
/// the character cards, `#stopwatch` and the `#nickname-form` popup.
pub fn start_game(window: Window, document: Document, config: GameConfig) -> Result<(), JsValue> {
    let picture: HtmlImageElement = element_by_id(&document, "picture")?;
    let menu_el: HtmlElement = element_by_id(&document, "menu")?;
    let backend = FetchBackend::new(window.clone(), config.clone());

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        picture,
        menu_el,
        config,
        backend,
        session: GameSession::begin(now_ms()),
        menu: TargetMenu::new(),
        tick_handle: None,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    {
        let s = state.borrow();
        render::render_menu(&s.menu_el, &s.menu, s.config.menu_lift_px)?;
        render::render_characters(&s.document, &s.session);
        render::render_stopwatch(&s.document, s.session.stopwatch());
    }

    attach_picture(state.clone());
    attach_menu(state.clone())?;
    attach_form(state.clone())?;
    start_ticking(state.clone())?;
    register_user(state);
    Ok(())
}

fn attach_picture(state: Rc<RefCell<State>>) {
    let picture = state.borrow().picture.clone();
    let st = state.clone();
    let onclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
        let mut s = st.borrow_mut();
        let rect = s.picture.get_bounding_client_rect();
        let image = ElementBox::new(rect.left(), rect.top(), rect.width(), rect.height());
        let (x, y) = (e.client_x() as f64, e.client_y() as f64);
        if !image.contains(x, y) {
            return;
        }
        let click = image.normalize(x, y);
        log::debug!("click at {}%, {}%", click.x_percent, click.y_percent);
        s.menu.show_at(e.page_x() as f64, e.page_y() as f64, click);
        refresh_menu(&s);
    }));
    picture.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
}

fn refresh_menu(s: &State) {
    if let Err(err) = render::render_menu(&s.menu_el, &s.menu, s.config.menu_lift_px) {
        log::error!("menu render failed: {:?}", err);
    }
}

fn attach_menu(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (menu_el, document) = {
        let s = state.borrow();
        (s.menu_el.clone(), s.document.clone())
    };

    // Leaving the menu starts the grace period; coming back cancels it.
    let st = state.clone();
    let onleave = Closure::<dyn FnMut()>::wrap(Box::new(move || schedule_hide(st.clone())));
    menu_el.set_onmouseleave(Some(onleave.as_ref().unchecked_ref()));
    onleave.forget();

    let st = state.clone();
    let onenter = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        st.borrow_mut().menu.cancel_hide();
    }));
    menu_el.set_onmouseenter(Some(onenter.as_ref().unchecked_ref()));
    onenter.forget();

    for character in CharacterId::ALL {
        let btn: HtmlElement = element_by_id(&document, &format!("pick-{}", character.slug()))?;
        let st = state.clone();
        let onclick =
            Closure::<dyn FnMut()>::wrap(Box::new(move || select_character(st.clone(), character)));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    Ok(())
}

fn schedule_hide(state: Rc<RefCell<State>>) {
    let (ticket, window, delay) = {
        let mut s = state.borrow_mut();
        let ticket = s.menu.schedule_hide();
        (ticket, s.window.clone(), s.config.hide_delay_ms)
    };
    let expire = Closure::once_into_js(move || {
        let mut s = state.borrow_mut();
        if s.menu.expire(ticket) {
            refresh_menu(&s);
        }
    });
    if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        expire.unchecked_ref(),
        delay as i32,
    ) {
        log::error!("could not arm menu timer: {:?}", err);
    }
}

fn select_character(state: Rc<RefCell<State>>, character: CharacterId) {
    let (selection, backend) = {
        let mut s = state.borrow_mut();
        // Close first so the same click cannot be submitted twice.
        let selection = s.menu.select(character);
        refresh_menu(&s);
        let Some(selection) = selection else {
            return;
        };
        s.session.verification_started(character);
        render::render_characters(&s.document, &s.session);
        (selection, s.backend.clone())
    };

    wasm_bindgen_futures::spawn_local(async move {
        let result = api::verify(&backend, selection.character, selection.click).await;
        let mut s = state.borrow_mut();
        let outcome = s
            .session
            .apply_verification(selection.character, &result, now_ms());
        render::render_characters(&s.document, &s.session);
        if let VerifyOutcome::Completed(done) = outcome {
            finish_game(&mut s, &done);
        }
    });
}

fn finish_game(s: &mut State, done: &Completion) {
    if let Some(handle) = s.tick_handle.take() {
        s.window.clear_interval_with_handle(handle);
    }
    render::render_stopwatch(&s.document, s.session.stopwatch());
    if let Err(err) = render::open_popup(&s.document, done) {
        log::error!("could not open the score popup: {:?}", err);
    }
}

fn start_ticking(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let st = state.clone();
    let tick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let mut s = st.borrow_mut();
        s.session.tick(now_ms());
        render::render_stopwatch(&s.document, s.session.stopwatch());
    }));
    let mut s = state.borrow_mut();
    let handle = s.window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        s.config.tick_ms as i32,
    )?;
    tick.forget();
    s.tick_handle = Some(handle);
    Ok(())
}

fn register_user(state: Rc<RefCell<State>>) {
    if state.borrow().session.user_id().is_some() {
        return;
    }
    let backend = state.borrow().backend.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match api::register(&backend).await {
            Ok(id) => {
                if let Err(err) = state.borrow_mut().session.register(id) {
                    log::warn!("ignoring second registration: {}", err);
                }
            }
            Err(err) => log::error!("registration failed: {}", err),
        }
    });
}

fn attach_form(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let form: HtmlFormElement = element_by_id(&state.borrow().document, "nickname-form")?;
    let st = state.clone();
    let onsubmit = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        submit_score(st.clone());
    }));
    form.set_onsubmit(Some(onsubmit.as_ref().unchecked_ref()));
    onsubmit.forget();
    Ok(())
}

/// Post the score once. On success go home; on failure stay on the popup so
/// the form can be sent again. A registration that failed at page load is
/// retried here first.
fn submit_score(state: Rc<RefCell<State>>) {
    let (nickname, known, backend, window, home) = {
        let s = state.borrow();
        if !s.session.is_complete() {
            log::warn!("score not sent: {}", GameError::NotComplete);
            return;
        }
        let nickname = element_by_id::<HtmlInputElement>(&s.document, "nickname")
            .map(|input| input.value())
            .unwrap_or_default();
        (
            nickname,
            s.session.user_id().cloned(),
            s.backend.clone(),
            s.window.clone(),
            s.config.home_url.clone(),
        )
    };
    wasm_bindgen_futures::spawn_local(async move {
        let id = match api::ensure_user(&backend, known).await {
            Ok(id) => id,
            Err(err) => {
                log::error!("score not sent, still no user id: {}", err);
                return;
            }
        };
        let record = {
            let mut s = state.borrow_mut();
            if s.session.user_id().is_none()
                && let Err(err) = s.session.register(id)
            {
                log::warn!("ignoring second registration: {}", err);
            }
            match s.session.score_record(&nickname) {
                Ok(record) => record,
                Err(err) => {
                    log::warn!("score not sent: {}", err);
                    return;
                }
            }
        };
        match api::submit_score(&backend, &record).await {
            Ok(()) => {
                if let Err(err) = window.location().set_href(&home) {
                    log::error!("could not navigate home: {:?}", err);
                }
            }
            Err(err) => log::error!("score for {} was not saved: {}", record.user_id, err),
        }
    });
}
