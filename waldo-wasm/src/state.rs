use std::cell::RefCell;
use std::rc::Rc;

use waldo_core::{GameConfig, GameSession, TargetMenu};
use web_sys::{Document, HtmlElement, HtmlImageElement, Window};

use crate::fetch::FetchBackend;

/// Game page state stored behind an `Rc<RefCell<_>>` so it can be shared
/// across the DOM callbacks and the spawned request futures.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub picture: HtmlImageElement,
    pub menu_el: HtmlElement,
    pub config: GameConfig,
    pub backend: FetchBackend,
    pub session: GameSession,
    pub menu: TargetMenu,
    /// `setInterval` handle of the stopwatch tick.
    pub tick_handle: Option<i32>,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
