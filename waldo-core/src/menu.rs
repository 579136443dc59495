//! Contextual character picker shown next to a click on the picture.
//!
//! The menu is pure state; the browser layer reads [`TargetMenu::placement`]
//! and [`TargetMenu::is_visible`] after every transition and owns the actual
//! timer used by [`TargetMenu::schedule_hide`].

use crate::character::CharacterId;
use crate::click::NormalizedClick;

/// Delay between the pointer leaving the menu and the menu closing.
pub const HIDE_DELAY_MS: u32 = 200;
/// How far above the click point the menu's top edge sits.
pub const MENU_LIFT_PX: f64 = 25.0;

/// Handle for one pending hide. Only the most recent ticket can close the
/// menu; any later transition makes older tickets inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HideTicket(u64);

/// The click a character was picked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub character: CharacterId,
    pub click: NormalizedClick,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetMenu {
    visible: bool,
    anchor_x: f64,
    anchor_y: f64,
    click: Option<NormalizedClick>,
    generation: u64,
    hide_pending: bool,
}

impl TargetMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Page position of the click the menu was opened for.
    pub fn anchor(&self) -> (f64, f64) {
        (self.anchor_x, self.anchor_y)
    }

    pub fn click(&self) -> Option<NormalizedClick> {
        self.click
    }

    /// Top-left corner for a menu `menu_width` wide: centered horizontally on
    /// the anchor and `lift` pixels above it.
    pub fn placement(&self, menu_width: f64, lift: f64) -> (f64, f64) {
        (self.anchor_x - menu_width / 2.0, self.anchor_y - lift)
    }

    /// Open the menu for a new click, replacing any previous one.
    pub fn show_at(&mut self, page_x: f64, page_y: f64, click: NormalizedClick) {
        self.visible = true;
        self.anchor_x = page_x;
        self.anchor_y = page_y;
        self.click = Some(click);
        self.invalidate_hide();
    }

    /// Start the grace period. The caller arms a timer for
    /// [`HIDE_DELAY_MS`] and hands the ticket back to [`TargetMenu::expire`].
    pub fn schedule_hide(&mut self) -> HideTicket {
        self.generation += 1;
        self.hide_pending = true;
        HideTicket(self.generation)
    }

    pub fn cancel_hide(&mut self) {
        self.invalidate_hide();
    }

    /// Returns true if this ticket actually closed the menu.
    pub fn expire(&mut self, ticket: HideTicket) -> bool {
        if !self.hide_pending || ticket.0 != self.generation {
            return false;
        }
        self.hide_pending = false;
        let was_visible = self.visible;
        self.visible = false;
        was_visible
    }

    /// Pick a character for the current click. The menu closes before the
    /// selection is returned and the click is consumed, so a second pick for
    /// the same click yields `None`.
    pub fn select(&mut self, character: CharacterId) -> Option<Selection> {
        self.visible = false;
        self.invalidate_hide();
        self.click.take().map(|click| Selection { character, click })
    }

    fn invalidate_hide(&mut self) {
        self.generation += 1;
        self.hide_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(x: i32, y: i32) -> NormalizedClick {
        NormalizedClick { x_percent: x, y_percent: y }
    }

    #[test]
    fn show_positions_above_and_centered() {
        let mut m = TargetMenu::new();
        m.show_at(400.0, 300.0, click(40, 30));
        assert!(m.is_visible());
        assert_eq!(m.placement(120.0, MENU_LIFT_PX), (340.0, 275.0));
    }

    #[test]
    fn hide_fires_after_grace() {
        let mut m = TargetMenu::new();
        m.show_at(1.0, 1.0, click(1, 1));
        let t = m.schedule_hide();
        assert!(m.expire(t));
        assert!(!m.is_visible());
        assert!(!m.expire(t));
    }

    #[test]
    fn reshow_cancels_pending_hide() {
        let mut m = TargetMenu::new();
        m.show_at(1.0, 1.0, click(1, 1));
        let t = m.schedule_hide();
        m.show_at(5.0, 5.0, click(2, 2));
        assert!(!m.expire(t));
        assert!(m.is_visible());
        assert_eq!(m.click(), Some(click(2, 2)));
    }

    #[test]
    fn cancel_keeps_menu_open() {
        let mut m = TargetMenu::new();
        m.show_at(1.0, 1.0, click(1, 1));
        let t = m.schedule_hide();
        m.cancel_hide();
        assert!(!m.expire(t));
        assert!(m.is_visible());
    }

    #[test]
    fn only_latest_ticket_counts() {
        let mut m = TargetMenu::new();
        m.show_at(1.0, 1.0, click(1, 1));
        let first = m.schedule_hide();
        let second = m.schedule_hide();
        assert!(!m.expire(first));
        assert!(m.is_visible());
        assert!(m.expire(second));
    }

    #[test]
    fn select_hides_and_consumes_click() {
        let mut m = TargetMenu::new();
        m.show_at(10.0, 10.0, click(33, 25));
        let t = m.schedule_hide();
        let sel = m.select(CharacterId::Odlaw);
        assert_eq!(
            sel,
            Some(Selection { character: CharacterId::Odlaw, click: click(33, 25) })
        );
        assert!(!m.is_visible());
        assert_eq!(m.select(CharacterId::Waldo), None);
        assert!(!m.expire(t));
    }

    #[test]
    fn menu_reopens_after_selection() {
        let mut m = TargetMenu::new();
        m.show_at(10.0, 10.0, click(10, 10));
        m.select(CharacterId::Wizard);
        m.show_at(20.0, 20.0, click(20, 20));
        assert!(m.is_visible());
        assert_eq!(m.select(CharacterId::Wizard).map(|s| s.click), Some(click(20, 20)));
    }
}
