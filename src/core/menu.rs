//! Focus-trap menu: open/close a navigation overlay, confine Tab traversal while open
//!
//! Two layers:
//!
//! | Layer | Type | I/O |
//! |-------|------|-----|
//! | Decision | [`MenuMachine`] | none, `(input) -> effects` |
//! | Binding | [`MenuController`] | reads focus state from a [`MenuHost`], applies effects |
//!
//! The host is resolved once, at construction. A controller built without a
//! host (menu markup absent) answers every call with a no-op.

use std::time::Duration;

/// Viewport width above which the overlay is forced closed
pub const DESKTOP_BREAKPOINT: f64 = 720.0;

/// Delay before the transient `closing` class is dropped
pub const CLOSING_CLEANUP: Duration = Duration::from_millis(220);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            _ => Key::Other,
        }
    }
}

/// Focus bookkeeping for one open period. Discarded on close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrapContext<E> {
    pub previously_focused: Option<E>,
    /// Document order, not tab-index order
    pub candidates: Vec<E>,
}

impl<E: PartialEq> FocusTrapContext<E> {
    pub fn first(&self) -> Option<&E> { self.candidates.first() }
    pub fn last(&self) -> Option<&E> { self.candidates.last() }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuInput<E> {
    Open { active: Option<E>, candidates: Vec<E> },
    Close,
    Key { key: Key, shift: bool, active: Option<E> },
    Resize { width: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEffect<E> {
    /// Add `open`, set `aria-hidden="false"` and `aria-expanded="true"`
    ShowOverlay,
    /// Drop `open`, add `closing`, set `aria-hidden="true"` and `aria-expanded="false"`
    HideOverlay,
    /// Drop `closing` after the delay; cosmetic only
    ScheduleClosingCleanup(Duration),
    Focus(E),
    /// Focus the snapshot if it is still attached to the document
    RestoreFocus(E),
    /// Cancel the browser's default Tab traversal
    PreventDefault,
}

/// Pure menu state machine
#[derive(Debug, Clone)]
pub struct MenuMachine<E> {
    state: MenuState,
    trap: Option<FocusTrapContext<E>>,
}

impl<E> Default for MenuMachine<E> {
    fn default() -> Self {
        Self { state: MenuState::Closed, trap: None }
    }
}

impl<E: Clone + PartialEq> MenuMachine<E> {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> MenuState { self.state }

    pub fn is_open(&self) -> bool { self.state == MenuState::Open }

    pub fn trap(&self) -> Option<&FocusTrapContext<E>> { self.trap.as_ref() }

    pub fn handle(&mut self, input: MenuInput<E>) -> Vec<MenuEffect<E>> {
        match input {
            MenuInput::Open { active, candidates } => self.open(active, candidates),
            MenuInput::Close => self.close(),
            MenuInput::Key { key: Key::Escape, .. } => self.close(),
            MenuInput::Key { key: Key::Tab, shift, active } => self.wrap_tab(shift, active.as_ref()),
            MenuInput::Key { key: Key::Other, .. } => Vec::new(),
            MenuInput::Resize { width } if width > DESKTOP_BREAKPOINT => self.close(),
            MenuInput::Resize { .. } => Vec::new(),
        }
    }

    fn open(&mut self, active: Option<E>, candidates: Vec<E>) -> Vec<MenuEffect<E>> {
        if self.is_open() {
            return Vec::new();
        }
        self.state = MenuState::Open;
        let mut effects = vec![MenuEffect::ShowOverlay];
        if let Some(first) = candidates.first() {
            effects.push(MenuEffect::Focus(first.clone()));
        }
        self.trap = Some(FocusTrapContext { previously_focused: active, candidates });
        effects
    }

    fn close(&mut self) -> Vec<MenuEffect<E>> {
        if !self.is_open() {
            return Vec::new();
        }
        self.state = MenuState::Closed;
        let mut effects = vec![MenuEffect::HideOverlay, MenuEffect::ScheduleClosingCleanup(CLOSING_CLEANUP)];
        if let Some(prev) = self.trap.take().and_then(|t| t.previously_focused) {
            effects.push(MenuEffect::RestoreFocus(prev));
        }
        effects
    }

    fn wrap_tab(&self, shift: bool, active: Option<&E>) -> Vec<MenuEffect<E>> {
        let Some(trap) = self.trap.as_ref().filter(|_| self.is_open()) else {
            return Vec::new();
        };
        let (Some(first), Some(last)) = (trap.first(), trap.last()) else {
            return Vec::new();
        };
        match (shift, active) {
            (true, Some(a)) if a == first => vec![MenuEffect::PreventDefault, MenuEffect::Focus(last.clone())],
            (false, Some(a)) if a == last => vec![MenuEffect::PreventDefault, MenuEffect::Focus(first.clone())],
            _ => Vec::new(),
        }
    }
}

/// Document capabilities the controller needs
pub trait MenuHost {
    type Element: Clone + PartialEq;

    fn active_element(&self) -> Option<Self::Element>;

    /// Non-disabled interactive elements inside the menu, document order
    fn focusable_candidates(&self) -> Vec<Self::Element>;

    fn apply(&self, effect: &MenuEffect<Self::Element>);
}

/// Binds a [`MenuMachine`] to an optional host
pub struct MenuController<H: MenuHost> {
    host: Option<H>,
    machine: MenuMachine<H::Element>,
}

impl<H: MenuHost> MenuController<H> {
    pub fn new(host: Option<H>) -> Self {
        Self { host, machine: MenuMachine::new() }
    }

    pub fn state(&self) -> MenuState { self.machine.state() }

    pub fn is_open(&self) -> bool { self.machine.is_open() }

    pub fn host(&self) -> Option<&H> { self.host.as_ref() }

    pub fn open(&mut self) {
        let Some(host) = self.host.as_ref() else { return };
        if self.machine.is_open() {
            return;
        }
        let input = MenuInput::Open { active: host.active_element(), candidates: host.focusable_candidates() };
        self.dispatch(input);
    }

    pub fn close(&mut self) {
        self.dispatch(MenuInput::Close);
    }

    pub fn toggle(&mut self) {
        if self.machine.is_open() { self.close() } else { self.open() }
    }

    /// Returns true when the default action must be prevented
    pub fn on_keydown(&mut self, key: Key, shift: bool) -> bool {
        let Some(host) = self.host.as_ref() else { return false };
        let active = match key {
            Key::Tab => host.active_element(),
            _ => None,
        };
        self.dispatch(MenuInput::Key { key, shift, active })
            .iter()
            .any(|e| matches!(e, MenuEffect::PreventDefault))
    }

    pub fn on_resize(&mut self, width: f64) {
        self.dispatch(MenuInput::Resize { width });
    }

    fn dispatch(&mut self, input: MenuInput<H::Element>) -> Vec<MenuEffect<H::Element>> {
        let Some(host) = self.host.as_ref() else { return Vec::new() };
        let effects = self.machine.handle(input);
        for effect in &effects {
            host.apply(effect);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(candidates: &[&'static str]) -> MenuMachine<&'static str> {
        let mut m = MenuMachine::new();
        m.handle(MenuInput::Open { active: Some("toggle"), candidates: candidates.to_vec() });
        m
    }

    #[test]
    fn open_focuses_first_candidate() {
        let mut m = MenuMachine::new();
        let effects = m.handle(MenuInput::Open { active: Some("body"), candidates: vec!["a", "b"] });
        assert_eq!(effects, vec![MenuEffect::ShowOverlay, MenuEffect::Focus("a")]);
        assert_eq!(m.trap().unwrap().previously_focused, Some("body"));
    }

    #[test]
    fn open_twice_is_ignored() {
        let mut m = opened(&["a"]);
        assert!(m.handle(MenuInput::Open { active: Some("a"), candidates: vec!["z"] }).is_empty());
        assert_eq!(m.trap().unwrap().candidates, vec!["a"]);
    }

    #[test]
    fn close_discards_trap() {
        let mut m = opened(&["a", "b"]);
        let effects = m.handle(MenuInput::Close);
        assert_eq!(effects, vec![
            MenuEffect::HideOverlay,
            MenuEffect::ScheduleClosingCleanup(CLOSING_CLEANUP),
            MenuEffect::RestoreFocus("toggle"),
        ]);
        assert!(m.trap().is_none());
        assert_eq!(m.state(), MenuState::Closed);
    }

    #[test]
    fn close_without_snapshot_skips_restore() {
        let mut m = MenuMachine::new();
        m.handle(MenuInput::Open { active: None, candidates: vec!["a"] });
        let effects = m.handle(MenuInput::Close);
        assert!(!effects.iter().any(|e| matches!(e, MenuEffect::RestoreFocus(_))));
    }

    #[test]
    fn middle_tab_passes_through() {
        let mut m = opened(&["a", "b", "c"]);
        assert!(m.handle(MenuInput::Key { key: Key::Tab, shift: false, active: Some("b") }).is_empty());
        assert!(m.handle(MenuInput::Key { key: Key::Tab, shift: true, active: Some("c") }).is_empty());
    }

    #[test]
    fn empty_candidates_never_trap() {
        let mut m = opened(&[]);
        assert!(m.handle(MenuInput::Key { key: Key::Tab, shift: false, active: None }).is_empty());
    }

    #[test]
    fn narrow_resize_keeps_open() {
        let mut m = opened(&["a"]);
        assert!(m.handle(MenuInput::Resize { width: 720.0 }).is_empty());
        assert!(m.is_open());
    }

    #[test]
    fn resize_inputs_compare_by_width() {
        let wide: MenuInput<&str> = MenuInput::Resize { width: 1024.5 };
        assert_eq!(wide.clone(), MenuInput::Resize { width: 1024.5 });
        assert_ne!(wide, MenuInput::Resize { width: 720.0 });

        let mut m = opened(&["a"]);
        assert_eq!(m.handle(wide)[0], MenuEffect::HideOverlay);
    }

    #[test]
    fn dom_key_names() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Tab"), Key::Tab);
        assert_eq!(Key::from_dom("Enter"), Key::Other);
    }
}
