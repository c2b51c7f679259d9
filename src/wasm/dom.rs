//! DOM-backed [`MenuHost`] for the mobile navigation overlay

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::core::menu::{MenuEffect, MenuHost};
use crate::core::paths::menu as ids;

#[derive(Clone)]
pub struct DomMenuHost {
    container: Element,
    toggle: Element,
}

impl DomMenuHost {
    /// None unless both the menu container and its toggle are in the document
    pub fn resolve() -> Option<Self> {
        let container = super::by_id(ids::CONTAINER)?;
        let toggle = super::by_id(ids::TOGGLE)?;
        Some(Self { container, toggle })
    }

    pub fn container(&self) -> &Element { &self.container }

    pub fn toggle(&self) -> &Element { &self.toggle }

    fn set_expanded(&self, expanded: bool) {
        let _ = self.toggle.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
        let classes = self.toggle.class_list();
        let _ = if expanded { classes.add_1(ids::OPEN_CLASS) } else { classes.remove_1(ids::OPEN_CLASS) };
    }
}

fn focus(el: &Element) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
}

impl MenuHost for DomMenuHost {
    type Element = Element;

    fn active_element(&self) -> Option<Element> {
        super::document().and_then(|d| d.active_element())
    }

    fn focusable_candidates(&self) -> Vec<Element> {
        let Ok(nodes) = self.container.query_selector_all(ids::FOCUSABLE) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .filter(|el| !el.has_attribute("disabled"))
            .collect()
    }

    fn apply(&self, effect: &MenuEffect<Element>) {
        match effect {
            MenuEffect::ShowOverlay => {
                let _ = self.container.class_list().add_1(ids::OPEN_CLASS);
                let _ = self.container.set_attribute("aria-hidden", "false");
                self.set_expanded(true);
            }
            MenuEffect::HideOverlay => {
                let classes = self.container.class_list();
                let _ = classes.remove_1(ids::OPEN_CLASS);
                let _ = classes.add_1(ids::CLOSING_CLASS);
                let _ = self.container.set_attribute("aria-hidden", "true");
                self.set_expanded(false);
            }
            MenuEffect::ScheduleClosingCleanup(delay) => {
                let container = self.container.clone();
                Timeout::new(delay.as_millis() as u32, move || {
                    let _ = container.class_list().remove_1(ids::CLOSING_CLASS);
                })
                .forget();
            }
            MenuEffect::Focus(el) => focus(el),
            MenuEffect::RestoreFocus(el) => {
                if el.is_connected() {
                    focus(el);
                }
            }
            MenuEffect::PreventDefault => {}
        }
    }
}
