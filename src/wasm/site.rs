//! Site: the page entry point exposed to JavaScript
//!
//! ```javascript
//! import init, { Site } from './pkg/folio.js';
//! await init();
//! const site = new Site();            // or Site.fromConfig(JSON.stringify({...}))
//! site.start();
//! ```

use chrono::Datelike;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use super::dom::DomMenuHost;
use super::storage::LocalStorage;
use super::{by_id, document, log, reveal, subscribe, typing, widgets};
use crate::core::config::SiteConfig;
use crate::core::menu::{Key, MenuController};
use crate::core::paths::{footer, hero, menu as menu_ids, theme as theme_ids};
use crate::core::theme::{ThemeController, ThemeView};
use crate::core::typing::TypingAnimator;

type SharedMenu = Rc<RefCell<MenuController<DomMenuHost>>>;

#[wasm_bindgen]
pub struct Site {
    config: SiteConfig,
    menu: SharedMenu,
    started: Cell<bool>,
}

#[wasm_bindgen]
impl Site {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Site {
        Self::with_config(SiteConfig::default())
    }

    /// Build from a JSON object; missing fields keep their defaults
    #[wasm_bindgen(js_name = "fromConfig")]
    pub fn from_config(config_json: &str) -> Result<Site, JsValue> {
        let config = SiteConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        Ok(Self::with_config(config))
    }

    /// Wire every behavior. Call once, after the DOM is ready.
    #[wasm_bindgen]
    pub fn start(&self) -> Result<(), JsValue> {
        if self.started.replace(true) {
            return Ok(());
        }
        let Some(doc) = document() else { return Ok(()) };
        *self.menu.borrow_mut() = MenuController::new(DomMenuHost::resolve());

        typing::start(by_id(hero::TYPING_TEXT), TypingAnimator::new(self.config.roles.clone()));
        wire_theme()?;
        self.wire_menu()?;
        reveal::observe_all(&doc)?;
        set_footer_year();

        spawn_local(widgets::load_resources(self.config.resources_url.clone()));
        spawn_local(widgets::load_featured(self.config.github_user.clone(), self.config.featured_limit));
        spawn_local(widgets::load_achievements(self.config.badges_url.clone()));
        subscribe::wire(self.config.subscribe_endpoint.clone())?;

        log!("[Site] started");
        Ok(())
    }

    #[wasm_bindgen(js_name = "menuOpen")]
    pub fn menu_open(&self) -> bool {
        self.menu.borrow().is_open()
    }

    #[wasm_bindgen(js_name = "toggleMenu")]
    pub fn toggle_menu(&self) {
        self.menu.borrow_mut().toggle();
    }
}

impl Default for Site {
    fn default() -> Self { Self::new() }
}

impl Site {
    /// The menu host is looked up in `start`, once the markup exists
    pub fn with_config(config: SiteConfig) -> Self {
        Self {
            config,
            menu: Rc::new(RefCell::new(MenuController::new(None))),
            started: Cell::new(false),
        }
    }

    fn wire_menu(&self) -> Result<(), JsValue> {
        let Some(window) = web_sys::window() else { return Ok(()) };
        let host = self.menu.borrow().host().cloned();

        if let Some(host) = &host {
            let menu = self.menu.clone();
            on(host.toggle(), "click", move |_| menu.borrow_mut().toggle())?;

            let links = host.container().query_selector_all(menu_ids::LINKS)?;
            for i in 0..links.length() {
                let Some(link) = links.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else { continue };
                let menu = self.menu.clone();
                on(&link, "click", move |_| menu.borrow_mut().close())?;
            }
        }

        if let Some(mobile_theme) = by_id(menu_ids::THEME_TOGGLE) {
            on(&mobile_theme, "click", |_| {
                if let Some(main) = by_id(theme_ids::TOGGLE).and_then(|t| t.dyn_into::<HtmlElement>().ok()) {
                    main.click();
                }
            })?;
        }

        let menu = self.menu.clone();
        let resize_window = window.clone();
        on(&window, "resize", move |_| {
            if let Some(width) = resize_window.inner_width().ok().and_then(|w| w.as_f64()) {
                menu.borrow_mut().on_resize(width);
            }
        })?;

        let menu = self.menu.clone();
        on(&window, "keydown", move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else { return };
            let key = Key::from_dom(&key_event.key());
            if menu.borrow_mut().on_keydown(key, key_event.shift_key()) {
                event.prevent_default();
            }
        })?;
        Ok(())
    }
}

fn on<F>(target: &web_sys::EventTarget, event: &str, f: F) -> Result<(), JsValue>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn apply_theme(view: ThemeView, toggle: Option<&Element>) {
    if let Some(body) = document().and_then(|d| d.body()) {
        let classes = body.class_list();
        let _ = classes.remove_1(view.remove_class);
        let _ = classes.add_1(view.add_class);
    }
    let Some(toggle) = toggle else { return };
    let _ = toggle.set_attribute("aria-pressed", view.aria_pressed);
    let icon = |selector: &str, visible: bool| {
        if let Some(el) = toggle.query_selector(selector).ok().flatten().and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            let _ = el.style().set_property("display", if visible { "" } else { "none" });
        }
    };
    icon(theme_ids::SUN_ICON, view.show_sun);
    icon(theme_ids::MOON_ICON, !view.show_sun);
}

fn wire_theme() -> Result<(), JsValue> {
    let storage = LocalStorage::open();
    if !storage.is_available() {
        log!("[Site] localStorage unavailable, theme choice will not persist");
    }
    let theme = ThemeController::load(storage);
    let toggle = by_id(theme_ids::TOGGLE);
    apply_theme(theme.current().view(), toggle.as_ref());

    let Some(toggle) = toggle else { return Ok(()) };
    let theme = Rc::new(RefCell::new(theme));
    let target = toggle.clone();
    on(&target, "click", move |_| {
        let view = theme.borrow_mut().toggle();
        apply_theme(view, Some(&toggle));
    })
}

fn set_footer_year() {
    if let Some(year) = by_id(footer::YEAR) {
        year.set_text_content(Some(&chrono::Local::now().year().to_string()));
    }
}
