//! WASM module: binds the core to the browser page
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              Site (JS API)              │
//! │  new / fromConfig, start, menuOpen      │
//! └─────────────────┬───────────────────────┘
//!                   │ wires listeners, timers, fetches
//! ┌─────────────────▼───────────────────────┐
//! │  DomMenuHost · LocalStorage · widgets   │
//! │  web-sys DOM, localStorage, gloo-net    │
//! └─────────────────┬───────────────────────┘
//!                   │ effects in, decisions out
//! ┌─────────────────▼───────────────────────┐
//! │        core (pure state machines)       │
//! │  TypingAnimator, MenuMachine, Theme...  │
//! └─────────────────────────────────────────┘
//! ```

mod dom;
mod reveal;
mod site;
mod storage;
mod subscribe;
mod typing;
mod widgets;

pub use dom::DomMenuHost;
pub use site::Site;
pub use storage::LocalStorage;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

pub fn console_error(s: &str) {
    web_sys::console::error_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

macro_rules! log_error {
    ($($t:tt)*) => {
        crate::wasm::console_error(&format!($($t)*))
    }
}

pub(crate) use log;
pub(crate) use log_error;

pub(crate) fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

pub(crate) fn by_id(id: &str) -> Option<web_sys::Element> {
    document().and_then(|d| d.get_element_by_id(id))
}
