//! Scroll reveal through `IntersectionObserver`

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::core::paths::reveal as ids;
use crate::core::reveal::{RevealTracker, REVEAL_THRESHOLD};

const KEY_ATTR: &str = "data-reveal-key";

fn key_of(el: &Element) -> Option<u32> {
    el.get_attribute(KEY_ATTR).and_then(|k| k.parse().ok())
}

/// Observe every `.fade-in` element; each gets `visible` once, then is unobserved
pub fn observe_all(document: &web_sys::Document) -> Result<(), JsValue> {
    let targets = document.query_selector_all(ids::SELECTOR)?;
    if targets.length() == 0 {
        return Ok(());
    }

    let tracker: Rc<RefCell<RevealTracker<u32>>> = Rc::new(RefCell::new(RevealTracker::new()));
    let tracker_cb = tracker.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
            let target = entry.target();
            let Some(key) = key_of(&target) else { continue };
            if tracker_cb.borrow_mut().on_intersection(&key, entry.is_intersecting()) {
                let _ = target.class_list().add_1(ids::VISIBLE_CLASS);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for i in 0..targets.length() {
        let Some(el) = targets.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else { continue };
        el.set_attribute(KEY_ATTR, &i.to_string())?;
        tracker.borrow_mut().observe(i);
        observer.observe(&el);
    }
    Ok(())
}
