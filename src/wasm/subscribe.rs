//! Newsletter form: validate, post to the relay when configured, else keep locally

use gloo_net::http::Request;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use super::storage::LocalStorage;
use super::{by_id, log, log_error};
use crate::core::paths::subscribe as ids;
use crate::core::subscribe::{self, EndpointReply, SubscribeOutcome};

/// Relay URL from config, or the page-level `window.SUBSCRIBE_ENDPOINT`
fn resolve_endpoint(configured: Option<String>) -> Option<String> {
    configured.or_else(|| {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &JsValue::from_str(ids::ENDPOINT_GLOBAL))
            .ok()?
            .as_string()
            .filter(|s| !s.is_empty())
    })
}

async fn post(endpoint: &str, email: &str) -> EndpointReply {
    let request = match Request::post(endpoint).json(&serde_json::json!({ "email": email })) {
        Ok(r) => r,
        Err(e) => {
            log_error!("[subscribe] request build failed: {}", e);
            return EndpointReply::Unreachable;
        }
    };
    match request.send().await {
        Ok(resp) if resp.ok() => EndpointReply::Ok,
        Ok(resp) => EndpointReply::Rejected(resp.text().await.unwrap_or_default()),
        Err(e) => {
            log_error!("[subscribe] network error: {}", e);
            EndpointReply::Unreachable
        }
    }
}

fn show(msg: Option<&Element>, outcome: &SubscribeOutcome) {
    let Some(msg) = msg else { return };
    msg.set_text_content(Some(&outcome.message()));
    if let Some(html) = msg.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("color", outcome.tone().css_color());
    }
}

/// Wire the subscribe button. No-op when the button or input is missing.
pub fn wire(configured_endpoint: Option<String>) -> Result<(), JsValue> {
    let (Some(button), Some(input)) = (by_id(ids::BUTTON), by_id(ids::EMAIL_INPUT)) else {
        return Ok(());
    };
    let Ok(input) = input.dyn_into::<HtmlInputElement>() else { return Ok(()) };
    let msg = by_id(ids::MESSAGE);

    let on_click = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let input = input.clone();
        let msg = msg.clone();
        let endpoint = resolve_endpoint(configured_endpoint.clone());
        spawn_local(async move {
            let email = input.value().trim().to_string();
            let reply = match (&endpoint, subscribe::is_valid_email(&email)) {
                (Some(url), true) => Some(post(url, &email).await),
                _ => None,
            };
            let outcome = subscribe::outcome(&email, reply);
            if outcome.saves_locally() {
                let subs = subscribe::save_local(&LocalStorage::open(), &email);
                log!("[subscribe] stored locally ({} total)", subs.len());
            }
            if outcome.clears_input() {
                input.set_value("");
            }
            show(msg.as_ref(), &outcome);
        });
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}
