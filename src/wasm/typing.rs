//! Timer driver for the hero [`TypingAnimator`]

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::core::typing::TypingAnimator;

/// Run the animator for the page lifetime. A missing target only
/// suppresses the text writes; the loop keeps its cadence.
pub fn start(target: Option<Element>, mut animator: TypingAnimator) {
    spawn_local(async move {
        if let Some(t) = &target {
            t.set_text_content(Some(animator.text()));
        }
        loop {
            let frame = animator.advance();
            if let Some(t) = &target {
                t.set_text_content(Some(&frame.text));
            }
            if !frame.delay.is_zero() {
                TimeoutFuture::new(frame.delay.as_millis() as u32).await;
            }
        }
    });
}
