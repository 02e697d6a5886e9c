//! JS entry points
//!
//! One controller per page, reachable from exported functions and from
//! `window.PollonAdmin` for the rest of the admin panel.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::AlarmConfig;
use crate::consts::GLOBAL_NAMESPACE;
use crate::controller::{NotificationController, ToggleHost};
use crate::startup::{ClickBinding, DomReady};
use crate::web::{DocumentToggle, LocalStorage, WebAudio};

type WebController = NotificationController<LocalStorage, DocumentToggle, WebAudio>;

thread_local! {
    static CONTROLLER: Rc<WebController> =
        Rc::new(NotificationController::new(LocalStorage, DocumentToggle, WebAudio::new()));
    static CLICK_BINDING: ClickBinding = ClickBinding::new();
}

fn controller() -> Rc<WebController> {
    CONTROLLER.with(Rc::clone)
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // The panel may already have installed a logger
    let _ = console_log::init_with_level(log::Level::Info);

    expose_namespace();
    run_when_dom_ready(init_sound_button);
}

/// Run `f` once the document structure is parsed
fn run_when_dom_ready(f: fn()) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    match DomReady::from_ready_state(&document.ready_state()) {
        DomReady::Defer => {
            let closure = Closure::once_into_js(move || f());
            if let Err(e) = document
                .add_event_listener_with_callback("DOMContentLoaded", closure.unchecked_ref())
            {
                log::warn!("Could not wait for DOMContentLoaded ({:?}), starting now", e);
                f();
            }
        }
        DomReady::RunNow => f(),
    }
}

/// `window.PollonAdmin = { isSoundEnabled, playOrderAlarm }`
fn expose_namespace() {
    let Some(window) = web_sys::window() else {
        return;
    };

    let is_enabled = Closure::<dyn Fn() -> bool>::new(|| controller().is_sound_enabled());
    let play = Closure::<dyn Fn()>::new(|| {
        wasm_bindgen_futures::spawn_local(async {
            let ctl = controller();
            let outcome = ctl.play_order_alarm().await;
            log::debug!("Order alarm: {}", outcome.as_str());
        });
    });

    let namespace = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&namespace, &"isSoundEnabled".into(), is_enabled.as_ref());
    let _ = js_sys::Reflect::set(&namespace, &"playOrderAlarm".into(), play.as_ref());
    is_enabled.forget();
    play.forget();

    if js_sys::Reflect::set(&window, &GLOBAL_NAMESPACE.into(), &namespace).is_err() {
        log::warn!("Could not expose window.{}", GLOBAL_NAMESPACE);
    }
}

/// Paint the toggle button and bind its click handler (once)
#[wasm_bindgen(js_name = initSoundButton)]
pub fn init_sound_button() {
    let ctl = controller();
    let found = ctl.init_sound_button();
    if !CLICK_BINDING.with(|binding| binding.should_bind(found)) {
        return;
    }
    let Some(toggle) = DocumentToggle.find_toggle() else {
        return;
    };

    let handler = ctl.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        handler.toggle_sound();
    });
    match toggle
        .element()
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
    {
        Ok(()) => {
            closure.forget();
            CLICK_BINDING.with(ClickBinding::mark_bound);
            log::info!("Sound toggle ready");
        }
        Err(e) => log::warn!("Could not bind sound toggle: {:?}", e),
    }
}

#[wasm_bindgen(js_name = isSoundEnabled)]
pub fn is_sound_enabled() -> bool {
    controller().is_sound_enabled()
}

#[wasm_bindgen(js_name = setSoundEnabled)]
pub fn set_sound_enabled(enabled: bool) {
    controller().set_sound_enabled(enabled);
}

/// Resolves to "asset", "tone" or "silent"; never rejects
#[wasm_bindgen(js_name = playOrderAlarm)]
pub async fn play_order_alarm() -> String {
    let ctl = controller();
    ctl.play_order_alarm().await.as_str().to_string()
}

/// Alarm for a new order, skipped while sound is off.
/// Resolves to the outcome, or "muted".
#[wasm_bindgen(js_name = notifyNewOrder)]
pub async fn notify_new_order() -> String {
    let ctl = controller();
    match ctl.notify_new_order().await {
        Some(outcome) => outcome.as_str().to_string(),
        None => "muted".to_string(),
    }
}

/// Replace the alarm config from JSON. Invalid input keeps the current one.
#[wasm_bindgen]
pub fn configure(json: &str) -> bool {
    match AlarmConfig::from_json(json) {
        Ok(config) => {
            controller().set_config(config);
            true
        }
        Err(e) => {
            log::warn!("Ignoring alarm config: {}", e);
            false
        }
    }
}
