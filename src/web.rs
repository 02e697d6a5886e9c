//! Browser backends: LocalStorage, the toggle button element and Web Audio

use std::cell::OnceCell;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, AudioContextState, Element, HtmlAudioElement, OscillatorType, Storage};

use crate::audio::{AudioOutput, ContextState};
use crate::consts::TOGGLE_ELEMENT_ID;
use crate::controller::ToggleHost;
use crate::error::{AlarmError, Result};
use crate::preference::PreferenceStore;
use crate::toggle::ToggleView;
use crate::tone::ToneSpec;

/// `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage> {
        let window = web_sys::window().ok_or_else(|| AlarmError::Storage("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| AlarmError::js(AlarmError::Storage, e))?
            .ok_or_else(|| AlarmError::Storage("localStorage disabled".into()))
    }
}

impl PreferenceStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| AlarmError::js(AlarmError::Storage, e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| AlarmError::js(AlarmError::Storage, e))
    }
}

/// Finds `#admin-sound-toggle` in the current document
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentToggle;

impl ToggleHost for DocumentToggle {
    type Control = ElementToggle;

    fn find_toggle(&self) -> Option<ElementToggle> {
        let document = web_sys::window()?.document()?;
        document
            .get_element_by_id(TOGGLE_ELEMENT_ID)
            .map(ElementToggle)
    }
}

/// The toggle button element
#[derive(Debug, Clone)]
pub struct ElementToggle(Element);

impl ElementToggle {
    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl ToggleView for ElementToggle {
    fn set_label(&self, label: &str) {
        self.0.set_text_content(Some(label));
    }

    fn set_marker(&self, class: &str, present: bool) {
        if let Err(e) = self.0.class_list().toggle_with_force(class, present) {
            log::debug!("Could not toggle class {}: {:?}", class, e);
        }
    }
}

/// Web Audio output with a lazily created, shared AudioContext
#[derive(Default)]
pub struct WebAudio {
    ctx: OnceCell<Option<AudioContext>>,
}

impl WebAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared context, created on first use and never torn down
    fn context(&self) -> Option<&AudioContext> {
        self.ctx.get_or_init(create_context).as_ref()
    }
}

/// `AudioContext`, or `webkitAudioContext` on older Safari
fn create_context() -> Option<AudioContext> {
    if let Ok(ctx) = AudioContext::new() {
        return Some(ctx);
    }

    let webkit = web_sys::window().and_then(|window| {
        let ctor = js_sys::Reflect::get(&window, &JsValue::from_str("webkitAudioContext")).ok()?;
        let ctor: js_sys::Function = ctor.dyn_into().ok()?;
        js_sys::Reflect::construct(&ctor, &js_sys::Array::new()).ok()
    });

    match webkit {
        Some(ctx) => Some(ctx.unchecked_into()),
        None => {
            log::warn!("Failed to create AudioContext - alarm tone disabled");
            None
        }
    }
}

impl AudioOutput for WebAudio {
    async fn play_asset(&self, src: &str, volume: f64) -> Result<()> {
        let unavailable = |e| AlarmError::js(AlarmError::AssetUnavailable, e);

        let audio = HtmlAudioElement::new_with_src(src).map_err(unavailable)?;
        audio.set_volume(volume);
        // A missing file rejects the play() promise
        let promise = audio.play().map_err(unavailable)?;
        JsFuture::from(promise).await.map_err(unavailable)?;
        Ok(())
    }

    fn context_state(&self) -> Result<ContextState> {
        let ctx = self.context().ok_or(AlarmError::AudioUnsupported)?;
        Ok(match ctx.state() {
            AudioContextState::Suspended => ContextState::Suspended,
            AudioContextState::Running => ContextState::Running,
            _ => ContextState::Closed,
        })
    }

    async fn resume_context(&self) -> Result<()> {
        let ctx = self.context().ok_or(AlarmError::AudioUnsupported)?;
        let failed = |e| AlarmError::js(AlarmError::ResumeFailed, e);
        let promise = ctx.resume().map_err(failed)?;
        JsFuture::from(promise).await.map_err(failed)?;
        Ok(())
    }

    fn play_tone(&self, tone: &ToneSpec) -> Result<()> {
        let ctx = self.context().ok_or(AlarmError::AudioUnsupported)?;
        let synth = |e| AlarmError::js(AlarmError::Synthesis, e);

        let osc = ctx.create_oscillator().map_err(synth)?;
        let gain = ctx.create_gain().map_err(synth)?;
        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(tone.frequency);
        osc.connect_with_audio_node(&gain).map_err(synth)?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(synth)?;

        let env = tone.envelope(ctx.current_time());
        let (attack_at, attack_gain) = env.attack;
        let (release_at, release_gain) = env.release;
        gain.gain()
            .set_value_at_time(attack_gain, attack_at)
            .map_err(synth)?;
        gain.gain()
            .exponential_ramp_to_value_at_time(release_gain, release_at)
            .map_err(synth)?;

        osc.start_with_when(env.start).map_err(synth)?;
        osc.stop_with_when(env.stop).map_err(synth)?;
        Ok(())
    }

    fn unlock(&self) {
        if let Some(ctx) = self.context() {
            if ctx.state() == AudioContextState::Suspended {
                match ctx.resume() {
                    Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                        if let Err(e) = JsFuture::from(promise).await {
                            log::debug!("Audio unlock refused: {:?}", e);
                        }
                    }),
                    Err(e) => log::debug!("Audio unlock failed: {:?}", e),
                }
            }
        }
    }
}
