//! Order Alarm - sound toggle and new-order alarm for the admin panel
//!
//! Core modules:
//! - `preference`: Persisted sound on/off flag (LocalStorage on web)
//! - `toggle`: Toggle button label and marker classes
//! - `audio`: Alarm playback strategies (media file, synthesized tone)
//! - `tone`: Fallback tone parameters and its gain envelope
//! - `controller`: Ties preference, toggle button and audio together
//! - `config`: Runtime-configurable alarm settings
//! - `startup`: DOM-ready and bind-once decisions for page start-up
//! - `error`: Error type shared by all of the above
//! - `web` (wasm32): LocalStorage, toggle element and Web Audio backends
//! - `bindings` (wasm32): JS exports and the `window.PollonAdmin` namespace
//!
//! Everything that decides *what* happens compiles natively and is unit
//! tested; the browser glue lives in `web` and `bindings` (wasm32 only).

pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod preference;
pub mod startup;
pub mod toggle;
pub mod tone;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::{AlarmOutcome, AudioOutput, ContextState, play_alarm};
pub use config::{AlarmConfig, AlarmStrategy};
pub use controller::{NotificationController, ToggleHost};
pub use error::{AlarmError, Result};
pub use preference::{MemoryStore, PreferenceStore, SoundPreference};
pub use toggle::{ToggleAppearance, ToggleView};
pub use tone::{ToneEnvelope, ToneSpec};

/// Fixed identifiers shared with the admin panel page
pub mod consts {
    /// LocalStorage key holding "true" / "false"
    pub const SOUND_ENABLED_KEY: &str = "pollon_admin_sound_enabled";

    /// Element id of the sound toggle button
    pub const TOGGLE_ELEMENT_ID: &str = "admin-sound-toggle";

    /// Button label while sound is on (clicking turns it off)
    pub const LABEL_SOUND_ON: &str = "🔔 Desactivar sonido";
    /// Button label while sound is off (clicking turns it on)
    pub const LABEL_SOUND_OFF: &str = "🔕 Activar sonido";

    /// Marker class present while sound is on
    pub const CLASS_SOUND_ON: &str = "admin-sound-on";
    /// Marker class present while sound is off
    pub const CLASS_SOUND_OFF: &str = "admin-sound-off";

    /// Alarm media file, relative to the panel's index.html
    pub const ALARM_AUDIO_SRC: &str = "sounds/alarma.mp3";

    /// Global object exposing the alarm to the rest of the panel
    pub const GLOBAL_NAMESPACE: &str = "PollonAdmin";

    /// How many times a suspended AudioContext is resumed before giving up
    pub const MAX_RESUME_ATTEMPTS: u32 = 3;
}
