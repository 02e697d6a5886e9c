//! Notification controller
//!
//! Owns the preference store, the page hook for the toggle button and the
//! audio output. Every public operation absorbs its own failures.

use std::cell::RefCell;

use crate::audio::{AlarmOutcome, AudioOutput, play_alarm};
use crate::config::AlarmConfig;
use crate::preference::{self, PreferenceStore, SoundPreference};
use crate::toggle::{ToggleAppearance, ToggleView};

/// Looks up the toggle button; it may not exist on every page
pub trait ToggleHost {
    type Control: ToggleView;

    fn find_toggle(&self) -> Option<Self::Control>;
}

pub struct NotificationController<S, H, A> {
    store: S,
    host: H,
    audio: A,
    config: RefCell<AlarmConfig>,
}

impl<S, H, A> NotificationController<S, H, A>
where
    S: PreferenceStore,
    H: ToggleHost,
    A: AudioOutput,
{
    pub fn new(store: S, host: H, audio: A) -> Self {
        Self {
            store,
            host,
            audio,
            config: RefCell::new(AlarmConfig::default()),
        }
    }

    pub fn config(&self) -> AlarmConfig {
        self.config.borrow().clone()
    }

    pub fn set_config(&self, config: AlarmConfig) {
        log::info!("Alarm strategy: {}", config.strategy.as_str());
        *self.config.borrow_mut() = config;
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Current preference, read from storage on every call
    pub fn is_sound_enabled(&self) -> bool {
        preference::load(&self.store).enabled
    }

    /// Persist the preference and refresh the button, even if the write failed
    pub fn set_sound_enabled(&self, enabled: bool) {
        match preference::save(&self.store, SoundPreference::new(enabled)) {
            Ok(()) => log::info!("Order sound {}", if enabled { "on" } else { "off" }),
            Err(e) => log::warn!("Could not save sound preference: {}", e),
        }
        self.refresh_toggle();
    }

    /// Button activation: unlock audio while we are inside a user gesture,
    /// then flip the preference.
    pub fn toggle_sound(&self) {
        self.audio.unlock();
        let next = preference::load(&self.store).toggled();
        self.set_sound_enabled(next.enabled);
    }

    /// Sync the button's label and markers with the stored preference
    pub fn refresh_toggle(&self) {
        let Some(control) = self.host.find_toggle() else {
            return;
        };
        let pref = preference::load(&self.store);
        ToggleAppearance::for_preference(pref).apply(&control);
    }

    /// Initial paint of the button. Returns false when the page has none,
    /// in which case there is nothing to bind.
    pub fn init_sound_button(&self) -> bool {
        if self.host.find_toggle().is_none() {
            log::debug!("No sound toggle on this page");
            return false;
        }
        self.refresh_toggle();
        true
    }

    /// Play the alarm regardless of the preference
    pub async fn play_order_alarm(&self) -> AlarmOutcome {
        let config = self.config();
        play_alarm(&self.audio, &config).await
    }

    /// Play the alarm for a new order if sound is on. `None` when muted.
    pub async fn notify_new_order(&self) -> Option<AlarmOutcome> {
        if !self.is_sound_enabled() {
            return None;
        }
        Some(self.play_order_alarm().await)
    }
}
