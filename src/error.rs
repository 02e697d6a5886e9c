use std::result::Result as StdResult;

use thiserror::Error;

/// Result type used inside the crate.
pub type Result<T> = StdResult<T, AlarmError>;

/// Everything that can go wrong while persisting the preference or making noise.
///
/// None of these reach the page: each one is handled where it happens and at
/// most ends up in the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlarmError {
    /// LocalStorage missing, disabled, or rejecting the write.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// Alarm media file could not be loaded or its playback was rejected.
    #[error("alarm asset unavailable: {0}")]
    AssetUnavailable(String),

    /// No AudioContext constructor (or the context is closed).
    #[error("Web Audio not supported")]
    AudioUnsupported,

    /// A suspended AudioContext refused to resume.
    #[error("audio context resume failed: {0}")]
    ResumeFailed(String),

    /// Building or scheduling the oscillator graph failed.
    #[error("tone synthesis failed: {0}")]
    Synthesis(String),

    /// Rejected alarm configuration.
    #[error("invalid alarm config: {0}")]
    Config(String),
}

#[cfg(target_arch = "wasm32")]
impl AlarmError {
    /// Render a thrown JS value for one of the string-carrying variants
    pub(crate) fn js(make: fn(String) -> Self, value: wasm_bindgen::JsValue) -> Self {
        make(format!("{:?}", value))
    }
}
