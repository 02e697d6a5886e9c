//! Alarm playback
//!
//! The strategy logic is written against [`AudioOutput`] so it runs the same
//! way in the browser (`web::WebAudio`) and in native tests. No failure
//! escapes: the worst case is [`AlarmOutcome::Silent`].

use crate::config::{AlarmConfig, AlarmStrategy};
use crate::consts::MAX_RESUME_ATTEMPTS;
use crate::error::{AlarmError, Result};
use crate::tone::ToneSpec;

/// Native state of the shared audio context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Not yet unlocked by a user gesture
    Suspended,
    Running,
    Closed,
}

/// Which path of the alarm chain made the sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOutcome {
    /// The media file is playing
    Asset,
    /// The synthesized tone was scheduled
    Tone,
    /// Nothing could be played
    Silent,
}

impl AlarmOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmOutcome::Asset => "asset",
            AlarmOutcome::Tone => "tone",
            AlarmOutcome::Silent => "silent",
        }
    }
}

/// Audio capabilities the alarm needs from the platform
#[allow(async_fn_in_trait)]
pub trait AudioOutput {
    /// Start playing a media file. Resolves once playback has begun.
    async fn play_asset(&self, src: &str, volume: f64) -> Result<()>;

    /// State of the shared audio context, creating it on first use.
    /// `Err(AudioUnsupported)` when the platform has no context at all.
    fn context_state(&self) -> Result<ContextState>;

    /// Resume a suspended context
    async fn resume_context(&self) -> Result<()>;

    /// Schedule the tone on a running context
    fn play_tone(&self, tone: &ToneSpec) -> Result<()>;

    /// Fire-and-forget resume, called from a user gesture
    fn unlock(&self);
}

/// Play the alarm using the configured strategy
pub async fn play_alarm<A: AudioOutput>(output: &A, config: &AlarmConfig) -> AlarmOutcome {
    match &config.strategy {
        AlarmStrategy::FileWithFallback { src } => {
            match output.play_asset(src, config.asset_volume).await {
                Ok(()) => AlarmOutcome::Asset,
                Err(e) => {
                    log::debug!("Alarm file failed ({}), using tone", e);
                    play_fallback_tone(output, &config.tone).await
                }
            }
        }
        AlarmStrategy::ToneOnly => play_fallback_tone(output, &config.tone).await,
    }
}

/// Synthesized tone path. Only synthesis errors are worth a warning; a
/// missing or locked context just means no sound.
async fn play_fallback_tone<A: AudioOutput>(output: &A, tone: &ToneSpec) -> AlarmOutcome {
    match synthesize(output, tone).await {
        Ok(()) => AlarmOutcome::Tone,
        Err(e @ AlarmError::Synthesis(_)) => {
            log::warn!("Could not play alarm tone: {}", e);
            AlarmOutcome::Silent
        }
        Err(e) => {
            log::debug!("Alarm tone skipped: {}", e);
            AlarmOutcome::Silent
        }
    }
}

async fn synthesize<A: AudioOutput>(output: &A, tone: &ToneSpec) -> Result<()> {
    let mut resumes = 0;
    loop {
        match output.context_state()? {
            ContextState::Running => return output.play_tone(tone),
            ContextState::Closed => return Err(AlarmError::AudioUnsupported),
            ContextState::Suspended => {
                if resumes >= MAX_RESUME_ATTEMPTS {
                    return Err(AlarmError::ResumeFailed(
                        "context still suspended".to_string(),
                    ));
                }
                resumes += 1;
                output.resume_context().await?;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Scripted audio backend
    pub(crate) struct FakeAudio {
        pub asset: Result<()>,
        /// Context states returned in order; the last one repeats
        pub states: RefCell<VecDeque<Result<ContextState>>>,
        pub resume: Result<()>,
        pub tone: Result<()>,
        pub asset_calls: RefCell<Vec<(String, f64)>>,
        pub resume_calls: Cell<u32>,
        pub tones: RefCell<Vec<ToneSpec>>,
        pub unlocks: Cell<u32>,
    }

    impl FakeAudio {
        pub fn new(states: Vec<Result<ContextState>>) -> Self {
            Self {
                asset: Ok(()),
                states: RefCell::new(states.into()),
                resume: Ok(()),
                tone: Ok(()),
                asset_calls: RefCell::default(),
                resume_calls: Cell::new(0),
                tones: RefCell::default(),
                unlocks: Cell::new(0),
            }
        }

        pub fn running() -> Self {
            Self::new(vec![Ok(ContextState::Running)])
        }

        /// Media file 404s
        pub fn missing_asset(mut self) -> Self {
            self.asset = Err(AlarmError::AssetUnavailable("404".to_string()));
            self
        }
    }

    impl AudioOutput for FakeAudio {
        async fn play_asset(&self, src: &str, volume: f64) -> Result<()> {
            self.asset_calls.borrow_mut().push((src.to_string(), volume));
            self.asset.clone()
        }

        fn context_state(&self) -> Result<ContextState> {
            let mut states = self.states.borrow_mut();
            if states.len() > 1 {
                states.pop_front().unwrap_or(Err(AlarmError::AudioUnsupported))
            } else {
                states.front().cloned().unwrap_or(Err(AlarmError::AudioUnsupported))
            }
        }

        async fn resume_context(&self) -> Result<()> {
            self.resume_calls.set(self.resume_calls.get() + 1);
            self.resume.clone()
        }

        fn play_tone(&self, tone: &ToneSpec) -> Result<()> {
            self.tone.clone()?;
            self.tones.borrow_mut().push(*tone);
            Ok(())
        }

        fn unlock(&self) {
            self.unlocks.set(self.unlocks.get() + 1);
        }
    }

    #[test]
    fn test_asset_plays_at_full_volume() {
        let audio = FakeAudio::running();
        let outcome = block_on(play_alarm(&audio, &AlarmConfig::default()));
        assert_eq!(outcome, AlarmOutcome::Asset);
        assert_eq!(
            *audio.asset_calls.borrow(),
            vec![("sounds/alarma.mp3".to_string(), 1.0)]
        );
        assert!(audio.tones.borrow().is_empty());
    }

    #[test]
    fn test_missing_asset_falls_back_to_tone_once() {
        let audio = FakeAudio::running().missing_asset();
        let outcome = block_on(play_alarm(&audio, &AlarmConfig::default()));
        assert_eq!(outcome, AlarmOutcome::Tone);
        let tones = audio.tones.borrow();
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].frequency, 880.0);
        assert_eq!(tones[0].duration, 1.0);
    }

    #[test]
    fn test_tone_only_skips_asset() {
        let audio = FakeAudio::running();
        let outcome = block_on(play_alarm(&audio, &AlarmConfig::tone_only()));
        assert_eq!(outcome, AlarmOutcome::Tone);
        assert!(audio.asset_calls.borrow().is_empty());
    }

    #[test]
    fn test_unsupported_context_is_silent() {
        let audio = FakeAudio::new(vec![Err(AlarmError::AudioUnsupported)]).missing_asset();
        let outcome = block_on(play_alarm(&audio, &AlarmConfig::default()));
        assert_eq!(outcome, AlarmOutcome::Silent);
        assert!(audio.tones.borrow().is_empty());
    }

    #[test]
    fn test_closed_context_is_silent() {
        let audio = FakeAudio::new(vec![Ok(ContextState::Closed)]);
        let outcome = block_on(play_alarm(&audio, &AlarmConfig::tone_only()));
        assert_eq!(outcome, AlarmOutcome::Silent);
    }

    #[test]
    fn test_suspended_context_resumes_then_plays() {
        let audio = FakeAudio::new(vec![
            Ok(ContextState::Suspended),
            Ok(ContextState::Running),
        ]);
        let outcome = block_on(play_alarm(&audio, &AlarmConfig::tone_only()));
        assert_eq!(outcome, AlarmOutcome::Tone);
        assert_eq!(audio.resume_calls.get(), 1);
        assert_eq!(audio.tones.borrow().len(), 1);
    }

    #[test]
    fn test_resume_rejected_abandons_silently() {
        let mut audio = FakeAudio::new(vec![Ok(ContextState::Suspended)]);
        audio.resume = Err(AlarmError::ResumeFailed("NotAllowedError".to_string()));
        let outcome = block_on(play_alarm(&audio, &AlarmConfig::tone_only()));
        assert_eq!(outcome, AlarmOutcome::Silent);
        assert_eq!(audio.resume_calls.get(), 1);
        assert!(audio.tones.borrow().is_empty());
    }

    #[test]
    fn test_stuck_suspended_context_gives_up() {
        // Resume "succeeds" but the context never leaves Suspended
        let audio = FakeAudio::new(vec![Ok(ContextState::Suspended)]);
        let outcome = block_on(play_alarm(&audio, &AlarmConfig::tone_only()));
        assert_eq!(outcome, AlarmOutcome::Silent);
        assert_eq!(audio.resume_calls.get(), MAX_RESUME_ATTEMPTS);
    }

    #[test]
    fn test_synthesis_failure_is_absorbed() {
        let mut audio = FakeAudio::running().missing_asset();
        audio.tone = Err(AlarmError::Synthesis("InvalidStateError".to_string()));
        let outcome = block_on(play_alarm(&audio, &AlarmConfig::default()));
        assert_eq!(outcome, AlarmOutcome::Silent);
    }
}
