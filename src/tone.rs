//! Synthesized alarm tone
//!
//! A single sine oscillator with an exponentially decaying gain envelope.
//! `ToneSpec::envelope` produces the exact points handed to the Web Audio
//! scheduler, so they can be checked without a browser.

use serde::{Deserialize, Serialize};

use crate::error::{AlarmError, Result};

/// Parameters for the fallback alarm tone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneSpec {
    /// Oscillator frequency in Hz
    pub frequency: f32,
    /// Tone length in seconds
    pub duration: f64,
    /// Gain at the start of the tone
    pub start_gain: f32,
    /// Gain reached at the end of the tone
    pub end_gain: f32,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            frequency: 880.0,
            duration: 1.0,
            start_gain: 0.3,
            end_gain: 0.01,
        }
    }
}

impl ToneSpec {
    /// Reject values the Web Audio scheduler would throw on.
    ///
    /// Exponential ramps cannot start or end at zero, so both gains must be
    /// strictly positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(AlarmError::Config(format!(
                "frequency must be positive, got {}",
                self.frequency
            )));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(AlarmError::Config(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        for (name, gain) in [("start_gain", self.start_gain), ("end_gain", self.end_gain)] {
            if !(gain > 0.0 && gain <= 1.0) {
                return Err(AlarmError::Config(format!(
                    "{name} must be in (0, 1], got {gain}"
                )));
            }
        }
        Ok(())
    }

    /// Oscillator start/stop and gain envelope for a tone beginning at `now`
    pub fn envelope(&self, now: f64) -> ToneEnvelope {
        let stop = now + self.duration;
        ToneEnvelope {
            start: now,
            stop,
            attack: (now, self.start_gain),
            release: (stop, self.end_gain),
        }
    }
}

/// Times on the audio clock, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEnvelope {
    pub start: f64,
    pub stop: f64,
    /// Gain set at this time
    pub attack: (f64, f32),
    /// Gain reached by an exponential ramp at this time
    pub release: (f64, f32),
}
