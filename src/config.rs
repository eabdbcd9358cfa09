//! Analysis constants for the silence gate, the trim step and the note mapper.
//!
//! The defaults reproduce the values the game was tuned with. Every constant
//! can be overridden so each threshold can be exercised in isolation:
//!
//! ```
//! use acf_pitch::config::{AcfMethod, Config};
//!
//! let config = Config::<f32>::default()
//!     .with_silence_threshold(0.02)
//!     .with_method(AcfMethod::Fft);
//! assert!(config.validate().is_ok());
//! ```
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::float::{from_f64, Float};

/// RMS level below which a buffer is treated as silence.
pub const DEFAULT_SILENCE_THRESHOLD: f64 = 0.01;
/// Amplitude below which a sample counts as quiet when trimming.
pub const DEFAULT_TRIM_THRESHOLD: f64 = 0.2;
/// Frequency of A4 (note number 69) in Hz.
pub const DEFAULT_REFERENCE_PITCH: f64 = 440.0;

/// How the lag-domain autocorrelation is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AcfMethod {
    /// Explicit O(N²) sum over every lag.
    #[default]
    Direct,
    /// Zero-padded FFT, O(N log N). Matches `Direct` up to rounding.
    Fft,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config<T>
where
    T: Float,
{
    pub silence_threshold: T,
    pub trim_threshold: T,
    pub reference_pitch: T,
    pub method: AcfMethod,
}

impl<T> Default for Config<T>
where
    T: Float,
{
    fn default() -> Self {
        Config {
            silence_threshold: from_f64(DEFAULT_SILENCE_THRESHOLD),
            trim_threshold: from_f64(DEFAULT_TRIM_THRESHOLD),
            reference_pitch: from_f64(DEFAULT_REFERENCE_PITCH),
            method: AcfMethod::default(),
        }
    }
}

impl<T> Config<T>
where
    T: Float,
{
    pub fn with_silence_threshold(mut self, threshold: T) -> Self {
        self.silence_threshold = threshold;
        self
    }

    pub fn with_trim_threshold(mut self, threshold: T) -> Self {
        self.trim_threshold = threshold;
        self
    }

    pub fn with_reference_pitch(mut self, frequency: T) -> Self {
        self.reference_pitch = frequency;
        self
    }

    pub fn with_method(mut self, method: AcfMethod) -> Self {
        self.method = method;
        self
    }

    /// Check every constant, reporting the first one that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_non_negative(self.silence_threshold) {
            return Err(ConfigError::SilenceThreshold(as_f64(self.silence_threshold)));
        }
        if !is_non_negative(self.trim_threshold) {
            return Err(ConfigError::TrimThreshold(as_f64(self.trim_threshold)));
        }
        validate_reference_pitch(self.reference_pitch)
    }
}

pub(crate) fn validate_reference_pitch<T: Float>(frequency: T) -> Result<(), ConfigError> {
    if frequency.is_finite() && frequency > T::zero() {
        Ok(())
    } else {
        Err(ConfigError::ReferencePitch(as_f64(frequency)))
    }
}

fn is_non_negative<T: Float>(value: T) -> bool {
    value.is_finite() && value >= T::zero()
}

fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::<f32>::default();
        assert_eq!(config.silence_threshold, 0.01);
        assert_eq!(config.trim_threshold, 0.2);
        assert_eq!(config.reference_pitch, 440.0);
        assert_eq!(config.method, AcfMethod::Direct);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_thresholds() {
        let config = Config::<f64>::default().with_silence_threshold(-0.5);
        assert_eq!(config.validate(), Err(ConfigError::SilenceThreshold(-0.5)));

        let config = Config::<f64>::default().with_trim_threshold(f64::INFINITY);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TrimThreshold(f64::INFINITY))
        );
    }

    #[test]
    fn rejects_bad_reference_pitch() {
        for pitch in [0.0, -440.0] {
            let config = Config::<f64>::default().with_reference_pitch(pitch);
            assert_eq!(config.validate(), Err(ConfigError::ReferencePitch(pitch)));
        }
        let config = Config::<f64>::default().with_reference_pitch(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ReferencePitch(p)) if p.is_nan()
        ));
    }

    #[test]
    fn zero_thresholds_are_allowed() {
        let config = Config::<f32>::default()
            .with_silence_threshold(0.0)
            .with_trim_threshold(0.0);
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_from_json() {
        let json = r#"{
            "silence_threshold": 0.05,
            "trim_threshold": 0.1,
            "reference_pitch": 442.0,
            "method": "Fft"
        }"#;
        let config: Config<f64> = serde_json::from_str(json).unwrap();
        assert_eq!(config.reference_pitch, 442.0);
        assert_eq!(config.method, AcfMethod::Fft);
        assert!(config.validate().is_ok());
    }
}
