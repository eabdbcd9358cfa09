//! Per-frame entry point: gate, detect and name the note in one call.
use std::fmt;

use crate::config::Config;
use crate::detector::autocorrelation::AutocorrelationDetector;
use crate::detector::internals::Pitch;
use crate::detector::PitchDetector;
use crate::error::ConfigError;
use crate::float::Float;
use crate::frame::AudioFrame;
use crate::note::{Note, Tuning};

/// A detected pitch and the note nearest to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading<T>
where
    T: Float,
{
    pub pitch: Pitch<T>,
    pub note: Note,
}

impl<T> fmt::Display for Reading<T>
where
    T: Float,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.note, f)
    }
}

pub struct Tuner<T>
where
    T: Float,
{
    detector: AutocorrelationDetector<T>,
    tuning: Tuning<T>,
}

impl<T> Tuner<T>
where
    T: Float,
{
    pub fn new(config: &Config<T>) -> Result<Self, ConfigError> {
        Ok(Tuner {
            detector: AutocorrelationDetector::new(config)?,
            tuning: Tuning::new(config.reference_pitch)?,
        })
    }

    pub fn tuning(&self) -> &Tuning<T> {
        &self.tuning
    }

    /// Analyse one buffer. `None` means nothing was heard in this frame.
    pub fn process(&mut self, samples: &[T], sample_rate: usize) -> Option<Reading<T>> {
        let pitch = self.detector.get_pitch(samples, sample_rate)?;
        let note = self.tuning.note(&pitch)?;
        Some(Reading { pitch, note })
    }

    pub fn process_frame(&mut self, frame: &AudioFrame<T>) -> Option<Reading<T>> {
        self.process(frame.samples(), frame.sample_rate())
    }

    /// Text for the on-screen note display, e.g. `"A, -3"`, or an empty string
    /// when no note is detected.
    pub fn label(&mut self, frame: &AudioFrame<T>) -> String {
        self.process_frame(frame)
            .map(|reading| reading.to_string())
            .unwrap_or_default()
    }
}

impl<T> Default for Tuner<T>
where
    T: Float,
{
    fn default() -> Self {
        Tuner {
            detector: AutocorrelationDetector::default(),
            tuning: Tuning::default(),
        }
    }
}
