//! Autocorrelation pitch detection with first-minimum skip and parabolic peak
//! refinement (often called ACF2+).
//!
//! Let $S=(s_0,s_1,\ldots,s_{N-1})$ be the signal left after the silence gate and
//! trimming. Its autocorrelation at lag $t$ is
//! $$ c(t) = \sum_{j=0}^{N-t-1} s_j s_{j+t}. $$
//! $c(0)$ is always the global maximum, so the search first walks down the slope
//! from lag 0 to the first local minimum, then takes the highest $c(t)$ from
//! there on as the period. The integer period is refined by fitting a parabola
//! through it and its two neighbours, and the frequency is the sample rate
//! divided by the refined period.
//!
//! ## Implementation
//! With [AcfMethod::Direct] the autocorrelation is summed explicitly, which is
//! quadratic in the buffer length but fine for a few thousand samples. With
//! [AcfMethod::Fft] it is computed through a zero-padded
//! [FFT](https://en.wikipedia.org/wiki/Fast_Fourier_transform) instead.
//!
//! A peak on the last lag cannot be refined and is returned as is. A peak on
//! lag 0 means there is no period at all and no pitch is reported.
use crate::config::{AcfMethod, Config};
use crate::detector::internals::{pitch_from_autocorrelation, DetectorInternals, Pitch};
use crate::detector::PitchDetector;
use crate::error::ConfigError;
use crate::float::Float;
use crate::preprocess::preprocess;
use crate::utils::peak::PeakCorrection;

pub struct AutocorrelationDetector<T>
where
    T: Float,
{
    silence_threshold: T,
    trim_threshold: T,
    method: AcfMethod,
    internals: DetectorInternals<T>,
}

impl<T> AutocorrelationDetector<T>
where
    T: Float,
{
    pub fn new(config: &Config<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(AutocorrelationDetector {
            silence_threshold: config.silence_threshold,
            trim_threshold: config.trim_threshold,
            method: config.method,
            internals: DetectorInternals::new(),
        })
    }

    pub fn method(&self) -> AcfMethod {
        self.method
    }
}

impl<T> Default for AutocorrelationDetector<T>
where
    T: Float,
{
    fn default() -> Self {
        let config = Config::default();
        AutocorrelationDetector {
            silence_threshold: config.silence_threshold,
            trim_threshold: config.trim_threshold,
            method: config.method,
            internals: DetectorInternals::new(),
        }
    }
}

impl<T> PitchDetector<T> for AutocorrelationDetector<T>
where
    T: Float,
{
    fn get_pitch(&mut self, signal: &[T], sample_rate: usize) -> Option<Pitch<T>> {
        let trimmed = preprocess(signal, self.silence_threshold, self.trim_threshold)?;

        let acf = match self.method {
            AcfMethod::Direct => self.internals.direct(trimmed),
            AcfMethod::Fft => self.internals.fft(trimmed),
        };

        pitch_from_autocorrelation(acf, sample_rate, PeakCorrection::Quadratic)
    }
}
