use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::float::{from_usize, Float};
use crate::utils::buffer::{copy_complex_to_real, copy_real_to_complex, modulus_squared};
use crate::utils::buffer::{new_complex_buffer, ComplexComponent};
use crate::utils::peak::{correct_peak, first_minimum, highest_peak, PeakCorrection};

/// A detected fundamental. The frequency is always strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pitch<T>
where
    T: Float,
{
    frequency: T,
    lag: T,
}

impl<T> Pitch<T>
where
    T: Float,
{
    /// Pitch of a signal with period `lag` samples. `None` unless the resulting
    /// frequency is strictly positive and finite.
    pub fn from_lag(lag: T, sample_rate: usize) -> Option<Self> {
        let frequency = from_usize::<T>(sample_rate) / lag;
        if frequency.is_finite() && frequency > T::zero() && lag.is_finite() {
            Some(Pitch { frequency, lag })
        } else {
            None
        }
    }

    /// Fundamental frequency in Hz.
    pub fn frequency(&self) -> T {
        self.frequency
    }

    /// Period in samples, possibly fractional after refinement.
    pub fn lag(&self) -> T {
        self.lag
    }
}

/// Scratch space for the autocorrelation. Kept between calls only to avoid
/// reallocating; no value in here outlives a single detection.
pub struct DetectorInternals<T>
where
    T: Float,
{
    pub acf: Vec<T>,
    planner: FftPlanner<T>,
    signal_complex: Vec<Complex<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T> DetectorInternals<T>
where
    T: Float,
{
    pub fn new() -> Self {
        DetectorInternals {
            acf: Vec::new(),
            planner: FftPlanner::new(),
            signal_complex: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Fill `self.acf` with the direct autocorrelation of `signal`.
    pub fn direct(&mut self, signal: &[T]) -> &[T] {
        self.acf.resize(signal.len(), T::zero());
        autocorrelation(signal, &mut self.acf);
        &self.acf
    }

    /// Fill `self.acf` with the FFT autocorrelation of `signal`.
    pub fn fft(&mut self, signal: &[T]) -> &[T] {
        let fft_len = (2 * signal.len()).next_power_of_two();
        let fft = self.planner.plan_fft_forward(fft_len);
        let inv_fft = self.planner.plan_fft_inverse(fft_len);

        self.signal_complex.resize(fft_len, Complex::new(T::zero(), T::zero()));
        let scratch_len = fft
            .get_inplace_scratch_len()
            .max(inv_fft.get_inplace_scratch_len());
        if self.scratch.len() < scratch_len {
            self.scratch = new_complex_buffer(scratch_len);
        }
        self.acf.resize(signal.len(), T::zero());

        fft_autocorrelation(
            signal,
            (fft, inv_fft),
            &mut self.signal_complex,
            &mut self.scratch,
            &mut self.acf,
        );
        &self.acf
    }
}

impl<T> Default for DetectorInternals<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the autocorrelation of `signal` into `result`:
///
/// > c(t) = sum_{j=0}^{N-t-1} x_j*x_{j+t}
///
/// for every lag `t` below `result.len()`.
pub fn autocorrelation<T: Float>(signal: &[T], result: &mut [T]) {
    assert!(result.len() <= signal.len());
    result.iter_mut().enumerate().for_each(|(lag, c)| {
        *c = signal
            .iter()
            .zip(&signal[lag..])
            .map(|(&a, &b)| a * b)
            .sum::<T>();
    });
}

/// Same values as [autocorrelation], computed through an FFT. `signal_complex`
/// must hold at least `2 * signal.len()` values so the circular correlation does
/// not wrap around onto the lags we keep.
pub fn fft_autocorrelation<T: Float>(
    signal: &[T],
    (fft, inv_fft): (Arc<dyn Fft<T>>, Arc<dyn Fft<T>>),
    signal_complex: &mut [Complex<T>],
    scratch: &mut [Complex<T>],
    result: &mut [T],
) {
    assert!(signal_complex.len() >= 2 * signal.len());
    assert!(result.len() <= signal.len());

    copy_real_to_complex(signal, signal_complex, ComplexComponent::Re);
    fft.process_with_scratch(signal_complex, scratch);
    modulus_squared(signal_complex);
    inv_fft.process_with_scratch(signal_complex, scratch);

    // rustfft doesn't normalize, so the forward/inverse pair scales by the length.
    let normalization_const = T::one() / from_usize(signal_complex.len());
    copy_complex_to_real(signal_complex, result, ComplexComponent::Re);
    result.iter_mut().for_each(|c| *c = *c * normalization_const);
}

/// Pick the fundamental period from an autocorrelation and turn it into a pitch.
///
/// The search starts at the first local minimum so the zero-lag maximum and its
/// initial decay are skipped. A best peak at lag 0 has no period and gives `None`.
pub fn pitch_from_autocorrelation<T: Float>(
    acf: &[T],
    sample_rate: usize,
    correction: PeakCorrection,
) -> Option<Pitch<T>> {
    let start = first_minimum(acf);
    let peak = highest_peak(acf, start)?;
    if peak.0 == 0 {
        log::debug!("autocorrelation never rises after lag 0; no period");
        return None;
    }
    let (lag, _) = correct_peak(peak, acf, correction);
    Pitch::from_lag(lag, sample_rate)
}
