//! Silence gate and lead/trail trimming applied before autocorrelation.
//!
//! A buffer whose RMS energy falls under the silence threshold carries no
//! pitch. An active buffer is narrowed to the span between the first quiet
//! sample near its start and the first quiet sample near its end, which
//! starts and stops the analysis close to zero crossings and sharpens the
//! autocorrelation peak.
use crate::float::{abs, from_usize, Float};
use crate::utils::buffer::square_sum;

/// Root-mean-square level of `signal`. NaN for an empty slice.
pub fn rms<T: Float>(signal: &[T]) -> T {
    (square_sum(signal) / from_usize(signal.len())).sqrt()
}

/// Whether `signal` is too quiet to analyse. Empty buffers and buffers with a
/// NaN level count as silent.
pub fn is_silent<T: Float>(signal: &[T], silence_threshold: T) -> bool {
    if signal.is_empty() {
        return true;
    }
    let level = rms(signal);
    !(level >= silence_threshold)
}

/// Boundaries `(start, end)` of the span kept for analysis; `end` is exclusive.
///
/// `start` is the first index in the first half whose magnitude is below
/// `threshold` (0 if none is). `end` is the first index below `threshold` met
/// when walking backward from the last sample over the second half
/// (`len - 1` if none is).
pub fn trim_bounds<T: Float>(signal: &[T], threshold: T) -> (usize, usize) {
    let len = signal.len();
    let half = (len + 1) / 2;
    let quiet = |s: &T| abs(*s) < threshold;

    let start = signal[..half].iter().position(quiet).unwrap_or(0);
    let end = (1..half)
        .map(|k| len - k)
        .find(|&i| quiet(&signal[i]))
        .unwrap_or(len.saturating_sub(1));

    (start, end)
}

/// Gate and trim `signal`. Returns `None` for silence, or when trimming leaves
/// fewer than two samples to correlate.
pub fn preprocess<T: Float>(signal: &[T], silence_threshold: T, trim_threshold: T) -> Option<&[T]> {
    if is_silent(signal, silence_threshold) {
        log::trace!("frame of {} samples is below the silence gate", signal.len());
        return None;
    }

    let (start, end) = trim_bounds(signal, trim_threshold);
    match signal.get(start..end) {
        Some(trimmed) if trimmed.len() >= 2 => Some(trimmed),
        _ => {
            log::trace!(
                "trimming {} samples to {}..{} left nothing to analyse",
                signal.len(),
                start,
                end
            );
            None
        }
    }
}
