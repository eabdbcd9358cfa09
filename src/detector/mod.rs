use crate::detector::internals::Pitch;
use crate::float::Float;

pub mod autocorrelation;
pub mod internals;

pub trait PitchDetector<T>
where
    T: Float,
{
    /// Estimate the fundamental of `signal`, or `None` when there is no usable
    /// pitch. `signal` is only borrowed for the duration of the call.
    fn get_pitch(&mut self, signal: &[T], sample_rate: usize) -> Option<Pitch<T>>;
}
