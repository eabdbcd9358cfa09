//! Generic [Float] type which acts as a stand-in for `f32` or `f64`.
use rustfft::num_traits::Float as NumFloat;
use rustfft::FftNum;
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Signals are processed as arrays of [Float]s. A [Float] is normally `f32` or `f64`.
pub trait Float: Display + Debug + NumFloat + FftNum + Sum {}

impl Float for f64 {}
impl Float for f32 {}

/// Convert an `f64` analysis constant into `T`. Never fails for `f32` or `f64`;
/// an unrepresentable value becomes NaN and is rejected downstream.
pub fn from_f64<T: Float>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

/// Convert a sample count or sample rate into `T`.
pub fn from_usize<T: Float>(value: usize) -> T {
    T::from_usize(value).unwrap_or_else(T::nan)
}

/// `|x|`, spelled out because both `Float` and `Signed` provide `abs`.
pub fn abs<T: Float>(x: T) -> T {
    NumFloat::abs(x)
}
