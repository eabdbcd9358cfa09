use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::float::Float;

pub enum ComplexComponent {
    Re,
    Im,
}

pub fn new_real_buffer<T: Float>(size: usize) -> Vec<T> {
    vec![T::zero(); size]
}

pub fn new_complex_buffer<T: Float>(size: usize) -> Vec<Complex<T>> {
    vec![Complex::zero(); size]
}

/// Copy `input` into one component of `output`, zeroing the other component
/// and every slot of `output` past `input.len()`.
pub fn copy_real_to_complex<T: Float>(
    input: &[T],
    output: &mut [Complex<T>],
    component: ComplexComponent,
) {
    assert!(input.len() <= output.len());
    match component {
        ComplexComponent::Re => input.iter().zip(output.iter_mut()).for_each(|(i, o)| {
            o.re = *i;
            o.im = T::zero();
        }),
        ComplexComponent::Im => input.iter().zip(output.iter_mut()).for_each(|(i, o)| {
            o.im = *i;
            o.re = T::zero();
        }),
    }
    output[input.len()..]
        .iter_mut()
        .for_each(|o| *o = Complex::zero())
}

/// Copy one component of the first `output.len()` values of `input` into `output`.
pub fn copy_complex_to_real<T: Float>(
    input: &[Complex<T>],
    output: &mut [T],
    component: ComplexComponent,
) {
    assert!(output.len() <= input.len());
    let values = input.iter().map(|c| match component {
        ComplexComponent::Re => c.re,
        ComplexComponent::Im => c.im,
    });
    output.iter_mut().zip(values).for_each(|(o, v)| *o = v);
}

/// Computes |x|^2 for each complex value x in `arr`. This function
/// modifies `arr` in place and leaves the complex component zero.
pub fn modulus_squared<T: Float>(arr: &mut [Complex<T>]) {
    for s in arr {
        s.re = s.re * s.re + s.im * s.im;
        s.im = T::zero();
    }
}

/// Compute the sum of the square of each element of `arr`.
pub fn square_sum<T: Float>(arr: &[T]) -> T {
    arr.iter().map(|&s| s * s).sum::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_complex_copies() {
        let mut complex = new_complex_buffer::<f64>(4);
        complex[3] = Complex::new(7.0, 7.0);
        copy_real_to_complex(&[1.0, 2.0], &mut complex, ComplexComponent::Re);
        assert_eq!(
            complex,
            vec![
                Complex::new(1.0, 0.0),
                Complex::new(2.0, 0.0),
                Complex::zero(),
                Complex::zero()
            ]
        );

        let mut real = new_real_buffer::<f64>(3);
        copy_complex_to_real(&complex, &mut real, ComplexComponent::Re);
        assert_eq!(real, vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn modulus_squared_clears_imaginary_part() {
        let mut values = vec![Complex::new(3.0f32, 4.0), Complex::new(0.0, -2.0)];
        modulus_squared(&mut values);
        assert_eq!(values, vec![Complex::new(25.0, 0.0), Complex::new(4.0, 0.0)]);
    }

    #[test]
    fn square_sum_of_signal() {
        assert_eq!(square_sum(&[1.0f32, -2.0, 3.0]), 14.0);
        assert_eq!(square_sum::<f64>(&[]), 0.0);
    }
}
