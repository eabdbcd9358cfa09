use crate::float::{from_f64, from_usize, Float};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakCorrection {
    Quadratic,
    None,
}

struct Point<T: Float> {
    x: T,
    y: T,
}

/// Index of the first local minimum of `arr`: walk forward from index 0 while
/// the next value is strictly lower. Stops at the last index of a
/// monotonically decreasing array, and at 0 for an empty one.
pub fn first_minimum<T: Float>(arr: &[T]) -> usize {
    arr.windows(2)
        .position(|win| !(win[0] > win[1]))
        .unwrap_or(arr.len().saturating_sub(1))
}

/// Largest value of `arr` at or after `start`, with its index. The first
/// occurrence wins on ties. `None` if the range is empty or holds only NaN.
pub fn highest_peak<T: Float>(arr: &[T], start: usize) -> Option<(usize, T)> {
    arr.iter()
        .enumerate()
        .skip(start)
        .fold(None, |best: Option<(usize, T)>, (i, &v)| match best {
            Some((_, best_v)) if !(v > best_v) => best,
            _ if v.is_nan() => best,
            _ => Some((i, v)),
        })
}

/// Refine an integer peak `(index, value)` of `data` to a fractional position.
///
/// Quadratic correction needs both neighbours; at either end of `data`, or
/// when the three points are collinear, the integer position is returned.
pub fn correct_peak<T: Float>(peak: (usize, T), data: &[T], correction: PeakCorrection) -> (T, T) {
    let unrefined = (from_usize(peak.0), peak.1);
    match correction {
        PeakCorrection::Quadratic => {
            let idx = peak.0;
            if idx == 0 || idx + 1 >= data.len() {
                log::debug!(
                    "peak at lag {} of {} has no neighbour on both sides; keeping integer lag",
                    idx,
                    data.len()
                );
                return unrefined;
            }
            quadratic_interpolation(
                Point {
                    x: from_usize(idx - 1),
                    y: data[idx - 1],
                },
                Point {
                    x: from_usize(idx),
                    y: data[idx],
                },
                Point {
                    x: from_usize(idx + 1),
                    y: data[idx + 1],
                },
            )
            .map_or(unrefined, |point| (point.x, point.y))
        }
        PeakCorrection::None => unrefined,
    }
}

/// Vertex of the parabola through three equally spaced points, or `None` when
/// they are collinear.
fn quadratic_interpolation<T: Float>(
    left: Point<T>,
    center: Point<T>,
    right: Point<T>,
) -> Option<Point<T>> {
    let curvature = from_f64::<T>(2.0) * center.y - left.y - right.y;
    if curvature == T::zero() {
        return None;
    }
    let shift = from_f64::<T>(0.5) * (right.y - left.y) / curvature;
    let x = center.x + shift;
    let y = center.y + from_f64::<T>(0.25) * (right.y - left.y) * shift;
    Some(Point { x, y })
}
