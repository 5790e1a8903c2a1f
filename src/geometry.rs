use imageproc::point::Point;
use num_traits::AsPrimitive;

/// Computes the Euclidean distance between two points of arbitrary dimension.
///
/// Both slices are interpreted as coordinate vectors of the same space; the result is
/// `sqrt(sum((a[i] - b[i])^2))`. Empty slices are at distance `0.0` from each other.
///
/// # Type Parameters
///
/// * `T`: The numeric type of the coordinates. Anything that converts to `f64` with
///   `as` semantics works, e.g. `i32`, `u32` or `f32`.
///
/// # Panics
///
/// Panics if `a` and `b` have different lengths.
///
/// # Examples
///
/// ```
/// use cell_clusters::geometry::euclidean_distance;
///
/// assert_eq!(euclidean_distance(&[0, 0], &[3, 4]), 5.0);
/// assert_eq!(euclidean_distance(&[1.0, 2.0, 2.0], &[0.0, 0.0, 0.0]), 3.0);
/// ```
pub fn euclidean_distance<T>(a: &[T], b: &[T]) -> f64
where
    T: Copy + AsPrimitive<f64>,
{
    assert_eq!(
        a.len(),
        b.len(),
        "points must have the same number of dimensions"
    );

    a.iter()
        .zip(b)
        .map(|(&p, &q)| {
            let d: f64 = p.as_() - q.as_();
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Euclidean distance between two pixel coordinates.
#[inline]
pub fn point_distance(a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    dx.hypot(dy)
}

/// Checks whether `value` lies between `low` and `high`.
///
/// With `inclusive` set both ends are part of the range (`low <= value <= high`),
/// otherwise neither is (`low < value < high`). Values that cannot be compared with the
/// bounds (e.g. `NaN`) are never in range.
///
/// # Examples
///
/// ```
/// use cell_clusters::geometry::in_range;
///
/// assert!(in_range(0, 0, 4, true));
/// assert!(!in_range(0, 0, 4, false));
/// assert!(!in_range(f64::NAN, 0.0, 1.0, true));
/// ```
pub fn in_range<T: PartialOrd>(value: T, low: T, high: T, inclusive: bool) -> bool {
    if inclusive {
        value >= low && value <= high
    } else {
        value > low && value < high
    }
}

/// Converts a dimension or offset into `i32`, if it fits.
pub(crate) fn to_i32<T: num::NumCast>(value: T) -> Option<i32> {
    <i32 as num::NumCast>::from(value)
}
