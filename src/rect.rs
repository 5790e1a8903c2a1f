use image::math::Rect;
use imageproc::point::Point;
use num_traits::{Num, ToPrimitive};

/// Calculates the axis-aligned pixel extent of a set of pixel coordinates.
///
/// The points are treated as pixels, so the returned rectangle covers the last row and
/// column as well: a single pixel yields a `1 x 1` rectangle.
///
/// This function is generic over numeric types that implement `PartialOrd`, making it
/// suitable for both integer and floating-point coordinates.
///
/// # Arguments
///
/// * `points` - The pixel coordinates, in any order.
///
/// # Returns
///
/// `None` for an empty slice, otherwise an `image::math::Rect` spanning all points.
/// Coordinates that cannot be represented as `u32` (negative ones, for instance) are
/// clamped to `0`.
///
/// # Examples
///
/// ```
/// use imageproc::point::Point;
/// use cell_clusters::rect::pixel_bounding_box;
///
/// let pixels = [Point::new(4, 2), Point::new(5, 2), Point::new(4, 3), Point::new(3, 3)];
/// let bbox = pixel_bounding_box(&pixels).unwrap();
///
/// assert_eq!((bbox.x, bbox.y), (3, 2));
/// assert_eq!((bbox.width, bbox.height), (3, 2));
/// ```
pub fn pixel_bounding_box<T>(points: &[Point<T>]) -> Option<Rect>
where
    T: Copy + PartialOrd + Num + ToPrimitive,
{
    let (first, rest) = points.split_first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;

    // Manual comparison is used here because `T` only has a `PartialOrd`.
    for p in rest {
        if p.x < min_x {
            min_x = p.x;
        }
        if p.x > max_x {
            max_x = p.x;
        }
        if p.y < min_y {
            min_y = p.y;
        }
        if p.y > max_y {
            max_y = p.y;
        }
    }

    let x = min_x.to_u32().unwrap_or(0);
    let y = min_y.to_u32().unwrap_or(0);

    let width = max_x.to_u32().unwrap_or(0).saturating_sub(x) + 1;
    let height = max_y.to_u32().unwrap_or(0).saturating_sub(y) + 1;

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_box() {
        let points: [Point<i32>; 0] = [];
        assert_eq!(pixel_bounding_box(&points), None);
    }

    #[test]
    fn test_single_pixel() {
        let expected = Rect {
            x: 7,
            y: 9,
            width: 1,
            height: 1,
        };
        assert_eq!(pixel_bounding_box(&[Point::new(7, 9)]), Some(expected));
    }

    #[test]
    fn test_plus_shape() {
        let pixels = [
            Point::new(10, 10),
            Point::new(11, 10),
            Point::new(10, 9),
            Point::new(9, 10),
            Point::new(10, 11),
        ];
        let expected = Rect {
            x: 9,
            y: 9,
            width: 3,
            height: 3,
        };
        assert_eq!(pixel_bounding_box(&pixels), Some(expected));
        // The order of points doesn't matter.
        let mut reversed = pixels;
        reversed.reverse();
        assert_eq!(pixel_bounding_box(&reversed), Some(expected));
    }

    #[test]
    fn test_negative_coordinates_are_clamped() {
        let pixels = [Point::new(-3, -1), Point::new(2, 4)];
        let expected = Rect {
            x: 0,
            y: 0,
            width: 3,
            height: 5,
        };
        assert_eq!(pixel_bounding_box(&pixels), Some(expected));
    }
}
