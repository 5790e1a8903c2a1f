use image::{Luma, Pixel, Primitive};
use imageproc::{definitions::Image, point::Point};

use crate::{error::ExtractError, geometry};

/// A pixel position on the grid, `x` being the column and `y` the row.
///
/// Coordinates are signed so that neighbours of border pixels can be formed and then
/// rejected by [`Grid::in_bounds`].
pub type Coordinate = Point<i32>;

/// Offsets of the 4-connected neighbourhood in exploration order: right, up, left, down.
pub(crate) const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// Returns the 4-connected neighbour of `c` in direction `direction` (see
/// [`NEIGHBOUR_OFFSETS`]). The result may lie outside the grid.
#[inline]
pub(crate) fn neighbour(c: Coordinate, direction: usize) -> Coordinate {
    let (dx, dy) = NEIGHBOUR_OFFSETS[direction];
    Point::new(c.x.saturating_add(dx), c.y.saturating_add(dy))
}

/// A read-only view of a background-thresholded intensity image.
///
/// Pixels with an intensity strictly greater than zero are *bright*; everything else is
/// background. All queries are bounds-checked and answer `false` (or `None`) outside the
/// image instead of panicking.
#[derive(Debug)]
pub struct Grid<'a, T>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
    image: &'a Image<Luma<T>>,
    width: i32,
    height: i32,
}

impl<T> Clone for Grid<'_, T>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Grid<'_, T>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
}

impl<'a, T> Grid<'a, T>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
    /// Wraps an intensity image.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::GridTooLarge`] if either dimension exceeds `i32::MAX`.
    pub fn new(image: &'a Image<Luma<T>>) -> Result<Self, ExtractError> {
        let (w, h) = image.dimensions();
        match (geometry::to_i32(w), geometry::to_i32(h)) {
            (Some(width), Some(height)) => Ok(Self {
                image,
                width,
                height,
            }),
            _ => Err(ExtractError::GridTooLarge {
                width: w,
                height: h,
            }),
        }
    }

    /// The `(width, height)` of the underlying image.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Returns `true` if `c` addresses a pixel, i.e. `0 <= x < width` and `0 <= y < height`.
    #[inline]
    pub fn in_bounds(&self, c: Coordinate) -> bool {
        geometry::in_range(c.x, 0, self.width - 1, true)
            && geometry::in_range(c.y, 0, self.height - 1, true)
    }

    /// The intensity at `c` as `f64`, or `None` outside the image.
    #[inline]
    pub fn intensity_at(&self, c: Coordinate) -> Option<f64> {
        if !self.in_bounds(c) {
            return None;
        }
        self.image.get_pixel(c.x as u32, c.y as u32).0[0].to_f64()
    }

    /// Returns `true` if `c` is inside the image and its intensity is strictly positive.
    #[inline]
    pub fn is_bright(&self, c: Coordinate) -> bool {
        self.intensity_at(c).is_some_and(|v| v > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    fn sample_image() -> Image<Luma<f32>> {
        // 3x2 with two bright pixels and one negative one.
        ImageBuffer::from_raw(3, 2, vec![0.0, 0.5, 0.0, 1.0, 0.0, -0.25]).unwrap()
    }

    #[test]
    fn test_in_bounds() {
        let image = sample_image();
        let grid = Grid::new(&image).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert!(grid.in_bounds(Point::new(0, 0)));
        assert!(grid.in_bounds(Point::new(2, 1)));
        assert!(!grid.in_bounds(Point::new(3, 0)));
        assert!(!grid.in_bounds(Point::new(0, 2)));
        assert!(!grid.in_bounds(Point::new(-1, 0)));
        assert!(!grid.in_bounds(Point::new(0, -1)));
    }

    #[test]
    fn test_intensity_and_brightness() {
        let image = sample_image();
        let grid = Grid::new(&image).unwrap();
        assert_eq!(grid.intensity_at(Point::new(1, 0)), Some(0.5));
        assert_eq!(grid.intensity_at(Point::new(0, 1)), Some(1.0));
        assert_eq!(grid.intensity_at(Point::new(5, 5)), None);

        assert!(grid.is_bright(Point::new(1, 0)));
        assert!(grid.is_bright(Point::new(0, 1)));
        assert!(!grid.is_bright(Point::new(0, 0)));
        // Negative values are background as well.
        assert!(!grid.is_bright(Point::new(2, 1)));
        // Out of bounds is never bright.
        assert!(!grid.is_bright(Point::new(-1, 1)));
    }

    #[test]
    fn test_integer_images() {
        let image: Image<Luma<u8>> = ImageBuffer::from_fn(2, 2, |x, _| Luma([x as u8 * 200]));
        let grid = Grid::new(&image).unwrap();
        assert!(!grid.is_bright(Point::new(0, 1)));
        assert!(grid.is_bright(Point::new(1, 1)));
        assert_eq!(grid.intensity_at(Point::new(1, 0)), Some(200.0));
    }

    #[test]
    fn test_empty_image_has_no_pixels() {
        let image: Image<Luma<f32>> = ImageBuffer::new(0, 0);
        let grid = Grid::new(&image).unwrap();
        assert!(!grid.in_bounds(Point::new(0, 0)));
        assert!(!grid.is_bright(Point::new(0, 0)));
    }

    #[test]
    fn test_neighbour_order() {
        let c = Point::new(4, 4);
        let around: Vec<_> = (0..4).map(|d| neighbour(c, d)).collect();
        assert_eq!(
            around,
            vec![
                Point::new(5, 4),
                Point::new(4, 3),
                Point::new(3, 4),
                Point::new(4, 5)
            ]
        );
    }
}
