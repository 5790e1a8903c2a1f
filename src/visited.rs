use crate::grid::Coordinate;

/// Per-pixel claim tracker with the same dimensions as the grid it guards.
///
/// During a pass every pixel moves from unclaimed to claimed at most once. Queries outside
/// the mask answer `false` and updates outside it are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    claimed: usize,
}

impl VisitedMask {
    /// Creates a mask of `width` x `height` unclaimed pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
            claimed: 0,
        }
    }

    /// The `(width, height)` the mask was created with.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, c: Coordinate) -> Option<usize> {
        let x = u32::try_from(c.x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(c.y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Returns `true` if `c` has already been claimed by some cluster.
    #[inline]
    pub fn is_visited(&self, c: Coordinate) -> bool {
        self.index(c).is_some_and(|i| self.cells[i])
    }

    /// Claims `c`. Returns `true` if the pixel was unclaimed and inside the mask.
    #[inline]
    pub fn mark_visited(&mut self, c: Coordinate) -> bool {
        match self.index(c) {
            Some(i) if !self.cells[i] => {
                self.cells[i] = true;
                self.claimed += 1;
                true
            }
            _ => false,
        }
    }

    /// Releases a claimed pixel.
    ///
    /// Extraction never calls this; a released pixel may be picked up by a later seed,
    /// which breaks the disjointness of clusters already returned.
    pub fn unmark_visited(&mut self, c: Coordinate) -> bool {
        match self.index(c) {
            Some(i) if self.cells[i] => {
                self.cells[i] = false;
                self.claimed -= 1;
                true
            }
            _ => false,
        }
    }

    /// Number of claimed pixels.
    pub fn claimed_count(&self) -> usize {
        self.claimed
    }

    /// Releases every pixel, ready for a fresh pass.
    pub fn reset(&mut self) {
        self.cells.fill(false);
        self.claimed = 0;
    }
}
