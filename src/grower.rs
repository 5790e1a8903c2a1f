use image::{Luma, Pixel, Primitive};

use crate::{
    cluster::Cluster,
    geometry::point_distance,
    grid::{Coordinate, Grid, NEIGHBOUR_OFFSETS, neighbour},
    params::{RadiusPolicy, SizeParameters},
    visited::VisitedMask,
};

/// Grows 4-connected regions of bright pixels around seeds.
///
/// The region is explored depth-first: from every accepted pixel the right, upper, left
/// and lower neighbours are tried in turn, and an accepted neighbour is fully explored
/// before its next sibling is tried. The walk keeps its own stack of frames instead of
/// recursing, so cluster size is not limited by the call stack.
///
/// A neighbour joins the cluster iff it is inside the grid, not yet claimed, bright, and
/// close enough to the seed under the configured [`RadiusPolicy`], checked in that order.
/// It is claimed in the mask at the moment it is accepted.
pub struct RegionGrower<'g, 'm, T>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
    grid: Grid<'g, T>,
    mask: &'m mut VisitedMask,
    size: SizeParameters,
    radius: RadiusPolicy,
    frames: Vec<Frame>,
}

/// A pixel whose neighbours are being tried, and the next direction to try.
#[derive(Debug, Clone, Copy)]
struct Frame {
    at: Coordinate,
    next_direction: usize,
}

impl<'g, 'm, T> RegionGrower<'g, 'm, T>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
    /// Creates a grower that claims pixels of `grid` in `mask`.
    ///
    /// # Arguments
    ///
    /// * `grid`: The intensity grid to grow regions on.
    /// * `mask`: Claim tracker shared by every region of the pass. It must have the grid's
    ///   dimensions.
    /// * `size`: Expected cell size; together with `radius` it bounds the seed distance.
    /// * `radius`: How the cell size is turned into a growth radius.
    pub fn new(
        grid: Grid<'g, T>,
        mask: &'m mut VisitedMask,
        size: SizeParameters,
        radius: RadiusPolicy,
    ) -> Self {
        Self {
            grid,
            mask,
            size,
            radius,
            frames: Vec::new(),
        }
    }

    /// Returns `true` if `c` already belongs to some cluster.
    pub fn is_claimed(&self, c: Coordinate) -> bool {
        self.mask.is_visited(c)
    }

    /// Claims a seed before growing from it. Returns `false` if it was already claimed or
    /// lies outside the grid.
    pub fn claim(&mut self, seed: Coordinate) -> bool {
        self.mask.mark_visited(seed)
    }

    /// Returns `true` if `n` may join the cluster grown from `seed`.
    #[inline]
    fn accepts(&self, n: Coordinate, seed: Coordinate) -> bool {
        self.grid.in_bounds(n)
            && !self.mask.is_visited(n)
            && self.grid.is_bright(n)
            && self.radius.admits(point_distance(n, seed), &self.size)
    }

    /// Grows the cluster around `seed`.
    ///
    /// The caller must already have claimed `seed` in the mask; it becomes the first pixel
    /// of the returned cluster. Every other pixel of the cluster is claimed by this call.
    pub fn grow(&mut self, seed: Coordinate) -> Cluster {
        debug_assert!(self.mask.is_visited(seed), "seed must be claimed first");

        let mut cluster = Cluster::from_seed(seed);
        self.frames.clear();
        self.frames.push(Frame {
            at: seed,
            next_direction: 0,
        });

        while let Some(frame) = self.frames.last_mut() {
            if frame.next_direction == NEIGHBOUR_OFFSETS.len() {
                self.frames.pop();
                continue;
            }

            let n = neighbour(frame.at, frame.next_direction);
            frame.next_direction += 1;

            if self.accepts(n, seed) {
                self.mask.mark_visited(n);
                cluster.push(n);
                self.frames.push(Frame {
                    at: n,
                    next_direction: 0,
                });
            }
        }

        cluster
    }
}
