use image::{Luma, Pixel, Primitive};
use imageproc::definitions::Image;

use crate::{
    cluster::ResultSet,
    error::ExtractError,
    filter::SizeThresholds,
    grid::{Coordinate, Grid},
    grower::RegionGrower,
    observer::{ExtractionObserver, LogObserver, PassSummary, SeedOutcome},
    params::{ExtractionConfig, RadiusPolicy, SizeParameters},
    visited::VisitedMask,
};

/// Splits an intensity grid into clusters, one seed at a time.
///
/// Seeds are processed in the given order, which should be brightest first. A seed that
/// is already claimed, or that lies on background, is skipped. Otherwise it is claimed, a
/// region is grown around it with [`RegionGrower`], and the region is kept if its size
/// passes [`SizeThresholds`]. Rejected regions stay claimed.
///
/// The extractor works on 0-based coordinates; see [`extract_clusters`] for the entry point
/// that also handles other conventions.
#[derive(Debug, Clone, Copy)]
pub struct ClusterExtractor<'a, T>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
    grid: Grid<'a, T>,
    size: SizeParameters,
    radius: RadiusPolicy,
    thresholds: SizeThresholds,
}

impl<'a, T> ClusterExtractor<'a, T>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
    /// Prepares an extractor over `image`.
    ///
    /// # Errors
    ///
    /// Fails if the image is too large to address or `size` is invalid
    /// (see [`SizeParameters::validate`]).
    pub fn new(
        image: &'a Image<Luma<T>>,
        size: SizeParameters,
        radius: RadiusPolicy,
    ) -> Result<Self, ExtractError> {
        size.validate()?;
        Ok(Self {
            grid: Grid::new(image)?,
            size,
            radius,
            thresholds: SizeThresholds::new(&size),
        })
    }

    /// The grid the extractor reads from.
    pub fn grid(&self) -> Grid<'a, T> {
        self.grid
    }

    /// The size bounds applied to grown regions.
    pub fn thresholds(&self) -> &SizeThresholds {
        &self.thresholds
    }

    /// Runs a pass with a fresh mask, logging progress through [`LogObserver`].
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SeedOutOfBounds`] for the first seed outside the grid.
    pub fn extract(&self, seeds: &[Coordinate]) -> Result<ResultSet, ExtractError> {
        let (width, height) = self.grid.dimensions();
        let mut mask = VisitedMask::new(width, height);
        self.extract_observed(seeds, &mut mask, LogObserver)
    }

    /// Runs a pass on a caller-supplied mask.
    ///
    /// Pixels already claimed in `mask` are treated as belonging to earlier clusters. On
    /// return the mask holds every pixel claimed during the pass, including those of
    /// rejected clusters.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MaskDimensionMismatch`] if the mask does not match the
    /// grid, and [`ExtractError::SeedOutOfBounds`] for the first seed outside the grid.
    pub fn extract_with_mask(
        &self,
        seeds: &[Coordinate],
        mask: &mut VisitedMask,
    ) -> Result<ResultSet, ExtractError> {
        self.extract_observed(seeds, mask, LogObserver)
    }

    /// Runs a pass on a caller-supplied mask, reporting to `observer`.
    ///
    /// Inputs are validated before the mask is touched. If the observer breaks out of the
    /// pass, the clusters grown so far are dropped but their pixels remain claimed in
    /// `mask`.
    ///
    /// # Errors
    ///
    /// As [`ClusterExtractor::extract_with_mask`], plus [`ExtractError::Cancelled`] when
    /// the observer stops the pass.
    pub fn extract_observed<O: ExtractionObserver>(
        &self,
        seeds: &[Coordinate],
        mask: &mut VisitedMask,
        mut observer: O,
    ) -> Result<ResultSet, ExtractError> {
        self.validate(seeds, mask)?;
        observer.pass_started(seeds.len());

        let mut result = ResultSet::new();
        let mut summary = PassSummary::default();
        let mut grower = RegionGrower::new(self.grid, mask, self.size, self.radius);

        for (index, &seed) in seeds.iter().enumerate() {
            let outcome = if grower.is_claimed(seed) {
                SeedOutcome::AlreadyClaimed
            } else if !self.grid.is_bright(seed) {
                SeedOutcome::Background
            } else {
                grower.claim(seed);
                let cluster = grower.grow(seed);
                let size = cluster.len();
                if self.thresholds.accept(&cluster) {
                    result.push(cluster);
                    SeedOutcome::Accepted { size }
                } else {
                    SeedOutcome::Discarded { size }
                }
            };

            summary.record(outcome);
            if observer.seed_processed(index, seed, outcome).is_break() {
                return Err(ExtractError::Cancelled {
                    seeds_scanned: index + 1,
                });
            }
        }

        observer.pass_finished(&summary);
        Ok(result)
    }

    fn validate(&self, seeds: &[Coordinate], mask: &VisitedMask) -> Result<(), ExtractError> {
        let (width, height) = self.grid.dimensions();
        let (mask_width, mask_height) = mask.dimensions();
        if (mask_width, mask_height) != (width, height) {
            return Err(ExtractError::MaskDimensionMismatch {
                grid_width: width,
                grid_height: height,
                mask_width,
                mask_height,
            });
        }

        if let Some((index, seed)) = seeds
            .iter()
            .enumerate()
            .find(|(_, s)| !self.grid.in_bounds(**s))
        {
            return Err(ExtractError::SeedOutOfBounds {
                index,
                x: seed.x,
                y: seed.y,
                width,
                height,
            });
        }
        Ok(())
    }
}

/// Extracts clusters from `image` using seeds in the caller's coordinate convention.
///
/// This is the boundary adapter: seeds are translated from `config.origin` into grid
/// coordinates, a pass runs with a fresh mask, and the clusters are translated back.
///
/// # Errors
///
/// Returns [`ExtractError`] on invalid parameters or a seed outside the image; the
/// offending seed is reported as the caller gave it.
///
/// # Examples
///
/// ```
/// use image::{ImageBuffer, Luma};
/// use imageproc::point::Point;
/// use cell_clusters::{ExtractionConfig, SizeParameters, extract_clusters};
///
/// // A 3x3 bright block in the middle of a 5x5 field.
/// let image = ImageBuffer::from_fn(5, 5, |x, y| {
///     let inside = (1..=3).contains(&x) && (1..=3).contains(&y);
///     Luma([if inside { 0.8f32 } else { 0.0 }])
/// });
///
/// let config = ExtractionConfig::new(SizeParameters::new(4.0, 0.0).with_min_cluster_area(0.0));
/// let clusters = extract_clusters(&image, &[Point::new(2, 2)], &config).unwrap();
///
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters.clusters()[0].len(), 9);
/// ```
pub fn extract_clusters<T>(
    image: &Image<Luma<T>>,
    seeds: &[Coordinate],
    config: &ExtractionConfig,
) -> Result<ResultSet, ExtractError>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
    extract_clusters_observed(image, seeds, config, LogObserver)
}

/// As [`extract_clusters`], reporting to `observer`. Seeds passed to the observer are in
/// grid coordinates.
pub fn extract_clusters_observed<T, O>(
    image: &Image<Luma<T>>,
    seeds: &[Coordinate],
    config: &ExtractionConfig,
    observer: O,
) -> Result<ResultSet, ExtractError>
where
    T: Primitive,
    Luma<T>: Pixel<Subpixel = T>,
    O: ExtractionObserver,
{
    let extractor = ClusterExtractor::new(image, config.size, config.radius)?;
    let (width, height) = image.dimensions();
    let origin = config.origin;

    let mut internal = Vec::with_capacity(seeds.len());
    for (index, &seed) in seeds.iter().enumerate() {
        match origin.to_internal(seed) {
            Some(c) if extractor.grid().in_bounds(c) => internal.push(c),
            _ => {
                return Err(ExtractError::SeedOutOfBounds {
                    index,
                    x: seed.x,
                    y: seed.y,
                    width,
                    height,
                });
            }
        }
    }

    let mut mask = VisitedMask::new(width, height);
    extractor
        .extract_observed(&internal, &mut mask, observer)
        .map(|result| result.into_origin(origin))
}
