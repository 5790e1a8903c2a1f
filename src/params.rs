//! Extraction parameters.
//!
//! All types here are plain data and (de)serialize with `serde`, so a host application can
//! keep them in its own configuration files.

use serde::{Deserialize, Serialize};

use crate::{error::ExtractError, grid::Coordinate};

/// Expected cell size.
///
/// `mean_width` is the typical cell diameter in pixels and `var_width` how much the
/// diameter is expected to vary. `min_cluster_area` can lower the smallest admitted
/// cluster below what the variance implies (for tissue where cells shrink drastically);
/// it never raises it. `None` leaves the variance-implied floor in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeParameters {
    pub mean_width: f64,
    pub var_width: f64,
    #[serde(default)]
    pub min_cluster_area: Option<f64>,
}

impl SizeParameters {
    /// Describes cells of typical diameter `mean_width`, varying by about `var_width`.
    pub fn new(mean_width: f64, var_width: f64) -> Self {
        Self {
            mean_width,
            var_width,
            min_cluster_area: None,
        }
    }

    /// Sets the area floor. A value of `0.0` removes the lower size bound entirely.
    pub fn with_min_cluster_area(mut self, min_cluster_area: f64) -> Self {
        self.min_cluster_area = Some(min_cluster_area);
        self
    }

    /// Checks that the parameters describe a meaningful cell size.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidParameter`] if `mean_width` is not a positive finite
    /// number, or `var_width` or `min_cluster_area` is negative or not finite.
    pub fn validate(&self) -> Result<(), ExtractError> {
        let invalid = |name, value, reason| ExtractError::InvalidParameter {
            name,
            value,
            reason,
        };

        if !self.mean_width.is_finite() {
            return Err(invalid("mean_width", self.mean_width, "must be finite"));
        }
        if self.mean_width <= 0.0 {
            return Err(invalid("mean_width", self.mean_width, "must be positive"));
        }
        if !self.var_width.is_finite() {
            return Err(invalid("var_width", self.var_width, "must be finite"));
        }
        if self.var_width < 0.0 {
            return Err(invalid("var_width", self.var_width, "must not be negative"));
        }
        if let Some(area) = self.min_cluster_area {
            if !area.is_finite() {
                return Err(invalid("min_cluster_area", area, "must be finite"));
            }
            if area < 0.0 {
                return Err(invalid("min_cluster_area", area, "must not be negative"));
            }
        }
        Ok(())
    }
}

/// How far from its seed a region may grow.
///
/// The historical growth test compares `dist + var_width / 2` against
/// `(mean_width + var_width) / 2`, where the variance cancels and the radius is
/// `mean_width / 2` regardless of `var_width`. [`RadiusPolicy::Literal`] keeps that
/// behaviour (and its exact floating point evaluation) so results match earlier runs;
/// [`RadiusPolicy::VarianceWidened`] lets the variance enlarge the radius to
/// `(mean_width + var_width) / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusPolicy {
    #[default]
    Literal,
    VarianceWidened,
}

impl RadiusPolicy {
    /// Returns `true` if a pixel at `distance` from the seed may join the cluster.
    #[inline]
    pub fn admits(self, distance: f64, size: &SizeParameters) -> bool {
        let radius = (size.mean_width + size.var_width) / 2.0;
        match self {
            RadiusPolicy::Literal => distance + size.var_width / 2.0 <= radius,
            RadiusPolicy::VarianceWidened => distance <= radius,
        }
    }

    /// The largest seed distance admitted under this policy.
    pub fn radius(self, size: &SizeParameters) -> f64 {
        match self {
            RadiusPolicy::Literal => size.mean_width / 2.0,
            RadiusPolicy::VarianceWidened => (size.mean_width + size.var_width) / 2.0,
        }
    }
}

/// Index convention of the coordinates exchanged with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateOrigin {
    #[default]
    ZeroBased,
    OneBased,
}

impl CoordinateOrigin {
    fn offset(self) -> i32 {
        match self {
            CoordinateOrigin::ZeroBased => 0,
            CoordinateOrigin::OneBased => 1,
        }
    }

    /// Converts a caller coordinate into a 0-based grid coordinate.
    ///
    /// Returns `None` if the shift overflows, which can only happen for coordinates that are
    /// outside any grid anyway.
    pub fn to_internal(self, c: Coordinate) -> Option<Coordinate> {
        let offset = self.offset();
        Some(Coordinate::new(
            c.x.checked_sub(offset)?,
            c.y.checked_sub(offset)?,
        ))
    }

    /// Converts a 0-based grid coordinate into the caller's convention.
    pub fn to_external(self, c: Coordinate) -> Coordinate {
        let offset = self.offset();
        Coordinate::new(c.x + offset, c.y + offset)
    }
}

/// Everything a pass needs besides the image and the seeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub size: SizeParameters,
    #[serde(default)]
    pub radius: RadiusPolicy,
    #[serde(default)]
    pub origin: CoordinateOrigin,
}

impl ExtractionConfig {
    /// A configuration with the literal radius policy and 0-based coordinates.
    pub fn new(size: SizeParameters) -> Self {
        Self {
            size,
            radius: RadiusPolicy::default(),
            origin: CoordinateOrigin::default(),
        }
    }

    /// Replaces the radius policy.
    pub fn with_radius(mut self, radius: RadiusPolicy) -> Self {
        self.radius = radius;
        self
    }

    /// Replaces the coordinate convention used for seeds and results.
    pub fn with_origin(mut self, origin: CoordinateOrigin) -> Self {
        self.origin = origin;
        self
    }
}

impl From<SizeParameters> for ExtractionConfig {
    fn from(size: SizeParameters) -> Self {
        Self::new(size)
    }
}
