use thiserror::Error;

/// Errors reported by the cluster extraction entry points.
///
/// Every variant except [`ExtractError::Cancelled`] is an input-validation failure and is
/// detected before the visited mask is modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The intensity image has a dimension that does not fit in a pixel coordinate.
    #[error("grid of {width}x{height} pixels exceeds the supported coordinate range")]
    GridTooLarge { width: u32, height: u32 },

    /// A size parameter is outside its admissible range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A caller-supplied visited mask does not cover the grid exactly.
    #[error("visited mask is {mask_width}x{mask_height} but the grid is {grid_width}x{grid_height}")]
    MaskDimensionMismatch {
        grid_width: u32,
        grid_height: u32,
        mask_width: u32,
        mask_height: u32,
    },

    /// A seed does not address a pixel of the grid.
    #[error("seed #{index} at ({x}, {y}) lies outside the {width}x{height} grid")]
    SeedOutOfBounds {
        /// Position of the seed in the seed list.
        index: usize,
        /// X coordinate as supplied by the caller.
        x: i32,
        /// Y coordinate as supplied by the caller.
        y: i32,
        width: u32,
        height: u32,
    },

    /// An observer stopped the pass between two seeds.
    #[error("extraction cancelled after {seeds_scanned} seeds")]
    Cancelled { seeds_scanned: usize },
}
