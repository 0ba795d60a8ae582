//! Error types for the region editor.

use thiserror::Error;

/// Which host-supplied transform a [`RegionError::NonInvertibleTransform`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformSpace {
    /// The viewer's pan/zoom transform (image-fit space to widget space).
    World,
    /// The fit-to-window transform (model space to image-fit space).
    ImageFit,
}

impl std::fmt::Display for TransformSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformSpace::World => f.write_str("world"),
            TransformSpace::ImageFit => f.write_str("image-fit"),
        }
    }
}

/// Error types for region editor operations.
///
/// Everything here is raised at the host boundary. Inside the core, contract
/// violations (such as an out-of-range corner index) are assertions.
#[derive(Debug, Error)]
pub enum RegionError {
    /// A supplied transform cannot be inverted, so pointer positions could not
    /// be mapped back into model space.
    #[error("The {space} transform is not invertible (determinant {determinant})")]
    NonInvertibleTransform {
        space: TransformSpace,
        determinant: f64,
    },

    /// Handle indices run from 0 to 7.
    #[error("Invalid handle index: {0}")]
    InvalidHandle(usize),

    /// Widget bounds must be finite and non-negative.
    #[error("Invalid widget bounds: {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },

    /// A configuration value is out of range.
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),
}
