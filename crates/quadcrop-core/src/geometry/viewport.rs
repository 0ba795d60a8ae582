//! Host-owned coordinate transforms and their validated inverses.

use crate::error::{RegionError, TransformSpace};
use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// Transforms whose linear part has a smaller determinant are rejected.
const MIN_DETERMINANT: f64 = 1e-12;

/// Axis-aligned widget rectangle in widget space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Top-left corner
    pub min: DVec2,
    /// Width and height
    pub size: DVec2,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: DVec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.y >= self.min.y && p.x <= max.x && p.y <= max.y
    }

    /// Corners clockwise from the top-left.
    pub fn corners(&self) -> [DVec2; 4] {
        let max = self.max();
        [
            self.min,
            DVec2::new(max.x, self.min.y),
            max,
            DVec2::new(self.min.x, max.y),
        ]
    }

    fn validate(&self) -> Result<(), RegionError> {
        let ok = self.min.is_finite()
            && self.size.is_finite()
            && self.size.x >= 0.0
            && self.size.y >= 0.0;
        if ok {
            Ok(())
        } else {
            Err(RegionError::InvalidBounds {
                width: self.size.x,
                height: self.size.y,
            })
        }
    }
}

/// The host's view state, read by the editor on every event and paint.
///
/// The editor never mutates a `Viewport`; the host updates it as the user
/// pans/zooms and passes it back in. Both transforms are checked for
/// invertibility when set, so mapping a pointer position back into model
/// space can never produce NaN geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    world: DAffine2,
    world_inv: DAffine2,
    image_fit: DAffine2,
    image_fit_inv: DAffine2,
    bounds: Bounds,
}

impl Viewport {
    /// Identity transforms over a widget of the given size.
    pub fn new(width: f64, height: f64) -> Result<Self, RegionError> {
        let bounds = Bounds::new(0.0, 0.0, width, height);
        bounds.validate()?;
        Ok(Self {
            world: DAffine2::IDENTITY,
            world_inv: DAffine2::IDENTITY,
            image_fit: DAffine2::IDENTITY,
            image_fit_inv: DAffine2::IDENTITY,
            bounds,
        })
    }

    /// Replace the pan/zoom transform (image-fit space to widget space).
    pub fn set_world(&mut self, world: DAffine2) -> Result<(), RegionError> {
        self.world_inv = checked_inverse(world, TransformSpace::World)?;
        self.world = world;
        Ok(())
    }

    /// Replace the fit-to-window transform (model space to image-fit space).
    pub fn set_image_fit(&mut self, image_fit: DAffine2) -> Result<(), RegionError> {
        self.image_fit_inv = checked_inverse(image_fit, TransformSpace::ImageFit)?;
        self.image_fit = image_fit;
        Ok(())
    }

    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<(), RegionError> {
        bounds.validate()?;
        self.bounds = bounds;
        Ok(())
    }

    pub fn with_world(mut self, world: DAffine2) -> Result<Self, RegionError> {
        self.set_world(world)?;
        Ok(self)
    }

    pub fn with_image_fit(mut self, image_fit: DAffine2) -> Result<Self, RegionError> {
        self.set_image_fit(image_fit)?;
        Ok(self)
    }

    pub fn world(&self) -> DAffine2 {
        self.world
    }

    pub fn image_fit(&self) -> DAffine2 {
        self.image_fit
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Model space to widget space: image-fit first, then world.
    pub fn model_to_widget_transform(&self) -> DAffine2 {
        self.world * self.image_fit
    }

    /// Map a widget-space pointer position down into model space.
    ///
    /// Undoes the world transform first, then the image-fit transform.
    pub fn widget_to_model(&self, p: DVec2) -> DVec2 {
        let world_space = self.world_inv.transform_point2(p);
        self.image_fit_inv.transform_point2(world_space)
    }

    /// Map a model-space point up into widget space.
    pub fn model_to_widget(&self, p: DVec2) -> DVec2 {
        self.world
            .transform_point2(self.image_fit.transform_point2(p))
    }

    pub fn contains_widget_point(&self, p: DVec2) -> bool {
        self.bounds.contains(p)
    }
}

fn checked_inverse(m: DAffine2, space: TransformSpace) -> Result<DAffine2, RegionError> {
    let determinant = m.matrix2.determinant();
    if !m.is_finite() || !determinant.is_finite() || determinant.abs() < MIN_DETERMINANT {
        return Err(RegionError::NonInvertibleTransform { space, determinant });
    }
    Ok(m.inverse())
}
