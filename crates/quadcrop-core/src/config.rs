//! Editor configuration.

use crate::error::RegionError;
use crate::render::Rgba;
use serde::{Deserialize, Serialize};

/// Tunables for the region editor.
///
/// Every field has a default, so hosts may supply a partial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Edge length of a handle's square hit box in widget pixels
    pub handle_size: f64,
    /// The visible handle square is inset by this much on every side
    pub handle_inset: f64,
    /// Rotation increment while shift is held, in degrees
    pub snap_step_degrees: f64,
    /// Regions with an area at or below this (model pixels²) cannot be committed
    pub min_commit_area: f64,
    /// Outline of the region
    pub stroke_color: Rgba,
    /// Outline width in widget pixels (independent of zoom)
    pub stroke_width: f64,
    /// Fill for everything outside the region
    pub shade_color: Rgba,
    /// Fill of the visible handle squares
    pub handle_color: Rgba,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_size: 11.0,
            handle_inset: 2.5,
            snap_step_degrees: 45.0,
            min_commit_area: 1e-6,
            stroke_color: Rgba::BLACK,
            stroke_width: 1.0,
            shade_color: Rgba::new(0, 0, 0, 90),
            handle_color: Rgba::BLACK,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), RegionError> {
        if !(self.handle_size.is_finite() && self.handle_size > 0.0) {
            return Err(RegionError::InvalidConfig(format!(
                "handle_size must be positive, got {}",
                self.handle_size
            )));
        }
        if !(self.handle_inset >= 0.0 && self.handle_inset * 2.0 < self.handle_size) {
            return Err(RegionError::InvalidConfig(format!(
                "handle_inset must be in [0, handle_size / 2), got {}",
                self.handle_inset
            )));
        }
        if !(self.snap_step_degrees.is_finite() && self.snap_step_degrees > 0.0) {
            return Err(RegionError::InvalidConfig(format!(
                "snap_step_degrees must be positive, got {}",
                self.snap_step_degrees
            )));
        }
        if !(self.min_commit_area >= 0.0) {
            return Err(RegionError::InvalidConfig(format!(
                "min_commit_area must not be negative, got {}",
                self.min_commit_area
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(RegionError::InvalidConfig(format!(
                "stroke_width must not be negative, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }

    /// Snap increment in radians.
    pub fn snap_step(&self) -> f64 {
        self.snap_step_degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EditorConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.handle_size, 11.0);
        assert!((config.snap_step() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_handle_size() {
        let mut config = EditorConfig::default();
        config.handle_size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(RegionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_inset_swallowing_handle() {
        let mut config = EditorConfig::default();
        config.handle_inset = 6.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_snap_and_negative_area() {
        let mut config = EditorConfig::default();
        config.snap_step_degrees = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = EditorConfig::default();
        config.min_commit_area = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "snap_step_degrees": 15.0 }"#).unwrap();
        assert_eq!(config.snap_step_degrees, 15.0);
        assert_eq!(config.handle_size, 11.0);
        assert_eq!(config.shade_color, Rgba::new(0, 0, 0, 90));
    }
}
