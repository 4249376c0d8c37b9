//! Configuration options for dofviz.
//!
//! Options are plain values handed in by the host (typically from its own UI
//! properties). They are never written back anywhere by the core.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::{DofError, Result};
use crate::optics::CircleOfConfusion;

/// Millimetres per world unit.
///
/// Lens parameters and focus distances are millimetres, scene geometry is in
/// world units. The default of 1000 treats one world unit as one metre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitScale(pub f64);

impl UnitScale {
    /// One world unit is one metre.
    pub const METRES: UnitScale = UnitScale(1000.0);

    /// One world unit is one millimetre.
    pub const MILLIMETRES: UnitScale = UnitScale(1.0);

    /// Converts a length in world units to millimetres.
    pub fn to_millimetres(self, world: f64) -> f64 {
        world * self.0
    }

    /// Converts a length in millimetres to world units.
    pub fn to_world(self, millimetres: f64) -> f64 {
        millimetres / self.0
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::METRES
    }
}

/// Styling of the axis line overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Draw the overlay above all other geometry (depth test off).
    pub draw_on_top: bool,
    /// Line width in pixels.
    pub line_width: f32,
    /// Color of the in-focus segment.
    pub in_focus_color: Vec4,
    /// Color of the out-of-focus segments.
    pub out_of_focus_color: Vec4,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            draw_on_top: true,
            line_width: 2.0,
            in_focus_color: Vec4::new(0.0, 1.0, 0.0, 0.8),
            out_of_focus_color: Vec4::new(1.0, 1.0, 1.0, 0.1),
        }
    }
}

/// Depth-of-field visualization options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DofOptions {
    /// Whether the overlay is generated at all.
    pub enabled: bool,

    /// Circle-of-confusion convention.
    pub circle_of_confusion: CircleOfConfusion,

    /// Millimetres per world unit.
    pub unit_scale: UnitScale,

    /// Multiplier on the field-of-view extent of the limit planes.
    pub extent_scale: f64,

    /// Whether the host should display the focus/near/far readout.
    pub display_limits: bool,

    /// Line overlay styling.
    pub overlay: OverlayStyle,
}

impl Default for DofOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            circle_of_confusion: CircleOfConfusion::default(),
            unit_scale: UnitScale::default(),
            extent_scale: 1.0,
            display_limits: true,
            overlay: OverlayStyle::default(),
        }
    }
}

impl DofOptions {
    /// Parses options from a JSON string, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that numeric options are in range.
    pub fn validate(&self) -> Result<()> {
        if !(self.unit_scale.0 > 0.0 && self.unit_scale.0.is_finite()) {
            return Err(DofError::InvalidOptions(format!(
                "unit_scale must be positive, got {}",
                self.unit_scale.0
            )));
        }
        if !(self.extent_scale >= 0.0 && self.extent_scale.is_finite()) {
            return Err(DofError::InvalidOptions(format!(
                "extent_scale must be non-negative, got {}",
                self.extent_scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = DofOptions::default();
        assert!(options.enabled);
        assert_eq!(options.unit_scale, UnitScale::METRES);
        assert_eq!(
            options.circle_of_confusion,
            CircleOfConfusion::SensorWidthFraction(1000.0)
        );
        assert!(options.overlay.draw_on_top);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_from_partial_json() {
        let options = DofOptions::from_json_str(
            r#"{
                "unit_scale": 1.0,
                "circle_of_confusion": { "SensorDiagonalFraction": 1500.0 },
                "overlay": { "draw_on_top": false }
            }"#,
        )
        .unwrap();
        assert_eq!(options.unit_scale, UnitScale::MILLIMETRES);
        assert_eq!(options.circle_of_confusion, CircleOfConfusion::diagonal());
        assert!(!options.overlay.draw_on_top);
        assert_eq!(options.overlay.line_width, 2.0);
        assert!(options.enabled);
    }

    #[test]
    fn test_options_rejects_bad_scale() {
        assert!(matches!(
            DofOptions::from_json_str(r#"{ "unit_scale": 0.0 }"#),
            Err(DofError::InvalidOptions(_))
        ));
        assert!(matches!(
            DofOptions::from_json_str("not json"),
            Err(DofError::JsonError(_))
        ));
    }

    #[test]
    fn test_unit_scale_conversion() {
        let scale = UnitScale::METRES;
        assert_eq!(scale.to_millimetres(5.0), 5000.0);
        assert_eq!(scale.to_world(2500.0), 2.5);
    }
}
