//! Text readout of the current focus and limits.

use std::fmt;

use dofviz_core::DofLimits;
use serde::Serialize;

/// Focus distance and limits in world units, for display next to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DofReadout {
    /// Focus distance, if known.
    pub focus: Option<f64>,
    /// Near limit.
    pub near: f64,
    /// Far limit (may be infinite).
    pub far: f64,
    /// Hyperfocal distance (may be infinite).
    pub hyperfocal: f64,
}

impl From<&DofLimits> for DofReadout {
    fn from(limits: &DofLimits) -> Self {
        Self {
            focus: limits.focus,
            near: limits.near,
            far: limits.far,
            hyperfocal: limits.hyperfocal,
        }
    }
}

impl fmt::Display for DofReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.focus {
            Some(focus) => write!(f, "Focus Distance: {focus:.3}")?,
            None => write!(f, "Focus Distance: -")?,
        }
        write!(f, " Near Limit: {:.3} Far Limit: {:.3}", self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_display() {
        let readout = DofReadout {
            focus: Some(5.0),
            near: 4.168_111,
            far: 6.246_751,
            hyperfocal: 24.85,
        };
        assert_eq!(
            readout.to_string(),
            "Focus Distance: 5.000 Near Limit: 4.168 Far Limit: 6.247"
        );
    }

    #[test]
    fn test_readout_display_infinite_far() {
        let readout = DofReadout::from(&DofLimits::everything_in_focus(None));
        assert_eq!(
            readout.to_string(),
            "Focus Distance: - Near Limit: 0.000 Far Limit: inf"
        );
    }
}
