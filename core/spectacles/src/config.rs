use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::SpectaclesError;

/// Minimum share of the image a lone face must cover to count as a
/// profile photo.
pub const DEFAULT_MIN_FACE_FRACTION: f64 = 0.40;

/// Face widths at which the frame stroke gets one pixel thicker.
pub const DEFAULT_THICKNESS_BREAKPOINTS: [u32; 4] = [100, 250, 350, 450];

/// Tunable constants for selection and rendering.
///
/// Deserializes from kebab-case keys; any missing key takes its default.
///
/// ```toml
/// min-face-fraction = 0.40
/// thickness-breakpoints = [100, 250, 350, 450]
/// color = "black"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GlassesConfig {
    /// A candidate qualifies when `face_area / image_area` exceeds this.
    pub min_face_fraction: f64,
    /// Strictly increasing face widths; thickness is
    /// `1 + (breakpoints <= face width)`.
    pub thickness_breakpoints: [u32; 4],
    /// Frame color used when the caller does not name one.
    pub color: Color,
}

impl Default for GlassesConfig {
    fn default() -> Self {
        Self {
            min_face_fraction: DEFAULT_MIN_FACE_FRACTION,
            thickness_breakpoints: DEFAULT_THICKNESS_BREAKPOINTS,
            color: Color::default(),
        }
    }
}

impl GlassesConfig {
    /// Check the invariants the selector and renderer rely on.
    pub fn validate(&self) -> Result<(), SpectaclesError> {
        if !(self.min_face_fraction > 0.0 && self.min_face_fraction <= 1.0) {
            return Err(SpectaclesError::InvalidConfig(format!(
                "min-face-fraction must be in (0, 1], got {}",
                self.min_face_fraction
            )));
        }
        if self.thickness_breakpoints.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SpectaclesError::InvalidConfig(format!(
                "thickness-breakpoints must be strictly increasing, got {:?}",
                self.thickness_breakpoints
            )));
        }
        Ok(())
    }
}
