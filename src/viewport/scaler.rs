//! Display sizing for the base image.

use crate::foundation::core::{DisplayGeometry, NativeSize};
use crate::foundation::error::{DrapeError, DrapeResult};

/// Largest canvas width the stage will ever use.
pub const DEFAULT_MAX_WIDTH: u32 = 900;
/// Horizontal space reserved around the canvas.
pub const DEFAULT_MARGIN: u32 = 32;

/// Maximum-width policy for fitting the base image into the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewportPolicy {
    /// Upper bound on display width.
    pub max_width: u32,
    /// Subtracted from the available viewport width.
    pub margin: u32,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl ViewportPolicy {
    /// Target display width for a viewport `available_width` pixels wide. Never below 1.
    pub fn display_width(self, available_width: u32) -> u32 {
        self.max_width
            .min(available_width.saturating_sub(self.margin))
            .max(1)
    }

    /// Fit `native` into the viewport with one uniform scale factor.
    ///
    /// `displayHeight = round(nativeHeight * displayWidth / nativeWidth)`, clamped to at least 1.
    pub fn fit(self, native: NativeSize, available_width: u32) -> DrapeResult<DisplayGeometry> {
        if self.max_width == 0 {
            return Err(DrapeError::validation("viewport max_width must be > 0"));
        }
        let width = self.display_width(available_width);
        let scale = f64::from(width) / f64::from(native.width);
        let height = (f64::from(native.height) * scale).round().max(1.0) as u32;
        DisplayGeometry::new(width, height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/scaler.rs"]
mod tests;
