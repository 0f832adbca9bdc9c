use crate::foundation::error::{DrapeError, DrapeResult};

pub use kurbo::{Affine, BezPath, Point, Size, Vec2};

/// Intrinsic pixel size of a decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NativeSize {
    /// Width in native pixels.
    pub width: u32,
    /// Height in native pixels.
    pub height: u32,
}

impl NativeSize {
    /// Build a size, rejecting zero-area images.
    pub fn new(width: u32, height: u32) -> DrapeResult<Self> {
        if width == 0 || height == 0 {
            return Err(DrapeError::validation("image dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// On-screen canvas size the base image is drawn at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DisplayGeometry {
    /// Canvas width in display pixels.
    pub width: u32,
    /// Canvas height in display pixels.
    pub height: u32,
}

impl DisplayGeometry {
    /// Build a geometry, rejecting empty canvases.
    pub fn new(width: u32, height: u32) -> DrapeResult<Self> {
        if width == 0 || height == 0 {
            return Err(DrapeError::validation("display geometry must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Whether `p` lies on the canvas (edges inclusive).
    pub fn contains(self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= f64::from(self.width) && p.y <= f64::from(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
