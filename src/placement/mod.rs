//! Design placement on the display canvas.

pub mod affine;
pub mod polygon;

use crate::placement::{affine::FreeTransform, polygon::FourPoint};

/// Which placement variant a stage runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Drag / scale / rotate a single node.
    #[default]
    FreeTransform,
    /// Pick four corners.
    FourPoint,
}

/// Current placement, one of two mutually exclusive variants.
#[derive(Clone, Debug)]
pub enum Placement {
    /// Affine node variant.
    FreeTransform(FreeTransform),
    /// Picked polygon variant.
    FourPoint(FourPoint),
}

impl Placement {
    /// Fresh, empty placement for `mode`.
    pub fn new(mode: PlacementMode) -> Self {
        match mode {
            PlacementMode::FreeTransform => Self::FreeTransform(FreeTransform::new()),
            PlacementMode::FourPoint => Self::FourPoint(FourPoint::new()),
        }
    }

    /// Variant tag.
    pub fn mode(&self) -> PlacementMode {
        match self {
            Self::FreeTransform(_) => PlacementMode::FreeTransform,
            Self::FourPoint(_) => PlacementMode::FourPoint,
        }
    }

    /// Free-transform model, if that is the active variant.
    pub fn as_free_transform(&self) -> Option<&FreeTransform> {
        match self {
            Self::FreeTransform(m) => Some(m),
            Self::FourPoint(_) => None,
        }
    }

    /// Mutable free-transform model.
    pub fn as_free_transform_mut(&mut self) -> Option<&mut FreeTransform> {
        match self {
            Self::FreeTransform(m) => Some(m),
            Self::FourPoint(_) => None,
        }
    }

    /// Four-point model, if that is the active variant.
    pub fn as_four_point(&self) -> Option<&FourPoint> {
        match self {
            Self::FourPoint(m) => Some(m),
            Self::FreeTransform(_) => None,
        }
    }

    /// Mutable four-point model.
    pub fn as_four_point_mut(&mut self) -> Option<&mut FourPoint> {
        match self {
            Self::FourPoint(m) => Some(m),
            Self::FreeTransform(_) => None,
        }
    }
}
