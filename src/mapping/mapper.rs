//! Display-space placement to native-pixel quad.

use crate::{
    foundation::core::{DisplayGeometry, NativeSize, Point, Vec2},
    foundation::error::{DrapeResult, Precondition},
    mapping::quad::Quad,
    placement::Placement,
};

/// Maps display-space points onto the base image's native pixel grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    display: DisplayGeometry,
    native: NativeSize,
}

impl CoordinateMapper {
    /// Mapper between a canvas and the base image drawn on it.
    pub fn new(display: DisplayGeometry, native: NativeSize) -> Self {
        Self { display, native }
    }

    /// Mapper for whatever the stage has loaded so far; refuses while either asset is absent.
    pub fn try_new(
        base: Option<NativeSize>,
        design: Option<NativeSize>,
        display: Option<DisplayGeometry>,
    ) -> DrapeResult<Self> {
        let native = base.ok_or(Precondition::MissingBase)?;
        design.ok_or(Precondition::MissingDesign)?;
        let display = display.ok_or(Precondition::MissingBase)?;
        Ok(Self::new(display, native))
    }

    /// `(nativeWidth / displayWidth, nativeHeight / displayHeight)`.
    pub fn scale(&self) -> Vec2 {
        Vec2::new(
            f64::from(self.native.width) / f64::from(self.display.width),
            f64::from(self.native.height) / f64::from(self.display.height),
        )
    }

    /// Display point to native pixels. No rounding.
    pub fn to_native(&self, p: Point) -> Point {
        let s = self.scale();
        Point::new(p.x * s.x, p.y * s.y)
    }

    /// Native pixels back to display space.
    pub fn to_display(&self, p: Point) -> Point {
        let s = self.scale();
        Point::new(p.x / s.x, p.y / s.y)
    }

    /// Snapshot `placement` and map it to a native-space quad.
    #[tracing::instrument(skip(self, placement), fields(mode = ?placement.mode()))]
    pub fn map(&self, placement: &Placement) -> DrapeResult<Quad> {
        let corners = display_corners(placement)?;
        let quad = Quad::new(corners).scaled(self.scale());
        tracing::debug!(points = %quad, "placement mapped");
        Ok(quad)
    }
}

/// Display-space corners of `placement` in TL, TR, BR, BL order.
pub fn display_corners(placement: &Placement) -> DrapeResult<[Point; 4]> {
    match placement {
        Placement::FreeTransform(m) => {
            let node = m.node().ok_or(Precondition::PlacementUninitialized)?;
            Ok(node.corners())
        }
        Placement::FourPoint(poly) => Ok(poly.corners().ok_or(Precondition::IncompletePolygon {
            picked: poly.len(),
        })?),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mapping/mapper.rs"]
mod tests;
