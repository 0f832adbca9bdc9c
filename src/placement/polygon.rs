//! Four-point placement: corners picked one by one in TL, TR, BR, BL order.

use crate::foundation::core::{BezPath, Point};

/// Corners in a complete polygon.
pub const POLYGON_CORNERS: usize = 4;

/// Ordered corner picks in display space.
///
/// Holds 0..=4 points. A pick on a complete polygon starts over with that point as the
/// sole element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FourPoint {
    points: Vec<Point>,
}

impl FourPoint {
    /// Empty polygon (`collecting(0)`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a display-space point. Returns the new length.
    pub fn pick(&mut self, p: Point) -> usize {
        if self.points.len() >= POLYGON_CORNERS {
            self.points.clear();
        }
        self.points.push(p);
        self.points.len()
    }

    /// Pick at a pointer position given in the same space as `canvas_origin`.
    pub fn pick_relative(&mut self, pointer: Point, canvas_origin: Point) -> usize {
        self.pick((pointer - canvas_origin).to_point())
    }

    /// Back to `collecting(0)`.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Points picked so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// No picks yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Four picks collected.
    pub fn is_complete(&self) -> bool {
        self.points.len() == POLYGON_CORNERS
    }

    /// Picks in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The four corners, once complete.
    pub fn corners(&self) -> Option<[Point; 4]> {
        <[Point; 4]>::try_from(self.points.as_slice()).ok()
    }

    /// Closed outline through the picks in order; only drawn once complete.
    pub fn outline(&self) -> Option<BezPath> {
        let [first, rest @ ..] = self.corners()?;
        let mut path = BezPath::new();
        path.move_to(first);
        for p in rest {
            path.line_to(p);
        }
        path.close_path();
        Some(path)
    }

    /// Picks numbered from 1 in pick order, for on-canvas labels.
    pub fn labels(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.points.iter().enumerate().map(|(i, p)| (i + 1, *p))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/polygon.rs"]
mod tests;
