use std::str::FromStr;

use crate::{
    foundation::core::{Point, Vec2},
    foundation::error::{DrapeError, DrapeResult},
    foundation::math::fixed2,
    placement::affine::Corner,
};

/// Four corners in TL, TR, BR, BL order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quad {
    /// Corners in quad order.
    pub corners: [Point; 4],
}

impl Quad {
    /// Wrap corners already in TL, TR, BR, BL order.
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Corner by logical position.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.corners[0],
            Corner::TopRight => self.corners[1],
            Corner::BottomRight => self.corners[2],
            Corner::BottomLeft => self.corners[3],
        }
    }

    /// Component-wise scale of every corner.
    pub fn scaled(&self, s: Vec2) -> Self {
        Self {
            corners: self.corners.map(|p| Point::new(p.x * s.x, p.y * s.y)),
        }
    }

    /// Wire form: `"x0,y0,x1,y1,x2,y2,x3,y3"`, two decimals each.
    pub fn to_points_field(&self) -> String {
        self.corners
            .iter()
            .map(|p| format!("{},{}", fixed2(p.x), fixed2(p.y)))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse the wire form. Whitespace around numbers and empty entries are tolerated; exactly
    /// eight numbers are required.
    pub fn parse_points_field(s: &str) -> DrapeResult<Self> {
        let nums = s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<f64>()
                    .map_err(|_| DrapeError::validation(format!("invalid coordinate '{t}'")))
            })
            .collect::<DrapeResult<Vec<f64>>>()?;
        if nums.len() != 8 {
            return Err(DrapeError::validation(format!(
                "points must have 8 numbers (x0,y0,...,x3,y3), got {}",
                nums.len()
            )));
        }
        let p = |i: usize| Point::new(nums[2 * i], nums[2 * i + 1]);
        Ok(Self::new([p(0), p(1), p(2), p(3)]))
    }
}

impl FromStr for Quad {
    type Err = DrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_points_field(s)
    }
}

impl std::fmt::Display for Quad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_points_field())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mapping/quad.rs"]
mod tests;
