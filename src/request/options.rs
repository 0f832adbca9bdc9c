use crate::foundation::error::DrapeError;
use crate::foundation::math::{clamp01, fixed2};

/// Default design opacity.
pub const DEFAULT_OPACITY: f64 = 0.92;
/// Default background-removal threshold.
pub const DEFAULT_BG_THRESHOLD: i64 = 20;

/// Background removal applied to the design service-side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// Keep the design as uploaded.
    #[default]
    None,
    /// Let the service pick the background colour.
    Auto,
    /// Key out white.
    White,
    /// Key out black.
    Black,
}

impl BackgroundMode {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Auto => "auto",
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl std::str::FromStr for BackgroundMode {
    type Err = DrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "auto" => Ok(Self::Auto),
            "white" => Ok(Self::White),
            "black" => Ok(Self::Black),
            other => Err(DrapeError::validation(format!(
                "unknown background mode '{other}'"
            ))),
        }
    }
}

/// Options forwarded to the compositing service.
///
/// Fields may hold out-of-range values while being edited; [`RenderOptions::clamped`] is
/// applied before anything is sent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Design opacity, `[0, 1]`.
    pub opacity: f64,
    /// Let garment shading show through the design.
    pub shading: bool,
    /// Shading strength, `[0, 1]`; omitted from the request when `None`.
    pub shading_strength: Option<f64>,
    /// Background removal mode.
    pub bg_mode: BackgroundMode,
    /// Background removal threshold, `[0, 100]`.
    pub bg_threshold: i64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            shading: true,
            shading_strength: None,
            bg_mode: BackgroundMode::None,
            bg_threshold: DEFAULT_BG_THRESHOLD,
        }
    }
}

impl RenderOptions {
    /// Copy with every numeric field forced into range.
    pub fn clamped(self) -> Self {
        Self {
            opacity: clamp01(self.opacity),
            shading_strength: self.shading_strength.map(clamp01),
            bg_threshold: self.bg_threshold.clamp(0, 100),
            ..self
        }
    }

    /// Text fields in wire order, after clamping.
    pub fn form_fields(self) -> Vec<(&'static str, String)> {
        let o = self.clamped();
        let mut out = vec![
            ("opacity", fixed2(o.opacity)),
            ("shading", if o.shading { "1" } else { "0" }.to_string()),
        ];
        if let Some(strength) = o.shading_strength {
            out.push(("shading_strength", fixed2(strength)));
        }
        out.push(("bg_mode", o.bg_mode.as_str().to_string()));
        out.push(("bg_thr", o.bg_threshold.to_string()));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/options.rs"]
mod tests;
