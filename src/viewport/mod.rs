//! Viewport sizing.

pub mod scaler;
