//! Interactive placement session.

/// The stage: assets, placement, options and submission state.
pub mod session;
