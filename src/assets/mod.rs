//! Asset slots, decoding and display URLs.

/// Header-only image decoding.
pub mod decode;
pub mod display_url;
/// Base and design slots.
pub mod library;
