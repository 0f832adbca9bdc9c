//! Display-to-native coordinate mapping.

pub mod mapper;
/// Native-space corner quads and their wire encoding.
pub mod quad;
