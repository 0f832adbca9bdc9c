//! Mockup requests and the compositing-service client.

pub mod client;
/// Multipart request assembly.
pub mod form;
/// Render options sent alongside the quad.
pub mod options;
/// Service responses and result URLs.
pub mod response;
