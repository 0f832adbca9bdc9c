use std::io::Cursor;

use anyhow::Context;

use crate::foundation::core::NativeSize;
use crate::foundation::error::{DrapeError, DrapeResult};

/// Read the intrinsic pixel size of encoded image bytes.
///
/// Only the header is parsed; pixel data is never decoded here since compositing happens
/// service-side.
pub fn decode_native_size(bytes: &[u8]) -> DrapeResult<NativeSize> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("sniff image format")?;
    if reader.format().is_none() {
        return Err(DrapeError::decode("unrecognized image format"));
    }
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DrapeError::decode(e.to_string()))?;
    NativeSize::new(width, height)
}

/// Best-effort MIME type from the encoded bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
