use std::path::Path;

use crate::foundation::error::AnimResult;
use crate::pixels::frame::Frame;

/// Decode encoded image bytes (PNG, JPEG, ...) into a frame.
pub fn decode_image(bytes: &[u8]) -> AnimResult<Frame> {
    let dyn_img = image::load_from_memory(bytes)?;
    Ok(Frame::from_dynamic(dyn_img))
}

/// Decode an image file into a frame. The format is inferred from the file contents/extension.
pub fn decode_image_file(path: &Path) -> AnimResult<Frame> {
    let dyn_img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    Ok(Frame::from_dynamic(dyn_img))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
