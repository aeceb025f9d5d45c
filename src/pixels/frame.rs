use image::{DynamicImage, ImageBuffer, Luma, LumaA, Rgb, Rgba, RgbaImage};

use crate::foundation::error::{AnimError, AnimResult};

/// One 8-bit-per-channel pixel grid, row-major, channels interleaved.
///
/// `channels` is 1 (gray), 2 (gray + alpha), 3 (RGB) or 4 (RGBA, straight alpha).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Interleaved channels per pixel.
    pub channels: u8,
    /// Pixel bytes, `width * height * channels` long.
    pub data: Vec<u8>,
}

impl Frame {
    /// Build a frame, checking the buffer length against the dimensions.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> AnimResult<Self> {
        if width == 0 || height == 0 {
            return Err(AnimError::validation("frame width/height must be non-zero"));
        }
        if !(1..=4).contains(&channels) {
            return Err(AnimError::validation(format!(
                "frame channel count must be 1..=4, got {channels}"
            )));
        }
        let expected = (width as usize) * (height as usize) * usize::from(channels);
        if data.len() != expected {
            return Err(AnimError::validation(format!(
                "frame data has {} bytes, expected {expected} for {width}x{height}x{channels}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Convert a decoded image, keeping its channel layout and reducing depth to 8 bits.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let color = img.color();
        let (width, height) = (img.width(), img.height());
        let (channels, data) = match (color.channel_count(), color.has_alpha()) {
            (1, _) => (1, img.into_luma8().into_raw()),
            (2, _) => (2, img.into_luma_alpha8().into_raw()),
            (_, false) => (3, img.into_rgb8().into_raw()),
            (_, true) => (4, img.into_rgba8().into_raw()),
        };
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Convert to the matching `image` color type.
    pub fn to_dynamic(&self) -> AnimResult<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let data = self.data.clone();
        let img = match self.channels {
            1 => ImageBuffer::<Luma<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            2 => {
                ImageBuffer::<LumaA<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageLumaA8)
            }
            3 => ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            4 => ImageBuffer::<Rgba<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
            n => {
                return Err(AnimError::validation(format!(
                    "frame channel count must be 1..=4, got {n}"
                )));
            }
        };
        img.ok_or_else(|| AnimError::validation("frame data does not match its dimensions"))
    }

    /// Expand to straight-alpha RGBA8.
    pub fn to_rgba8(&self) -> AnimResult<RgbaImage> {
        if self.channels == 4 {
            return RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .ok_or_else(|| AnimError::validation("frame data does not match its dimensions"));
        }
        Ok(self.to_dynamic()?.into_rgba8())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/frame.rs"]
mod tests;
