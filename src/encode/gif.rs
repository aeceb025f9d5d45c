use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::encode::sink::{FrameSink, check_dims, check_order, ensure_parent_dir};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{AnimError, AnimResult};
use crate::pixels::frame::Frame;

/// NeuQuant sampling speed used for palette quantization (1 = best, 30 = fastest).
pub const DEFAULT_QUANT_SPEED: i32 = 10;

/// Incremental GIF sink.
///
/// The output file is created when the sink is opened; the logical screen size is fixed by the
/// first frame. Without looping no repeat extension is written, so players show it once.
pub struct GifSink {
    out_path: PathBuf,
    delay_cs: u16,
    looping: bool,
    speed: i32,

    writer: Option<BufWriter<File>>,
    encoder: Option<::gif::Encoder<BufWriter<File>>>,
    dims: Option<(u32, u32)>,
    last_idx: Option<FrameIndex>,
}

impl GifSink {
    /// Create (or truncate) `out_path` and prepare a GIF stream at `fps`.
    pub fn create(out_path: &Path, fps: Fps, looping: bool) -> AnimResult<Self> {
        ensure_parent_dir(out_path)?;
        let file = File::create(out_path)?;
        Ok(Self {
            out_path: out_path.to_path_buf(),
            delay_cs: fps.gif_delay_cs(),
            looping,
            speed: DEFAULT_QUANT_SPEED,
            writer: Some(BufWriter::new(file)),
            encoder: None,
            dims: None,
            last_idx: None,
        })
    }

    /// Override the quantization speed (clamped to `1..=30`).
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed.clamp(1, 30);
        self
    }

    /// Destination GIF path.
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    fn start(&mut self, width: u32, height: u32) -> AnimResult<()> {
        let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(AnimError::validation(format!(
                    "gif frames are limited to 65535x65535, got {width}x{height}"
                )));
            }
        };
        let writer = self
            .writer
            .take()
            .ok_or_else(|| AnimError::encode("gif sink is already finalized"))?;
        let mut encoder = ::gif::Encoder::new(writer, w, h, &[])?;
        if self.looping {
            encoder.set_repeat(::gif::Repeat::Infinite)?;
        }
        self.encoder = Some(encoder);
        self.dims = Some((width, height));
        Ok(())
    }
}

impl FrameSink for GifSink {
    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> AnimResult<()> {
        check_order(&mut self.last_idx, idx)?;
        match self.dims {
            Some(dims) => check_dims(dims, frame)?,
            None => self.start(frame.width, frame.height)?,
        }

        let mut rgba = frame.to_rgba8()?.into_raw();
        let mut gif_frame = ::gif::Frame::from_rgba_speed(
            frame.width as u16,
            frame.height as u16,
            &mut rgba,
            self.speed,
        );
        gif_frame.delay = self.delay_cs;

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(AnimError::encode("gif sink is already finalized"));
        };
        encoder.write_frame(&gif_frame)?;
        Ok(())
    }

    fn finish(&mut self) -> AnimResult<()> {
        // Writes the trailer and hands back the file.
        let mut writer = match (self.encoder.take(), self.writer.take()) {
            (Some(encoder), _) => encoder.into_inner()?,
            (None, Some(writer)) => writer,
            (None, None) => return Ok(()),
        };
        writer.flush()?;
        tracing::debug!(path = %self.out_path.display(), "gif finalized");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
