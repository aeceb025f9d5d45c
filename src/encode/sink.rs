use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::gif::GifSink;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{AnimError, AnimResult};
use crate::pixels::frame::Frame;

/// Sink contract for consuming frames in sequence order.
///
/// Ordering contract: `push_frame` is called with strictly increasing `FrameIndex`. `finish` is
/// called exactly once, after the last frame or after a failure, and finalizes the output.
pub trait FrameSink {
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> AnimResult<()>;
    /// Flush and finalize the container.
    fn finish(&mut self) -> AnimResult<()>;
}

/// Supported animation containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    /// Incremental GIF.
    Gif,
    /// H.264 video in an MP4 container.
    Mp4,
}

impl ContainerFormat {
    /// Parse an extension such as `".gif"` or `"mp4"` (ASCII case-insensitive).
    pub fn from_extension(ext: &str) -> AnimResult<Self> {
        let bare = ext.strip_prefix('.').unwrap_or(ext);
        if bare.eq_ignore_ascii_case("gif") {
            Ok(Self::Gif)
        } else if bare.eq_ignore_ascii_case("mp4") {
            Ok(Self::Mp4)
        } else {
            Err(AnimError::unsupported_format(ext))
        }
    }

    /// Format of an output path, from its extension.
    pub fn from_path(path: &Path) -> AnimResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| AnimError::unsupported_format(""))?;
        Self::from_extension(ext)
    }

    /// Canonical extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Mp4 => "mp4",
        }
    }
}

/// Options for [`open_sink`].
#[derive(Clone, Debug)]
pub struct SinkOpts {
    /// Output file; its extension selects the container.
    pub out_path: PathBuf,
    /// Output frame rate.
    pub fps: Fps,
    /// Repeat forever (GIF only, ignored for video containers).
    pub looping: bool,
}

/// Open the sink matching the output extension.
///
/// Fails with [`AnimError::UnsupportedFormat`] before touching the filesystem when the extension
/// is not supported.
pub fn open_sink(opts: SinkOpts) -> AnimResult<Box<dyn FrameSink>> {
    match ContainerFormat::from_path(&opts.out_path)? {
        ContainerFormat::Gif => Ok(Box::new(GifSink::create(
            &opts.out_path,
            opts.fps,
            opts.looping,
        )?)),
        ContainerFormat::Mp4 => Ok(Box::new(FfmpegSink::new(FfmpegSinkOpts::new(
            &opts.out_path,
            opts.fps,
        ))?)),
    }
}

/// Check the frame order contract shared by the file sinks.
pub(crate) fn check_order(last: &mut Option<FrameIndex>, idx: FrameIndex) -> AnimResult<()> {
    if let Some(prev) = *last
        && idx.0 <= prev.0
    {
        return Err(AnimError::validation(
            "sink received out-of-order frame index",
        ));
    }
    *last = Some(idx);
    Ok(())
}

/// Check that a frame matches the dimensions fixed by the first frame.
pub(crate) fn check_dims(expected: (u32, u32), frame: &Frame) -> AnimResult<()> {
    if frame.dimensions() != expected {
        return Err(AnimError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, expected.0, expected.1
        )));
    }
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    frames: Vec<(FrameIndex, Frame)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, Frame)] {
        &self.frames
    }

    /// Whether `finish` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> AnimResult<()> {
        if self.finished {
            return Err(AnimError::validation("in-memory sink is already finished"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn finish(&mut self) -> AnimResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> AnimResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
