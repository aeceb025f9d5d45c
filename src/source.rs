//! Frame sources feeding the animation assembler.

use std::path::{Path, PathBuf};

use crate::assets::decode::decode_image_file;
use crate::foundation::error::{AnimError, AnimResult};
use crate::pixels::frame::Frame;
use crate::pixels::normalize::RawFrames;

pub(crate) mod folder;
pub(crate) mod function;
pub(crate) mod order;

use folder::FolderSource;
use function::{FunctionSource, PreparedFunction};

/// The single frame source of an animation request.
#[derive(Debug)]
pub enum FrameSource<'a> {
    /// Image files from a folder.
    Folder(FolderSource),
    /// An in-memory frame array, first axis is time.
    Array(RawFrames),
    /// Frames rendered by a caller-supplied function.
    Function(FunctionSource<'a>),
}

impl<'a> FrameSource<'a> {
    /// Folder source reading files with `extension` next to the output file.
    pub fn folder(extension: impl Into<String>) -> Self {
        Self::Folder(FolderSource::new(extension))
    }

    /// Array source from any supported frame stack.
    pub fn array(frames: impl Into<RawFrames>) -> Self {
        Self::Array(frames.into())
    }

    /// Function-driven source.
    pub fn function(source: FunctionSource<'a>) -> Self {
        Self::Function(source)
    }

    /// Short source name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Folder(_) => "folder",
            Self::Array(_) => "array",
            Self::Function(_) => "function",
        }
    }

    /// Validate the source and resolve what it will stream.
    ///
    /// `out_path` is the resolved animation path (folder sources derive their folder from it),
    /// `dpi` is the rasterization resolution used by function sources. Nothing is rendered or
    /// decoded here.
    pub fn prepare(self, out_path: &Path, dpi: f32) -> AnimResult<PreparedSource<'a>> {
        match self {
            Self::Folder(folder) => Ok(PreparedSource::Folder(folder.prepare(out_path)?)),
            Self::Array(frames) => {
                if frames.is_empty() {
                    return Err(AnimError::config("frame array contains no frames"));
                }
                Ok(PreparedSource::Array(frames))
            }
            Self::Function(function) => Ok(PreparedSource::Function(function.prepare(dpi)?)),
        }
    }
}

impl From<FolderSource> for FrameSource<'_> {
    fn from(source: FolderSource) -> Self {
        Self::Folder(source)
    }
}

impl From<RawFrames> for FrameSource<'_> {
    fn from(frames: RawFrames) -> Self {
        Self::Array(frames)
    }
}

impl<'a> From<FunctionSource<'a>> for FrameSource<'a> {
    fn from(source: FunctionSource<'a>) -> Self {
        Self::Function(source)
    }
}

/// A validated frame source producing frames on demand, one at a time.
pub enum PreparedSource<'a> {
    /// Sorted frame files.
    Folder(Vec<PathBuf>),
    /// Non-empty frame array.
    Array(RawFrames),
    /// Render function with its value sequence.
    Function(PreparedFunction<'a>),
}

impl PreparedSource<'_> {
    /// Number of distinct source frames (before ping-pong).
    pub fn len(&self) -> usize {
        match self {
            Self::Folder(files) => files.len(),
            Self::Array(frames) => frames.len(),
            Self::Function(function) => function.len(),
        }
    }

    /// `true` when there is nothing to stream.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produce source frame `idx`.
    pub fn frame(&mut self, idx: usize) -> AnimResult<Frame> {
        match self {
            Self::Folder(files) => {
                let path = files.get(idx).ok_or_else(|| {
                    AnimError::validation(format!("frame file index {idx} out of range"))
                })?;
                tracing::debug!(path = %path.display(), "decode frame file");
                decode_image_file(path)
            }
            Self::Array(frames) => frames.frame(idx),
            Self::Function(function) => function.render(idx),
        }
    }
}

impl std::fmt::Debug for PreparedSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Folder(files) => f.debug_tuple("Folder").field(files).finish(),
            Self::Array(frames) => f
                .debug_struct("Array")
                .field("shape", &frames.shape())
                .field("element_type", &frames.element_type())
                .finish(),
            Self::Function(function) => f
                .debug_struct("Function")
                .field("values", &function.len())
                .finish_non_exhaustive(),
        }
    }
}
