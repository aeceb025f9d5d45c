//! Raw frame stacks and their conversion to 8-bit frames.

use crate::foundation::error::{AnimError, AnimResult};
use crate::pixels::frame::Frame;

/// Element types accepted in a raw frame stack, with their conversion to 8-bit channels.
///
/// Floating point samples are clipped to `[0, 1]` and scaled to `[0, 255]` (truncating).
/// Integer samples other than `u8` are cast directly, keeping only the low byte.
pub trait Sample: Copy + Send + Sync + 'static {
    /// Element type name used in diagnostics.
    const NAME: &'static str;

    /// Convert one sample to an 8-bit channel value.
    fn to_u8(self) -> u8;
}

impl Sample for u8 {
    const NAME: &'static str = "u8";

    fn to_u8(self) -> u8 {
        self
    }
}

macro_rules! wrapping_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                const NAME: &'static str = stringify!($t);

                fn to_u8(self) -> u8 {
                    self as u8
                }
            }
        )*
    };
}

wrapping_sample!(i8, u16, i16, u32, i32, u64, i64);

impl Sample for f32 {
    const NAME: &'static str = "f32";

    fn to_u8(self) -> u8 {
        // NaN survives clamp and casts to 0.
        (self.clamp(0.0, 1.0) * 255.0) as u8
    }
}

impl Sample for f64 {
    const NAME: &'static str = "f64";

    fn to_u8(self) -> u8 {
        (self.clamp(0.0, 1.0) * 255.0) as u8
    }
}

/// A stack of frames with shape `(N, H, W)` or `(N, H, W, C)`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStack<T> {
    frames: usize,
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<T>,
}

impl<T: Sample> FrameStack<T> {
    /// Build a stack from a row-major buffer and its shape.
    pub fn new(shape: &[usize], data: Vec<T>) -> AnimResult<Self> {
        let (frames, height, width, channels) = match *shape {
            [n, h, w] => (n, h, w, 1),
            [n, h, w, c] => (n, h, w, c),
            _ => {
                return Err(AnimError::validation(format!(
                    "frame array must have 3 or 4 axes, got shape {shape:?}"
                )));
            }
        };
        if !(1..=4).contains(&channels) {
            return Err(AnimError::validation(format!(
                "frame array channel axis must be 1..=4, got {channels}"
            )));
        }
        if height == 0 || width == 0 {
            return Err(AnimError::validation(format!(
                "frame array frames must be non-empty, got shape {shape:?}"
            )));
        }
        if u32::try_from(height).is_err() || u32::try_from(width).is_err() {
            return Err(AnimError::validation("frame array dimensions exceed u32"));
        }
        let expected = frames
            .checked_mul(height)
            .and_then(|v| v.checked_mul(width))
            .and_then(|v| v.checked_mul(channels))
            .ok_or_else(|| AnimError::validation("frame array shape overflows usize"))?;
        if data.len() != expected {
            return Err(AnimError::validation(format!(
                "frame array has {} elements, shape {shape:?} needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            frames,
            height,
            width,
            channels,
            data,
        })
    }

    /// Number of frames (first axis).
    pub fn len(&self) -> usize {
        self.frames
    }

    /// `true` when the stack holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Shape as `(N, H, W, C)`.
    pub fn shape(&self) -> [usize; 4] {
        [self.frames, self.height, self.width, self.channels]
    }

    /// The row-major sample buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn frame_len(&self) -> usize {
        self.height * self.width * self.channels
    }

    /// Normalize one frame to 8-bit channels.
    pub fn frame(&self, idx: usize) -> AnimResult<Frame> {
        if idx >= self.frames {
            return Err(AnimError::validation(format!(
                "frame index {idx} out of range for {} frames",
                self.frames
            )));
        }
        let len = self.frame_len();
        let samples = &self.data[idx * len..(idx + 1) * len];
        Frame::new(
            self.width as u32,
            self.height as u32,
            self.channels as u8,
            samples.iter().map(|s| s.to_u8()).collect(),
        )
    }

    /// Normalize the whole stack to 8-bit channels.
    pub fn normalized(&self) -> FrameStack<u8> {
        FrameStack {
            frames: self.frames,
            height: self.height,
            width: self.width,
            channels: self.channels,
            data: self.data.iter().map(|s| s.to_u8()).collect(),
        }
    }
}

/// In-memory frame array of any supported element type.
#[derive(Clone, Debug, PartialEq)]
pub enum RawFrames {
    /// 8-bit samples, used unchanged.
    U8(FrameStack<u8>),
    /// Signed 8-bit samples.
    I8(FrameStack<i8>),
    /// Unsigned 16-bit samples.
    U16(FrameStack<u16>),
    /// Signed 16-bit samples.
    I16(FrameStack<i16>),
    /// Unsigned 32-bit samples.
    U32(FrameStack<u32>),
    /// Signed 32-bit samples.
    I32(FrameStack<i32>),
    /// Unsigned 64-bit samples.
    U64(FrameStack<u64>),
    /// Signed 64-bit samples.
    I64(FrameStack<i64>),
    /// Single precision samples in `[0, 1]`.
    F32(FrameStack<f32>),
    /// Double precision samples in `[0, 1]`.
    F64(FrameStack<f64>),
}

macro_rules! dispatch {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            RawFrames::U8($s) => $body,
            RawFrames::I8($s) => $body,
            RawFrames::U16($s) => $body,
            RawFrames::I16($s) => $body,
            RawFrames::U32($s) => $body,
            RawFrames::I32($s) => $body,
            RawFrames::U64($s) => $body,
            RawFrames::I64($s) => $body,
            RawFrames::F32($s) => $body,
            RawFrames::F64($s) => $body,
        }
    };
}

impl RawFrames {
    /// Number of frames (first axis).
    pub fn len(&self) -> usize {
        dispatch!(self, s => s.len())
    }

    /// `true` when the array holds no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape as `(N, H, W, C)`.
    pub fn shape(&self) -> [usize; 4] {
        dispatch!(self, s => s.shape())
    }

    /// Element type name, e.g. `"f32"`.
    pub fn element_type(&self) -> &'static str {
        fn name_of<T: Sample>(_: &FrameStack<T>) -> &'static str {
            T::NAME
        }
        dispatch!(self, s => name_of(s))
    }

    /// Normalize frame `idx` to 8-bit channels.
    pub fn frame(&self, idx: usize) -> AnimResult<Frame> {
        dispatch!(self, s => s.frame(idx))
    }

    /// Normalize the whole array to 8-bit channels.
    pub fn normalized(&self) -> FrameStack<u8> {
        match self {
            // Already 8-bit: no conversion pass.
            RawFrames::U8(s) => s.clone(),
            other => dispatch!(other, s => s.normalized()),
        }
    }
}

macro_rules! raw_from {
    ($($t:ty => $v:ident),*) => {
        $(
            impl From<FrameStack<$t>> for RawFrames {
                fn from(s: FrameStack<$t>) -> Self {
                    RawFrames::$v(s)
                }
            }
        )*
    };
}

raw_from!(
    u8 => U8, i8 => I8, u16 => U16, i16 => I16, u32 => U32, i32 => I32, u64 => U64,
    i64 => I64,
    f32 => F32, f64 => F64
);

#[cfg(test)]
#[path = "../../tests/unit/pixels/normalize.rs"]
mod tests;
