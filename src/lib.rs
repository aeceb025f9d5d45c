//! plotanim assembles frames into GIF and MP4 animations.
//!
//! Frames come from exactly one [`FrameSource`]:
//!
//! - **Folder**: the image files next to the output (`out/run.gif` reads `out/run/*.png`),
//!   sorted by file name.
//! - **Array**: an in-memory [`RawFrames`] stack, first axis is time. Floating point samples are
//!   clipped to `[0, 1]` and scaled to 8 bits, other integers are cast.
//! - **Function**: a render function called once per value of one animated parameter, returning
//!   a [`Figure`] that is rasterized at the requested dpi.
//!
//! Frames are produced lazily, one at a time, optionally in ping-pong order, and streamed into a
//! [`FrameSink`] chosen by the output extension (`.gif` via the `gif` crate, `.mp4` via the
//! system `ffmpeg` binary).
//!
//! ```no_run
//! use plotanim::{AnimationOptions, AnimationRequest, FrameSource, make_animation};
//!
//! let opts = AnimationOptions {
//!     fps: 12.0,
//!     pingpong: true,
//!     ..Default::default()
//! };
//! make_animation(
//!     AnimationRequest::new("renders", FrameSource::folder(".png"))
//!         .with_name("sweep")
//!         .with_options(opts),
//! )?;
//! # Ok::<(), plotanim::AnimError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod figure;
mod foundation;
mod pixels;
mod progress;
mod source;

/// Encoding sinks.
pub mod encode;

pub use animation::{
    AnimationOptions, AnimationRequest, make_animation, make_animation_with_progress,
    resolve_output_path, stream_frames,
};
pub use assets::decode::{decode_image, decode_image_file};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use encode::gif::GifSink;
pub use encode::sink::{
    ContainerFormat, FrameSink, InMemorySink, SinkOpts, ensure_parent_dir, open_sink,
};
pub use figure::Figure;
pub use figure::svg::{SVG_BASE_DPI, SvgFigure, SvgTemplate};
pub use foundation::core::{Fps, FrameIndex};
pub use foundation::error::{AnimError, AnimResult};
pub use pixels::frame::Frame;
pub use pixels::normalize::{FrameStack, RawFrames, Sample};
pub use progress::{BarProgress, FnProgress, LogProgress, NoProgress, Progress};
pub use source::folder::{FolderSource, list_frame_files};
pub use source::function::{FunctionSource, Params, PreparedFunction};
pub use source::order::{pingpong, sequence_len, sequence_order};
pub use source::{FrameSource, PreparedSource};
