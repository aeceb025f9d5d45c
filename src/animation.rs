//! Animation assembly: resolve the output, prepare the frame source, stream it into a sink.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{ContainerFormat, FrameSink, SinkOpts, open_sink};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{AnimError, AnimResult};
use crate::progress::{NoProgress, Progress};
use crate::source::order::{sequence_len, sequence_order};
use crate::source::{FrameSource, PreparedSource};

/// Playback and encoding options of an animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationOptions {
    /// Frames per second.
    pub fps: f64,
    /// Repeat forever (GIF only).
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Play forward then backward, without repeating the endpoints.
    pub pingpong: bool,
    /// Output container extension, `".gif"` or `".mp4"`.
    pub extension: String,
    /// Rasterization resolution for function-rendered figures.
    pub dpi: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            fps: 24.0,
            looping: true,
            pingpong: false,
            extension: ".gif".to_string(),
            dpi: 300.0,
        }
    }
}

impl AnimationOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> AnimResult<Self> {
        let opts = serde_json::from_str(s).context("parse animation options JSON")?;
        Ok(opts)
    }

    /// Read options from a JSON file.
    pub fn from_path(path: &Path) -> AnimResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read animation options '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Output container selected by `extension`.
    pub fn format(&self) -> AnimResult<ContainerFormat> {
        ContainerFormat::from_extension(&self.extension)
    }

    /// `fps` as a validated rational rate.
    pub fn frame_rate(&self) -> AnimResult<Fps> {
        Fps::from_f64(self.fps)
    }
}

/// Everything needed to produce one animation file.
#[derive(Debug)]
pub struct AnimationRequest<'a> {
    /// Output directory (or output path stem when `name` is `None`).
    pub export_path: PathBuf,
    /// Optional file name joined to `export_path`.
    pub name: Option<String>,
    /// Playback and encoding options.
    pub options: AnimationOptions,
    /// Where the frames come from.
    pub source: FrameSource<'a>,
}

impl<'a> AnimationRequest<'a> {
    /// Request with default options and no name.
    pub fn new(export_path: impl Into<PathBuf>, source: impl Into<FrameSource<'a>>) -> Self {
        Self {
            export_path: export_path.into(),
            name: None,
            options: AnimationOptions::default(),
            source: source.into(),
        }
    }

    /// Set the output file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the options.
    pub fn with_options(mut self, options: AnimationOptions) -> Self {
        self.options = options;
        self
    }

    /// The file this request writes.
    pub fn output_path(&self) -> AnimResult<PathBuf> {
        let format = self.options.format()?;
        resolve_output_path(&self.export_path, self.name.as_deref(), format)
    }
}

/// Join `export_path` and `name`, then force the container extension.
pub fn resolve_output_path(
    export_path: &Path,
    name: Option<&str>,
    format: ContainerFormat,
) -> AnimResult<PathBuf> {
    let mut path = match name {
        Some(name) => export_path.join(name),
        None => export_path.to_path_buf(),
    };
    if !path.set_extension(format.extension()) {
        return Err(AnimError::config(format!(
            "output path '{}' has no file name",
            path.display()
        )));
    }
    Ok(path)
}

/// Assemble the requested animation.
///
/// Writes exactly one file at [`AnimationRequest::output_path`], replacing any existing one.
pub fn make_animation(request: AnimationRequest<'_>) -> AnimResult<()> {
    make_animation_with_progress(request, &mut NoProgress)
}

/// Like [`make_animation`], reporting progress to `progress`.
#[tracing::instrument(skip_all, fields(source = request.source.kind()))]
pub fn make_animation_with_progress(
    request: AnimationRequest<'_>,
    progress: &mut dyn Progress,
) -> AnimResult<()> {
    let AnimationRequest {
        export_path,
        name,
        options,
        source,
    } = request;

    let format = options.format()?;
    let fps = options.frame_rate()?;
    let out_path = resolve_output_path(&export_path, name.as_deref(), format)?;

    // Configuration errors surface here, before the output file exists.
    let mut prepared = source.prepare(&out_path, options.dpi)?;

    let mut sink = open_sink(SinkOpts {
        out_path: out_path.clone(),
        fps,
        looping: options.looping,
    })?;
    let written = stream_frames(&mut prepared, options.pingpong, sink.as_mut(), progress)?;

    tracing::info!(
        path = %out_path.display(),
        frames = written,
        format = format.extension(),
        "animation written"
    );
    Ok(())
}

/// Stream every frame of `source` into `sink`, then finish the sink.
///
/// `finish` runs on every exit path. When frame production fails the production error is
/// returned and a secondary finish error is only logged. Returns the number of frames written.
pub fn stream_frames(
    source: &mut PreparedSource<'_>,
    pingpong: bool,
    sink: &mut dyn FrameSink,
    progress: &mut dyn Progress,
) -> AnimResult<u64> {
    let total = sequence_len(source.len(), pingpong);
    progress.start(total);

    let pushed = push_sequence(source, pingpong, total, sink, progress);
    let finished = sink.finish();
    progress.finish();

    match (pushed, finished) {
        (Ok(n), Ok(())) => Ok(n),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(finish_err)) => {
            tracing::warn!(error = %finish_err, "sink finish failed after a frame error");
            Err(e)
        }
    }
}

fn push_sequence(
    source: &mut PreparedSource<'_>,
    pingpong: bool,
    total: usize,
    sink: &mut dyn FrameSink,
    progress: &mut dyn Progress,
) -> AnimResult<u64> {
    let mut written = 0u64;
    for (pos, idx) in sequence_order(source.len(), pingpong).enumerate() {
        let frame = source.frame(idx)?;
        tracing::debug!(pos, idx, width = frame.width, height = frame.height, "push frame");
        sink.push_frame(FrameIndex(pos as u64), &frame)?;
        written += 1;
        progress.advance(pos + 1, total);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../tests/unit/animation.rs"]
mod tests;
