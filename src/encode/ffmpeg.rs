use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, check_dims, check_order, ensure_parent_dir};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{AnimError, AnimResult};
use crate::pixels::frame::Frame;

/// Constant rate factor matching a "quality 8 of 10" H.264 encode.
pub const DEFAULT_CRF: u8 = 10;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Output frame rate.
    pub fps: Fps,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// libx264 constant rate factor (0 = lossless, 51 = worst).
    pub crf: u8,
    /// Background color used to flatten alpha (RGB8). `None` discards alpha, keeping the
    /// color channels of transparent pixels.
    pub bg_rgb: Option<[u8; 3]>,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>, fps: Fps) -> Self {
        Self {
            out_path: out_path.into(),
            fps,
            overwrite: true,
            crf: DEFAULT_CRF,
            bg_rgb: None,
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw RGB frames to stdin.
///
/// `ffmpeg` is started on the first frame, once the frame size is known. Odd sizes are padded
/// to even ones (required for yuv420p).
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    dims: Option<(u32, u32)>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> AnimResult<Self> {
        if opts.crf > 51 {
            return Err(AnimError::validation("libx264 crf must be within 0..=51"));
        }
        if !is_ffmpeg_on_path() {
            return Err(AnimError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }
        ensure_parent_dir(&opts.out_path)?;
        if !opts.overwrite && opts.out_path.exists() {
            return Err(AnimError::validation(format!(
                "output file '{}' already exists",
                opts.out_path.display()
            )));
        }
        Ok(Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            dims: None,
            last_idx: None,
        })
    }

    /// Destination MP4 path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn spawn(&mut self, width: u32, height: u32) -> AnimResult<()> {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.args(encoder_args(&self.opts, width, height));
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            AnimError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AnimError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| AnimError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            path = %self.opts.out_path.display(),
            width,
            height,
            "spawned ffmpeg"
        );
        self.scratch = vec![0u8; (width as usize) * (height as usize) * 3];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.dims = Some((width, height));
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> AnimResult<()> {
        check_order(&mut self.last_idx, idx)?;
        match self.dims {
            Some(dims) => check_dims(dims, frame)?,
            None => self.spawn(frame.width, frame.height)?,
        }

        let rgba = frame.to_rgba8()?;
        match self.opts.bg_rgb {
            Some(bg_rgb) => flatten_to_opaque_rgb8(&mut self.scratch, rgba.as_raw(), bg_rgb)?,
            None => strip_alpha_rgb8(&mut self.scratch, rgba.as_raw())?,
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(AnimError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            AnimError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn finish(&mut self) -> AnimResult<()> {
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            // No frame was ever pushed.
            return Ok(());
        };

        let status = child.wait().map_err(|e| {
            AnimError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| AnimError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| AnimError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(AnimError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        tracing::debug!(path = %self.opts.out_path.display(), "mp4 finalized");
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // Never leave an orphaned encoder behind when `finish` was skipped.
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn encoder_args(opts: &FfmpegSinkOpts, width: u32, height: u32) -> Vec<String> {
    fn strs<'a>(items: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
        items.iter().map(|s| s.to_string())
    }

    let mut args = vec![if opts.overwrite { "-y" } else { "-n" }.to_string()];
    // Input: raw RGB8 frames. `-r` before `-i` sets the input frame rate, as `num/den`.
    args.extend(strs(&["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgb24"]));
    args.extend(["-s".to_string(), format!("{width}x{height}")]);
    args.extend(["-r".to_string(), format!("{}/{}", opts.fps.num, opts.fps.den)]);
    args.extend(strs(&["-i", "pipe:0", "-an"]));
    if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
        args.extend(strs(&["-vf", "pad=ceil(iw/2)*2:ceil(ih/2)*2"]));
    }
    // Output: h264 + yuv420p for broad compatibility.
    args.extend(strs(&["-c:v", "libx264", "-pix_fmt", "yuv420p"]));
    args.extend(["-crf".to_string(), opts.crf.to_string()]);
    args.extend(strs(&["-movflags", "+faststart"]));
    args
}

fn check_rgb_buffers(dst: &[u8], src_rgba: &[u8]) -> AnimResult<()> {
    if !src_rgba.len().is_multiple_of(4) || dst.len() / 3 != src_rgba.len() / 4 {
        return Err(AnimError::validation(
            "rgba8 to rgb8 conversion expects matching buffers",
        ));
    }
    Ok(())
}

/// Drop the alpha channel of RGBA8 into packed RGB8.
fn strip_alpha_rgb8(dst: &mut [u8], src_rgba: &[u8]) -> AnimResult<()> {
    check_rgb_buffers(dst, src_rgba)?;
    for (d, s) in dst.chunks_exact_mut(3).zip(src_rgba.chunks_exact(4)) {
        d.copy_from_slice(&s[..3]);
    }
    Ok(())
}

/// Flatten straight-alpha RGBA8 over `bg_rgb` into packed RGB8.
fn flatten_to_opaque_rgb8(dst: &mut [u8], src_rgba: &[u8], bg_rgb: [u8; 3]) -> AnimResult<()> {
    check_rgb_buffers(dst, src_rgba)?;

    for (d, s) in dst.chunks_exact_mut(3).zip(src_rgba.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(&s[..3]);
            continue;
        }
        let inv = 255 - a;
        for ((dc, sc), bg) in d.iter_mut().zip(&s[..3]).zip(bg_rgb) {
            let v = mul_div255(*sc as u16, a) + mul_div255(bg as u16, inv);
            *dc = v.min(255) as u8;
        }
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (x * y + 127) / 255
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
