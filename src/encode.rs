//! Encoding sinks.
//!
//! Sinks consume frames in sequence order and finalize their container in `finish`.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Incremental GIF sink.
pub mod gif;
/// Frame sink trait, container selection and built-in sinks.
pub mod sink;
