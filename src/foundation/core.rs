use crate::foundation::error::{AnimError, AnimResult};

/// Position of a frame inside the streamed sequence (0-based).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(
    /// Zero-based position.
    pub u64,
);

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator (must be > 0).
    pub den: u32,
}

impl Fps {
    /// Create a frame rate of `num / den`, reduced to lowest terms.
    pub fn new(num: u32, den: u32) -> AnimResult<Self> {
        if den == 0 {
            return Err(AnimError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(AnimError::validation("Fps num must be > 0"));
        }
        let g = gcd(num, den);
        Ok(Self {
            num: num / g,
            den: den / g,
        })
    }

    /// Convert a floating point rate to a rational with millisecond precision.
    pub fn from_f64(fps: f64) -> AnimResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(AnimError::validation(format!(
                "fps must be finite and > 0, got {fps}"
            )));
        }
        let scaled = (fps * 1000.0).round();
        if scaled < 1.0 || scaled > f64::from(u32::MAX) {
            return Err(AnimError::validation(format!(
                "fps {fps} is out of the representable range"
            )));
        }
        Self::new(scaled as u32, 1000)
    }

    /// Frames per second as float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Per-frame delay in GIF centiseconds (at least 1).
    pub fn gif_delay_cs(self) -> u16 {
        let cs = (100.0 * self.frame_duration_secs()).round();
        cs.clamp(1.0, f64::from(u16::MAX)) as u16
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
