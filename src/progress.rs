//! Progress observers for frame streaming.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Observer notified as frames are streamed.
///
/// Progress reporting never changes which frames are produced or their order.
pub trait Progress {
    /// Called once with the number of frames about to be streamed.
    fn start(&mut self, _total: usize) {}
    /// Called after each frame has been pushed to the sink.
    fn advance(&mut self, done: usize, total: usize);
    /// Called once after the sink has been finished, on success or failure.
    fn finish(&mut self) {}
}

/// Progress observer that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn advance(&mut self, _done: usize, _total: usize) {}
}

/// Progress observer that logs through `tracing`.
#[derive(Clone, Debug)]
pub struct LogProgress {
    every: usize,
    started: Option<Instant>,
}

impl LogProgress {
    /// Log every `every` frames (and always the last one).
    pub fn every(every: usize) -> Self {
        Self {
            every: every.max(1),
            started: None,
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::every(10)
    }
}

impl Progress for LogProgress {
    fn start(&mut self, total: usize) {
        self.started = Some(Instant::now());
        tracing::info!(total, "streaming frames");
    }

    fn advance(&mut self, done: usize, total: usize) {
        if done.is_multiple_of(self.every) || done == total {
            tracing::info!(done, total, "frames written");
        }
    }

    fn finish(&mut self) {
        if let Some(started) = self.started.take() {
            tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "done");
        }
    }
}

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// Progress observer drawing an `indicatif` bar on stderr.
///
/// The bar is created by [`Progress::start`] and cleared by [`Progress::finish`]. Nothing is
/// drawn when stderr is not a terminal.
#[derive(Debug)]
pub struct BarProgress {
    target: Option<ProgressDrawTarget>,
    bar: Option<ProgressBar>,
}

impl BarProgress {
    /// Draw to stderr.
    pub fn new() -> Self {
        Self {
            target: None,
            bar: None,
        }
    }

    /// Draw to `target` instead of stderr.
    pub fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            target: Some(target),
            bar: None,
        }
    }

    /// The active bar, between `start` and `finish`.
    pub fn bar(&self) -> Option<&ProgressBar> {
        self.bar.as_ref()
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn start(&mut self, total: usize) {
        let bar = match self.target.take() {
            Some(target) => ProgressBar::with_draw_target(Some(total as u64), target),
            None => ProgressBar::new(total as u64),
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        self.bar = Some(bar);
    }

    fn advance(&mut self, done: usize, _total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_position(done as u64);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Adapter turning a `FnMut(done, total)` closure into a [`Progress`] observer.
pub struct FnProgress<F>(
    /// Called with `(done, total)` after each frame.
    pub F,
);

impl<F: FnMut(usize, usize)> Progress for FnProgress<F> {
    fn advance(&mut self, done: usize, total: usize) {
        (self.0)(done, total);
    }
}

#[cfg(test)]
#[path = "../tests/unit/progress.rs"]
mod tests;
