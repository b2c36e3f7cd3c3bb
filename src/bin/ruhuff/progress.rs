//! Progress display for long running compression and decompression
//!
//! This implementation relies heavily on the `indicatif` crate, see <https://docs.rs/indicatif>

use std::io::{Read, Seek, SeekFrom};

use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

/// Wraps a reader and advances a progress bar by every byte read through it.
///
/// Seeking does not reset the progress, so a source that is read in several passes
/// should be given the sum of all passes as `total`.
pub struct ProgressMonitor<R> {
    /// The amount of bytes that will pass through the monitor
    total: u64,
    /// Amount read so far, over all passes
    read: u64,
    reader: R,
    progress_bar: ProgressBar,
}

impl<R> ProgressMonitor<R> {
    pub fn new(reader: R, total: u64, label: &'static str) -> Self {
        // The default is 20hz, this reduces rendering overhead
        Self::with_draw_target(reader, total, label, ProgressDrawTarget::stderr_with_hz(8))
    }

    fn with_draw_target(
        reader: R,
        total: u64,
        label: &'static str,
        target: ProgressDrawTarget,
    ) -> Self {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template(
            "{msg} {wide_bar} {binary_bytes}/{binary_total_bytes} [est. {eta} remaining]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        let progress_bar = ProgressBar::with_draw_target(Some(total), target)
            .with_style(style)
            .with_message(label);
        Self {
            total,
            read: 0,
            reader,
            progress_bar,
        }
    }

    fn update(&mut self, delta: u64) {
        self.read += delta;
        self.progress_bar.inc(delta);
        if self.read >= self.total && !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
            let elapsed = self.progress_bar.elapsed();
            let secs = elapsed.as_secs_f64();
            let rate = if secs > 0.0 {
                (self.total as f64 / secs) as u64
            } else {
                self.total
            };
            info!(
                "processed {} in {} ({}/s avg)",
                HumanBytes(self.total),
                HumanDuration(elapsed),
                HumanBytes(rate)
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let out = self.reader.read(buf)?;
        self.update(out as u64);
        Ok(out)
    }
}

impl<R: Seek> Seek for ProgressMonitor<R> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.reader.seek(pos)
    }
}

impl<R> Drop for ProgressMonitor<R> {
    fn drop(&mut self) {
        if !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
        }
    }
}
