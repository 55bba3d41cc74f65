//! Reporting utilities: progress meters and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::{BatchSummary, Channel, EncodeOutput};

/// Combined three-channel progress meter for one video.
///
/// Workers report completed-pixel counts concurrently; the meter keeps one
/// percentage per channel and redraws a single status line whenever any
/// channel crosses a whole percent. Redraws go through a lock so concurrent
/// updates cannot interleave mid-line.
pub struct ProgressMeter {
    percents: [AtomicUsize; 3],
    line: Mutex<()>,
    enabled: bool,
}

impl ProgressMeter {
    pub fn new(enabled: bool) -> Self {
        Self {
            percents: [AtomicUsize::new(0), AtomicUsize::new(0), AtomicUsize::new(0)],
            line: Mutex::new(()),
            enabled,
        }
    }

    /// Record progress for one channel; cosmetic only.
    pub fn update(&self, channel: Channel, done: usize, total: usize) {
        if !self.enabled || total == 0 {
            return;
        }

        let pct = done * 100 / total;
        let slot = &self.percents[channel.index()];
        if slot.fetch_max(pct, Ordering::Relaxed) >= pct && done != total {
            return;
        }

        let guard = self.line.lock().unwrap_or_else(|poison| poison.into_inner());
        let mut out = std::io::stderr().lock();
        let _ = write!(out, "\r{}", self.render());
        let _ = out.flush();
        drop(guard);
    }

    /// Terminate the status line after a video completes or fails.
    pub fn finish(&self) {
        if self.enabled {
            eprintln!();
        }
    }

    fn render(&self) -> String {
        let parts: Vec<String> = Channel::ALL
            .iter()
            .map(|c| {
                let pct = self.percents[c.index()].load(Ordering::Relaxed);
                format!("{} {:>3}% [{}]", c.display_name(), pct, bar(pct, 20))
            })
            .collect();
        parts.join("  ")
    }
}

fn bar(pct: usize, width: usize) -> String {
    let filled = (pct.min(100) * width) / 100;
    let mut s = String::with_capacity(width);
    for i in 0..width {
        s.push(if i < filled { '-' } else { ' ' });
    }
    s
}

/// Format the one-line summary printed after a video commits.
pub fn format_encode_summary(output: &EncodeOutput, degree: usize) -> String {
    format!(
        "{}: {}x{} | {} frames fitted | {} pixels x 3 channels | degree {} -> {}",
        output.video,
        output.width,
        output.height,
        output.frames_used,
        output.pixel_count,
        degree,
        output.artifact.display(),
    )
}

/// Format the batch trailer.
pub fn format_batch_summary(summary: &BatchSummary) -> String {
    format!(
        "Processed {} video(s), {} failed.",
        summary.processed, summary.failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0, 10), "          ");
        assert_eq!(bar(50, 10), "-----     ");
        assert_eq!(bar(100, 10), "----------");
    }

    #[test]
    fn summary_lines_carry_the_key_facts() {
        let output = EncodeOutput {
            video: "clip.rgbv".to_string(),
            width: 8,
            height: 4,
            frames_used: 23,
            pixel_count: 32,
            artifact: PathBuf::from("clip.pvc.gz"),
        };
        let line = format_encode_summary(&output, 2);
        assert!(line.contains("clip.rgbv"));
        assert!(line.contains("23 frames"));
        assert!(line.contains("clip.pvc.gz"));

        let trailer = format_batch_summary(&BatchSummary {
            processed: 3,
            failed: 1,
        });
        assert!(trailer.contains('3'));
        assert!(trailer.contains('1'));
    }

    #[test]
    fn disabled_meter_is_silent_and_cheap() {
        let meter = ProgressMeter::new(false);
        meter.update(Channel::Red, 5, 10);
        meter.finish();
        assert_eq!(meter.percents[0].load(Ordering::Relaxed), 0);
    }
}
