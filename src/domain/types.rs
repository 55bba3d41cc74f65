//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can
//! be used in-memory during fitting and exported to the model artifact without
//! translation layers.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default polynomial degree fitted per pixel.
pub const DEFAULT_DEGREE: usize = 2;

/// Model artifact extension (before the compression envelope is applied).
pub const MODEL_EXTENSION: &str = "pvc";

/// One of the three color planes of a frame.
///
/// The order of `Channel::ALL` is the canonical (red, green, blue) order used
/// everywhere results are assembled, regardless of worker completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Canonical assembly order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Human-readable label for terminal output and artifact keys.
    pub fn display_name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }

    /// Byte offset of this channel within an interleaved RGB pixel.
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Position of this channel in `Channel::ALL`.
    pub fn index(self) -> usize {
        self.offset()
    }
}

/// A single decoded video frame.
///
/// Pixels are row-major, interleaved RGB, 8 bits per channel. Frames are
/// immutable once produced by a frame source.
#[derive(Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixel positions (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved RGB bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Intensity of `channel` at flattened row-major pixel position `p`.
    #[inline]
    pub fn sample(&self, channel: Channel, p: usize) -> u8 {
        self.data[p * 3 + channel.offset()]
    }

    /// True when the buffer length matches the declared dimensions.
    pub fn is_valid(&self) -> bool {
        self.data.len() == self.pixel_count() * 3
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct EncodeConfig {
    /// Polynomial degree per pixel (2 in the reference behavior).
    pub degree: usize,
    /// Where artifacts are written; `None` writes next to the source video.
    pub out_dir: Option<PathBuf>,
    /// Suppress per-channel progress meters.
    pub quiet: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            out_dir: None,
            quiet: true,
        }
    }
}

/// Outcome of encoding a single video.
#[derive(Debug, Clone)]
pub struct EncodeOutput {
    pub video: String,
    pub width: u32,
    pub height: u32,
    /// Number of frames actually fitted (declared count minus the dropped
    /// final frame).
    pub frames_used: usize,
    pub pixel_count: usize,
    /// Committed compressed artifact path.
    pub artifact: PathBuf,
}

/// Outcome counts for a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_order_is_rgb() {
        let names: Vec<&str> = Channel::ALL.iter().map(|c| c.display_name()).collect();
        assert_eq!(names, ["red", "green", "blue"]);
        for (i, c) in Channel::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn frame_sampling_is_interleaved() {
        // 2x1 frame: pixel 0 = (1,2,3), pixel 1 = (4,5,6).
        let frame = Frame::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert!(frame.is_valid());
        assert_eq!(frame.sample(Channel::Red, 0), 1);
        assert_eq!(frame.sample(Channel::Green, 0), 2);
        assert_eq!(frame.sample(Channel::Blue, 1), 6);
    }

    #[test]
    fn frame_validity_checks_buffer_length() {
        let frame = Frame::new(4, 4, vec![0; 10]);
        assert!(!frame.is_valid());
    }
}
