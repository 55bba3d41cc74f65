//! Channel time-series construction.
//!
//! A frame source yields pixels grouped by frame; fitting needs the transpose:
//! for each pixel position and each channel, the ordered intensity history
//! across frames. This module performs that reshaping.
//!
//! The final frame of every video is dropped (`len = frame_count - 1`), which
//! both observed variants of this pipeline do consistently; the behavior is
//! preserved rather than "fixed".

use crate::domain::{Channel, Frame};
use crate::error::AppError;
use crate::source::FrameSource;

/// All sample sequences for one channel of one video.
///
/// Sequences are stored pixel-major in one flat buffer: samples for pixel `p`
/// occupy `samples[p * len .. (p + 1) * len]`. Every sequence has the same
/// length within a run.
#[derive(Debug, Clone)]
pub struct ChannelSeries {
    channel: Channel,
    pixel_count: usize,
    len: usize,
    samples: Vec<u8>,
}

impl ChannelSeries {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Number of pixel positions (sample sequences).
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Length of every sample sequence (processed frame count).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }

    /// Ordered intensity history of flattened row-major pixel `p`.
    pub fn sequence(&self, p: usize) -> &[u8] {
        &self.samples[p * self.len..(p + 1) * self.len]
    }

    #[cfg(test)]
    pub fn from_sequences(channel: Channel, sequences: &[&[u8]]) -> Self {
        let len = sequences.first().map_or(0, |s| s.len());
        assert!(sequences.iter().all(|s| s.len() == len));
        Self {
            channel,
            pixel_count: sequences.len(),
            len,
            samples: sequences.concat(),
        }
    }
}

/// The three per-channel series collections for one video.
#[derive(Debug, Clone)]
pub struct VideoSeries {
    pub video: String,
    pub width: u32,
    pub height: u32,
    /// `ChannelSeries` in (red, green, blue) order.
    pub channels: [ChannelSeries; 3],
}

impl VideoSeries {
    /// Length of every sample sequence (identical across channels).
    pub fn frames_used(&self) -> usize {
        self.channels[0].len()
    }

    pub fn pixel_count(&self) -> usize {
        self.channels[0].pixel_count()
    }
}

/// Reorganize a frame stream into per-pixel, per-channel sample sequences.
///
/// Reads `declared_frames() - 1` frames from the source (the final frame is
/// dropped), validating that every frame matches the first frame's
/// dimensions. Fails with `FrameDecode` if the source ends early or yields a
/// malformed frame; no partial output escapes. A 0- or 1-frame video produces
/// three empty series, which is not an error.
pub fn build_series(source: &mut dyn FrameSource) -> Result<VideoSeries, AppError> {
    let video = source.id().to_string();
    let (width, height) = source.dimensions();
    let pixel_count = width as usize * height as usize;
    let len = source.declared_frames().saturating_sub(1);

    let mut buffers: [Vec<u8>; 3] =
        std::array::from_fn(|_| vec![0u8; pixel_count * len]);

    for t in 0..len {
        let frame = source.next_frame()?.ok_or_else(|| {
            AppError::frame_decode(
                &video,
                format!("source ended after {t} of {len} expected frames"),
            )
        })?;

        if frame.width() != width || frame.height() != height || !frame.is_valid() {
            return Err(AppError::frame_decode(
                &video,
                format!(
                    "frame {t} has shape {}x{} ({} bytes), expected {width}x{height}",
                    frame.width(),
                    frame.height(),
                    frame.data().len()
                ),
            ));
        }

        scatter_frame(&frame, t, len, &mut buffers);
    }

    let channels = std::array::from_fn(|i| ChannelSeries {
        channel: Channel::ALL[i],
        pixel_count,
        len,
        samples: std::mem::take(&mut buffers[i]),
    });

    Ok(VideoSeries {
        video,
        width,
        height,
        channels,
    })
}

/// Place frame `t`'s pixels into the pixel-major buffers.
fn scatter_frame(frame: &Frame, t: usize, len: usize, buffers: &mut [Vec<u8>; 3]) {
    let data = frame.data();
    for (p, px) in data.chunks_exact(3).enumerate() {
        let at = p * len + t;
        buffers[0][at] = px[0];
        buffers[1][at] = px[1];
        buffers[2][at] = px[2];
    }
}
