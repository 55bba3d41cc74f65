//! Frame sources.
//!
//! Video decoding proper is an external concern; the pipeline only requires a
//! finite, ordered, non-restartable stream of decoded RGB frames with an
//! up-front frame count. Two sources ship with the crate:
//!
//! - [`RawVideoSource`] reads the crate's raw `.rgbv` interchange files
//! - [`SyntheticSource`] generates deterministic test footage

pub mod raw;
pub mod synthetic;

pub use raw::*;
pub use synthetic::*;

use crate::domain::Frame;
use crate::error::AppError;

/// An ordered, finite stream of decoded frames for one video.
///
/// Implementations report their total frame count up front and yield frames in
/// presentation order. The stream cannot be restarted.
pub trait FrameSource {
    /// Identifier used in diagnostics (typically the file name).
    fn id(&self) -> &str;

    /// Total number of frames the source claims to hold.
    fn declared_frames(&self) -> usize;

    /// Frame dimensions, `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Yield the next frame, `Ok(None)` at end of stream, or a decode error.
    fn next_frame(&mut self) -> Result<Option<Frame>, AppError>;
}
