use std::path::PathBuf;

use crate::domain::Channel;

/// All failures the encoder can surface to a caller.
///
/// Every variant is fatal for the *current video only*: the batch loop catches
/// it, reports it with context, and moves on to the next input.
#[derive(Clone)]
pub enum AppError {
    /// CLI / configuration input is invalid.
    Config(String),

    /// The frame source yielded fewer frames than declared, or a malformed
    /// frame (bad header, wrong dimensions, short payload).
    FrameDecode { video: String, detail: String },

    /// A zero-length sample sequence reached the fitter.
    ///
    /// An empty *collection* of sequences is a successful no-op; a pixel with
    /// no samples at all is not fittable.
    EmptySequence { channel: Channel, pixel: usize },

    /// The least-squares solve for one pixel failed (ill-conditioned or
    /// non-finite solution). We fail the whole channel rather than substitute
    /// a degenerate coefficient row.
    FitNumerical { channel: Channel, pixel: usize },

    /// Writing, compressing, or committing the model artifact failed, or the
    /// destination already exists.
    ArtifactWrite { path: PathBuf, detail: String },
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config(message.into())
    }

    pub fn frame_decode(video: impl Into<String>, detail: impl Into<String>) -> Self {
        AppError::FrameDecode {
            video: video.into(),
            detail: detail.into(),
        }
    }

    pub fn artifact_write(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        AppError::ArtifactWrite {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Process exit code used when this error terminates the run.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::FrameDecode { .. } => 3,
            AppError::EmptySequence { .. } => 3,
            AppError::FitNumerical { .. } => 4,
            AppError::ArtifactWrite { .. } => 2,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(message) => write!(f, "{message}"),
            AppError::FrameDecode { video, detail } => {
                write!(f, "Frame decode failed for '{video}': {detail}")
            }
            AppError::EmptySequence { channel, pixel } => {
                write!(
                    f,
                    "Empty sample sequence for {} channel at pixel {pixel}.",
                    channel.display_name()
                )
            }
            AppError::FitNumerical { channel, pixel } => {
                write!(
                    f,
                    "Least-squares fit failed for {} channel at pixel {pixel}.",
                    channel.display_name()
                )
            }
            AppError::ArtifactWrite { path, detail } => {
                write!(f, "Failed to write artifact '{}': {detail}", path.display())
            }
        }
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AppError({self})")
    }
}

impl std::error::Error for AppError {}
