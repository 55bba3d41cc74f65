//! Shared encode pipeline used by the batch loop and by tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! frame stream -> per-channel time series -> parallel fits -> committed artifact
//!
//! Completion is two-phase: coefficients are computed first, then the artifact
//! is committed; a video only counts as processed once the compressed file is
//! in place. A write failure therefore never reports partial success.

use std::path::Path;

use crate::domain::{EncodeConfig, EncodeOutput};
use crate::error::AppError;
use crate::fit::{fit_all_channels, ProgressFn};
use crate::io::{write_model, ModelFile};
use crate::series::build_series;
use crate::source::FrameSource;

/// Encode one video end to end.
///
/// `model_path` is the uncompressed `.pvc` destination (see
/// [`crate::io::model_path_for`]); the committed artifact is its `.pvc.gz`
/// sibling.
pub fn encode_video(
    source: &mut dyn FrameSource,
    model_path: &Path,
    config: &EncodeConfig,
    progress: &ProgressFn,
) -> Result<EncodeOutput, AppError> {
    // 1) Reshape the frame stream into per-pixel sample sequences.
    let series = build_series(source)?;

    // 2) Fit all three channels concurrently.
    let fits = fit_all_channels(&series, config.degree, progress)?;

    // 3) Commit: encode, compress, rename into place.
    let model = ModelFile::from_fits(fits);
    let artifact = write_model(model_path, &model)?;

    Ok(EncodeOutput {
        width: series.width,
        height: series.height,
        frames_used: series.frames_used(),
        pixel_count: series.pixel_count(),
        video: series.video,
        artifact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::no_progress;
    use crate::io::{compressed_path_for, read_model};
    use crate::source::{write_raw_video, RawVideoSource, SyntheticSource};
    use std::io::Write as _;

    #[test]
    fn synthetic_video_round_trips_through_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("clip.pvc");
        let config = EncodeConfig::default();

        let mut source = SyntheticSource::new(4, 3, 9, 7);
        let output = encode_video(&mut source, &model_path, &config, &no_progress).unwrap();

        assert_eq!(output.frames_used, 8);
        assert_eq!(output.pixel_count, 12);
        assert_eq!(output.artifact, compressed_path_for(&model_path));

        let model = read_model(&output.artifact).unwrap();
        assert_eq!(model.red.len(), 12);
        assert_eq!(model.green.len(), 12);
        assert_eq!(model.blue.len(), 12);
        for row in model.red.iter().chain(&model.green).chain(&model.blue) {
            assert_eq!(row.len(), 3);
            assert!(row.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn empty_video_still_commits_an_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let video_path = dir.path().join("empty.rgbv");
        write_raw_video(&video_path, 2, 2, &[]).unwrap();

        let model_path = dir.path().join("empty.pvc");
        let mut source = RawVideoSource::open(&video_path).unwrap();
        let output = encode_video(
            &mut source,
            &model_path,
            &EncodeConfig::default(),
            &no_progress,
        )
        .unwrap();

        assert_eq!(output.frames_used, 0);
        let model = read_model(&output.artifact).unwrap();
        assert!(model.red.is_empty());
        assert!(model.blue.is_empty());
    }

    #[test]
    fn decode_failure_leaves_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let video_path = dir.path().join("broken.rgbv");

        // 2 real frames, header claiming 10.
        let frames = SyntheticSource::new(2, 2, 2, 1).collect_frames().unwrap();
        write_raw_video(&video_path, 2, 2, &frames).unwrap();
        let mut bytes = std::fs::read(&video_path).unwrap();
        bytes[12..16].copy_from_slice(&10u32.to_le_bytes());
        let mut file = std::fs::File::create(&video_path).unwrap();
        file.write_all(&bytes).unwrap();

        let model_path = dir.path().join("broken.pvc");
        let mut source = RawVideoSource::open(&video_path).unwrap();
        let err = encode_video(
            &mut source,
            &model_path,
            &EncodeConfig::default(),
            &no_progress,
        )
        .unwrap_err();

        assert!(matches!(err, AppError::FrameDecode { .. }));
        assert!(!model_path.exists());
        assert!(!compressed_path_for(&model_path).exists());
    }
}
