//! Model artifact write/read.
//!
//! The artifact is the "portable" representation of one video's fitted model:
//! a JSON object keyed by channel name, each holding the ordered list of
//! per-pixel coefficient rows (highest power first, row-major pixel order),
//! wrapped in a gzip envelope:
//!
//! ```text
//! video.rgbv  ->  video.pvc (JSON, intermediate)  ->  video.pvc.gz
//! ```
//!
//! The write is atomic from the caller's perspective: the compressed file is
//! produced under a `.tmp` name and renamed into place, and the uncompressed
//! intermediate is removed afterwards. On any failure both temporaries are
//! cleaned up, so either a valid `*.pvc.gz` exists or nothing does.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::domain::MODEL_EXTENSION;
use crate::error::AppError;
use crate::fit::ChannelFit;

/// Serialized model: three coefficient collections keyed by channel.
///
/// Frame dimensions are deliberately not persisted; the on-disk format is
/// exactly the three channel keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub red: Vec<Vec<f64>>,
    pub green: Vec<Vec<f64>>,
    pub blue: Vec<Vec<f64>>,
}

impl ModelFile {
    /// Bundle the three completed channel fits, consuming them.
    ///
    /// `fits` must be in canonical (red, green, blue) order, which is what the
    /// orchestrator returns.
    pub fn from_fits(fits: [ChannelFit; 3]) -> Self {
        let [red, green, blue] = fits;
        Self {
            red: red.into_coeffs(),
            green: green.into_coeffs(),
            blue: blue.into_coeffs(),
        }
    }

    /// Coefficient rows per channel (identical across channels by invariant).
    pub fn pixel_count(&self) -> usize {
        self.red.len()
    }
}

/// Uncompressed model path for a source video: extension replaced by `.pvc`.
///
/// With `out_dir` set, the artifact lands there instead of next to the video.
pub fn model_path_for(video: &Path, out_dir: Option<&Path>) -> PathBuf {
    let model = video.with_extension(MODEL_EXTENSION);
    match (out_dir, model.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => model,
    }
}

/// Final compressed artifact path for an uncompressed model path.
pub fn compressed_path_for(model_path: &Path) -> PathBuf {
    let mut os = model_path.as_os_str().to_owned();
    os.push(".gz");
    PathBuf::from(os)
}

/// Encode, compress, and commit a model artifact.
///
/// `model_path` is the uncompressed `.pvc` destination; the committed file is
/// the sibling `.pvc.gz`, returned on success. A pre-existing destination is a
/// collision and fails without touching it.
pub fn write_model(model_path: &Path, model: &ModelFile) -> Result<PathBuf, AppError> {
    let final_path = compressed_path_for(model_path);
    if final_path.exists() {
        return Err(AppError::artifact_write(
            &final_path,
            "destination already exists",
        ));
    }

    let mut tmp_path = final_path.clone().into_os_string();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    let result = write_stages(model_path, &tmp_path, &final_path, model);
    if result.is_err() {
        // Leave nothing behind on failure.
        let _ = std::fs::remove_file(model_path);
        let _ = std::fs::remove_file(&tmp_path);
    }
    result.map(|_| final_path)
}

fn write_stages(
    model_path: &Path,
    tmp_path: &Path,
    final_path: &Path,
    model: &ModelFile,
) -> Result<(), AppError> {
    // Stage 1: uncompressed JSON intermediate.
    let file = File::create(model_path)
        .map_err(|e| AppError::artifact_write(model_path, format!("cannot create file: {e}")))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, model)
        .map_err(|e| AppError::artifact_write(model_path, format!("JSON encode failed: {e}")))?;
    std::io::Write::flush(&mut writer)
        .map_err(|e| AppError::artifact_write(model_path, format!("flush failed: {e}")))?;
    drop(writer);

    // Stage 2: gzip the intermediate into a temp file, then rename.
    let input = File::open(model_path)
        .map_err(|e| AppError::artifact_write(model_path, format!("cannot reopen: {e}")))?;
    let output = File::create(tmp_path)
        .map_err(|e| AppError::artifact_write(tmp_path, format!("cannot create temp: {e}")))?;
    let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
    std::io::copy(&mut BufReader::new(input), &mut encoder)
        .map_err(|e| AppError::artifact_write(tmp_path, format!("compression failed: {e}")))?;
    let mut compressed = encoder
        .finish()
        .map_err(|e| AppError::artifact_write(tmp_path, format!("compression failed: {e}")))?;
    std::io::Write::flush(&mut compressed)
        .map_err(|e| AppError::artifact_write(tmp_path, format!("flush failed: {e}")))?;
    drop(compressed);

    std::fs::rename(tmp_path, final_path)
        .map_err(|e| AppError::artifact_write(final_path, format!("commit rename failed: {e}")))?;

    // Stage 3: drop the uncompressed intermediate.
    std::fs::remove_file(model_path).map_err(|e| {
        AppError::artifact_write(model_path, format!("cannot remove intermediate: {e}"))
    })?;

    Ok(())
}

/// Read a committed `.pvc.gz` artifact back into a `ModelFile`.
pub fn read_model(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::artifact_write(path, format!("cannot open artifact: {e}")))?;
    let decoder = GzDecoder::new(BufReader::new(file));
    serde_json::from_reader(decoder)
        .map_err(|e| AppError::artifact_write(path, format!("invalid artifact: {e}")))
}
