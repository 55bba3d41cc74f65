//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - enumerates input videos into an explicit ordered list
//! - runs the encode pipeline once per video, skipping failures
//! - prints progress, summaries, and diagnostics

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Command, EncodeArgs, InspectArgs, SynthArgs};
use crate::domain::{BatchSummary, EncodeConfig};
use crate::error::AppError;
use crate::io::{model_path_for, read_model};
use crate::report::ProgressMeter;
use crate::source::{write_raw_video, RawVideoSource, SyntheticSource};

pub mod pipeline;

/// Entry point for the `pvc` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Encode(args) => handle_encode(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Synth(args) => handle_synth(args),
    }
}

fn handle_encode(args: EncodeArgs) -> Result<(), AppError> {
    let config = encode_config_from_args(&args);
    let videos = enumerate_videos(&args.dir, &args.ext)?;

    if videos.is_empty() {
        println!("No .{} files found in '{}'.", args.ext, args.dir.display());
        return Ok(());
    }

    let summary = run_batch(&videos, &config);
    println!("{}", crate::report::format_batch_summary(&summary));
    Ok(())
}

/// Process an explicit ordered list of videos, one at a time.
///
/// Every per-video failure is reported and skipped; no failure aborts the
/// batch. A video counts as processed only after its artifact is committed.
pub fn run_batch(videos: &[PathBuf], config: &EncodeConfig) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for video in videos {
        match encode_one(video, config) {
            Ok(()) => summary.processed += 1,
            Err(err) => {
                eprintln!("Skipping '{}': {err}", video.display());
                summary.failed += 1;
            }
        }
    }

    summary
}

fn encode_one(video: &Path, config: &EncodeConfig) -> Result<(), AppError> {
    let mut source = RawVideoSource::open(video)?;
    let model_path = model_path_for(video, config.out_dir.as_deref());

    let meter = ProgressMeter::new(!config.quiet);
    let result = pipeline::encode_video(&mut source, &model_path, config, &|channel, done, total| {
        meter.update(channel, done, total)
    });
    meter.finish();

    let output = result?;
    println!("{}", crate::report::format_encode_summary(&output, config.degree));
    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    let model = read_model(&args.artifact)?;

    println!("=== pvc model '{}' ===", args.artifact.display());
    println!("Pixels per channel: {}", model.pixel_count());
    let degree = model
        .red
        .first()
        .map(|row| row.len().saturating_sub(1))
        .unwrap_or(0);
    println!("Polynomial degree: {degree}");
    for (name, rows) in [
        ("red", &model.red),
        ("green", &model.green),
        ("blue", &model.blue),
    ] {
        match rows.first() {
            Some(row) => println!("{name}: {} rows, pixel 0 = {}", rows.len(), fmt_row(row)),
            None => println!("{name}: empty"),
        }
    }
    Ok(())
}

fn handle_synth(args: SynthArgs) -> Result<(), AppError> {
    let source = SyntheticSource::new(args.width, args.height, args.frames, args.seed);
    let frames = source.collect_frames()?;
    write_raw_video(&args.out, args.width, args.height, &frames)?;
    println!(
        "Wrote {} frames of {}x{} to '{}' (seed {}).",
        frames.len(),
        args.width,
        args.height,
        args.out.display(),
        args.seed
    );
    Ok(())
}

pub fn encode_config_from_args(args: &EncodeArgs) -> EncodeConfig {
    EncodeConfig {
        degree: args.degree,
        out_dir: args.out.clone(),
        quiet: args.quiet,
    }
}

/// Build the ordered input list for a batch run.
///
/// Sorted by file name so runs are deterministic regardless of directory
/// iteration order.
fn enumerate_videos(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, AppError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| AppError::config(format!("Cannot read directory '{}': {e}", dir.display())))?;

    let mut videos: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
        })
        .collect();

    videos.sort();
    Ok(videos)
}

fn fmt_row(row: &[f64]) -> String {
    let parts: Vec<String> = row.iter().map(|c| format!("{c:.4}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_clip(path: &Path, seed: u64, frames: usize) {
        let clip = SyntheticSource::new(3, 2, frames, seed)
            .collect_frames()
            .unwrap();
        write_raw_video(path, 3, 2, &clip).unwrap();
    }

    #[test]
    fn enumeration_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write_clip(&dir.path().join("b.rgbv"), 1, 3);
        write_clip(&dir.path().join("a.rgbv"), 2, 3);
        std::fs::write(dir.path().join("notes.txt"), b"not a video").unwrap();

        let videos = enumerate_videos(dir.path(), "rgbv").unwrap();
        let names: Vec<_> = videos
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.rgbv", "b.rgbv"]);
    }

    #[test]
    fn batch_skips_broken_videos_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        write_clip(&dir.path().join("a.rgbv"), 1, 4);
        // Not a valid RGBV file at all.
        std::fs::write(dir.path().join("b.rgbv"), b"garbage").unwrap();
        write_clip(&dir.path().join("c.rgbv"), 2, 4);

        let config = EncodeConfig::default();
        let videos = enumerate_videos(dir.path(), "rgbv").unwrap();
        let summary = run_batch(&videos, &config);

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);
        assert!(dir.path().join("a.pvc.gz").exists());
        assert!(!dir.path().join("b.pvc.gz").exists());
        assert!(dir.path().join("c.pvc.gz").exists());
        // No uncompressed intermediates survive.
        assert!(!dir.path().join("a.pvc").exists());
        assert!(!dir.path().join("c.pvc").exists());
    }
}
