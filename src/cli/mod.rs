//! Command-line parsing for the polynomial video encoder.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_DEGREE;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pvc", version, about = "Polynomial video coefficient encoder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode every matching video in a directory into .pvc.gz model artifacts.
    Encode(EncodeArgs),
    /// Print a summary of a previously committed model artifact.
    Inspect(InspectArgs),
    /// Generate a deterministic synthetic raw video for testing.
    Synth(SynthArgs),
}

/// Options for batch encoding.
#[derive(Debug, Parser, Clone)]
pub struct EncodeArgs {
    /// Directory containing input videos.
    #[arg(short = 'd', long)]
    pub dir: PathBuf,

    /// File extension to match (case-insensitive).
    #[arg(long, default_value = "rgbv")]
    pub ext: String,

    /// Write artifacts to this directory instead of next to the inputs.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Polynomial degree fitted per pixel.
    #[arg(long, default_value_t = DEFAULT_DEGREE)]
    pub degree: usize,

    /// Suppress the per-channel progress meter.
    #[arg(long)]
    pub quiet: bool,
}

/// Options for inspecting an artifact.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// A .pvc.gz file produced by `pvc encode`.
    pub artifact: PathBuf,
}

/// Options for synthetic video generation.
#[derive(Debug, Parser)]
pub struct SynthArgs {
    /// Destination .rgbv file.
    #[arg(long)]
    pub out: PathBuf,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 16)]
    pub width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 12)]
    pub height: u32,

    /// Number of frames to generate.
    #[arg(long, default_value_t = 24)]
    pub frames: usize,

    /// Random seed driving the per-pixel curves.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
