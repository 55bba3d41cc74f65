//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the color plane enum (`Channel`)
//! - decoded frames as supplied by a frame source (`Frame`)
//! - run configuration derived from CLI flags (`EncodeConfig`)
//! - per-video and per-batch outcome summaries

pub mod types;

pub use types::*;
