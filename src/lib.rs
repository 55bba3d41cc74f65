//! `pvc-encode` library crate.
//!
//! A lossy temporal video encoder: for every pixel position and color channel
//! it fits a low-degree polynomial over the frame-index axis and persists the
//! coefficients instead of the raw frames.
//!
//! The binary (`pvc`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future decoders or services)
//! - code stays easy to navigate as the project grows
//!
//! Data flow:
//!
//! ```text
//! frame source -> series (per-pixel time series per channel)
//!              -> fit (three concurrent channel workers, least squares)
//!              -> io (JSON artifact, gzip envelope, atomic commit)
//! ```

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;
pub mod series;
pub mod source;
