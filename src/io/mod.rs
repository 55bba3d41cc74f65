//! Input/output helpers.
//!
//! - model artifact encode/compress/commit and read-back (`artifact`)
//! - raw video files live in `source::raw`, next to their decoding

pub mod artifact;

pub use artifact::*;
