//! Per-channel fitting and cross-channel orchestration.
//!
//! Responsibilities:
//!
//! - fit every pixel of one channel to a polynomial (parallel, `fitter`)
//! - run the three channel workers concurrently and assemble results in
//!   canonical (red, green, blue) order (`orchestrator`)

pub mod fitter;
pub mod orchestrator;

pub use fitter::*;
pub use orchestrator::*;

use crate::domain::Channel;

/// Progress notifications emitted while fitting.
///
/// `done` is a monotonically increasing completed-pixel count out of `total`.
/// Reporting is cosmetic: implementations must not affect the result, and the
/// callback is invoked from worker threads (hence `Sync`).
pub type ProgressFn<'a> = dyn Fn(Channel, usize, usize) + Sync + 'a;

/// Progress sink that discards everything.
pub fn no_progress(_: Channel, _: usize, _: usize) {}
