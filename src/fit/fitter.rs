//! Channel fit worker.
//!
//! Drives the polynomial fitter over every pixel position of one channel and
//! accumulates the coefficient rows, index-aligned with the input series.
//! Pixels are independent, so the sweep runs on rayon; the indexed collect
//! keeps output order deterministic regardless of execution order.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::domain::Channel;
use crate::error::AppError;
use crate::math::polyfit;
use crate::series::ChannelSeries;

/// Fitted coefficients for every pixel of one channel.
///
/// Rows are in row-major pixel order, each `degree + 1` long with the highest
/// power first. Immutable once returned by the worker.
#[derive(Debug, Clone)]
pub struct ChannelFit {
    channel: Channel,
    coeffs: Vec<Vec<f64>>,
}

impl ChannelFit {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn coeffs(&self) -> &[Vec<f64>] {
        &self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<Vec<f64>> {
        self.coeffs
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }
}

/// Fit one pixel's sample sequence.
///
/// A zero-length sequence cannot be fitted at all; a failed solve is a
/// numerical error. Both abort the channel rather than substituting a
/// degenerate row.
pub fn fit_pixel(
    channel: Channel,
    pixel: usize,
    sequence: &[u8],
    degree: usize,
) -> Result<Vec<f64>, AppError> {
    if sequence.is_empty() {
        return Err(AppError::EmptySequence { channel, pixel });
    }
    polyfit(sequence, degree).ok_or(AppError::FitNumerical { channel, pixel })
}

/// Fit every pixel position of one channel.
///
/// An empty input collection (no pixels, or zero-length sequences from a
/// 0/1-frame video) returns an empty `ChannelFit` without invoking the fitter.
/// Progress is reported as a completed count out of `pixel_count`.
pub fn fit_channel(
    series: &ChannelSeries,
    degree: usize,
    progress: &(dyn Fn(usize, usize) + Sync),
) -> Result<ChannelFit, AppError> {
    let channel = series.channel();
    let total = series.pixel_count();

    if total == 0 || series.len() == 0 {
        return Ok(ChannelFit {
            channel,
            coeffs: Vec::new(),
        });
    }

    let done = AtomicUsize::new(0);
    let coeffs: Vec<Vec<f64>> = (0..total)
        .into_par_iter()
        .map(|p| {
            let row = fit_pixel(channel, p, series.sequence(p), degree)?;
            let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
            progress(completed, total);
            Ok(row)
        })
        .collect::<Result<_, AppError>>()?;

    Ok(ChannelFit { channel, coeffs })
}
