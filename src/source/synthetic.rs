//! Deterministic synthetic footage.
//!
//! Each pixel follows a smooth per-pixel brightness ramp plus Gaussian noise,
//! so fitted quadratics have something real to approximate while staying fully
//! reproducible from a seed. Useful for tests and for generating `.rgbv`
//! fixtures via `pvc synth`.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Frame;
use crate::error::AppError;
use crate::source::FrameSource;

/// Standard deviation of the per-sample intensity noise.
const NOISE_SIGMA: f64 = 4.0;

/// Seeded in-memory frame source.
pub struct SyntheticSource {
    id: String,
    width: u32,
    height: u32,
    frame_count: usize,
    yielded: usize,
    rng: StdRng,
    noise: Normal<f64>,
    /// Per-pixel, per-channel quadratic parameters driving the ramp.
    curves: Vec<[(f64, f64, f64); 3]>,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32, frame_count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let pixel_count = width as usize * height as usize;

        let curves = (0..pixel_count)
            .map(|_| {
                let mut channel_curve = || {
                    // Small curvature and slope keep values inside u8 range
                    // over typical synthetic clip lengths.
                    let a = rng.gen_range(-0.05..0.05);
                    let b = rng.gen_range(-1.0..1.0);
                    let c = rng.gen_range(40.0..215.0);
                    (a, b, c)
                };
                [channel_curve(), channel_curve(), channel_curve()]
            })
            .collect();

        Self {
            id: format!("synthetic-{seed}"),
            width,
            height,
            frame_count,
            yielded: 0,
            rng,
            noise: Normal::new(0.0, NOISE_SIGMA).expect("valid sigma"),
            curves,
        }
    }

    /// Drain the source into a frame vector (fixture generation).
    pub fn collect_frames(mut self) -> Result<Vec<Frame>, AppError> {
        let mut frames = Vec::with_capacity(self.frame_count);
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }
        Ok(frames)
    }
}

impl FrameSource for SyntheticSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn declared_frames(&self) -> usize {
        self.frame_count
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, AppError> {
        if self.yielded >= self.frame_count {
            return Ok(None);
        }

        let t = self.yielded as f64;
        let mut data = Vec::with_capacity(self.curves.len() * 3);
        for curve in &self.curves {
            for &(a, b, c) in curve {
                let level = a * t * t + b * t + c + self.noise.sample(&mut self.rng);
                data.push(level.round().clamp(0.0, 255.0) as u8);
            }
        }

        self.yielded += 1;
        Ok(Some(Frame::new(self.width, self.height, data)))
    }
}
