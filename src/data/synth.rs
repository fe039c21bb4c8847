//! Synthetic point chains sampled from a known cubic.
//!
//! Points are taken at `u_i = (i / (n - 1))^warp` along the segment with
//! control points `(v0, v0 + α0·t1, v3 + α1·t2, v3)`. A warp other than 1
//! makes the spacing uneven, which is what the Newton reparameterization has
//! to recover from. Optional Gaussian noise (seeded, reproducible) perturbs
//! interior points; endpoints stay exact.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::bezier::Segment;
use crate::domain::{Geometry, Point2};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct SynthSpec {
    pub geometry: Geometry,
    pub alpha: [f64; 2],
    pub count: usize,
    pub warp: f64,
    /// Standard deviation of the per-coordinate noise (0 = none).
    pub noise: f64,
    pub seed: u64,
}

impl SynthSpec {
    /// The segment the points are sampled from.
    pub fn segment(&self) -> Segment {
        Segment::new(self.geometry.control_points(self.alpha), self.count)
    }
}

pub fn synthesize(spec: &SynthSpec) -> Result<Vec<Point2>, AppError> {
    if spec.count < 2 {
        return Err(AppError::new(2, format!("Need at least 2 points to synthesize (got {}).", spec.count)));
    }
    if !(spec.warp.is_finite() && spec.warp > 0.0) {
        return Err(AppError::new(2, format!("Warp exponent must be > 0 (got {}).", spec.warp)));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::new(2, format!("Noise must be >= 0 (got {}).", spec.noise)));
    }

    let segment = spec.segment();
    let last = spec.count - 1;
    let mut points: Vec<Point2> = (0..spec.count)
        .map(|i| segment.eval((i as f64 / last as f64).powf(spec.warp)))
        .collect();

    if spec.noise > 0.0 {
        let mut rng = StdRng::seed_from_u64(spec.seed);
        let normal = Normal::new(0.0, spec.noise)
            .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
        for p in points.iter_mut().take(last).skip(1) {
            p.x += normal.sample(&mut rng);
            p.y += normal.sample(&mut rng);
        }
    }

    Ok(points)
}
