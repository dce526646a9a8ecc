use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A hand-written 64-step solo in scale steps, four notes to a bar.
pub const HANDWRITTEN_SOLO: [i32; 64] = [
    0, 1, 0, 0, //
    1, 2, 3, 4, //
    4, 3, 2, 1, //
    0, 0, 0, 0, //
    1, 2, 3, 4, //
    3, 4, 3, 2, //
    0, 2, 3, 4, //
    0, 2, 3, 2, //
    1, 2, 4, 5, //
    6, 5, 6, 5, //
    6, 8, 9, 8, //
    6, 5, 6, 5, //
    4, 3, 2, 1, //
    1, 2, 3, 4, //
    4, 3, 2, 1, //
    0, 0, 0, 0, //
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourParams {
    /// Seconds per generated note.
    pub time_step: f64,
    pub total_time: f64,
    /// Full baseline cycles over `total_time`.
    pub baseline_periods: u32,
    /// Baseline swings between 0 and this many scale steps.
    pub baseline_amplitude: u32,
    /// Jitter is drawn from `0..=jitter_max`.
    pub jitter_max: u32,
}

impl Default for ContourParams {
    fn default() -> Self {
        ContourParams {
            time_step: 0.5,
            total_time: 60.0,
            baseline_periods: 6,
            baseline_amplitude: 7,
            jitter_max: 3,
        }
    }
}

impl ContourParams {
    pub fn num_samples(&self) -> Result<usize> {
        if !(self.time_step > 0.0 && self.time_step.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if !(self.total_time >= 0.0 && self.total_time.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "total time must be non-negative, got {}",
                self.total_time
            )));
        }
        Ok((self.total_time / self.time_step) as usize)
    }

    /// Generated steps reach `baseline_amplitude + jitter_max`, which must
    /// stay a valid `i32` step.
    pub fn check_range(&self) -> Result<()> {
        let top = self.baseline_amplitude as u64 + self.jitter_max as u64;
        if top > i32::MAX as u64 {
            return Err(Error::InvalidArgument(format!(
                "baseline_amplitude + jitter_max must not exceed {}, got {top}",
                i32::MAX
            )));
        }
        Ok(())
    }
}

/// The smooth part of the contour: a sine with `baseline_periods` cycles,
/// lifted into `[0, baseline_amplitude]` and truncated to whole steps.
pub fn baseline(params: &ContourParams) -> Result<Vec<i32>> {
    params.check_range()?;
    let n = params.num_samples()?;
    let amplitude = params.baseline_amplitude as f64;
    let cycles = params.baseline_periods as f64;

    Ok((0..n)
        .map(|i| {
            // Sample times cover [0, total_time) and leave the endpoint out.
            let phase = i as f64 / n as f64;
            let y = (2.0 * PI * cycles * phase).sin();
            ((y + 1.0) * amplitude / 2.0) as i32
        })
        .collect())
}

/// Baseline plus an independent uniform jitter per step.
pub fn generate(params: &ContourParams, rng: &mut fastrand::Rng) -> Result<Vec<i32>> {
    let base = baseline(params)?;
    let jitter_max = params.jitter_max as i32;
    let steps = base
        .into_iter()
        .map(|b| b + rng.i32(0..=jitter_max))
        .collect::<Vec<_>>();

    tracing::debug!(
        steps = steps.len(),
        min = steps.iter().min().copied(),
        max = steps.iter().max().copied(),
        "generated contour"
    );
    Ok(steps)
}
