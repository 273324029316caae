//! Rate axis sampling.
//!
//! The search walks the gold-rate range on a fixed grid:
//!
//! - the step widens with the range so wide ranges stay cheap to scan
//! - every sampled rate is rounded to 1 decimal before use, matching the
//!   precision at which rates appear on a bill
//! - generation is deterministic given the same range

use crate::error::AppError;
use crate::math::round_dp;

/// Step used when the range is wider than `RANGE_WIDE`.
pub const STEP_WIDE: f64 = 0.5;
/// Step used when the range is wider than `RANGE_MEDIUM` but not wide.
pub const STEP_MEDIUM: f64 = 0.2;
/// Default fine step.
pub const STEP_FINE: f64 = 0.1;
/// Range width above which `STEP_WIDE` applies.
pub const RANGE_WIDE: f64 = 200.0;
/// Range width above which `STEP_MEDIUM` applies.
pub const RANGE_MEDIUM: f64 = 50.0;
/// Hard cap on grid size; wider requests are refused rather than scanned.
pub const MAX_RATE_SAMPLES: usize = 1_000_000;

/// Resolve the sampling step for a given range width.
pub fn rate_step(rate_range: f64) -> f64 {
    if rate_range > RANGE_WIDE {
        STEP_WIDE
    } else if rate_range > RANGE_MEDIUM {
        STEP_MEDIUM
    } else {
        STEP_FINE
    }
}

/// Generate the sampled rates from `min_rate` to `max_rate` inclusive, each
/// rounded to 1 decimal place.
pub fn rate_grid(min_rate: f64, max_rate: f64) -> Result<Vec<f64>, AppError> {
    if !(min_rate.is_finite() && max_rate.is_finite() && min_rate > 0.0 && max_rate > min_rate) {
        return Err(AppError::new(
            2,
            format!("Invalid rate range: min={min_rate}, max={max_rate} (must be finite, >0, and max>min)."),
        ));
    }

    let step = rate_step(max_rate - min_rate);
    let implied = ((max_rate - min_rate) / step) as usize + 1;
    if implied > MAX_RATE_SAMPLES {
        return Err(AppError::new(
            2,
            format!("Rate range too wide: {implied} samples exceed the {MAX_RATE_SAMPLES} cap."),
        ));
    }

    let mut out = Vec::with_capacity(implied + 1);
    for i in 0..=implied {
        let rate = min_rate + i as f64 * step;
        // The upper bound is inclusive; the epsilon absorbs `min + i*step`
        // drifting one ulp past `max`.
        if rate > max_rate + step * 1e-9 {
            break;
        }
        out.push(round_dp(rate, 1));
    }
    Ok(out)
}
