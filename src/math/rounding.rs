//! Fixed-decimal rounding helpers.
//!
//! The billing rules mix two conventions:
//!
//! - display-stable **rounding** (weights to 3 decimals, rates to 1,
//!   monetary amounts to 2 or 4)
//! - floor-based **truncation** (the GST split and the base value), which
//!   discards the remainder instead of rounding it
//!
//! Both operate on the decimal representation via a power-of-ten scale.

/// Round `value` to `decimals` decimal places (half away from zero).
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Truncate `value` to `decimals` decimal places via `floor`.
///
/// `floor` rather than `trunc`: negative inputs keep moving down, which is
/// what the billing rule prescribes for a negative GST difference.
pub fn trunc_dp(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).floor() / scale
}
