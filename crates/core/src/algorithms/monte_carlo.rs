//! Monte Carlo estimate: `pi ~ 4 * hits / samples`
//!
//! Samples uniform points in `[0,1)^2` and counts those with
//! `x^2 + y^2 <= 1`. The standard error is about `1.64 / sqrt(samples)`,
//! so a million samples buy around three digits and no sample count makes
//! the result digit-exact. Coordinates are `f64`; the accuracy ceiling is
//! far below what double precision can resolve.

use crate::algorithms::require_positive;
use crate::cancel::CancellationToken;
use crate::error::PiError;
use crate::precision::{Fixed, PrecisionContext};
use rand::Rng;

/// Estimate pi from `sample_count` points drawn from `rng`
pub fn monte_carlo<R: Rng>(
    sample_count: u64,
    ctx: &PrecisionContext,
    rng: &mut R,
    cancel: &CancellationToken,
) -> Result<Fixed, PiError> {
    require_positive(sample_count, "Monte Carlo sample count")?;

    let mut inside: u64 = 0;
    for _ in 0..sample_count {
        cancel.check()?;
        let x: f64 = rng.gen_range(0.0..1.0);
        let y: f64 = rng.gen_range(0.0..1.0);
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }

    ctx.ratio(4 * inside, sample_count)
}
