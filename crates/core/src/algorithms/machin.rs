//! Machin's formula: `pi = 16 arctan(1/5) - 4 arctan(1/239)`
//!
//! The `arctan(1/5)` series dominates: each term shrinks by `1/25`, about
//! 1.4 decimal digits, so `d` digits need roughly `d / 1.4` terms.

use crate::algorithms::require_positive;
use crate::cancel::CancellationToken;
use crate::error::PiError;
use crate::precision::{Fixed, PrecisionContext};
use num_traits::Signed;

/// Taylor series `sum_{k<n} (-1)^k x^(2k+1) / (2k+1)` for `|x| <= 1`.
///
/// Stops early once `x^(2k+1)` truncates to zero, since every remaining
/// term is zero at this precision.
pub fn arctan(
    x: &Fixed,
    term_count: u64,
    ctx: &PrecisionContext,
    cancel: &CancellationToken,
) -> Result<Fixed, PiError> {
    require_positive(term_count, "arctan term count")?;
    if x.raw().abs() > *ctx.unit() {
        return Err(PiError::InvalidArgument(format!(
            "arctan series diverges for |x| > 1 (x = {})",
            x
        )));
    }

    let x_squared = x.mul(x);
    let mut power = x.clone();
    let mut sum = ctx.zero();
    for k in 0..term_count {
        cancel.check()?;
        let term = power.div_int(2 * k + 1);
        if k % 2 == 0 {
            sum += &term;
        } else {
            sum -= &term;
        }
        power = power.mul(&x_squared);
        if power.is_zero() {
            break;
        }
    }
    Ok(sum)
}

/// Pi from Machin's formula with `term_count` terms in each arctan series
pub fn machin(
    term_count: u64,
    ctx: &PrecisionContext,
    cancel: &CancellationToken,
) -> Result<Fixed, PiError> {
    require_positive(term_count, "Machin term count")?;

    let fifth = arctan(&ctx.ratio(1, 5)?, term_count, ctx, cancel)?;
    let small = arctan(&ctx.ratio(1, 239)?, term_count, ctx, cancel)?;

    let mut pi = fifth.mul_int(16);
    pi -= &small.mul_int(4);
    Ok(pi)
}
