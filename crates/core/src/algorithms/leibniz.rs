//! Leibniz series: `pi = 4 * sum_{k>=0} (-1)^k / (2k+1)`
//!
//! The slowest of the four. After `n` terms the partial sum is within about
//! `1/n` of pi, so `n` terms buy roughly `log10(n)` correct digits: 2000
//! terms per requested digit (the sizing policy's ratio) is only safe up to
//! about 4 digits, and every further correct digit costs ten times the
//! terms. Too few terms is a correctness shortfall, never an error; the
//! policy reports the expected digit count alongside the result.

use crate::algorithms::require_positive;
use crate::cancel::CancellationToken;
use crate::error::PiError;
use crate::precision::{Fixed, PrecisionContext};
use num_bigint::BigInt;
use num_traits::Zero;

/// Sum the first `term_count` Leibniz terms at the context's precision.
///
/// Each term is `10^scale / (2k+1)` in fixed point, so summation stays in
/// exact integer arithmetic apart from one truncation per term.
pub fn leibniz(
    term_count: u64,
    ctx: &PrecisionContext,
    cancel: &CancellationToken,
) -> Result<Fixed, PiError> {
    require_positive(term_count, "Leibniz term count")?;

    let unit = ctx.unit();
    let mut sum = BigInt::zero();
    for k in 0..term_count {
        cancel.check()?;
        let term = unit / (2 * k + 1);
        if k % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
    }
    Ok(Fixed::from_raw(sum * 4u32, ctx.scale()))
}
