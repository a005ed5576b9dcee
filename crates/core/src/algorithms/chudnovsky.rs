//! Chudnovsky series
//!
//! ```text
//! 1/pi = 12 * sum_k (-1)^k (6k)! (545140134k + 13591409)
//!                    / ((3k)! (k!)^3 640320^(3k + 3/2))
//! ```
//!
//! Rewritten as `pi = 426880 sqrt(10005) / S` with
//! `S = sum_k M_k L_k / X_k`, where `M_k = (6k)! / ((3k)! (k!)^3)`,
//! `L_k = 545140134k + 13591409` and `X_k = (-640320^3)^k`.
//! Each term adds about 14.18 correct digits.
//!
//! Two formulations are provided. [`chudnovsky`] carries `M`, `L`, `X` and
//! `K` forward between terms with exact integer updates. [`chudnovsky_direct`]
//! rebuilds every factorial from scratch and exists to cross-check the
//! recurrence: each term is the same rational number truncated the same
//! way, so both produce bit-identical fixed-point results.

use crate::algorithms::require_positive;
use crate::cancel::CancellationToken;
use crate::error::PiError;
use crate::precision::{Fixed, PrecisionContext, factorial};
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// `426880 = 640320^(3/2) / (12 sqrt(10005))`
const C_FACTOR: i64 = 426_880;
const C_RADICAND: u64 = 10_005;
const L_BASE: u64 = 13_591_409;
const L_STEP: u64 = 545_140_134;
/// `-640320^3`
const X_STEP: i64 = -262_537_412_640_768_000;

/// Incremental recurrence over `term_count` terms
pub fn chudnovsky(
    term_count: u64,
    ctx: &PrecisionContext,
    cancel: &CancellationToken,
) -> Result<Fixed, PiError> {
    require_positive(term_count, "Chudnovsky term count")?;
    cancel.check()?;

    let unit = ctx.unit();
    let mut m = BigInt::one();
    let mut l = BigInt::from(L_BASE);
    let mut x = BigInt::one();
    let mut k = BigInt::from(6u32);
    let mut sum = &l * unit;

    for i in 1..term_count {
        cancel.check()?;
        // M_i = M_{i-1} (K^3 - 16K) / i^3, exact
        let i_cubed = BigInt::from(i).pow(3);
        m = (&k * &k * &k - &k * 16u32) * &m / i_cubed;
        l += L_STEP;
        x *= X_STEP;
        sum += &m * &l * unit / &x;
        k += 12u32;
    }

    finish(sum, ctx)
}

/// Direct factorial-ratio form over `term_count` terms
pub fn chudnovsky_direct(
    term_count: u64,
    ctx: &PrecisionContext,
    cancel: &CancellationToken,
) -> Result<Fixed, PiError> {
    require_positive(term_count, "Chudnovsky term count")?;
    cancel.check()?;

    let unit = ctx.unit();
    let x_step = BigInt::from(X_STEP);
    let mut sum = BigInt::zero();

    for k in 0..term_count {
        cancel.check()?;
        let exponent = u32::try_from(k).map_err(|_| {
            PiError::InvalidArgument(format!("Chudnovsky term count {} too large", term_count))
        })?;
        let numerator = factorial(6 * k) * (L_STEP * k + L_BASE) * unit;
        let denominator = factorial(3 * k) * factorial(k).pow(3) * x_step.pow(exponent);
        sum += numerator / denominator;
    }

    finish(sum, ctx)
}

/// `426880 sqrt(10005) / S`, with `sum_raw` the fixed-point raw value of `S`
fn finish(sum_raw: BigInt, ctx: &PrecisionContext) -> Result<Fixed, PiError> {
    let constant = ctx.sqrt(C_RADICAND).mul_int(C_FACTOR);
    constant.div(&Fixed::from_raw(sum_raw, ctx.scale()))
}
