//! Precision context and fixed-point decimal values
//!
//! Every algorithm works on [`Fixed`] values: a `BigInt` mantissa with an
//! implied decimal scale, so `raw = 314159` at scale 5 means `3.14159`.
//! The scale comes from a [`PrecisionContext`], which is a plain value owned
//! by a single run. Two runs at different precisions never share one.
//!
//! All divisions truncate toward zero. Each truncation loses less than one
//! unit in the last place (ulp), which is what the guard digits absorb.

use crate::error::PiError;
use num_bigint::BigInt;
use num_integer::Roots;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{AddAssign, SubAssign};

/// `10^exp` as a big integer
pub fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

/// Number of decimal digits in `n` (`decimal_len(0) == 1`)
pub fn decimal_len(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |l| l + 1)
}

/// `n!` as a big integer
pub fn factorial(n: u64) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, k| acc * k)
}

/// Working precision for one computation.
///
/// The scale is `requested_digits + guard_digits` fraction digits. Undersized
/// guard digits do not fail here; they surface as unstable trailing digits,
/// which the engine's stability check reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionContext {
    requested_digits: u32,
    guard_digits: u32,
    /// `10^scale`, the fixed-point representation of 1
    unit: BigInt,
}

/// Build a context holding `requested_digits + guard_digits` fraction digits
pub fn set_precision(requested_digits: u32, guard_digits: u32) -> Result<PrecisionContext, PiError> {
    if requested_digits == 0 {
        return Err(PiError::InvalidArgument(
            "requested digits must be positive".to_string(),
        ));
    }
    let scale = requested_digits.checked_add(guard_digits).ok_or_else(|| {
        PiError::InvalidArgument(format!(
            "precision overflow: {} + {} digits",
            requested_digits, guard_digits
        ))
    })?;
    Ok(PrecisionContext {
        requested_digits,
        guard_digits,
        unit: pow10(scale),
    })
}

impl PrecisionContext {
    pub fn requested_digits(&self) -> u32 {
        self.requested_digits
    }

    pub fn guard_digits(&self) -> u32 {
        self.guard_digits
    }

    /// Total fraction digits carried by values in this context
    pub fn scale(&self) -> u32 {
        self.requested_digits + self.guard_digits
    }

    /// Fixed-point representation of 1
    pub fn unit(&self) -> &BigInt {
        &self.unit
    }

    /// Same requested digits with `extra` more guard digits
    pub fn with_extra_guard(&self, extra: u32) -> PrecisionContext {
        let guard_digits = self.guard_digits + extra;
        PrecisionContext {
            requested_digits: self.requested_digits,
            guard_digits,
            unit: pow10(self.requested_digits + guard_digits),
        }
    }

    pub fn zero(&self) -> Fixed {
        Fixed::from_raw(BigInt::zero(), self.scale())
    }

    pub fn integer(&self, n: i64) -> Fixed {
        Fixed::from_raw(&self.unit * n, self.scale())
    }

    /// `num / den`, truncated to the context scale
    pub fn ratio(&self, num: impl Into<BigInt>, den: impl Into<BigInt>) -> Result<Fixed, PiError> {
        let num: BigInt = num.into();
        let den: BigInt = den.into();
        if den.is_zero() {
            return Err(PiError::InvalidArgument("ratio with zero denominator".to_string()));
        }
        Ok(Fixed::from_raw(num * &self.unit / den, self.scale()))
    }

    /// `sqrt(n)`, truncated to the context scale
    pub fn sqrt(&self, n: u64) -> Fixed {
        let radicand = &self.unit * &self.unit * n;
        Fixed::from_raw(Roots::sqrt(&radicand), self.scale())
    }
}

/// A decimal fixed-point number: `raw * 10^-scale`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixed {
    raw: BigInt,
    scale: u32,
}

impl Fixed {
    pub fn from_raw(raw: BigInt, scale: u32) -> Self {
        Fixed { raw, scale }
    }

    pub fn raw(&self) -> &BigInt {
        &self.raw
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Product, truncated back to this value's scale
    pub fn mul(&self, other: &Fixed) -> Fixed {
        debug_assert_eq!(self.scale, other.scale, "mixed-scale multiply");
        Fixed::from_raw(&self.raw * &other.raw / pow10(other.scale), self.scale)
    }

    /// Quotient, truncated to this value's scale
    pub fn div(&self, other: &Fixed) -> Result<Fixed, PiError> {
        if other.is_zero() {
            return Err(PiError::InvalidArgument("division by zero".to_string()));
        }
        Ok(Fixed::from_raw(
            &self.raw * pow10(other.scale) / &other.raw,
            self.scale,
        ))
    }

    /// Divide by a small positive integer. Callers guarantee `d > 0`.
    pub fn div_int(&self, d: u64) -> Fixed {
        debug_assert!(d > 0, "div_int by zero");
        Fixed::from_raw(&self.raw / d, self.scale)
    }

    /// Multiply by a small integer (exact)
    pub fn mul_int(&self, k: i64) -> Fixed {
        Fixed::from_raw(&self.raw * k, self.scale)
    }

    /// Re-express at another scale, truncating when narrowing
    pub fn rescale(&self, scale: u32) -> Fixed {
        let raw = if scale >= self.scale {
            &self.raw * pow10(scale - self.scale)
        } else {
            &self.raw / pow10(self.scale - scale)
        };
        Fixed::from_raw(raw, scale)
    }

    /// Nearest `f64`, from the leading 17 significant digits
    pub fn to_f64(&self) -> f64 {
        let shift = self.scale.saturating_sub(17);
        let head = &self.raw / pow10(shift);
        let head = head.to_f64().unwrap_or(f64::NAN);
        head / 10f64.powi((self.scale - shift) as i32)
    }

    /// Render as `"<int>.<fraction>"` with at most `fraction_digits` digits
    /// after the point (never more than the scale holds). Truncates.
    pub fn to_decimal_string(&self, fraction_digits: u32) -> String {
        let scale = self.scale as usize;
        let digits = self.raw.abs().to_string();
        let padded = if digits.len() <= scale {
            let mut p = "0".repeat(scale + 1 - digits.len());
            p.push_str(&digits);
            p
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        let keep = (fraction_digits as usize).min(scale);

        let mut out = String::with_capacity(int_part.len() + keep + 2);
        if self.raw.is_negative() {
            out.push('-');
        }
        out.push_str(int_part);
        if keep > 0 {
            out.push('.');
            out.push_str(&frac_part[..keep]);
        }
        out
    }
}

impl AddAssign<&Fixed> for Fixed {
    fn add_assign(&mut self, rhs: &Fixed) {
        debug_assert_eq!(self.scale, rhs.scale, "mixed-scale add");
        self.raw += &rhs.raw;
    }
}

impl SubAssign<&Fixed> for Fixed {
    fn sub_assign(&mut self, rhs: &Fixed) {
        debug_assert_eq!(self.scale, rhs.scale, "mixed-scale subtract");
        self.raw -= &rhs.raw;
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_precision_rejects_zero_digits() {
        assert!(matches!(
            set_precision(0, 5),
            Err(PiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_context_scale_and_unit() {
        let ctx = set_precision(10, 4).unwrap();
        assert_eq!(ctx.scale(), 14);
        assert_eq!(ctx.unit(), &pow10(14));

        let wider = ctx.with_extra_guard(1);
        assert_eq!(wider.requested_digits(), 10);
        assert_eq!(wider.guard_digits(), 5);
        assert_eq!(wider.unit(), &pow10(15));
    }

    #[test]
    fn test_decimal_len() {
        assert_eq!(decimal_len(0), 1);
        assert_eq!(decimal_len(9), 1);
        assert_eq!(decimal_len(10), 2);
        assert_eq!(decimal_len(2_000_000), 7);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), BigInt::one());
        assert_eq!(factorial(1), BigInt::one());
        assert_eq!(factorial(10), BigInt::from(3_628_800u64));
        assert_eq!(factorial(20), BigInt::from(2_432_902_008_176_640_000u64));
    }

    #[test]
    fn test_ratio_truncates() {
        let ctx = set_precision(5, 0).unwrap();
        assert_eq!(ctx.ratio(1, 3).unwrap().to_string(), "0.33333");
        assert_eq!(ctx.ratio(-2, 3).unwrap().to_string(), "-0.66666");
        assert!(ctx.ratio(1, 0).is_err());
    }

    #[test]
    fn test_sqrt() {
        let ctx = set_precision(20, 0).unwrap();
        assert_eq!(ctx.sqrt(2).to_string(), "1.41421356237309504880");
        assert_eq!(ctx.sqrt(10005).to_decimal_string(8), "100.02499687");
    }

    #[test]
    fn test_mul_and_div() {
        let ctx = set_precision(6, 0).unwrap();
        let a = ctx.ratio(3, 2).unwrap();
        let b = ctx.integer(4);
        assert_eq!(a.mul(&b).to_string(), "6.000000");
        assert_eq!(b.div(&a).unwrap().to_string(), "2.666666");
        assert!(a.div(&ctx.zero()).is_err());
        assert_eq!(b.div_int(3).to_string(), "1.333333");
        assert_eq!(a.mul_int(-2).to_string(), "-3.000000");
    }

    #[test]
    fn test_add_sub_assign() {
        let ctx = set_precision(3, 0).unwrap();
        let mut x = ctx.integer(1);
        x += &ctx.ratio(1, 4).unwrap();
        assert_eq!(x.to_string(), "1.250");
        x -= &ctx.integer(2);
        assert_eq!(x.to_string(), "-0.750");
    }

    #[test]
    fn test_to_decimal_string_padding_and_truncation() {
        let small = Fixed::from_raw(BigInt::from(5), 4);
        assert_eq!(small.to_string(), "0.0005");
        assert_eq!(small.to_decimal_string(2), "0.00");

        let pi = Fixed::from_raw(BigInt::from(314159), 5);
        assert_eq!(pi.to_decimal_string(3), "3.141");
        assert_eq!(pi.to_decimal_string(0), "3");
        // Never renders more digits than the scale carries
        assert_eq!(pi.to_decimal_string(50), "3.14159");
    }

    #[test]
    fn test_rescale() {
        let x = Fixed::from_raw(BigInt::from(314159), 5);
        assert_eq!(x.rescale(2).to_string(), "3.14");
        assert_eq!(x.rescale(7).to_string(), "3.1415900");
    }

    #[test]
    fn test_to_f64() {
        let ctx = set_precision(40, 0).unwrap();
        let third = ctx.ratio(1, 3).unwrap();
        assert!((third.to_f64() - 1.0 / 3.0).abs() < 1e-15);
        let x = Fixed::from_raw(BigInt::from(314159), 5);
        assert!((x.to_f64() - 3.14159).abs() < 1e-12);
    }
}
