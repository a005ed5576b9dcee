//! Algorithm selection and term sizing
//!
//! Every count formula lives here so it can be tuned without touching the
//! summation loops. Each formula starts from the algorithm's convergence
//! rate and adds an explicit margin:
//!
//! | Algorithm  | count for `d` digits   | expected correct digits for `n` |
//! |------------|------------------------|---------------------------------|
//! | Leibniz    | `2000 d`               | `floor(log10 n) - 1`            |
//! | Machin     | `ceil(10d / 14) + 4`   | `floor(1.398 n) - 1`            |
//! | Chudnovsky | `floor(d / 14) + 2`    | `14 n - 1`                      |
//! | MonteCarlo | `20000 d`              | `(floor(log10 n) - 1) / 2`      |
//!
//! Leibniz and Monte Carlo counts do not deliver `d` digits beyond the first
//! few; they exist for side-by-side comparison and are never recommended.
//!
//! For the series methods the distance `|value - pi|` shrinks with every
//! added term. The matched digit prefix does not: a partial sum that
//! overshoots pi truncates differently, so the prefix can drop by a digit
//! between neighbouring counts (Leibniz at 3 -> 4 terms, Machin at 30 -> 31
//! for 60 digits). It only grows reliably across widely spaced counts.

use crate::algorithms::Algorithm;
use crate::error::PiError;

/// Largest supported digit request (the reference table's length)
pub const MAX_DIGITS: u32 = 1000;

/// Requests up to this many digits go to Machin, larger ones to Chudnovsky
pub const MACHIN_MAX_DIGITS: u32 = 50;

pub const LEIBNIZ_TERMS_PER_DIGIT: u64 = 2_000;
pub const MACHIN_MARGIN_TERMS: u64 = 4;
pub const CHUDNOVSKY_DIGITS_PER_TERM: u64 = 14;
pub const CHUDNOVSKY_MARGIN_TERMS: u64 = 2;
pub const MONTE_CARLO_SAMPLES_PER_DIGIT: u64 = 20_000;

/// Reject digit requests outside `1..=MAX_DIGITS`
pub fn validate_digits(digits: u32) -> Result<(), PiError> {
    if digits == 0 || digits > MAX_DIGITS {
        return Err(PiError::InvalidArgument(format!(
            "digit count {} outside supported range 1..={}",
            digits, MAX_DIGITS
        )));
    }
    Ok(())
}

/// Recommended algorithm for a digit request. Never Leibniz or Monte Carlo.
pub fn recommend(digits: u32) -> Algorithm {
    if digits <= MACHIN_MAX_DIGITS {
        Algorithm::Machin
    } else {
        Algorithm::Chudnovsky
    }
}

/// Validated recommendation together with its sized count
pub fn select_algorithm(digits: u32) -> Result<(Algorithm, u64), PiError> {
    let algorithm = recommend(digits);
    let count = count_for_digits(algorithm, digits)?;
    Ok((algorithm, count))
}

/// Terms (or samples) `algorithm` runs for a `digits`-digit request
pub fn count_for_digits(algorithm: Algorithm, digits: u32) -> Result<u64, PiError> {
    validate_digits(digits)?;
    let d = u64::from(digits);
    let count = match algorithm {
        Algorithm::Leibniz => LEIBNIZ_TERMS_PER_DIGIT * d,
        // arctan(1/5) gains log10(25) ~ 1.398 digits per term
        Algorithm::Machin => (10 * d).div_ceil(14) + MACHIN_MARGIN_TERMS,
        Algorithm::Chudnovsky => d / CHUDNOVSKY_DIGITS_PER_TERM + CHUDNOVSKY_MARGIN_TERMS,
        Algorithm::MonteCarlo => MONTE_CARLO_SAMPLES_PER_DIGIT * d,
    };
    Ok(count)
}

/// Fraction digits `count` iterations can be expected to get right.
///
/// A conservative estimate from the convergence rate. For Monte Carlo it
/// is a typical value, not a bound.
pub fn expected_correct_digits(algorithm: Algorithm, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    let estimate = match algorithm {
        Algorithm::Leibniz => u64::from(count.ilog10()).saturating_sub(1),
        Algorithm::Machin => (count * 1398 / 1000).saturating_sub(1),
        Algorithm::Chudnovsky => (count * CHUDNOVSKY_DIGITS_PER_TERM).saturating_sub(1),
        Algorithm::MonteCarlo => u64::from(count.ilog10()).saturating_sub(1) / 2,
    };
    u32::try_from(estimate).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_examples() {
        assert_eq!(recommend(5), Algorithm::Machin);
        assert_eq!(recommend(35), Algorithm::Machin);
        assert_eq!(recommend(60), Algorithm::Chudnovsky);
    }

    #[test]
    fn test_recommend_threshold_boundary() {
        assert_eq!(recommend(MACHIN_MAX_DIGITS - 1), Algorithm::Machin);
        assert_eq!(recommend(MACHIN_MAX_DIGITS), Algorithm::Machin);
        assert_eq!(recommend(MACHIN_MAX_DIGITS + 1), Algorithm::Chudnovsky);
    }

    #[test]
    fn test_recommend_never_picks_slow_methods() {
        for digits in 1..=MAX_DIGITS {
            let alg = recommend(digits);
            assert!(alg != Algorithm::Leibniz && alg != Algorithm::MonteCarlo);
        }
    }

    #[test]
    fn test_validate_digits_range() {
        assert!(validate_digits(0).is_err());
        assert!(validate_digits(1).is_ok());
        assert!(validate_digits(MAX_DIGITS).is_ok());
        assert!(validate_digits(MAX_DIGITS + 1).is_err());
    }

    #[test]
    fn test_select_algorithm_sizes_count() {
        assert_eq!(select_algorithm(50).unwrap(), (Algorithm::Machin, 40));
        assert_eq!(select_algorithm(250).unwrap(), (Algorithm::Chudnovsky, 19));
        assert!(matches!(
            select_algorithm(0),
            Err(PiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_count_formulas() {
        assert_eq!(count_for_digits(Algorithm::Leibniz, 10).unwrap(), 20_000);
        assert_eq!(count_for_digits(Algorithm::Machin, 1).unwrap(), 5);
        assert_eq!(count_for_digits(Algorithm::Machin, 1000).unwrap(), 719);
        assert_eq!(count_for_digits(Algorithm::Chudnovsky, 13).unwrap(), 2);
        assert_eq!(count_for_digits(Algorithm::Chudnovsky, 1000).unwrap(), 73);
        assert_eq!(count_for_digits(Algorithm::MonteCarlo, 10).unwrap(), 200_000);
    }

    #[test]
    fn test_machin_needs_far_fewer_terms_than_leibniz() {
        for digits in [5, 50, 500] {
            let machin = count_for_digits(Algorithm::Machin, digits).unwrap();
            let leibniz = count_for_digits(Algorithm::Leibniz, digits).unwrap();
            assert!(machin * 100 < leibniz);
        }
    }

    #[test]
    fn test_sized_counts_promise_requested_digits() {
        for digits in [1, 10, 50, 51, 250, MAX_DIGITS] {
            for alg in [Algorithm::Machin, Algorithm::Chudnovsky] {
                let count = count_for_digits(alg, digits).unwrap();
                assert!(
                    expected_correct_digits(alg, count) >= digits,
                    "{} at {} digits",
                    alg,
                    digits
                );
            }
        }
    }

    #[test]
    fn test_expected_digits_for_slow_methods() {
        assert_eq!(expected_correct_digits(Algorithm::Leibniz, 10_000), 3);
        assert_eq!(expected_correct_digits(Algorithm::MonteCarlo, 200_000), 2);
        assert_eq!(expected_correct_digits(Algorithm::Chudnovsky, 1), 13);
        assert_eq!(expected_correct_digits(Algorithm::Machin, 0), 0);
    }
}
