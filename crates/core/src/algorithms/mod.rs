//! The four pi approximation algorithms
//!
//! Each algorithm maps an iteration count (series terms, or samples for
//! Monte Carlo) and a [`PrecisionContext`] to a [`Fixed`] approximation.
//! The set is closed: [`Algorithm`] is matched exhaustively, with no
//! registration mechanism.
//!
//! | Algorithm  | Convergence                 | Deterministic |
//! |------------|-----------------------------|---------------|
//! | Leibniz    | error ~ 1/n                 | yes           |
//! | Machin     | ~1.4 digits per term        | yes           |
//! | Chudnovsky | ~14.18 digits per term      | yes           |
//! | MonteCarlo | error ~ 1/sqrt(n), random   | no            |

pub mod chudnovsky;
pub mod leibniz;
pub mod machin;
pub mod monte_carlo;

pub use chudnovsky::{chudnovsky, chudnovsky_direct};
pub use leibniz::leibniz;
pub use machin::{arctan, machin};
pub use monte_carlo::monte_carlo;

use crate::cancel::CancellationToken;
use crate::error::PiError;
use crate::precision::{Fixed, PrecisionContext, decimal_len};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;

/// Guard digits added on top of `decimal_len(count)` for series methods.
///
/// Every term costs at most one ulp of truncation (a handful for Machin's
/// multiplies and the final Chudnovsky division), so `count` terms stay
/// within `10^decimal_len(count)` ulps. Five more digits keep that error
/// well clear of the last requested digit.
pub const SERIES_GUARD_DIGITS: u32 = 5;

/// Guard digits for Monte Carlo. Its value is one exact ratio.
pub const MONTE_CARLO_GUARD_DIGITS: u32 = 2;

/// A pi approximation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Alternating series `4 * sum (-1)^k / (2k+1)`
    Leibniz,
    /// `16 arctan(1/5) - 4 arctan(1/239)`
    Machin,
    /// Chudnovsky hypergeometric series
    Chudnovsky,
    /// Quarter-circle hit ratio over uniform samples
    MonteCarlo,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Leibniz,
        Algorithm::Machin,
        Algorithm::Chudnovsky,
        Algorithm::MonteCarlo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Leibniz => "Leibniz",
            Algorithm::Machin => "Machin",
            Algorithm::Chudnovsky => "Chudnovsky",
            Algorithm::MonteCarlo => "Monte Carlo",
        }
    }

    /// Whether repeated runs with the same count give the same value
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, Algorithm::MonteCarlo)
    }

    /// Guard digits this algorithm needs when iterating `count` times
    pub fn guard_digits(&self, count: u64) -> u32 {
        match self {
            Algorithm::MonteCarlo => MONTE_CARLO_GUARD_DIGITS,
            _ => decimal_len(count) + SERIES_GUARD_DIGITS,
        }
    }

    /// Run the algorithm for `count` iterations at the context's precision.
    ///
    /// `seed` only affects Monte Carlo; `None` seeds from OS entropy.
    pub fn approximate(
        &self,
        count: u64,
        ctx: &PrecisionContext,
        seed: Option<u64>,
        cancel: &CancellationToken,
    ) -> Result<Fixed, PiError> {
        match self {
            Algorithm::Leibniz => leibniz(count, ctx, cancel),
            Algorithm::Machin => machin(count, ctx, cancel),
            Algorithm::Chudnovsky => chudnovsky(count, ctx, cancel),
            Algorithm::MonteCarlo => {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(s),
                    None => StdRng::from_entropy(),
                };
                monte_carlo(count, ctx, &mut rng, cancel)
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = PiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "leibniz" => Ok(Algorithm::Leibniz),
            "machin" => Ok(Algorithm::Machin),
            "chudnovsky" => Ok(Algorithm::Chudnovsky),
            "montecarlo" => Ok(Algorithm::MonteCarlo),
            _ => Err(PiError::InvalidArgument(format!(
                "unsupported algorithm '{}'",
                s
            ))),
        }
    }
}

/// Shared argument check for every algorithm entry point
pub(crate) fn require_positive(count: u64, what: &str) -> Result<(), PiError> {
    if count == 0 {
        return Err(PiError::InvalidArgument(format!("{} must be positive", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::set_precision;

    #[test]
    fn test_from_str_accepts_common_spellings() {
        assert_eq!("leibniz".parse::<Algorithm>().unwrap(), Algorithm::Leibniz);
        assert_eq!("Machin".parse::<Algorithm>().unwrap(), Algorithm::Machin);
        assert_eq!(
            "CHUDNOVSKY".parse::<Algorithm>().unwrap(),
            Algorithm::Chudnovsky
        );
        assert_eq!(
            "Monte Carlo".parse::<Algorithm>().unwrap(),
            Algorithm::MonteCarlo
        );
        assert_eq!(
            "monte-carlo".parse::<Algorithm>().unwrap(),
            Algorithm::MonteCarlo
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(matches!(
            "ramanujan".parse::<Algorithm>(),
            Err(PiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn test_guard_digits_grow_with_count() {
        assert_eq!(Algorithm::Machin.guard_digits(40), 7);
        assert_eq!(Algorithm::Leibniz.guard_digits(500_000), 11);
        assert_eq!(Algorithm::MonteCarlo.guard_digits(1_000_000), 2);
    }

    #[test]
    fn test_zero_count_is_invalid_for_every_algorithm() {
        let ctx = set_precision(10, 5).unwrap();
        let cancel = CancellationToken::new();
        for alg in Algorithm::ALL {
            let result = alg.approximate(0, &ctx, Some(1), &cancel);
            assert!(
                matches!(result, Err(PiError::InvalidArgument(_))),
                "{} accepted zero count",
                alg
            );
        }
    }

    #[test]
    fn test_cancelled_token_stops_every_algorithm() {
        let ctx = set_precision(10, 5).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        for alg in Algorithm::ALL {
            assert_eq!(
                alg.approximate(10, &ctx, Some(1), &cancel),
                Err(PiError::Cancelled)
            );
        }
    }
}
