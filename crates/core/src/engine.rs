//! Run engine: sizing, timing, precision verification and scoring
//!
//! Each run builds its own [`PrecisionContext`], so concurrent runs at
//! different digit counts never share mutable state. The only shared data
//! is the read-only reference expansion.

use crate::algorithms::Algorithm;
use crate::cancel::CancellationToken;
use crate::compare::{ComparisonResult, compare};
use crate::config::EngineConfig;
use crate::error::PiError;
use crate::policy::{count_for_digits, expected_correct_digits, select_algorithm, validate_digits};
use crate::precision::{Fixed, PrecisionContext, pow10, set_precision};
use crate::reference::{ReferenceValue, reference};
use num_traits::Signed;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Output of one run. Immutable once built.
#[derive(Debug, Clone)]
pub struct ApproximationResult {
    pub algorithm: Algorithm,
    pub requested_digits: u32,
    /// Terms or samples actually used
    pub count: u64,
    pub context: PrecisionContext,
    pub value: Fixed,
    /// Wall time of the computation (excluding the stability probe)
    pub elapsed: Duration,
    /// Fraction digits the count is expected to get right
    pub expected_digits: u32,
}

impl ApproximationResult {
    /// `"3.1415..."` with up to `fraction_digits` digits (truncated)
    pub fn digits(&self, fraction_digits: u32) -> String {
        self.value.to_decimal_string(fraction_digits)
    }

    /// Whether the count was sized to deliver every requested digit
    pub fn meets_request(&self) -> bool {
        self.expected_digits >= self.requested_digits
    }
}

/// Runs algorithms and scores them against the reference
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    reference: &'static ReferenceValue,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, PiError> {
        let reference = reference(config.reference)?;
        Ok(Engine { config, reference })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn reference(&self) -> &'static ReferenceValue {
        self.reference
    }

    pub fn recommend(&self, digits: u32) -> Algorithm {
        crate::policy::recommend(digits)
    }

    /// Run `algorithm` sized for `digits`
    pub fn run(&self, algorithm: Algorithm, digits: u32) -> Result<ApproximationResult, PiError> {
        self.run_cancellable(algorithm, digits, &CancellationToken::new())
    }

    /// Run the recommended algorithm for `digits`
    pub fn run_recommended(&self, digits: u32) -> Result<ApproximationResult, PiError> {
        let (algorithm, count) = select_algorithm(digits)?;
        self.run_with(
            algorithm,
            digits,
            count,
            algorithm.guard_digits(count),
            &CancellationToken::new(),
        )
    }

    /// [`Engine::run`] with a cancellation token
    pub fn run_cancellable(
        &self,
        algorithm: Algorithm,
        digits: u32,
        cancel: &CancellationToken,
    ) -> Result<ApproximationResult, PiError> {
        let count = count_for_digits(algorithm, digits)?;
        self.run_with(algorithm, digits, count, algorithm.guard_digits(count), cancel)
    }

    /// Run with an explicit count and guard digits
    pub fn run_with(
        &self,
        algorithm: Algorithm,
        digits: u32,
        count: u64,
        guard_digits: u32,
        cancel: &CancellationToken,
    ) -> Result<ApproximationResult, PiError> {
        validate_digits(digits)?;
        let ctx = set_precision(digits, guard_digits)?;
        debug!(%algorithm, digits, count, guard_digits, "starting run");

        let start = Instant::now();
        let value = algorithm.approximate(count, &ctx, self.config.monte_carlo_seed, cancel)?;
        let elapsed = start.elapsed();

        if self.config.verify_precision && algorithm.is_deterministic() {
            check_stability(algorithm, count, &ctx, &value, cancel)?;
        }

        info!(
            %algorithm,
            digits,
            count,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "run complete"
        );

        Ok(ApproximationResult {
            algorithm,
            requested_digits: digits,
            count,
            expected_digits: expected_correct_digits(algorithm, count),
            context: ctx,
            value,
            elapsed,
        })
    }

    /// Score `result` against the reference over `digits` digits
    pub fn compare(&self, result: &ApproximationResult, digits: u32) -> ComparisonResult {
        let candidate = result.digits(digits.saturating_add(self.config.tail_digits));
        compare(&candidate, self.reference.as_str(), digits)
    }
}

/// Recompute with one more guard digit; the two values must agree to
/// better than `10^-(digits + 1)`.
fn check_stability(
    algorithm: Algorithm,
    count: u64,
    ctx: &PrecisionContext,
    value: &Fixed,
    cancel: &CancellationToken,
) -> Result<(), PiError> {
    let wider = ctx.with_extra_guard(1);
    let probe = algorithm.approximate(count, &wider, None, cancel)?;

    let drift = (value.rescale(wider.scale()).raw() - probe.raw()).abs();
    // 10^-(digits+1) expressed in ulps of the wider scale
    let tolerance = pow10(ctx.guard_digits());
    if drift >= tolerance {
        warn!(
            %algorithm,
            digits = ctx.requested_digits(),
            guard_digits = ctx.guard_digits(),
            %drift,
            "result unstable under one extra guard digit"
        );
        return Err(PiError::PrecisionInsufficient {
            algorithm,
            requested_digits: ctx.requested_digits(),
            guard_digits: ctx.guard_digits(),
        });
    }
    Ok(())
}
