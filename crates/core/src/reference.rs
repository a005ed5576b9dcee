//! Trusted reference expansion of pi
//!
//! Two interchangeable sources, both loaded at most once per process and
//! read-only afterwards:
//!
//! - `Literal`: the expansion embedded at build time (`pi_reference.txt`)
//! - `Computed`: a Chudnovsky run at `MAX_DIGITS + 10` digits
//!
//! Both hold `"3."` followed by exactly [`MAX_DIGITS`] fraction digits, so
//! no supported request can outrun the reference.

use crate::algorithms::{Algorithm, chudnovsky};
use crate::cancel::CancellationToken;
use crate::error::PiError;
use crate::policy::{MAX_DIGITS, count_for_digits};
use crate::precision::set_precision;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::debug;

/// Embedded expansion: `"3."` and 1000 fraction digits
static LITERAL_DIGITS: &str = include_str!("pi_reference.txt");

/// Digits computed beyond `MAX_DIGITS` for the computed reference
const COMPUTED_EXTRA_DIGITS: u32 = 10;

static LITERAL: OnceLock<Result<ReferenceValue, PiError>> = OnceLock::new();
static COMPUTED: OnceLock<Result<ReferenceValue, PiError>> = OnceLock::new();

/// Where the reference digits come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSource {
    #[default]
    Literal,
    Computed,
}

/// A validated decimal expansion of pi
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceValue {
    digits: String,
    source: ReferenceSource,
}

impl ReferenceValue {
    fn new(digits: &str, source: ReferenceSource) -> Result<Self, PiError> {
        let digits = digits.trim();
        let valid = digits.starts_with("3.")
            && digits[2..].bytes().all(|b| b.is_ascii_digit())
            && digits.len() >= MAX_DIGITS as usize + 2;
        if !valid {
            return Err(PiError::Config(format!(
                "{:?} reference is not a {}-digit expansion of pi",
                source, MAX_DIGITS
            )));
        }
        Ok(ReferenceValue {
            digits: digits[..MAX_DIGITS as usize + 2].to_string(),
            source,
        })
    }

    /// The full expansion, `"3.1415..."`
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn source(&self) -> ReferenceSource {
        self.source
    }

    /// Number of digits after the decimal point
    pub fn fraction_digits(&self) -> usize {
        self.digits.len() - 2
    }

    /// `"3."` plus the first `fraction_digits` digits (capped at the length)
    pub fn prefix(&self, fraction_digits: u32) -> &str {
        let end = (fraction_digits as usize + 2).min(self.digits.len());
        &self.digits[..end]
    }
}

/// The shared reference for `source`, built on first use
pub fn reference(source: ReferenceSource) -> Result<&'static ReferenceValue, PiError> {
    let cell = match source {
        ReferenceSource::Literal => {
            LITERAL.get_or_init(|| ReferenceValue::new(LITERAL_DIGITS, ReferenceSource::Literal))
        }
        ReferenceSource::Computed => COMPUTED.get_or_init(compute_reference),
    };
    cell.as_ref().map_err(Clone::clone)
}

fn compute_reference() -> Result<ReferenceValue, PiError> {
    let digits = MAX_DIGITS + COMPUTED_EXTRA_DIGITS;
    // Sized from MAX_DIGITS, then run at the wider precision
    let terms = count_for_digits(Algorithm::Chudnovsky, MAX_DIGITS)? + 1;
    let ctx = set_precision(digits, Algorithm::Chudnovsky.guard_digits(terms))?;
    debug!(terms, scale = ctx.scale(), "computing reference expansion");

    let value = chudnovsky(terms, &ctx, &CancellationToken::new())?;
    ReferenceValue::new(&value.to_decimal_string(MAX_DIGITS), ReferenceSource::Computed)
}
