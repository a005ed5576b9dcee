//! Pidigits Core: arbitrary-precision pi approximation with digit scoring
//!
//! Computes pi to a requested number of decimal digits with one of four
//! algorithms, then reports how many leading digits agree with a trusted
//! reference expansion.
//!
//! # Modules
//!
//! - `precision`: per-run precision context and fixed-point values
//! - `algorithms`: Leibniz, Machin, Chudnovsky and Monte Carlo
//! - `policy`: algorithm recommendation and term sizing
//! - `reference`: the shared reference expansion
//! - `compare`: matched prefix / divergent digit / tail scoring
//! - `engine`: timed runs with precision verification
//! - `config`: TOML and environment configuration
//! - `cancel`: cooperative cancellation
//!
//! # Example
//!
//! ```rust,ignore
//! use pidigits_core::{Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default())?;
//! let algorithm = engine.recommend(100);
//! let result = engine.run(algorithm, 100)?;
//! let score = engine.compare(&result, 100);
//! println!("{} matched {} digits", algorithm, score.matched_fraction_digits());
//! ```

pub mod algorithms;
pub mod cancel;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod precision;
pub mod reference;

pub use algorithms::Algorithm;
pub use cancel::CancellationToken;
pub use compare::{ComparisonOutcome, ComparisonResult, compare};
pub use config::EngineConfig;
pub use engine::{ApproximationResult, Engine};
pub use error::PiError;
pub use policy::{MACHIN_MAX_DIGITS, MAX_DIGITS, recommend, select_algorithm};
pub use precision::{Fixed, PrecisionContext, set_precision};
pub use reference::{ReferenceSource, ReferenceValue, reference};

/// Run `algorithm` for `digits` with the default configuration
pub fn run(algorithm: Algorithm, digits: u32) -> Result<ApproximationResult, PiError> {
    Engine::new(EngineConfig::default())?.run(algorithm, digits)
}
