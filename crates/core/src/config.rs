//! Engine configuration
//!
//! Loaded from TOML, with environment overrides applied on top.
//!
//! ```toml
//! tail_digits = 8
//! verify_precision = true
//! monte_carlo_seed = 42
//! reference = "computed"
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `PIDIGITS_SEED` | Fixed Monte Carlo seed (unsigned integer) |
//! | `PIDIGITS_VERIFY` | `0`/`false`/`off` disables the precision stability check |

use crate::error::PiError;
use crate::reference::ReferenceSource;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

pub const SEED_ENV: &str = "PIDIGITS_SEED";
pub const VERIFY_ENV: &str = "PIDIGITS_VERIFY";

/// Settings shared by every run of an `Engine`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Candidate digits rendered past the compared span, for display
    pub tail_digits: u32,
    /// Recompute deterministic results with one more guard digit and fail
    /// with `PrecisionInsufficient` if they disagree
    pub verify_precision: bool,
    /// Fixed Monte Carlo seed; `None` draws from OS entropy
    pub monte_carlo_seed: Option<u64>,
    /// Where the reference digits come from
    pub reference: ReferenceSource,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tail_digits: 8,
            verify_precision: true,
            monte_carlo_seed: None,
            reference: ReferenceSource::Literal,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        EngineConfig::default()
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, PiError> {
        toml::from_str(toml_str)
            .map_err(|e| PiError::Config(format!("failed to parse engine config: {}", e)))
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, PiError> {
        let content = fs::read_to_string(path).map_err(|e| {
            PiError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Apply `PIDIGITS_SEED` and `PIDIGITS_VERIFY` when set.
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(SEED_ENV) {
            match raw.trim().parse() {
                Ok(seed) => self.monte_carlo_seed = Some(seed),
                Err(_) => warn!("{}='{}' is not an unsigned integer, ignoring", SEED_ENV, raw),
            }
        }
        if let Ok(raw) = std::env::var(VERIFY_ENV) {
            match raw.trim().to_lowercase().as_str() {
                "0" | "false" | "off" => self.verify_precision = false,
                "1" | "true" | "on" => self.verify_precision = true,
                _ => warn!("{}='{}' not recognized, ignoring", VERIFY_ENV, raw),
            }
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.monte_carlo_seed = Some(seed);
        self
    }

    pub fn with_verify_precision(mut self, verify: bool) -> Self {
        self.verify_precision = verify;
        self
    }

    pub fn with_tail_digits(mut self, tail_digits: u32) -> Self {
        self.tail_digits = tail_digits;
        self
    }

    pub fn with_reference(mut self, reference: ReferenceSource) -> Self {
        self.reference = reference;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tail_digits, 8);
        assert!(config.verify_precision);
        assert_eq!(config.monte_carlo_seed, None);
        assert_eq!(config.reference, ReferenceSource::Literal);
    }

    #[test]
    fn test_from_toml_full() {
        let config = EngineConfig::from_toml(
            r#"
            tail_digits = 3
            verify_precision = false
            monte_carlo_seed = 42
            reference = "computed"
            "#,
        )
        .unwrap();
        assert_eq!(config.tail_digits, 3);
        assert!(!config.verify_precision);
        assert_eq!(config.monte_carlo_seed, Some(42));
        assert_eq!(config.reference, ReferenceSource::Computed);
    }

    #[test]
    fn test_from_toml_partial_keeps_defaults() {
        let config = EngineConfig::from_toml("monte_carlo_seed = 7").unwrap();
        assert_eq!(config, EngineConfig::default().with_seed(7));
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = EngineConfig::from_toml("guard = 3").unwrap_err();
        assert!(matches!(err, PiError::Config(_)));
    }

    #[test]
    fn test_from_toml_rejects_unknown_reference() {
        assert!(EngineConfig::from_toml(r#"reference = "oracle""#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tail_digits = 12").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.tail_digits, 12);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/pidigits.toml")).unwrap_err();
        assert!(matches!(err, PiError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        unsafe {
            std::env::set_var(SEED_ENV, "99");
            std::env::set_var(VERIFY_ENV, "off");
        }
        let config = EngineConfig::default().with_env_overrides();
        unsafe {
            std::env::remove_var(SEED_ENV);
            std::env::remove_var(VERIFY_ENV);
        }
        assert_eq!(config.monte_carlo_seed, Some(99));
        assert!(!config.verify_precision);
    }

    #[test]
    #[serial]
    fn test_env_overrides_ignore_garbage() {
        unsafe {
            std::env::set_var(SEED_ENV, "not-a-number");
            std::env::set_var(VERIFY_ENV, "maybe");
        }
        let config = EngineConfig::default().with_env_overrides();
        unsafe {
            std::env::remove_var(SEED_ENV);
            std::env::remove_var(VERIFY_ENV);
        }
        assert_eq!(config, EngineConfig::default());
    }
}
