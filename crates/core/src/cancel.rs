//! Cooperative cancellation
//!
//! Series and sampling loops call [`CancellationToken::check`] once per
//! outer iteration, so a cancelled run stops within one term or sample.

use crate::error::PiError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that a caller flips to stop an in-flight run.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Fail with [`PiError::Cancelled`] once the token has been flipped
    pub fn check(&self) -> Result<(), PiError> {
        if self.is_cancelled() {
            Err(PiError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// The underlying flag, for registration with signal handlers
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(token.check().is_ok());

        other.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.check(), Err(PiError::Cancelled));
    }

    #[test]
    fn test_flag_is_shared() {
        let token = CancellationToken::new();
        token.flag().store(true, Ordering::Relaxed);
        assert!(token.is_cancelled());
    }
}
