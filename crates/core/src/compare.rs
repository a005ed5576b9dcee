//! Digit comparison against the reference expansion
//!
//! Walks candidate and reference character by character, including the
//! leading `3` and the decimal point, over `requested_digits + 2` positions.
//! The walk stops at the first difference (a mismatch) or when either string
//! runs out (incomplete: the remaining digits are unknown, not wrong).
//!
//! Pure and algorithm-agnostic.

/// How a comparison ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// Every compared position agreed
    Match,
    /// A candidate digit differed from the reference
    Mismatch,
    /// One of the strings ended before the compared span did
    Incomplete,
}

/// Structured comparison for rendering: `prefix`, then `divergent`, then `tail`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub outcome: ComparisonOutcome,
    pub requested_digits: u32,
    /// Positions that agreed, counting `3` and `.`
    pub matched: usize,
    /// The agreeing characters, unchanged
    pub prefix: String,
    /// First candidate character that disagreed (mismatch only)
    pub divergent: Option<char>,
    /// Candidate characters after the divergent one, or after the compared
    /// span on a full match. Empty when incomplete.
    pub tail: String,
}

impl ComparisonResult {
    pub fn is_full_match(&self) -> bool {
        self.outcome == ComparisonOutcome::Match
    }

    /// Matched digits after the `"3."`
    pub fn matched_fraction_digits(&self) -> usize {
        self.matched.saturating_sub(2)
    }
}

/// Compare `candidate` with `reference` over `requested_digits + 2` positions
pub fn compare(candidate: &str, reference: &str, requested_digits: u32) -> ComparisonResult {
    let span = requested_digits as usize + 2;
    let mut cand = candidate.chars();
    let mut refr = reference.chars();
    let mut prefix = String::with_capacity(span);

    for matched in 0..span {
        match (cand.next(), refr.next()) {
            (Some(c), Some(r)) if c == r => prefix.push(c),
            (Some(c), Some(_)) => {
                return ComparisonResult {
                    outcome: ComparisonOutcome::Mismatch,
                    requested_digits,
                    matched,
                    prefix,
                    divergent: Some(c),
                    tail: cand.collect(),
                };
            }
            _ => {
                return ComparisonResult {
                    outcome: ComparisonOutcome::Incomplete,
                    requested_digits,
                    matched,
                    prefix,
                    divergent: None,
                    tail: String::new(),
                };
            }
        }
    }

    ComparisonResult {
        outcome: ComparisonOutcome::Match,
        requested_digits,
        matched: span,
        prefix,
        divergent: None,
        tail: cand.collect(),
    }
}
