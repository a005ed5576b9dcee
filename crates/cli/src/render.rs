//! Terminal and JSON rendering of run results

use crossterm::style::{Stylize, style};
use pidigits_core::{ApproximationResult, ComparisonOutcome, ComparisonResult};
use serde::Serialize;

/// Matched prefix as-is, divergent digit in red, the rest in grey.
/// An incomplete comparison ends in a grey `?`.
pub fn highlight(score: &ComparisonResult, color: bool) -> String {
    let mut out = score.prefix.clone();
    match score.outcome {
        ComparisonOutcome::Match => out.push_str(&dim(&score.tail, color)),
        ComparisonOutcome::Mismatch => {
            if let Some(c) = score.divergent {
                if color {
                    out.push_str(&style(c).red().bold().to_string());
                } else {
                    out.push('[');
                    out.push(c);
                    out.push(']');
                }
            }
            out.push_str(&dim(&score.tail, color));
        }
        ComparisonOutcome::Incomplete => out.push_str(&dim("?", color)),
    }
    out
}

fn dim(s: &str, color: bool) -> String {
    if color {
        style(s).dark_grey().to_string()
    } else {
        s.to_string()
    }
}

/// One-line timing and score summary
pub fn summary(result: &ApproximationResult, score: &ComparisonResult) -> String {
    let mut line = format!(
        "{} completed in {:.4} seconds: {} of {} digits matched ({} {})",
        result.algorithm,
        result.elapsed.as_secs_f64(),
        score.matched_fraction_digits(),
        result.requested_digits,
        result.count,
        if result.algorithm.is_deterministic() {
            "terms"
        } else {
            "samples"
        },
    );
    if !result.meets_request() {
        line.push_str(&format!(
            "; about {} correct digits expected at this count",
            result.expected_digits
        ));
    }
    line
}

/// Machine-readable form of one run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub algorithm: &'static str,
    pub requested_digits: u32,
    pub count: u64,
    pub guard_digits: u32,
    pub elapsed_ms: f64,
    pub expected_digits: u32,
    pub matched_digits: usize,
    pub outcome: &'static str,
    pub digits: String,
    pub divergent: Option<char>,
}

impl RunReport {
    pub fn new(result: &ApproximationResult, score: &ComparisonResult) -> Self {
        RunReport {
            algorithm: result.algorithm.name(),
            requested_digits: result.requested_digits,
            count: result.count,
            guard_digits: result.context.guard_digits(),
            elapsed_ms: result.elapsed.as_secs_f64() * 1000.0,
            expected_digits: result.expected_digits,
            matched_digits: score.matched_fraction_digits(),
            outcome: match score.outcome {
                ComparisonOutcome::Match => "match",
                ComparisonOutcome::Mismatch => "mismatch",
                ComparisonOutcome::Incomplete => "incomplete",
            },
            digits: result.digits(result.requested_digits),
            divergent: score.divergent,
        }
    }
}
