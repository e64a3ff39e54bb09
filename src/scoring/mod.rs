//! Temporal scoring pipeline: plan look-back windows per token, align each
//! to its backward-nearest snapshot, compute change metrics, weight them
//! and rank tokens by the summed contribution.

pub mod aggregator;
pub mod aligner;
pub mod change;
pub mod series;
pub mod weighting;
pub mod window;

pub use aggregator::rank;
pub use aligner::{backward_asof, AlignedObservation};
pub use change::{balance_pct_change, trader_count_pct_change, trader_count_score};
pub use weighting::MetricWeights;
pub use window::{TokenPeriod, Window, WindowSet, DEFAULT_WINDOWS};

use thiserror::Error;

use crate::models::{Snapshot, TokenScore};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid window '{window}': {reason}")]
    InvalidWindow { window: String, reason: String },

    #[error("duplicate window label: {0}")]
    DuplicateWindow(String),

    #[error("at least one scoring window is required")]
    EmptyWindowSet,

    #[error("target date out of range for token {token}, window {window}")]
    TimestampOutOfRange { token: String, window: String },
}

/// Score and rank one category's snapshot set.
///
/// Tokens whose history is too short for every window are kept with a
/// score of zero and no interval metrics.
pub fn score_snapshots(
    snapshots: &[Snapshot],
    windows: &WindowSet,
    weights: &MetricWeights,
) -> Result<Vec<TokenScore>, ScoringError> {
    let mut scores = Vec::new();

    for series in series::group_by_token(snapshots) {
        let periods = window::plan_periods(&series, windows)?;
        let observations = aligner::align(&series, periods);
        scores.push(aggregator::aggregate_token(&series, &observations, weights));
    }

    rank(&mut scores);
    Ok(scores)
}

/// Clamp overflowed arithmetic into the representable range. NaN maps to
/// zero and negative zero to positive zero.
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() || value == 0.0 {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
