use rust_decimal::prelude::ToPrimitive;

use crate::models::Snapshot;

use super::saturate;

// ---------------------------------------------------------------------------
// Metric 1: Balance percent change
// ---------------------------------------------------------------------------

/// Relative change from `past` to `current`, in percent.
///
/// Missing inputs contribute `0.0`. A zero past yields `100.0` when the
/// current value is positive and `0.0` otherwise.
pub fn balance_pct_change(current: Option<f64>, past: Option<f64>) -> f64 {
    let (Some(current), Some(past)) = (current, past) else {
        return 0.0;
    };

    if past == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }

    saturate((current - past) / past.abs() * 100.0)
}

// ---------------------------------------------------------------------------
// Metric 2: Trader count growth
// ---------------------------------------------------------------------------

/// Exponential growth reward `2^current - 2^past`. Only increases score;
/// a flat or shrinking count yields `0.0`, as do missing inputs.
///
/// The term is unbounded. Values beyond `f64` range saturate at `f64::MAX`.
pub fn trader_count_score(current: Option<f64>, past: Option<f64>) -> f64 {
    let (Some(current), Some(past)) = (current, past) else {
        return 0.0;
    };

    if current <= past {
        return 0.0;
    }

    // current > past, so a non-finite difference is an overflow upwards.
    let growth = 2f64.powf(current) - 2f64.powf(past);
    if growth.is_finite() {
        growth
    } else {
        f64::MAX
    }
}

/// Percent change of the trader count. Display only.
pub fn trader_count_pct_change(current: Option<f64>, past: Option<f64>) -> f64 {
    balance_pct_change(current, past)
}

/// Raw per-window metrics of one aligned observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeMetrics {
    pub balance_pct_change: f64,
    pub trader_count_score: f64,
    pub trader_count_pct_change: f64,
}

impl ChangeMetrics {
    pub fn compute(current: &Snapshot, past: Option<&Snapshot>) -> Self {
        let current_balance = current.total_balance.and_then(|b| b.to_f64());
        let past_balance = past.and_then(|p| p.total_balance).and_then(|b| b.to_f64());
        let current_traders = current.trader_count.map(|c| c as f64);
        let past_traders = past.and_then(|p| p.trader_count).map(|c| c as f64);

        Self {
            balance_pct_change: balance_pct_change(current_balance, past_balance),
            trader_count_score: trader_count_score(current_traders, past_traders),
            trader_count_pct_change: trader_count_pct_change(current_traders, past_traders),
        }
    }
}
