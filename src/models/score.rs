use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Raw and weighted metrics for one look-back window of one token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WindowMetrics {
    pub window_label: String,
    pub decay_weight: f64,
    pub target_date: DateTime<Utc>,
    pub past_fetch_date: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub past_total_balance: Option<Decimal>,
    pub past_trader_count: Option<i64>,
    pub balance_pct_change: f64,
    pub trader_count_score: f64,
    /// Reported for display; does not feed the score.
    pub trader_count_pct_change: f64,
    pub effective_change: f64,
    pub weighted_change: f64,
}

/// Final scoring row for one token, before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TokenScore {
    pub token_symbol: String,
    pub token_address: String,
    pub category: String,
    #[serde(rename = "WEIGHTED_CHANGE")]
    pub score: f64,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current_total_balance: Option<Decimal>,
    pub current_trader_count: Option<i64>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current_total_value_usd: Option<Decimal>,
    pub latest_fetch_date: DateTime<Utc>,
    pub interval_metrics: Vec<WindowMetrics>,
}
