use std::cmp::Ordering;

use crate::models::{TokenScore, WindowMetrics};

use super::aligner::AlignedObservation;
use super::change::ChangeMetrics;
use super::saturate;
use super::series::TokenSeries;
use super::weighting::{weighted_change, MetricWeights};

/// Fold a token's aligned windows into its score row. Identity and current
/// holdings come from the latest snapshot.
pub fn aggregate_token(
    series: &TokenSeries<'_>,
    observations: &[AlignedObservation<'_>],
    weights: &MetricWeights,
) -> TokenScore {
    let latest = series.latest();

    let interval_metrics: Vec<WindowMetrics> = observations
        .iter()
        .map(|obs| {
            let change = ChangeMetrics::compute(obs.current, obs.past);
            let effective =
                weights.effective_change(change.balance_pct_change, change.trader_count_score);
            WindowMetrics {
                window_label: obs.window.label.clone(),
                decay_weight: obs.window.decay_weight,
                target_date: obs.target_date,
                past_fetch_date: obs.past.map(|p| p.fetch_date),
                past_total_balance: obs.past.and_then(|p| p.total_balance),
                past_trader_count: obs.past.and_then(|p| p.trader_count),
                balance_pct_change: change.balance_pct_change,
                trader_count_score: change.trader_count_score,
                trader_count_pct_change: change.trader_count_pct_change,
                effective_change: effective,
                weighted_change: weighted_change(effective, obs.window),
            }
        })
        .collect();

    let score = saturate(
        interval_metrics
            .iter()
            .fold(0.0, |acc, m| acc + m.weighted_change),
    );

    TokenScore {
        token_symbol: latest.token_symbol.clone(),
        token_address: latest.token_address.clone(),
        category: latest.category.clone(),
        score,
        current_total_balance: latest.total_balance,
        current_trader_count: latest.trader_count,
        current_total_value_usd: latest.total_value_usd,
        latest_fetch_date: latest.fetch_date,
        interval_metrics,
    }
}

/// Order by score descending, ties broken by token symbol ascending.
pub fn rank(scores: &mut [TokenScore]) {
    scores.sort_by(compare_ranked);
}

fn compare_ranked(a: &TokenScore, b: &TokenScore) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.token_symbol.cmp(&b.token_symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn score(symbol: &str, value: f64) -> TokenScore {
        TokenScore {
            token_symbol: symbol.into(),
            token_address: format!("{symbol}_addr"),
            category: "ai".into(),
            score: value,
            current_total_balance: None,
            current_trader_count: None,
            current_total_value_usd: None,
            latest_fetch_date: Utc::now(),
            interval_metrics: vec![],
        }
    }

    #[test]
    fn test_rank_descending_with_symbol_tiebreak() {
        let mut scores = vec![
            score("BBB", 5.0),
            score("CCC", 10.0),
            score("AAA", 5.0),
            score("DDD", -1.0),
        ];
        rank(&mut scores);

        let order: Vec<&str> = scores.iter().map(|s| s.token_symbol.as_str()).collect();
        assert_eq!(order, vec!["CCC", "AAA", "BBB", "DDD"]);
    }
}
