use chrono::{DateTime, Utc};

use crate::models::Snapshot;

use super::series::TokenSeries;
use super::window::{TokenPeriod, Window};

/// A period matched to its past snapshot. `current` is always the token's
/// latest snapshot.
#[derive(Debug, Clone)]
pub struct AlignedObservation<'a> {
    pub token_symbol: &'a str,
    pub window: &'a Window,
    pub target_date: DateTime<Utc>,
    pub past: Option<&'a Snapshot>,
    pub current: &'a Snapshot,
}

/// Backward-asof lookup: the snapshot with the greatest `fetch_date` that is
/// `<= target`, or `None`. `snapshots` must be sorted by `fetch_date`.
///
/// Among equal timestamps the last one in sequence order wins.
pub fn backward_asof<'a>(snapshots: &[&'a Snapshot], target: DateTime<Utc>) -> Option<&'a Snapshot> {
    let idx = snapshots.partition_point(|s| s.fetch_date <= target);
    idx.checked_sub(1).map(|i| snapshots[i])
}

/// Match every period of a token to its past snapshot. A period whose
/// target precedes the token's earliest snapshot is dropped, never kept
/// with an empty past.
pub fn align<'a>(
    series: &TokenSeries<'a>,
    periods: Vec<TokenPeriod<'a>>,
) -> Vec<AlignedObservation<'a>> {
    let earliest = series.earliest_date();
    let current = series.latest();

    periods
        .into_iter()
        .filter_map(|period| {
            if period.target_date < earliest {
                tracing::debug!(
                    token = %period.token_symbol,
                    window = %period.window.label,
                    target = %period.target_date,
                    earliest = %earliest,
                    "Insufficient history, dropping window"
                );
                return None;
            }

            let past = backward_asof(series.snapshots(), period.target_date);
            Some(AlignedObservation {
                token_symbol: period.token_symbol,
                window: period.window,
                target_date: period.target_date,
                past,
                current,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::series::group_by_token;
    use crate::scoring::window::{plan_periods, WindowSet};
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn snap_at(minutes: i64, traders: i64) -> Snapshot {
        Snapshot {
            token_symbol: "T".into(),
            token_address: "T_addr".into(),
            category: "ai".into(),
            total_value_usd: None,
            total_balance: None,
            trader_count: Some(traders),
            fetch_date: base() + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_backward_asof_never_looks_ahead() {
        let rows = vec![snap_at(0, 1), snap_at(60, 2), snap_at(120, 3)];
        let refs: Vec<&Snapshot> = rows.iter().collect();

        // Closer snapshot lies after the target; backward match must ignore it.
        let hit = backward_asof(&refs, base() + Duration::minutes(119)).unwrap();
        assert_eq!(hit.trader_count, Some(2));

        let exact = backward_asof(&refs, base() + Duration::minutes(60)).unwrap();
        assert_eq!(exact.trader_count, Some(2));

        assert!(backward_asof(&refs, base() - Duration::minutes(1)).is_none());
    }

    #[test]
    fn test_backward_asof_tie_takes_last() {
        let rows = vec![snap_at(0, 1), snap_at(60, 2), snap_at(60, 7)];
        let refs: Vec<&Snapshot> = rows.iter().collect();
        let hit = backward_asof(&refs, base() + Duration::minutes(90)).unwrap();
        assert_eq!(hit.trader_count, Some(7));
    }

    #[test]
    fn test_align_drops_windows_without_history() {
        // 3h of history: 4h, 12h and 24h windows reach before the first snapshot.
        let rows = vec![snap_at(0, 1), snap_at(60, 2), snap_at(120, 3), snap_at(180, 4)];
        let series = group_by_token(&rows);
        let windows = WindowSet::default();
        let periods = plan_periods(&series[0], &windows).unwrap();

        let aligned = align(&series[0], periods);
        let labels: Vec<&str> = aligned.iter().map(|a| a.window.label.as_str()).collect();
        assert_eq!(labels, vec!["1h", "2h"]);

        for obs in &aligned {
            let past = obs.past.unwrap();
            assert!(past.fetch_date <= obs.target_date);
            assert_eq!(obs.current.trader_count, Some(4));
        }
    }

    #[test]
    fn test_align_keeps_window_at_exact_earliest() {
        let rows = vec![snap_at(0, 1), snap_at(240, 5)];
        let series = group_by_token(&rows);
        let windows: WindowSet = "4h:0.2".parse().unwrap();
        let periods = plan_periods(&series[0], &windows).unwrap();

        let aligned = align(&series[0], periods);
        assert_eq!(aligned.len(), 1);
        assert_eq!(aligned[0].past.unwrap().trader_count, Some(1));
    }
}
