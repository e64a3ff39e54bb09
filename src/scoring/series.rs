use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::Snapshot;

/// All snapshots of one token, sorted by `fetch_date` ascending.
///
/// Snapshots sharing a `fetch_date` keep their input order; the last one
/// of a tie is treated as the later observation.
#[derive(Debug, Clone)]
pub struct TokenSeries<'a> {
    pub token_symbol: &'a str,
    snapshots: Vec<&'a Snapshot>,
}

impl<'a> TokenSeries<'a> {
    pub fn snapshots(&self) -> &[&'a Snapshot] {
        &self.snapshots
    }

    /// Latest snapshot of the token. Every window of the token compares
    /// against this one.
    pub fn latest(&self) -> &'a Snapshot {
        self.snapshots[self.snapshots.len() - 1]
    }

    pub fn most_recent_date(&self) -> DateTime<Utc> {
        self.latest().fetch_date
    }

    pub fn earliest_date(&self) -> DateTime<Utc> {
        self.snapshots[0].fetch_date
    }
}

/// Group a category's snapshot set by token symbol. Tokens come out in
/// symbol order so downstream iteration is deterministic.
pub fn group_by_token(snapshots: &[Snapshot]) -> Vec<TokenSeries<'_>> {
    let mut grouped: BTreeMap<&str, Vec<&Snapshot>> = BTreeMap::new();
    for snapshot in snapshots {
        grouped
            .entry(snapshot.token_symbol.as_str())
            .or_default()
            .push(snapshot);
    }

    grouped
        .into_iter()
        .map(|(token_symbol, mut snapshots)| {
            // Stable sort: equal timestamps keep input order.
            snapshots.sort_by_key(|s| s.fetch_date);
            TokenSeries {
                token_symbol,
                snapshots,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn snap(symbol: &str, hour: i64) -> Snapshot {
        Snapshot {
            token_symbol: symbol.into(),
            token_address: format!("{symbol}_addr"),
            category: "ai".into(),
            total_value_usd: None,
            total_balance: None,
            trader_count: Some(hour),
            fetch_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour),
        }
    }

    #[test]
    fn test_group_sorts_tokens_and_dates() {
        let rows = vec![snap("ZED", 2), snap("ABC", 1), snap("ZED", 0), snap("ABC", 3)];
        let series = group_by_token(&rows);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].token_symbol, "ABC");
        assert_eq!(series[1].token_symbol, "ZED");
        assert_eq!(series[1].earliest_date(), rows[2].fetch_date);
        assert_eq!(series[1].most_recent_date(), rows[0].fetch_date);
    }

    #[test]
    fn test_latest_takes_last_of_tie() {
        let mut first = snap("ABC", 1);
        first.trader_count = Some(10);
        let mut second = snap("ABC", 1);
        second.trader_count = Some(20);
        let rows = vec![first, second];

        let series = group_by_token(&rows);
        assert_eq!(series[0].latest().trader_count, Some(20));
    }
}
