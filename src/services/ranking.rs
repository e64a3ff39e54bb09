use std::time::Instant;

use metrics::{counter, gauge, histogram};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::db::PortfolioStore;
use crate::enrichment::Enricher;
use crate::models::RankedToken;
use crate::scoring::score_snapshots;

/// One-shot ranking of a category: load the bounded snapshot history,
/// score it, then enrich the ranked list.
///
/// Returns `Ok(None)` when the category has no snapshots. Store and scoring
/// failures propagate; enrichment failures never do.
pub async fn rank_category(
    store: &dyn PortfolioStore,
    enricher: &Enricher,
    config: &ScoringConfig,
    category: &str,
) -> anyhow::Result<Option<Vec<RankedToken>>> {
    let span = tracing::info_span!("rank_category", run_id = %Uuid::new_v4(), category = %category);

    async move {
        let start = Instant::now();
        counter!("ranking_requests_total").increment(1);

        let result = run(store, enricher, config, category).await;

        histogram!("ranking_latency_seconds").record(start.elapsed().as_secs_f64());
        match &result {
            Ok(Some(ranked)) => {
                gauge!("ranked_tokens").set(ranked.len() as f64);
                tracing::info!(tokens = ranked.len(), "Ranking complete");
            }
            Ok(None) => tracing::info!("No snapshots for category"),
            Err(e) => {
                counter!("ranking_failures_total").increment(1);
                tracing::error!(error = %e, "Ranking failed");
            }
        }
        result
    }
    .instrument(span)
    .await
}

async fn run(
    store: &dyn PortfolioStore,
    enricher: &Enricher,
    config: &ScoringConfig,
    category: &str,
) -> anyhow::Result<Option<Vec<RankedToken>>> {
    let Some(latest) = store.latest_fetch_date(category).await? else {
        return Ok(None);
    };

    let min_fetch_date = latest.checked_sub_signed(config.history_span());
    let snapshots = store.query_snapshots(category, min_fetch_date).await?;
    if snapshots.is_empty() {
        return Ok(None);
    }

    tracing::info!(
        snapshots = snapshots.len(),
        latest = %latest,
        windows = %config.windows,
        "Scoring snapshot history"
    );

    let scores = score_snapshots(&snapshots, &config.windows, &config.weights)?;
    let ranked = enricher.enrich(scores).await;

    Ok(Some(ranked))
}
