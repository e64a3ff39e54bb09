use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("ranking_requests_total").absolute(0);
    counter!("ranking_failures_total").absolute(0);
    counter!("enrichment_batches_total", "service" => "metadata").absolute(0);
    counter!("enrichment_batches_total", "service" => "price_volume").absolute(0);
    counter!("enrichment_batch_failures_total", "service" => "metadata").absolute(0);
    counter!("enrichment_batch_failures_total", "service" => "price_volume").absolute(0);

    gauge!("ranked_tokens").set(0.0);

    // Histogram is lazily created on first record; force creation.
    histogram!("ranking_latency_seconds").record(0.0);

    Ok(handle)
}
