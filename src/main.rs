use std::sync::Arc;

use momentum_ranker::api::router::create_router;
use momentum_ranker::birdeye::BirdeyeClient;
use momentum_ranker::config::AppConfig;
use momentum_ranker::db::{self, PgPortfolioStore};
use momentum_ranker::enrichment::Enricher;
use momentum_ranker::metrics::init_metrics;
use momentum_ranker::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    let birdeye = BirdeyeClient::new(reqwest::Client::new(), config.birdeye_api_key.clone())
        .with_base_url(config.birdeye_base_url.clone())
        .with_chain(config.birdeye_chain.clone());
    let enricher = Enricher::birdeye(birdeye, config.enrichment_batch_size);

    tracing::info!(
        windows = %config.scoring.windows,
        batch_size = config.enrichment_batch_size,
        auth = config.api_token.is_some(),
        "Ranking service configured"
    );

    let state = AppState {
        store: Arc::new(PgPortfolioStore::new(pool)),
        enricher,
        metrics_handle: init_metrics()?,
        config,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}
