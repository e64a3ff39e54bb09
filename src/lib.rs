pub mod api;
pub mod birdeye;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod scoring;
pub mod services;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::PortfolioStore;
use crate::enrichment::Enricher;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PortfolioStore>,
    pub enricher: Enricher,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
