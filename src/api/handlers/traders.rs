use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::request_addresses;
use crate::errors::AppError;
use crate::models::Trader;
use crate::AppState;

/// Traders detailed when the request names none.
const DEFAULT_TOP_TRADERS: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct TraderRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub addresses: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct TraderData {
    pub addresses: Vec<String>,
    pub traders: Vec<Trader>,
}

#[derive(Debug, Serialize)]
pub struct TraderResponse {
    pub data: TraderData,
}

/// Trader addresses tracked for a category, plus details for the requested
/// addresses or, failing that, the most frequent traders.
pub async fn lookup(
    State(state): State<AppState>,
    payload: Result<Json<TraderRequest>, JsonRejection>,
) -> Result<Json<TraderResponse>, AppError> {
    let Json(request) = payload?;
    let category = request
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing \"category\" in request payload.".into()))?;
    let requested = request_addresses(request.addresses)?;

    let addresses = state.store.category_trader_addresses(category).await?;

    let detail_addresses = if requested.is_empty() {
        state
            .store
            .top_trader_addresses(category, DEFAULT_TOP_TRADERS)
            .await?
    } else {
        requested
    };
    let traders = state.store.trader_details(&detail_addresses).await?;

    tracing::info!(
        category = %category,
        addresses = addresses.len(),
        traders = traders.len(),
        "Trader lookup complete"
    );

    Ok(Json(TraderResponse {
        data: TraderData { addresses, traders },
    }))
}
