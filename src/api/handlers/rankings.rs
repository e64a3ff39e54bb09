use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::request_addresses;
use crate::errors::AppError;
use crate::models::RankedToken;
use crate::services::rank_category;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RankingRequest {
    #[serde(default)]
    pub category: Option<String>,
    /// Accepted for compatibility with sibling flows; ranking ignores it.
    #[serde(default)]
    pub addresses: Option<serde_json::Value>,
}

/// `{"data": [...]}` for a ranked category, `{"data": {}}` when it has no
/// snapshots.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RankingData {
    Ranked(Vec<RankedToken>),
    Empty {},
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub data: RankingData,
}

pub async fn rank(
    State(state): State<AppState>,
    payload: Result<Json<RankingRequest>, JsonRejection>,
) -> Result<Json<RankingResponse>, AppError> {
    let Json(request) = payload?;
    let category = request
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing \"category\" in request payload.".into()))?;
    let addresses = request_addresses(request.addresses)?;

    tracing::info!(
        category = %category,
        addresses = addresses.len(),
        "Ranking request received"
    );

    let ranked = rank_category(
        state.store.as_ref(),
        &state.enricher,
        &state.config.scoring,
        category,
    )
    .await?;

    let data = match ranked {
        Some(tokens) => RankingData::Ranked(tokens),
        None => RankingData::Empty {},
    };
    Ok(Json(RankingResponse { data }))
}
