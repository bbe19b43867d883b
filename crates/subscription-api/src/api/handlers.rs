//! HTTP request handlers.

use super::types::{
    HealthResponse, KeywordInfo, KeywordsResponse, SubscribeRequest, SubscribeResponse,
    SubscriptionsResponse, UnsubscribeRequest, UnsubscribeResponse,
};
use super::AppState;
use crate::error::ApiError;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let keyword_count = state.registry.keyword_count().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        keyword_count,
    }))
}

/// Subscribe a device token to a keyword.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, ApiError> {
    state
        .registry
        .subscribe(&request.keyword, &request.token)
        .await?;

    info!(keyword = %request.keyword, "Subscription registered");

    Ok(Json(SubscribeResponse {
        keyword: request.keyword,
        message: "Subscribed.".to_string(),
    }))
}

/// Remove a device token's subscription to a keyword.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(request): Json<UnsubscribeRequest>,
) -> Result<Json<UnsubscribeResponse>, ApiError> {
    state
        .registry
        .unsubscribe(&request.keyword, &request.token)
        .await?;

    info!(keyword = %request.keyword, "Subscription removed");

    Ok(Json(UnsubscribeResponse {
        keyword: request.keyword,
        message: "Unsubscribed.".to_string(),
    }))
}

/// List keywords the token is subscribed to.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<SubscriptionsResponse>, ApiError> {
    let keywords = state.registry.subscriptions(&token).await?;
    let total = keywords.len();

    Ok(Json(SubscriptionsResponse { keywords, total }))
}

/// List keywords that currently have subscribers.
///
/// This is the feed for the notification crawler: keywords with an empty
/// subscriber set are omitted since there is nobody to notify.
pub async fn list_active_keywords(
    State(state): State<AppState>,
) -> Result<Json<KeywordsResponse>, ApiError> {
    let records = state.registry.active_records().await?;

    let keywords: Vec<KeywordInfo> = records
        .into_iter()
        .map(|r| KeywordInfo {
            keyword: r.keyword,
            subscribers: r.subscribers,
            created_at: r.created_at.to_rfc3339(),
        })
        .collect();
    let total = keywords.len();

    Ok(Json(KeywordsResponse { keywords, total }))
}
