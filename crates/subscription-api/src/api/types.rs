//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to subscribe a device token to a keyword.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub keyword: String,
    pub token: String,
}

/// Response after subscribing.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub keyword: String,
    pub message: String,
}

/// Request to remove a device token from a keyword.
#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub keyword: String,
    pub token: String,
}

/// Response after unsubscribing.
#[derive(Debug, Serialize)]
pub struct UnsubscribeResponse {
    pub keyword: String,
    pub message: String,
}

/// Keywords a device token is subscribed to.
#[derive(Debug, Serialize)]
pub struct SubscriptionsResponse {
    pub keywords: Vec<String>,
    pub total: usize,
}

/// One keyword with its current subscribers, for notification fan-out.
#[derive(Debug, Serialize)]
pub struct KeywordInfo {
    pub keyword: String,
    pub subscribers: Vec<String>,
    pub created_at: String,
}

/// Keywords that currently have at least one subscriber.
#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<KeywordInfo>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub keyword_count: usize,
}
