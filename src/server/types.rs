//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub compounds: u64,
    pub reactions: u64,
}

/// `GET /compounds?search=`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: Option<String>,
}

/// `GET /compounds/suggestions?prefix=&limit=`
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub prefix: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// `GET /paths?start=&end=&max_steps=`
#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub max_steps: Option<usize>,
}

/// `POST /compounds`
///
/// Properties may be given flat (`{"formula": "CH3OH", "name": "Methanol"}`),
/// nested under `properties`, or both; nested values win on conflict.
#[derive(Debug, Deserialize)]
pub struct CreateCompoundRequest {
    pub formula: String,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CreateCompoundRequest {
    /// Flat and nested properties merged, null fields dropped.
    pub fn into_properties(self) -> serde_json::Map<String, serde_json::Value> {
        let mut merged = self.extra;
        if let Some(nested) = self.properties {
            merged.extend(nested);
        }
        merged.retain(|_, v| !v.is_null());
        merged
    }
}

/// `POST /reactions`
#[derive(Debug, Deserialize)]
pub struct CreateReactionRequest {
    pub reactant: String,
    pub product: String,
    #[serde(default)]
    pub conditions: serde_json::Map<String, serde_json::Value>,
    /// Explicit identity; two requests with different ids create parallel edges.
    #[serde(default)]
    pub id: Option<String>,
}
