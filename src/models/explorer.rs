//! Explorer view and request models.

use serde::{Deserialize, Serialize};

/// Snapshot of the explorer state as seen by the front end.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerSnapshot {
    pub platform: String,
    pub category: String,
    pub sort_by: String,
    pub search_title: String,
    pub mock_mode: bool,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub total_games: usize,
    pub filtered_count: usize,
    pub generation: u64,
}

/// Request body for `PUT /api/filters`. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFiltersRequest {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
}

/// Request body for `PUT /api/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub title: String,
}

/// Request body for `PUT /api/mock-mode`.
#[derive(Debug, Clone, Deserialize)]
pub struct MockModeRequest {
    pub enabled: bool,
}

/// Outcome of one self-test check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfTestResult {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub got: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
