//! Per-attempt diagnostics collected while walking the access strategies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Game;

/// Longest diagnostic excerpt kept from a parse error or payload.
pub const MAX_DIAGNOSTIC_CHARS: usize = 200;

/// Why a single access strategy did not produce a game list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AttemptFailure {
    /// Network unreachable, DNS, TLS, timeout.
    #[error("transport error: {message}")]
    Transport { message: String, timeout: bool },

    /// Upstream answered with a non-2xx status.
    #[error("server returned {status}")]
    Status { status: u16 },

    /// Upstream answered 2xx with nothing in the body.
    #[error("empty response")]
    EmptyBody,

    /// Body was not valid JSON, or the array did not hold game records.
    #[error("invalid JSON: {message}")]
    MalformedJson { message: String },

    /// Valid JSON that is not an array, typically a relay error object.
    #[error("unexpected data shape: {shape}")]
    UnexpectedShape { shape: String, excerpt: String },
}

impl AttemptFailure {
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        AttemptFailure::MalformedJson {
            message: truncate(&err.to_string(), MAX_DIAGNOSTIC_CHARS),
        }
    }

    pub fn unexpected_shape(value: &serde_json::Value) -> Self {
        AttemptFailure::UnexpectedShape {
            shape: json_kind(value).to_string(),
            excerpt: truncate(&value.to_string(), MAX_DIAGNOSTIC_CHARS),
        }
    }
}

impl From<reqwest::Error> for AttemptFailure {
    fn from(err: reqwest::Error) -> Self {
        AttemptFailure::Transport {
            timeout: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

/// One access strategy that was tried and failed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub index: usize,
    pub strategy: String,
    pub request_url: String,
    pub failure: AttemptFailure,
}

/// Everything that happened during one catalog fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReport {
    pub request_id: Uuid,
    pub target_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Failed attempts, in the order they were made.
    pub attempts: Vec<AttemptRecord>,
    /// Index of the strategy that produced the games, if any did.
    pub served_by: Option<usize>,
    pub game_count: usize,
    #[serde(skip)]
    pub games: Vec<Game>,
}

impl FetchReport {
    pub(crate) fn begin(target_url: String) -> Self {
        let now = Utc::now();
        Self {
            request_id: Uuid::new_v4(),
            target_url,
            started_at: now,
            finished_at: now,
            attempts: Vec::new(),
            served_by: None,
            game_count: 0,
            games: Vec::new(),
        }
    }

    pub(crate) fn succeed(mut self, index: usize, games: Vec<Game>) -> Self {
        self.served_by = Some(index);
        self.game_count = games.len();
        self.games = games;
        self.finished_at = Utc::now();
        self
    }

    pub(crate) fn exhaust(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    /// True if some strategy returned a game list (possibly empty).
    pub fn is_success(&self) -> bool {
        self.served_by.is_some()
    }

    pub fn into_games(self) -> Vec<Game> {
        self.games
    }
}

/// Result of a fetch that may be cancelled by a newer one.
#[derive(Debug)]
pub enum FetchOutcome {
    Completed(FetchReport),
    Cancelled,
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
