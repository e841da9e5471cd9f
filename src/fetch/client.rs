//! Catalog client that walks the access strategies until one yields games.

use std::time::Duration;

use reqwest::header::ACCEPT;
use tokio_util::sync::CancellationToken;

use super::report::{AttemptFailure, AttemptRecord, FetchOutcome, FetchReport};
use super::{AccessStrategy, CatalogQuery};
use crate::models::Game;

/// HTTP client for the game catalog with relay fallback.
///
/// Strategies are tried strictly in order. The first one whose response parses as a
/// JSON array wins; every failure is recorded and skipped. Exhausting the list yields
/// an empty game list, never an error.
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: String,
    strategies: Vec<AccessStrategy>,
}

impl CatalogClient {
    /// Create a client with its own connection pool and a per-attempt timeout.
    pub fn new(
        endpoint: impl Into<String>,
        strategies: Vec<AccessStrategy>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, endpoint, strategies))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        strategies: Vec<AccessStrategy>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            strategies,
        }
    }

    /// Fetch games for the given filters. Empty on total failure.
    pub async fn fetch_games(
        &self,
        platform: Option<&str>,
        category: Option<&str>,
        sort_by: Option<&str>,
    ) -> Vec<Game> {
        let query = CatalogQuery::new(platform, category, sort_by);
        self.fetch_report(&query).await.into_games()
    }

    /// Fetch games and keep the per-attempt diagnostics.
    pub async fn fetch_report(&self, query: &CatalogQuery) -> FetchReport {
        let target = query.target_url(&self.endpoint);
        let mut report = FetchReport::begin(target.clone());

        for (index, strategy) in self.strategies.iter().enumerate() {
            let request_url = strategy.request_url(&target);

            match self.attempt(&request_url).await {
                Ok(games) => {
                    tracing::debug!(
                        attempt = index,
                        strategy = %strategy.label(),
                        games = games.len(),
                        "Catalog fetched"
                    );
                    return report.succeed(index, games);
                }
                Err(failure) => {
                    tracing::warn!(
                        attempt = index,
                        strategy = %strategy.label(),
                        url = %request_url,
                        error = %failure,
                        "Access strategy failed"
                    );
                    report.attempts.push(AttemptRecord {
                        index,
                        strategy: strategy.label().to_string(),
                        request_url,
                        failure,
                    });
                }
            }
        }

        tracing::error!(
            target_url = %target,
            attempts = report.attempts.len(),
            last_error = ?report.attempts.last().map(|a| a.failure.to_string()),
            "All access strategies failed"
        );
        report.exhaust()
    }

    /// Like [`fetch_report`](Self::fetch_report), abandoning the fetch once `cancel` fires.
    ///
    /// The in-flight request is dropped on cancellation, which aborts it.
    pub async fn fetch_cancellable(
        &self,
        query: &CatalogQuery,
        cancel: &CancellationToken,
    ) -> FetchOutcome {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => FetchOutcome::Cancelled,
            report = self.fetch_report(query) => FetchOutcome::Completed(report),
        }
    }

    /// Make one request and interpret the response.
    async fn attempt(&self, url: &str) -> Result<Vec<Game>, AttemptFailure> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptFailure::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(AttemptFailure::EmptyBody);
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(AttemptFailure::malformed)?;

        let items = match value {
            serde_json::Value::Array(items) => items,
            other => {
                let failure = AttemptFailure::unexpected_shape(&other);
                if let AttemptFailure::UnexpectedShape { excerpt, .. } = &failure {
                    tracing::debug!(url = %url, payload = %excerpt, "Unexpected data shape");
                }
                return Err(failure);
            }
        };

        Ok(decode_games(url, items))
    }
}

/// Decode each record on its own; records that do not fit [`Game`] are skipped.
fn decode_games(url: &str, items: Vec<serde_json::Value>) -> Vec<Game> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_value::<Game>(item) {
            Ok(game) => Some(game),
            Err(e) => {
                tracing::warn!(url = %url, position, error = %e, "Skipping malformed game record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_games_skips_records_that_do_not_fit() {
        let items = vec![
            json!({ "id": 1, "title": "Warframe" }),
            json!({ "id": "two", "title": "Path of Exile" }),
            json!({ "id": 3, "title": null }),
            json!({ "id": 4, "title": "Lost Ark", "genre": "MMORPG" }),
        ];

        let games = decode_games("http://catalog.test/api/games", items);

        let ids: Vec<i64> = games.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(games[1].title, "Lost Ark");
    }

    #[test]
    fn test_decode_games_empty_array() {
        assert!(decode_games("http://catalog.test/api/games", Vec::new()).is_empty());
    }
}
