//! Explorer controller.
//!
//! Holds the user's filter selections and the current game list, triggers catalog
//! fetches when selections change, and derives the displayed subset through the
//! local title search.
//!
//! Only one fetch is active at a time. Starting a fetch cancels the previous one and
//! bumps the generation; a fetch applies its result only while its generation is
//! still the active one, so a late response never overwrites a newer one.

mod mock;

pub use mock::mock_games;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::json;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::errors::AppError;
use crate::fetch::{CatalogClient, CatalogQuery, FetchOutcome, FetchReport};
use crate::models::{
    is_known, ExplorerSnapshot, Game, SelfTestResult, UpdateFiltersRequest, CATEGORIES,
    PLATFORMS, PLATFORM_ALL, SORT_KEYS,
};
use crate::search::filter_by_title;

/// The fetch currently allowed to publish its result.
struct ActiveFetch {
    generation: u64,
    token: CancellationToken,
}

/// Mutable explorer state.
#[derive(Debug)]
struct ExplorerState {
    platform: String,
    category: String,
    sort_by: String,
    search_title: String,
    mock_mode: bool,
    games: Vec<Game>,
    filtered_games: Vec<Game>,
    loading: bool,
    error: Option<String>,
    last_report: Option<FetchReport>,
    self_test: Vec<SelfTestResult>,
}

impl ExplorerState {
    fn new(mock_mode: bool) -> Self {
        Self {
            platform: PLATFORM_ALL.to_string(),
            category: String::new(),
            sort_by: String::new(),
            search_title: String::new(),
            mock_mode,
            games: Vec::new(),
            filtered_games: Vec::new(),
            loading: false,
            error: None,
            last_report: None,
            self_test: Vec::new(),
        }
    }

    fn query(&self) -> CatalogQuery {
        CatalogQuery::new(
            Some(self.platform.as_str()),
            Some(self.category.as_str()),
            Some(self.sort_by.as_str()),
        )
    }

    fn set_games(&mut self, games: Vec<Game>) {
        self.filtered_games = filter_by_title(&games, &self.search_title);
        self.games = games;
    }
}

/// Catalog explorer shared by all request handlers.
pub struct Explorer {
    client: Arc<CatalogClient>,
    state: RwLock<ExplorerState>,
    active: Mutex<Option<ActiveFetch>>,
    generation: AtomicU64,
}

impl Explorer {
    pub fn new(client: Arc<CatalogClient>, mock_mode: bool) -> Self {
        Self {
            client,
            state: RwLock::new(ExplorerState::new(mock_mode)),
            active: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Number of the most recently started fetch.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> ExplorerSnapshot {
        let state = self.state.read().await;
        ExplorerSnapshot {
            platform: state.platform.clone(),
            category: state.category.clone(),
            sort_by: state.sort_by.clone(),
            search_title: state.search_title.clone(),
            mock_mode: state.mock_mode,
            loading: state.loading,
            error: state.error.clone(),
            total_games: state.games.len(),
            filtered_count: state.filtered_games.len(),
            generation: self.generation(),
        }
    }

    pub async fn filtered_games(&self) -> Vec<Game> {
        self.state.read().await.filtered_games.clone()
    }

    /// Look up a game in the current (unfiltered) list.
    pub async fn find_game(&self, id: i64) -> Option<Game> {
        let state = self.state.read().await;
        state.games.iter().find(|g| g.id == id).cloned()
    }

    pub async fn last_report(&self) -> Option<FetchReport> {
        self.state.read().await.last_report.clone()
    }

    pub async fn self_test_results(&self) -> Vec<SelfTestResult> {
        self.state.read().await.self_test.clone()
    }

    /// Fetch games for the current selections.
    ///
    /// With `force_mock` or mock mode on, installs the sample catalog instead. Returns
    /// `None` when this fetch was cancelled or superseded by a newer one.
    pub async fn fetch_games(self: &Arc<Self>, force_mock: bool) -> Option<Vec<Game>> {
        let mock_mode = self.state.read().await.mock_mode;
        if force_mock || mock_mode {
            return Some(self.install_mock().await);
        }

        let (generation, token, query) = self.supersede().await;
        tracing::debug!(generation, ?query, "Starting catalog fetch");

        // Run on its own task so a dropped caller cannot leave `loading` stuck.
        let this = Arc::clone(self);
        let handle =
            tokio::spawn(async move { this.run_fetch(generation, query, token).await });

        match handle.await {
            Ok(games) => games,
            Err(e) => {
                tracing::error!(generation, error = %e, "Fetch task failed");
                self.fail(generation, format!("Failed to load games: {}", e))
                    .await;
                None
            }
        }
    }

    /// Update any subset of platform, category and sort key, then refetch.
    pub async fn set_filters(
        self: &Arc<Self>,
        request: UpdateFiltersRequest,
    ) -> Result<Option<Vec<Game>>, AppError> {
        if let Some(platform) = &request.platform {
            if !is_known(PLATFORMS, platform) {
                return Err(AppError::Validation(format!(
                    "Unknown platform '{}'",
                    platform
                )));
            }
        }
        if let Some(category) = &request.category {
            if !is_known(CATEGORIES, category) {
                return Err(AppError::Validation(format!(
                    "Unknown category '{}'",
                    category
                )));
            }
        }
        if let Some(sort_by) = &request.sort_by {
            if !is_known(SORT_KEYS, sort_by) {
                return Err(AppError::Validation(format!(
                    "Unknown sort key '{}'",
                    sort_by
                )));
            }
        }

        {
            let mut state = self.state.write().await;
            if let Some(platform) = request.platform {
                state.platform = platform;
            }
            if let Some(category) = request.category {
                state.category = category;
            }
            if let Some(sort_by) = request.sort_by {
                state.sort_by = sort_by;
            }
        }

        Ok(self.fetch_games(false).await)
    }

    /// Change the title search and refilter locally. Does not fetch.
    pub async fn set_search_title(&self, title: &str) -> Vec<Game> {
        let mut state = self.state.write().await;
        state.search_title = title.to_string();
        state.filtered_games = filter_by_title(&state.games, &state.search_title);
        state.filtered_games.clone()
    }

    pub async fn set_mock_mode(&self, enabled: bool) {
        self.state.write().await.mock_mode = enabled;
        tracing::info!(enabled, "Mock mode changed");
    }

    /// Restore default selections and drop the current games.
    pub async fn reset(&self) {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            previous.token.cancel();
        }

        let mut state = self.state.write().await;
        state.platform = PLATFORM_ALL.to_string();
        state.category.clear();
        state.sort_by.clear();
        state.search_title.clear();
        state.error = None;
        state.loading = false;
        state.games.clear();
        state.filtered_games.clear();
    }

    /// Check mock data and a live fetch with default filters.
    pub async fn run_self_test(self: &Arc<Self>) -> Vec<SelfTestResult> {
        let mut results = Vec::with_capacity(2);

        let expected = mock_games().len();
        let data = self.fetch_games(true).await;
        results.push(SelfTestResult {
            name: "Mock mode returns sample data".to_string(),
            passed: data.as_ref().map(Vec::len) == Some(expected),
            expected: Some(expected),
            got: Some(json!(data.map(|d| d.len()))),
            details: None,
        });

        let games = self.client.fetch_games(None, None, None).await;
        results.push(SelfTestResult {
            name: "Network fetch with proxy fallback".to_string(),
            passed: !games.is_empty(),
            expected: None,
            got: Some(json!(games.len())),
            details: Some(format!("Got {} items", games.len())),
        });

        self.state.write().await.self_test = results.clone();
        results
    }

    pub async fn clear_self_test(&self) {
        self.state.write().await.self_test.clear();
    }

    /// Cancel any in-flight fetch.
    pub async fn shutdown(&self) {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            previous.token.cancel();
            self.state.write().await.loading = false;
            tracing::info!(generation = previous.generation, "Cancelled in-flight fetch");
        }
    }

    /// Cancel the previous fetch and register a new one.
    async fn supersede(&self) -> (u64, CancellationToken, CatalogQuery) {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            previous.token.cancel();
            tracing::debug!(generation = previous.generation, "Superseded in-flight fetch");
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        *active = Some(ActiveFetch {
            generation,
            token: token.clone(),
        });

        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
        (generation, token, state.query())
    }

    async fn run_fetch(
        &self,
        generation: u64,
        query: CatalogQuery,
        token: CancellationToken,
    ) -> Option<Vec<Game>> {
        let report = match self.client.fetch_cancellable(&query, &token).await {
            FetchOutcome::Completed(report) => report,
            FetchOutcome::Cancelled => {
                tracing::debug!(generation, "Catalog fetch cancelled");
                return None;
            }
        };

        let mut active = self.active.lock().await;
        if active.as_ref().map(|a| a.generation) != Some(generation) {
            tracing::debug!(generation, "Discarding stale catalog response");
            return None;
        }
        *active = None;

        tracing::info!(
            generation,
            served_by = ?report.served_by,
            failed_attempts = report.attempts.len(),
            games = report.game_count,
            "Catalog fetch applied"
        );
        let games = report.games.clone();
        let mut state = self.state.write().await;
        state.set_games(report.games.clone());
        state.loading = false;
        state.last_report = Some(report);
        Some(games)
    }

    async fn install_mock(&self) -> Vec<Game> {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            previous.token.cancel();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);

        let games = mock_games();
        let mut state = self.state.write().await;
        state.error = None;
        state.loading = false;
        state.set_games(games.clone());
        games
    }

    async fn fail(&self, generation: u64, message: String) {
        let mut active = self.active.lock().await;
        if active.as_ref().map(|a| a.generation) != Some(generation) {
            return;
        }
        *active = None;

        let mut state = self.state.write().await;
        state.error = Some(message);
        state.loading = false;
        state.games.clear();
        state.filtered_games.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Explorer whose client points at a closed local port.
    fn offline_explorer(mock_mode: bool) -> Arc<Explorer> {
        let client = CatalogClient::new(
            "http://127.0.0.1:9/api/games",
            vec![crate::fetch::AccessStrategy::Direct],
            Duration::from_millis(500),
        )
        .unwrap();
        Arc::new(Explorer::new(Arc::new(client), mock_mode))
    }

    #[tokio::test]
    async fn test_defaults() {
        let explorer = offline_explorer(false);
        let snapshot = explorer.snapshot().await;
        assert_eq!(snapshot.platform, "all");
        assert_eq!(snapshot.category, "");
        assert_eq!(snapshot.sort_by, "");
        assert!(!snapshot.loading);
        assert_eq!(snapshot.generation, 0);
    }

    #[tokio::test]
    async fn test_forced_mock_returns_sample_data() {
        let explorer = offline_explorer(false);
        let games = explorer.fetch_games(true).await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(explorer.filtered_games().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_mode_ignores_filters() {
        let explorer = offline_explorer(true);
        let games = explorer
            .set_filters(UpdateFiltersRequest {
                category: Some("shooter".to_string()),
                ..Default::default()
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(explorer.snapshot().await.category, "shooter");
    }

    #[tokio::test]
    async fn test_search_refilters_without_fetching() {
        let explorer = offline_explorer(true);
        explorer.fetch_games(false).await;
        let generation = explorer.generation();

        let filtered = explorer.set_search_title("shoot").await;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Mock Shooter");
        assert_eq!(explorer.generation(), generation);

        let filtered = explorer.set_search_title("").await;
        assert_eq!(filtered.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_filter_values_are_rejected() {
        let explorer = offline_explorer(true);
        let result = explorer
            .set_filters(UpdateFiltersRequest {
                platform: Some("xbox".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = explorer
            .set_filters(UpdateFiltersRequest {
                platform: Some("pc".to_string()),
                sort_by: Some("newest".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(explorer.snapshot().await.platform, "all");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_yields_empty_result_without_error() {
        let explorer = offline_explorer(false);
        let games = explorer.fetch_games(false).await.unwrap();
        assert!(games.is_empty());

        let snapshot = explorer.snapshot().await;
        assert!(snapshot.error.is_none());
        assert!(!snapshot.loading);

        let report = explorer.last_report().await.unwrap();
        assert!(!report.is_success());
        assert_eq!(report.attempts.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let explorer = offline_explorer(true);
        explorer
            .set_filters(UpdateFiltersRequest {
                platform: Some("pc".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        explorer.set_search_title("mock").await;

        explorer.reset().await;

        let snapshot = explorer.snapshot().await;
        assert_eq!(snapshot.platform, "all");
        assert_eq!(snapshot.search_title, "");
        assert_eq!(snapshot.total_games, 0);
        assert_eq!(snapshot.filtered_count, 0);
    }
}
