/// Data access for widgets
///
/// `SportsDataProvider` abstracts over the real HTTP client and the mock client used in
/// development mode and tests. `DataAccess` is the per-widget facade the views talk to:
/// it knows the widget's base URL and skips requests while the document is hidden.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::models::{
    squad_players, Envelope, Fixture, LeagueEntry, SquadEntry, SquadPlayer, StandingsEntry,
    TeamEntry, TeamStatistics,
};
use crate::types::Sport;

/// Ordered query parameters of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.push((key.to_string(), value.into()));
        self
    }

    /// Append `key` only when `value` is present and non-empty
    pub fn with_opt(self, key: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trait for sports data providers, implemented by both `ApiClient` and `MockClient`
#[async_trait]
pub trait SportsDataProvider: Send + Sync {
    /// Teams matching the query (`id`)
    async fn teams(&self, base_url: &str, query: &Query) -> Result<Vec<TeamEntry>, ApiError>;

    /// Season statistics of a team (`team`, `league`, `season`)
    async fn team_statistics(
        &self,
        base_url: &str,
        query: &Query,
    ) -> Result<Vec<TeamStatistics>, ApiError>;

    /// Squad of a team (`team`, `season`)
    async fn squads(&self, base_url: &str, query: &Query) -> Result<Vec<SquadEntry>, ApiError>;

    /// Leagues (`country`, `team`, `id`)
    async fn leagues(&self, base_url: &str, query: &Query) -> Result<Vec<LeagueEntry>, ApiError>;

    /// Fixtures, races or fights (`id`, `date`, `league`, `team`, `season`)
    async fn fixtures(&self, base_url: &str, query: &Query) -> Result<Vec<Fixture>, ApiError>;

    /// Past meetings between two teams (`h2h` = `home-away`)
    async fn head_to_head(&self, base_url: &str, query: &Query)
        -> Result<Vec<Fixture>, ApiError>;

    /// League tables (`league`, `season`)
    async fn standings(
        &self,
        base_url: &str,
        query: &Query,
    ) -> Result<Vec<StandingsEntry>, ApiError>;

    /// A custom translation file
    async fn translation_file(&self, url: &str) -> Result<serde_json::Value, ApiError>;
}

/// HTTP client for the sports-data API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Base URL + endpoint path, with the query pairs appended
    pub fn build_url(
        base_url: &str,
        endpoint: Endpoint,
        query: &Query,
    ) -> Result<reqwest::Url, ApiError> {
        let raw = if base_url.ends_with('/') {
            format!("{}{}", base_url, endpoint.path())
        } else {
            format!("{}/{}", base_url, endpoint.path())
        };
        let mut url = reqwest::Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.pairs() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        base_url: &str,
        endpoint: Endpoint,
        query: &Query,
    ) -> Result<Vec<T>, ApiError> {
        let url = Self::build_url(base_url, endpoint, query)?;
        debug!("API: GET {}", url);

        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            error!("API: {} responded with {}", endpoint.path(), status);
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Request { endpoint, source })?;
        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })?;
        debug!(
            "API: {} returned {} items",
            endpoint.path(),
            envelope.response.len()
        );
        Ok(envelope.response)
    }
}

#[async_trait]
impl SportsDataProvider for ApiClient {
    async fn teams(&self, base_url: &str, query: &Query) -> Result<Vec<TeamEntry>, ApiError> {
        self.fetch(base_url, Endpoint::Teams, query).await
    }

    async fn team_statistics(
        &self,
        base_url: &str,
        query: &Query,
    ) -> Result<Vec<TeamStatistics>, ApiError> {
        self.fetch(base_url, Endpoint::TeamStatistics, query).await
    }

    async fn squads(&self, base_url: &str, query: &Query) -> Result<Vec<SquadEntry>, ApiError> {
        self.fetch(base_url, Endpoint::Squads, query).await
    }

    async fn leagues(&self, base_url: &str, query: &Query) -> Result<Vec<LeagueEntry>, ApiError> {
        self.fetch(base_url, Endpoint::Leagues, query).await
    }

    async fn fixtures(&self, base_url: &str, query: &Query) -> Result<Vec<Fixture>, ApiError> {
        self.fetch(base_url, Endpoint::Fixtures, query).await
    }

    async fn head_to_head(
        &self,
        base_url: &str,
        query: &Query,
    ) -> Result<Vec<Fixture>, ApiError> {
        self.fetch(base_url, Endpoint::HeadToHead, query).await
    }

    async fn standings(
        &self,
        base_url: &str,
        query: &Query,
    ) -> Result<Vec<StandingsEntry>, ApiError> {
        self.fetch(base_url, Endpoint::Standings, query).await
    }

    async fn translation_file(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        let failed = |reason: String| ApiError::Translation {
            url: url.to_string(),
            reason,
        };
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(failed(format!("status {}", response.status())));
        }
        let body = response.text().await.map_err(|e| failed(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| failed(e.to_string()))
    }
}

/// Document visibility, shared between the host and its widgets
#[derive(Debug, Clone)]
pub struct VisibilityFlag(Arc<AtomicBool>);

impl VisibilityFlag {
    pub fn new(visible: bool) -> Self {
        Self(Arc::new(AtomicBool::new(visible)))
    }

    pub fn is_visible(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set_visible(&self, visible: bool) {
        self.0.store(visible, Ordering::Relaxed);
    }
}

impl Default for VisibilityFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Per-widget view of the data provider
pub struct DataAccess {
    provider: Arc<dyn SportsDataProvider>,
    base_url: String,
    sport: Sport,
    visibility: VisibilityFlag,
    initialized: bool,
}

impl DataAccess {
    pub fn new(
        provider: Arc<dyn SportsDataProvider>,
        base_url: String,
        sport: Sport,
        visibility: VisibilityFlag,
    ) -> Self {
        Self {
            provider,
            base_url,
            sport,
            visibility,
            initialized: false,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Requests are skipped once the widget is initialized and the document is hidden
    pub fn is_hidden(&self) -> bool {
        !self.visibility.is_visible() && self.initialized
    }

    fn skip(&self, endpoint: Endpoint) -> bool {
        let hidden = self.is_hidden();
        if hidden {
            debug!("API: Document hidden, skipping {}", endpoint.path());
        }
        hidden
    }

    /// First team matching `id`, `None` when there is none
    pub async fn team_details(&self, id: &str) -> Result<Option<TeamEntry>, ApiError> {
        if self.skip(Endpoint::Teams) {
            return Ok(None);
        }
        let query = Query::new().with("id", id);
        let teams = self.provider.teams(&self.base_url, &query).await?;
        Ok(teams.into_iter().next())
    }

    pub async fn team_statistics(&self, query: &Query) -> Result<Option<TeamStatistics>, ApiError> {
        if self.skip(Endpoint::TeamStatistics) {
            return Ok(None);
        }
        let stats = self.provider.team_statistics(&self.base_url, query).await?;
        Ok(stats.into_iter().next())
    }

    pub async fn team_squad(&self, query: &Query) -> Result<Vec<SquadPlayer>, ApiError> {
        if self.skip(Endpoint::Squads) {
            return Ok(Vec::new());
        }
        let entries = self.provider.squads(&self.base_url, query).await?;
        Ok(squad_players(entries))
    }

    pub async fn leagues(&self, query: &Query) -> Result<Vec<LeagueEntry>, ApiError> {
        if self.skip(Endpoint::Leagues) {
            return Ok(Vec::new());
        }
        self.provider.leagues(&self.base_url, query).await
    }

    pub async fn games(&self, query: &Query) -> Result<Vec<Fixture>, ApiError> {
        if self.skip(Endpoint::Fixtures) {
            return Ok(Vec::new());
        }
        self.provider.fixtures(&self.base_url, query).await
    }

    /// Single fixture by id, `None` when there is none
    pub async fn game_details(&self, id: &str) -> Result<Option<Fixture>, ApiError> {
        if self.skip(Endpoint::Fixtures) {
            return Ok(None);
        }
        let query = Query::new().with("id", id);
        let games = self.provider.fixtures(&self.base_url, &query).await?;
        Ok(games.into_iter().next())
    }

    pub async fn head_to_head(&self, query: &Query) -> Result<Vec<Fixture>, ApiError> {
        if self.skip(Endpoint::HeadToHead) {
            return Ok(Vec::new());
        }
        self.provider.head_to_head(&self.base_url, query).await
    }

    pub async fn standings(&self, query: &Query) -> Result<Vec<StandingsEntry>, ApiError> {
        if self.skip(Endpoint::Standings) {
            return Ok(Vec::new());
        }
        self.provider.standings(&self.base_url, query).await
    }

    /// Custom translation file; not subject to the visibility gate
    pub async fn translation_file(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        self.provider.translation_file(url).await
    }
}
