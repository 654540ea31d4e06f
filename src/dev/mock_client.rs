/// Mock data provider for development and testing
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::data_provider::{Query, SportsDataProvider};
use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::fixtures;
use crate::models::{Fixture, LeagueEntry, SquadEntry, StandingsEntry, TeamEntry, TeamStatistics};

/// A request received by the mock client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub endpoint: Endpoint,
    pub base_url: String,
    pub query: Query,
}

/// Mock client that returns fixture data instead of making real API calls
///
/// Every request is recorded. Endpoints can be configured to answer with an empty
/// response or to fail.
#[derive(Debug, Default)]
pub struct MockClient {
    requests: Mutex<Vec<RecordedRequest>>,
    empty: HashSet<Endpoint>,
    failing: HashSet<Endpoint>,
    translations: HashMap<String, serde_json::Value>,
}

impl MockClient {
    /// Create a new mock client
    pub fn new() -> Self {
        info!("Creating MockClient for development mode");
        Self::default()
    }

    /// Answer `endpoint` with an empty response
    pub fn with_empty(mut self, endpoint: Endpoint) -> Self {
        self.empty.insert(endpoint);
        self
    }

    /// Fail every request to `endpoint`
    pub fn with_failure(mut self, endpoint: Endpoint) -> Self {
        self.failing.insert(endpoint);
        self
    }

    /// Serve `table` as the translation file at `url`
    pub fn with_translation(mut self, url: &str, table: serde_json::Value) -> Self {
        self.translations.insert(url.to_string(), table);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn requests_to(&self, endpoint: Endpoint) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.endpoint == endpoint)
            .collect()
    }

    pub fn request_count(&self, endpoint: Endpoint) -> usize {
        self.requests_to(endpoint).len()
    }

    fn respond<T>(
        &self,
        endpoint: Endpoint,
        base_url: &str,
        query: &Query,
        data: impl FnOnce() -> Vec<T>,
    ) -> Result<Vec<T>, ApiError> {
        info!("MockClient: {} {:?}", endpoint.path(), query.pairs());
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedRequest {
                endpoint,
                base_url: base_url.to_string(),
                query: query.clone(),
            });

        if self.failing.contains(&endpoint) {
            return Err(ApiError::Status {
                endpoint,
                status: 500,
            });
        }
        if self.empty.contains(&endpoint) {
            return Ok(Vec::new());
        }
        Ok(data())
    }
}

#[async_trait]
impl SportsDataProvider for MockClient {
    async fn teams(&self, base_url: &str, query: &Query) -> Result<Vec<TeamEntry>, ApiError> {
        let id = query.get("id").unwrap_or("33");
        self.respond(Endpoint::Teams, base_url, query, || {
            vec![fixtures::create_mock_team(id)]
        })
    }

    async fn team_statistics(
        &self,
        base_url: &str,
        query: &Query,
    ) -> Result<Vec<TeamStatistics>, ApiError> {
        self.respond(Endpoint::TeamStatistics, base_url, query, || {
            vec![fixtures::create_mock_team_statistics()]
        })
    }

    async fn squads(&self, base_url: &str, query: &Query) -> Result<Vec<SquadEntry>, ApiError> {
        self.respond(Endpoint::Squads, base_url, query, fixtures::create_mock_squad)
    }

    async fn leagues(&self, base_url: &str, query: &Query) -> Result<Vec<LeagueEntry>, ApiError> {
        let country = query.get("country").map(str::to_lowercase);
        self.respond(Endpoint::Leagues, base_url, query, || {
            fixtures::create_mock_leagues()
                .into_iter()
                .filter(|entry| match &country {
                    Some(country) => entry
                        .league
                        .country
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase() == *country),
                    None => true,
                })
                .collect()
        })
    }

    async fn fixtures(&self, base_url: &str, query: &Query) -> Result<Vec<Fixture>, ApiError> {
        self.respond(Endpoint::Fixtures, base_url, query, || match query.get("id") {
            Some(id) => vec![fixtures::create_mock_game_detail(id)],
            None => fixtures::create_mock_fixtures(query.get("date")),
        })
    }

    async fn head_to_head(
        &self,
        base_url: &str,
        query: &Query,
    ) -> Result<Vec<Fixture>, ApiError> {
        self.respond(
            Endpoint::HeadToHead,
            base_url,
            query,
            fixtures::create_mock_head_to_head,
        )
    }

    async fn standings(
        &self,
        base_url: &str,
        query: &Query,
    ) -> Result<Vec<StandingsEntry>, ApiError> {
        let league = query.get("league").unwrap_or("39");
        self.respond(Endpoint::Standings, base_url, query, || {
            fixtures::create_mock_standings(league, query.get("season"))
        })
    }

    async fn translation_file(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        info!("MockClient: translation file {}", url);
        self.translations
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::Translation {
                url: url.to_string(),
                reason: "not found".to_string(),
            })
    }
}
