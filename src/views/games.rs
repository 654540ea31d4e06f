/// Games list: fixtures of a date (or of a season for races and fights), grouped by league
use async_trait::async_trait;
use maud::{html, Markup};
use tracing::{debug, error};

use super::common::{empty_result, error as error_message, loading, logo, status_label};
use super::{Interaction, Load, View, ViewContext};
use crate::data_provider::Query;
use crate::events::WidgetEvent;
use crate::formatting::{display_date, format_kickoff, status_class};
use crate::models::{Fixture, TeamRef};
use crate::types::WidgetType;
use crate::widget::dispatch::{GamesMode, GamesParams};
use crate::widget::normalize::WidgetOptions;
use crate::widget::state::RefreshRequest;

/// Status filter of the games toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameFilter {
    #[default]
    All,
    Live,
    Finished,
    Scheduled,
}

impl GameFilter {
    pub const ALL: [GameFilter; 4] = [
        GameFilter::All,
        GameFilter::Live,
        GameFilter::Finished,
        GameFilter::Scheduled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameFilter::All => "all",
            GameFilter::Live => "live",
            GameFilter::Finished => "finished",
            GameFilter::Scheduled => "scheduled",
        }
    }

    pub fn matches(self, status_short: &str) -> bool {
        let status = status_short.to_ascii_lowercase();
        match self {
            GameFilter::All => true,
            GameFilter::Live => matches!(status.as_str(), "live" | "1h" | "2h"),
            GameFilter::Finished => matches!(status.as_str(), "ft" | "aet" | "pen"),
            GameFilter::Scheduled => matches!(status.as_str(), "ns" | "tbd"),
        }
    }
}

pub struct GamesView {
    params: GamesParams,
    show_toolbar: bool,
    show_filters: bool,
    games_style: String,
    filter: GameFilter,
    search: String,
    games: Load<Vec<Fixture>>,
}

/// Fixtures of one league, in response order
struct LeagueGroup<'a> {
    id: String,
    name: Option<&'a str>,
    logo: Option<&'a str>,
    games: Vec<&'a Fixture>,
}

impl GamesView {
    pub fn new(params: GamesParams, options: &WidgetOptions) -> Self {
        Self {
            params,
            show_toolbar: options.show_toolbar,
            show_filters: options.show_filters,
            games_style: options.games_style.clone(),
            filter: GameFilter::default(),
            search: String::new(),
            games: Load::Loading,
        }
    }

    pub fn filter(&self) -> GameFilter {
        self.filter
    }

    pub fn games(&self) -> &Load<Vec<Fixture>> {
        &self.games
    }

    fn uses_head_to_head(&self, ctx: &ViewContext<'_>) -> bool {
        self.params.widget_type == WidgetType::H2h && ctx.options.h2h.is_some()
    }

    fn query(&self, ctx: &ViewContext<'_>) -> Query {
        let options = ctx.options;
        if self.uses_head_to_head(ctx) {
            return Query::new()
                .with_opt("h2h", options.h2h.as_deref())
                .with_opt("league", options.league.as_deref())
                .with_opt("season", options.season.as_deref());
        }
        match &self.params.mode {
            GamesMode::Date(_) => Query::new()
                .with("date", ctx.dates.current_date())
                .with_opt("league", options.league.as_deref())
                .with_opt("team", options.team_id.as_deref())
                .with_opt("season", options.season.as_deref()),
            GamesMode::Season(season) => Query::new()
                .with(
                    "season",
                    season.as_deref().unwrap_or(ctx.dates.current_year()),
                )
                .with_opt("league", options.league.as_deref()),
        }
    }

    async fn fetch(&mut self, ctx: &ViewContext<'_>) {
        let query = self.query(ctx);
        debug!("VIEW: games-list fetching {:?}", query.pairs());

        let result = if self.uses_head_to_head(ctx) {
            ctx.data.head_to_head(&query).await
        } else {
            ctx.data.games(&query).await
        };

        self.games = match result {
            Ok(games) if games.is_empty() => Load::Empty,
            Ok(games) => Load::Loaded(games),
            Err(e) => {
                error!("VIEW: Failed to load games: {}", e);
                Load::Failed
            }
        };
    }

    fn visible_games<'a>(&self, games: &'a [Fixture]) -> Vec<&'a Fixture> {
        let search = self.search.to_lowercase();
        games
            .iter()
            .filter(|game| self.filter.matches(game.status_short()))
            .filter(|game| search.is_empty() || matches_search(game, &search))
            .collect()
    }

    fn render_toolbar(&self, ctx: &ViewContext<'_>) -> Markup {
        let date = ctx.dates.current_date();
        html! {
            div.toolbar {
                @if matches!(self.params.mode, GamesMode::Date(_)) {
                    div.date-navigation {
                        button.nav-button.prev type="button" data-action="previous-day"
                            aria-label=(ctx.t("previous_day")) { "‹" }
                        span.current-date data-date=(date) { (display_date(date)) }
                        button.nav-button.today type="button" data-action="today"
                            disabled[date == ctx.dates.today()] { (ctx.t("today")) }
                        button.nav-button.next type="button" data-action="next-day"
                            aria-label=(ctx.t("next_day")) { "›" }
                    }
                }
                @if self.show_filters {
                    div.status-filters {
                        @for filter in GameFilter::ALL {
                            button.filter-button.active[filter == self.filter] type="button"
                                data-filter=(filter.as_str()) { (ctx.t(filter.as_str())) }
                        }
                    }
                }
            }
        }
    }

    fn render_games(&self, ctx: &ViewContext<'_>, games: &[Fixture]) -> Markup {
        let visible = self.visible_games(games);
        if visible.is_empty() {
            return html! { div.empty-message { (ctx.t("no_games_found")) } };
        }
        html! {
            @for group in group_by_league(&visible) {
                div.league-section data-league-id=(group.id) {
                    div.league-header {
                        (logo(ctx, "league-logo", group.logo, group.name.unwrap_or_default()))
                        span.league-name {
                            @match group.name {
                                Some(name) => { (name) }
                                None => { (ctx.t("unknown_league")) }
                            }
                        }
                    }
                    @for game in &group.games {
                        (render_game(ctx, game))
                    }
                }
            }
        }
    }
}

fn matches_search(game: &Fixture, search: &str) -> bool {
    let team_names = [game.home_team(), game.away_team()]
        .into_iter()
        .flatten()
        .filter_map(|t| t.name.as_deref());
    let league_name = game.league.as_ref().and_then(|l| l.name.as_deref());
    team_names
        .chain(league_name)
        .any(|name| name.to_lowercase().contains(search))
}

fn group_by_league<'a>(games: &[&'a Fixture]) -> Vec<LeagueGroup<'a>> {
    let mut groups: Vec<LeagueGroup<'a>> = Vec::new();
    for &game in games {
        let league = game.league.as_ref();
        let id = league
            .and_then(|l| l.id.as_ref())
            .map(|id| id.to_string())
            .unwrap_or_default();
        match groups.iter_mut().find(|g| g.id == id) {
            Some(group) => group.games.push(game),
            None => groups.push(LeagueGroup {
                id,
                name: league.and_then(|l| l.name.as_deref()),
                logo: league.and_then(|l| l.logo.as_deref()),
                games: vec![game],
            }),
        }
    }
    groups
}

fn render_team(ctx: &ViewContext<'_>, side: &str, team: Option<&TeamRef>, score: &str) -> Markup {
    let name = team.and_then(|t| t.name.as_deref()).unwrap_or_default();
    html! {
        div class=(format!("team {}", side)) {
            (logo(ctx, "team-logo", team.and_then(|t| t.logo.as_deref()), name))
            span.team-name { (name) }
            span.team-score { (score) }
        }
    }
}

fn render_game(ctx: &ViewContext<'_>, game: &Fixture) -> Markup {
    let short = game.status_short();
    let time = game
        .date()
        .and_then(|d| format_kickoff(d, ctx.options.time_zone))
        .unwrap_or_default();
    let score = game.score();
    html! {
        div.game-item data-game-id=(game.id().unwrap_or_default()) {
            div class=(format!("game-content {}", status_class(short))) {
                span.game-time { (time) }
                div.teams {
                    (render_team(ctx, "home", game.home_team(), score.home_display()))
                    (render_team(ctx, "away", game.away_team(), score.away_display()))
                }
                span.game-status { (status_label(ctx, game)) }
            }
        }
    }
}

#[async_trait]
impl View for GamesView {
    fn tag(&self) -> &'static str {
        "games-list"
    }

    async fn load(&mut self, ctx: &ViewContext<'_>) {
        self.games = Load::Loading;
        self.fetch(ctx).await;
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Markup {
        let class = format!("games-list style-{}", self.games_style);
        html! {
            div class=(class) data-type=(self.params.widget_type.as_str()) {
                @if self.show_toolbar || self.show_filters {
                    (self.render_toolbar(ctx))
                }
                div.games-content {
                    @match &self.games {
                        Load::Loading => { (loading(ctx)) }
                        Load::Failed => { (error_message(&ctx.t("error_loading_games"))) }
                        Load::Empty => { (empty_result(&ctx.t("no_games_available"))) }
                        Load::Loaded(games) => { (self.render_games(ctx, games)) }
                    }
                }
            }
        }
    }

    fn is_refreshable(&self) -> bool {
        true
    }

    async fn refresh(&mut self, ctx: &ViewContext<'_>, request: RefreshRequest) {
        debug!(
            "VIEW: games-list refresh (force: {}, date changed: {})",
            request.force, request.date_changed
        );
        if request.date_changed {
            self.games = Load::Loading;
        }
        self.fetch(ctx).await;
    }

    async fn interact(&mut self, _ctx: &ViewContext<'_>, interaction: Interaction) -> Vec<WidgetEvent> {
        match interaction {
            Interaction::Filter(filter) => {
                self.filter = filter;
                Vec::new()
            }
            Interaction::Search(query) => {
                self.search = query.trim().to_string();
                vec![WidgetEvent::SearchChanged { query }]
            }
            Interaction::SelectGame(id) => {
                let Some(game) = self
                    .games
                    .loaded()
                    .and_then(|games| games.iter().find(|g| g.id() == Some(id.as_str())))
                else {
                    debug!("VIEW: No game {} in the list", id);
                    return Vec::new();
                };
                let game = serde_json::to_value(game).unwrap_or_default();
                vec![
                    WidgetEvent::GameSelected { game: game.clone() },
                    WidgetEvent::OpenGameDetail { game },
                ]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;
    use crate::endpoints::Endpoint;
    use crate::types::Sport;
    use crate::views::testing::Harness;

    fn date_params(widget_type: WidgetType) -> GamesParams {
        GamesParams {
            widget_type,
            mode: GamesMode::Date("2025-03-15".to_string()),
        }
    }

    #[test]
    fn test_filter_matches_statuses() {
        assert!(GameFilter::Live.matches("1H"));
        assert!(GameFilter::Live.matches("2H"));
        assert!(!GameFilter::Live.matches("HT"));
        assert!(GameFilter::Finished.matches("PEN"));
        assert!(GameFilter::Scheduled.matches("TBD"));
        assert!(!GameFilter::Scheduled.matches("FT"));
        assert!(GameFilter::All.matches("anything"));
    }

    #[tokio::test]
    async fn test_renders_loader_before_load() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[]);
        let view = GamesView::new(date_params(WidgetType::Games), &h.options);
        assert!(view.render(&h.ctx()).into_string().contains("loading-block"));
    }

    #[tokio::test]
    async fn test_date_mode_query() {
        let h = Harness::new(
            Sport::Football,
            MockClient::new(),
            &[("league", "39"), ("team-id", "33"), ("season", "2024")],
        );
        let mut view = GamesView::new(date_params(WidgetType::Games), &h.options);
        view.load(&h.ctx()).await;

        let requests = h.mock.requests_to(Endpoint::Fixtures);
        assert_eq!(requests.len(), 1);
        let query = &requests[0].query;
        assert_eq!(query.get("date"), Some("2025-03-15"));
        assert_eq!(query.get("league"), Some("39"));
        assert_eq!(query.get("team"), Some("33"));
        assert_eq!(query.get("season"), Some("2024"));
    }

    #[tokio::test]
    async fn test_season_mode_query() {
        let h = Harness::new(Sport::F1, MockClient::new(), &[]);
        let params = GamesParams {
            widget_type: WidgetType::Races,
            mode: GamesMode::Season(None),
        };
        let mut view = GamesView::new(params, &h.options);
        view.load(&h.ctx()).await;

        let requests = h.mock.requests_to(Endpoint::Fixtures);
        assert_eq!(requests[0].query.get("season"), Some("2025"));
        assert_eq!(requests[0].query.get("date"), None);
        assert_eq!(requests[0].base_url, "https://formula-1.api.anymal.xyz/");
    }

    #[tokio::test]
    async fn test_h2h_type_uses_head_to_head_endpoint() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[("h2h", "33-34")]);
        let mut view = GamesView::new(date_params(WidgetType::H2h), &h.options);
        view.load(&h.ctx()).await;

        assert_eq!(h.mock.request_count(Endpoint::Fixtures), 0);
        let requests = h.mock.requests_to(Endpoint::HeadToHead);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query.get("h2h"), Some("33-34"));
    }

    #[tokio::test]
    async fn test_games_grouped_by_league() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[]);
        let mut view = GamesView::new(date_params(WidgetType::Games), &h.options);
        view.load(&h.ctx()).await;

        let html = view.render(&h.ctx()).into_string();
        assert_eq!(html.matches("class=\"league-section\"").count(), 2);
        assert_eq!(html.matches("class=\"game-item\"").count(), 4);
        assert!(html.contains("Premier League"));
        assert!(html.contains("game-content finished"));
        assert!(html.contains("Half Time"));
    }

    #[tokio::test]
    async fn test_empty_and_failed_responses() {
        let h = Harness::new(Sport::F1, MockClient::new().with_empty(Endpoint::Fixtures), &[]);
        let mut view = GamesView::new(date_params(WidgetType::Races), &h.options);
        view.load(&h.ctx()).await;
        assert!(view.render(&h.ctx()).into_string().contains("No races available"));

        let h = Harness::new(Sport::Football, MockClient::new().with_failure(Endpoint::Fixtures), &[]);
        let mut view = GamesView::new(date_params(WidgetType::Games), &h.options);
        view.load(&h.ctx()).await;
        assert!(matches!(view.games(), Load::Failed));
        assert!(view.render(&h.ctx()).into_string().contains("Error loading games"));
    }

    #[tokio::test]
    async fn test_filter_survives_refresh() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[("show-filters", "true")]);
        let mut view = GamesView::new(date_params(WidgetType::Games), &h.options);
        view.load(&h.ctx()).await;

        view.interact(&h.ctx(), Interaction::Filter(GameFilter::Live)).await;
        let html = view.render(&h.ctx()).into_string();
        assert_eq!(html.matches("class=\"game-item\"").count(), 1);

        view.refresh(
            &h.ctx(),
            RefreshRequest {
                force: false,
                date_changed: true,
            },
        )
        .await;
        assert_eq!(view.filter(), GameFilter::Live);
        assert_eq!(h.mock.request_count(Endpoint::Fixtures), 2);
    }

    #[tokio::test]
    async fn test_no_filter_match_message() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[]);
        let mut view = GamesView::new(date_params(WidgetType::Games), &h.options);
        view.load(&h.ctx()).await;

        let events = view
            .interact(&h.ctx(), Interaction::Search("zzz".to_string()))
            .await;
        assert_eq!(
            events,
            vec![WidgetEvent::SearchChanged {
                query: "zzz".to_string()
            }]
        );
        assert!(view.render(&h.ctx()).into_string().contains("No games found"));
    }

    #[tokio::test]
    async fn test_selecting_a_game_emits_events() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[]);
        let mut view = GamesView::new(date_params(WidgetType::Games), &h.options);
        view.load(&h.ctx()).await;

        let events = view
            .interact(&h.ctx(), Interaction::SelectGame("1003".to_string()))
            .await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].name(), "open-game-detail");
        assert_eq!(events[1].detail()["game"]["fixture"]["id"], "1003");

        let events = view
            .interact(&h.ctx(), Interaction::SelectGame("9".to_string()))
            .await;
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_toolbar_hidden_when_disabled() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[("show-toolbar", "false")]);
        let view = GamesView::new(date_params(WidgetType::Games), &h.options);
        assert!(!view.render(&h.ctx()).into_string().contains("date-navigation"));

        let h = Harness::new(Sport::Football, MockClient::new(), &[]);
        let view = GamesView::new(date_params(WidgetType::Games), &h.options);
        assert!(view.render(&h.ctx()).into_string().contains("Sat, Mar 15, 2025"));
    }
}
