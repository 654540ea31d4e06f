/// Game detail: header plus statistics, events, lineups and head-to-head tabs
use async_trait::async_trait;
use maud::{html, Markup};
use tracing::{debug, error, warn};

use super::common::{empty_result, error as error_message, initial_tab, loading, logo, status_label, tab_bar};
use super::{Interaction, Load, View, ViewContext};
use crate::data_provider::Query;
use crate::events::WidgetEvent;
use crate::formatting::format_game_date;
use crate::models::{Fixture, Lineup, LineupSlot, MatchEvent, StatisticValue, TeamRef};
use crate::widget::normalize::WidgetOptions;

const HEAD_TO_HEAD_LIMIT: usize = 10;

/// Tab ids, each doubling as its translation key
const TABS: [&str; 4] = ["statistics", "events", "lineups", "h2h"];

pub struct GameDetailView {
    game_id: Option<String>,
    tabs: Vec<&'static str>,
    preferred_tab: Option<String>,
    active_tab: Option<&'static str>,
    game: Load<Fixture>,
    head_to_head: Vec<Fixture>,
}

impl GameDetailView {
    pub fn new(game_id: Option<String>, options: &WidgetOptions) -> Self {
        let flags = &options.flags;
        let enabled = [flags.statistics, flags.events, flags.game_lineups, flags.game_h2h];
        let tabs = TABS
            .into_iter()
            .zip(enabled)
            .filter_map(|(tab, on)| on.then_some(tab))
            .collect();
        Self {
            game_id,
            tabs,
            preferred_tab: options.tabs.game_tab.clone().or_else(|| options.tabs.tab.clone()),
            active_tab: None,
            game: Load::Loading,
            head_to_head: Vec::new(),
        }
    }

    pub fn active_tab(&self) -> Option<&'static str> {
        self.active_tab
    }

    async fn load_head_to_head(&mut self, ctx: &ViewContext<'_>, key: String) {
        let query = Query::new().with("h2h", key);
        match ctx.data.head_to_head(&query).await {
            Ok(games) => self.head_to_head = games,
            Err(e) => warn!("VIEW: Head to head unavailable: {}", e),
        }
    }

    fn render_header(&self, ctx: &ViewContext<'_>, game: &Fixture) -> Markup {
        let league = game.league.as_ref();
        let score = game.score();
        let date = game
            .date()
            .and_then(|d| format_game_date(d, ctx.options.time_zone));
        let venue = game
            .fixture
            .as_ref()
            .and_then(|f| f.venue.as_ref())
            .and_then(|v| v.name.clone().map(|name| (name, v.city.clone())));
        html! {
            div.game-header {
                @if let Some(league) = league {
                    div.league-info {
                        (logo(ctx, "league-logo", league.logo.as_deref(), league.name.as_deref().unwrap_or_default()))
                        span.league-name { (league.name.as_deref().unwrap_or_default()) }
                        @if let Some(round) = &league.round {
                            span.league-round { (round) }
                        }
                    }
                }
                div.match-info {
                    (render_side(ctx, "home", game.home_team()))
                    div.score {
                        span.home-score { (score.home_display()) }
                        span.separator { ":" }
                        span.away-score { (score.away_display()) }
                    }
                    (render_side(ctx, "away", game.away_team()))
                }
                div.game-status { (status_label(ctx, game)) }
                @if let Some(date) = date {
                    div.game-date { (date) }
                }
                @if let Some((name, city)) = venue {
                    div.venue {
                        (name)
                        @if let Some(city) = city {
                            ", " (city)
                        }
                    }
                }
            }
        }
    }

    fn render_tab(&self, ctx: &ViewContext<'_>, game: &Fixture) -> Markup {
        match self.active_tab {
            Some("statistics") => render_statistics(ctx, game),
            Some("events") => render_events(ctx, &game.events),
            Some("lineups") => render_lineups(ctx, &game.lineups),
            Some("h2h") => render_head_to_head(ctx, &self.head_to_head),
            _ => html! {},
        }
    }
}

fn render_side(ctx: &ViewContext<'_>, side: &str, team: Option<&TeamRef>) -> Markup {
    let name = team.and_then(|t| t.name.as_deref()).unwrap_or_default();
    html! {
        div class=(format!("team {}", side)) {
            (logo(ctx, "team-logo", team.and_then(|t| t.logo.as_deref()), name))
            span.team-name { (name) }
        }
    }
}

fn render_statistics(ctx: &ViewContext<'_>, game: &Fixture) -> Markup {
    let (Some(home), Some(away)) = (game.statistics.first(), game.statistics.get(1)) else {
        return empty_result(&ctx.t("no_stats_available"));
    };
    let away_value = |stat: &StatisticValue| {
        away.statistics
            .iter()
            .find(|s| s.kind == stat.kind)
            .map(|s| s.value_display().to_string())
            .unwrap_or_else(|| "0".to_string())
    };
    html! {
        div.statistics {
            @for stat in &home.statistics {
                div.stat-row {
                    span.stat-home { (stat.value_display()) }
                    span.stat-label { (ctx.t(&stat.kind)) }
                    span.stat-away { (away_value(stat)) }
                }
            }
        }
    }
}

fn event_icon(event: &MatchEvent) -> &'static str {
    match event.kind.as_deref() {
        Some("Goal") => "⚽",
        Some("Card") if event.detail.as_deref() == Some("Yellow Card") => "🟨",
        Some("Card") => "🟥",
        Some("subst") => "🔄",
        Some("Var") => "📺",
        _ => "•",
    }
}

fn event_minute(event: &MatchEvent) -> String {
    let elapsed = event
        .time
        .elapsed
        .as_ref()
        .map(|e| e.as_str())
        .unwrap_or_default();
    match event.time.extra.as_ref().filter(|e| !e.is_empty()) {
        Some(extra) => format!("{}'+{}", elapsed, extra.as_str()),
        None => format!("{}'", elapsed),
    }
}

fn render_events(ctx: &ViewContext<'_>, events: &[MatchEvent]) -> Markup {
    if events.is_empty() {
        return empty_result(&ctx.t("no_events_available"));
    }
    html! {
        div.events {
            @for event in events {
                div.event-row {
                    span.event-time { (event_minute(event)) }
                    span.event-icon { (event_icon(event)) }
                    span.event-player {
                        (event.player.as_ref().and_then(|p| p.name.as_deref()).unwrap_or_default())
                    }
                    @if let Some(assist) = event.assist.as_ref().and_then(|a| a.name.as_deref()) {
                        span.event-assist { "(" (assist) ")" }
                    }
                    @if let Some(detail) = &event.detail {
                        span.event-detail { (ctx.t(detail)) }
                    }
                }
            }
        }
    }
}

fn render_slots(slots: &[LineupSlot]) -> Markup {
    html! {
        ul.players {
            @for slot in slots {
                li.player {
                    span.player-number { (slot.player.number.as_ref().map(|n| n.as_str()).unwrap_or_default()) }
                    span.player-name { (slot.player.name.as_deref().unwrap_or_default()) }
                    span.player-position { (slot.player.pos.as_deref().unwrap_or_default()) }
                }
            }
        }
    }
}

fn render_lineups(ctx: &ViewContext<'_>, lineups: &[Lineup]) -> Markup {
    if lineups.is_empty() {
        return empty_result(&ctx.t("no_lineups_available"));
    }
    html! {
        div.lineups {
            @for lineup in lineups {
                div.lineup {
                    h4.lineup-team {
                        (lineup.team.as_ref().and_then(|t| t.name.as_deref()).unwrap_or_default())
                    }
                    @if let Some(formation) = &lineup.formation {
                        div.formation { (ctx.t("formation")) ": " (formation) }
                    }
                    h5 { (ctx.t("starting_xi")) }
                    (render_slots(&lineup.start_xi))
                    @if !lineup.substitutes.is_empty() {
                        h5 { (ctx.t("substitutes")) }
                        (render_slots(&lineup.substitutes))
                    }
                }
            }
        }
    }
}

fn render_head_to_head(ctx: &ViewContext<'_>, games: &[Fixture]) -> Markup {
    if games.is_empty() {
        return empty_result(&ctx.t("no_h2h_available"));
    }
    html! {
        div.head-to-head {
            h4 { (ctx.t("recent_matches")) }
            @for game in games.iter().take(HEAD_TO_HEAD_LIMIT) {
                div.h2h-row {
                    span.h2h-date {
                        (game.date().and_then(|d| format_game_date(d, ctx.options.time_zone)).unwrap_or_default())
                    }
                    span.h2h-home { (game.home_team().and_then(|t| t.name.as_deref()).unwrap_or_default()) }
                    span.h2h-score { (game.score().home_display()) " - " (game.score().away_display()) }
                    span.h2h-away { (game.away_team().and_then(|t| t.name.as_deref()).unwrap_or_default()) }
                }
            }
        }
    }
}

#[async_trait]
impl View for GameDetailView {
    fn tag(&self) -> &'static str {
        "game-detail"
    }

    async fn load(&mut self, ctx: &ViewContext<'_>) {
        let Some(id) = self.game_id.clone() else {
            error!("VIEW: Game ID is required");
            self.game = Load::Failed;
            return;
        };

        self.game = match ctx.data.game_details(&id).await {
            Ok(Some(game)) => Load::Loaded(game),
            Ok(None) => Load::Empty,
            Err(e) => {
                error!("VIEW: Failed to load game {}: {}", id, e);
                Load::Failed
            }
        };

        self.active_tab = initial_tab(&self.tabs, self.preferred_tab.as_deref());
        debug!("VIEW: game-detail {} tab {:?}", id, self.active_tab);

        if let Some(key) = self.game.loaded().and_then(Fixture::head_to_head_key) {
            self.load_head_to_head(ctx, key).await;
        }
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Markup {
        let tabs: Vec<(&str, &str)> = self.tabs.iter().map(|t| (*t, *t)).collect();
        html! {
            div.game-detail {
                @match (&self.game_id, &self.game) {
                    (None, _) => { (error_message("Game ID is required")) }
                    (_, Load::Loading) => { (loading(ctx)) }
                    (_, Load::Empty) => { (error_message("Game not found")) }
                    (_, Load::Failed) => { (error_message(&ctx.t("error_loading_game"))) }
                    (_, Load::Loaded(game)) => {
                        (self.render_header(ctx, game))
                        @if !tabs.is_empty() {
                            (tab_bar(ctx, &tabs, self.active_tab))
                            div.tab-content { (self.render_tab(ctx, game)) }
                        }
                    }
                }
            }
        }
    }

    async fn interact(&mut self, _ctx: &ViewContext<'_>, interaction: Interaction) -> Vec<WidgetEvent> {
        match interaction {
            Interaction::SelectTab(tab) => match self.tabs.iter().copied().find(|t| *t == tab) {
                Some(tab) => {
                    self.active_tab = Some(tab);
                    vec![WidgetEvent::TabSelected {
                        tab: tab.to_string(),
                    }]
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}
