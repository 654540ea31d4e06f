/// Team detail: header, venue and the statistics / squad tabs
///
/// Tabs load lazily: the first enabled tab is fetched after the team, the others when
/// selected. A team that does not exist stops the view before any tab request.
use async_trait::async_trait;
use maud::{html, Markup};
use tracing::{debug, error};

use super::common::{empty_result, error as error_message, initial_tab, loading, logo, media_url, tab_bar};
use super::{Interaction, Load, View, ViewContext};
use crate::data_provider::Query;
use crate::events::WidgetEvent;
use crate::models::{SquadPlayer, TeamEntry, TeamStatistics};
use crate::types::Sport;
use crate::widget::normalize::WidgetOptions;

const STATS_TAB: &str = "stats";
const SQUAD_TAB: &str = "squad";
const UNKNOWN_POSITION: &str = "Unknown";

pub struct TeamDetailView {
    team_id: String,
    tabs: Vec<&'static str>,
    preferred_tab: Option<String>,
    active_tab: Option<&'static str>,
    team: Load<TeamEntry>,
    /// `None` until the tab is first shown
    stats: Option<Load<TeamStatistics>>,
    squad: Option<Load<Vec<SquadPlayer>>>,
}

impl TeamDetailView {
    pub fn new(team_id: String, options: &WidgetOptions) -> Self {
        let mut tabs = Vec::new();
        if options.flags.team_statistics {
            tabs.push(STATS_TAB);
        }
        if options.flags.team_squad {
            tabs.push(SQUAD_TAB);
        }
        Self {
            team_id,
            tabs,
            preferred_tab: options.tabs.team_tab.clone().or_else(|| options.tabs.tab.clone()),
            active_tab: None,
            team: Load::Loading,
            stats: None,
            squad: None,
        }
    }

    pub fn active_tab(&self) -> Option<&'static str> {
        self.active_tab
    }

    async fn load_tab(&mut self, ctx: &ViewContext<'_>, tab: &'static str) {
        match tab {
            STATS_TAB if self.stats.is_none() => {
                let query = Query::new()
                    .with("team", self.team_id.as_str())
                    .with_opt("league", ctx.options.league.as_deref())
                    .with_opt("season", ctx.options.season.as_deref());
                self.stats = Some(match ctx.data.team_statistics(&query).await {
                    Ok(Some(stats)) => Load::Loaded(stats),
                    Ok(None) => Load::Empty,
                    Err(e) => {
                        error!("VIEW: Failed to load statistics of team {}: {}", self.team_id, e);
                        Load::Failed
                    }
                });
            }
            SQUAD_TAB if self.squad.is_none() => {
                let season = (ctx.sport != Sport::Football)
                    .then_some(ctx.options.season.as_deref())
                    .flatten();
                let query = Query::new()
                    .with("team", self.team_id.as_str())
                    .with_opt("season", season);
                self.squad = Some(match ctx.data.team_squad(&query).await {
                    Ok(players) if players.is_empty() => Load::Empty,
                    Ok(players) => Load::Loaded(players),
                    Err(e) => {
                        error!("VIEW: Failed to load squad of team {}: {}", self.team_id, e);
                        Load::Failed
                    }
                });
            }
            _ => {}
        }
    }

    fn render_tab(&self, ctx: &ViewContext<'_>) -> Markup {
        match self.active_tab {
            Some(STATS_TAB) => match &self.stats {
                None | Some(Load::Loading) => loading(ctx),
                Some(Load::Empty) => empty_result(&ctx.t("no_stats_available")),
                Some(Load::Failed) => error_message(&ctx.t("error_loading_stats")),
                Some(Load::Loaded(stats)) => render_statistics(ctx, stats),
            },
            Some(SQUAD_TAB) => match &self.squad {
                None | Some(Load::Loading) => loading(ctx),
                Some(Load::Empty) => empty_result(&ctx.t("no_squad_available")),
                Some(Load::Failed) => error_message(&ctx.t("error_loading_squad")),
                Some(Load::Loaded(players)) => render_squad(ctx, players),
            },
            _ => html! {},
        }
    }
}

fn render_header(ctx: &ViewContext<'_>, team_id: &str, entry: &TeamEntry) -> Markup {
    let team = &entry.team;
    let name = team.name.as_deref().unwrap_or_default();
    let stadium = team
        .stadium
        .as_deref()
        .or_else(|| entry.venue.as_ref().and_then(|v| v.name.as_deref()));
    html! {
        div.team-header {
            (logo(ctx, "team-logo", Some(media_url(ctx, "teams", team_id).as_str()), name))
            div.team-info {
                h2.team-name { (name) }
                @if let Some(founded) = &team.founded {
                    div.info-row { span.label { (ctx.t("founded")) } span.value { (founded.as_str()) } }
                }
                @if let Some(country) = &team.country {
                    div.info-row {
                        span.label { (ctx.t("country")) }
                        span.value { (ctx.i18n.translate_country(country)) }
                    }
                }
                @if let Some(coach) = &team.coach {
                    div.info-row { span.label { (ctx.t("coach")) } span.value { (coach) } }
                }
                @if let Some(stadium) = stadium {
                    div.info-row { span.label { (ctx.t("stadium")) } span.value { (stadium) } }
                }
            }
        }
        @if let Some(venue) = &entry.venue {
            div.venue-info {
                @if let Some(image) = &venue.image {
                    (logo(ctx, "venue-image", Some(image.as_str()), venue.name.as_deref().unwrap_or_default()))
                }
                div.venue-name {
                    (venue.name.as_deref().unwrap_or_default())
                    @if let Some(city) = &venue.city {
                        " - " (city)
                    }
                }
                @if let Some(capacity) = &venue.capacity {
                    div.info-row { span.label { (ctx.t("capacity")) } span.value { (capacity.as_str()) } }
                }
                @if let Some(address) = &venue.address {
                    div.info-row { span.label { (ctx.t("location")) } span.value { (address) } }
                }
            }
        }
    }
}

fn render_statistics(ctx: &ViewContext<'_>, stats: &TeamStatistics) -> Markup {
    html! {
        div.team-statistics {
            @if let Some(fixtures) = &stats.fixtures {
                div.stats-section {
                    h4 { (ctx.t("general")) }
                    div.stat-row { span.label { (ctx.t("played")) } span.value { (fixtures.played.total_display()) } }
                    div.stat-row { span.label { (ctx.t("wins")) } span.value { (fixtures.wins.total_display()) } }
                    div.stat-row { span.label { (ctx.t("draws")) } span.value { (fixtures.draws.total_display()) } }
                    div.stat-row { span.label { (ctx.t("loses")) } span.value { (fixtures.loses.total_display()) } }
                }
            }
            @if let Some(goals) = &stats.goals {
                div.stats-section {
                    h4 { (ctx.t("goals")) }
                    div.stat-row { span.label { (ctx.t("goals_for")) } span.value { (goals.scored.total.total_display()) } }
                    div.stat-row { span.label { (ctx.t("goals_against")) } span.value { (goals.against.total.total_display()) } }
                }
            }
        }
    }
}

/// Players grouped by position, groups in order of first appearance
fn group_by_position(players: &[SquadPlayer]) -> Vec<(&str, Vec<&SquadPlayer>)> {
    let mut groups: Vec<(&str, Vec<&SquadPlayer>)> = Vec::new();
    for player in players {
        let position = player
            .position
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN_POSITION);
        match groups.iter_mut().find(|(p, _)| *p == position) {
            Some((_, members)) => members.push(player),
            None => groups.push((position, vec![player])),
        }
    }
    groups
}

fn render_squad(ctx: &ViewContext<'_>, players: &[SquadPlayer]) -> Markup {
    html! {
        div.team-squad {
            @for (position, members) in group_by_position(players) {
                div.position-group {
                    h4.position-title { (ctx.t(position)) }
                    div.players-grid {
                        @for player in members {
                            @let id = player.id.as_ref().map(|id| id.as_str()).unwrap_or_default();
                            @let name = player.name.as_deref().unwrap_or_default();
                            div.player-card data-player-id=(id) {
                                (logo(ctx, "player-photo", Some(media_url(ctx, "players", id).as_str()), name))
                                span.player-name { (name) }
                                @if let Some(number) = &player.number {
                                    span.player-number { "#" (number.as_str()) }
                                }
                                @if let Some(age) = &player.age {
                                    span.player-age { (age.as_str()) " " (ctx.t("years_old")) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl View for TeamDetailView {
    fn tag(&self) -> &'static str {
        "team-detail"
    }

    async fn load(&mut self, ctx: &ViewContext<'_>) {
        self.team = match ctx.data.team_details(&self.team_id).await {
            Ok(Some(team)) => Load::Loaded(team),
            Ok(None) => Load::Empty,
            Err(e) => {
                error!("VIEW: Failed to load team {}: {}", self.team_id, e);
                Load::Failed
            }
        };
        if self.team.loaded().is_none() {
            return;
        }

        self.active_tab = initial_tab(&self.tabs, self.preferred_tab.as_deref());
        debug!("VIEW: team-detail {} tab {:?}", self.team_id, self.active_tab);
        if let Some(tab) = self.active_tab {
            self.load_tab(ctx, tab).await;
        }
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Markup {
        let tabs: Vec<(&str, &str)> = self
            .tabs
            .iter()
            .map(|tab| (*tab, if *tab == STATS_TAB { "statistics" } else { "squad" }))
            .collect();
        html! {
            div.team-detail {
                @match &self.team {
                    Load::Loading => { (loading(ctx)) }
                    Load::Empty => { (error_message("Team not found")) }
                    Load::Failed => { (error_message(&ctx.t("error_loading_team"))) }
                    Load::Loaded(entry) => {
                        (render_header(ctx, &self.team_id, entry))
                        @if !tabs.is_empty() {
                            (tab_bar(ctx, &tabs, self.active_tab))
                            div.tab-content { (self.render_tab(ctx)) }
                        }
                    }
                }
            }
        }
    }

    async fn interact(&mut self, ctx: &ViewContext<'_>, interaction: Interaction) -> Vec<WidgetEvent> {
        let Interaction::SelectTab(tab) = interaction else {
            return Vec::new();
        };
        let Some(tab) = self.tabs.iter().copied().find(|t| *t == tab) else {
            return Vec::new();
        };
        self.active_tab = Some(tab);
        self.load_tab(ctx, tab).await;
        vec![WidgetEvent::TabSelected {
            tab: tab.to_string(),
        }]
    }
}
