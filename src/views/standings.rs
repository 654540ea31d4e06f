/// League tables
use async_trait::async_trait;
use maud::{html, Markup};
use tracing::{debug, error};

use super::common::{loading, logo};
use super::{Interaction, Load, View, ViewContext};
use crate::data_provider::Query;
use crate::events::WidgetEvent;
use crate::models::{LeagueRef, RecordLine, StandingRow};

const FORM_LENGTH: usize = 5;

/// Row class for a standings description, e.g. `Promotion - Champions League`
pub fn zone_class(description: &str) -> Option<&'static str> {
    let d = description.to_lowercase();
    if d.contains("champions league") {
        Some("promotion-zone")
    } else if d.contains("europa league") || d.contains("conference league") || d.contains("uefa") {
        Some("europa-zone")
    } else if d.contains("relegation") {
        Some("relegation-zone")
    } else if d.contains("playoff") || d.contains("play-off") || d.contains("play offs") {
        Some("playoff-zone")
    } else if d.contains("promotion") {
        Some("promotion-zone")
    } else {
        None
    }
}

fn form_result(c: char) -> Option<(&'static str, &'static str)> {
    match c {
        'W' => Some(("win", "win")),
        'D' => Some(("draw", "draw")),
        'L' => Some(("loss", "loss")),
        _ => None,
    }
}

/// Letter of the n-th group: A, B, ...
fn group_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

pub struct StandingsView {
    league: String,
    season: Option<String>,
    table: Load<LeagueRef>,
}

impl StandingsView {
    pub fn new(league: String, season: Option<String>) -> Self {
        Self {
            league,
            season,
            table: Load::Loading,
        }
    }

    fn find_row(&self, team_id: &str) -> Option<&StandingRow> {
        self.table
            .loaded()?
            .standings
            .iter()
            .flatten()
            .find(|row| row.team.id.as_ref().map(|id| id.as_str()) == Some(team_id))
    }
}

fn render_form(ctx: &ViewContext<'_>, form: &str) -> Markup {
    let chars: Vec<char> = form.chars().collect();
    let recent = &chars[chars.len().saturating_sub(FORM_LENGTH)..];
    html! {
        div.form {
            @for c in recent {
                @if let Some((class, key)) = form_result(*c) {
                    span class=(format!("form-result {}", class)) title=(ctx.t(key)) {
                        (c.to_string())
                    }
                }
            }
        }
    }
}

fn render_goal_difference(diff: Option<i64>) -> Markup {
    let diff = diff.unwrap_or(0);
    let (class, text) = match diff {
        d if d > 0 => ("goal-diff positive", format!("+{}", d)),
        d if d < 0 => ("goal-diff negative", d.to_string()),
        d => ("goal-diff", d.to_string()),
    };
    html! { td class=(class) { (text) } }
}

fn render_row(ctx: &ViewContext<'_>, row: &StandingRow) -> Markup {
    let zone = row.description.as_deref().and_then(zone_class);
    let class = match zone {
        Some(zone) => format!("standing-row {}", zone),
        None => "standing-row".to_string(),
    };
    let name = row.team.name.as_deref().unwrap_or_default();
    html! {
        tr class=(class) data-team-id=(row.team.id.as_ref().map(|id| id.as_str()).unwrap_or_default()) {
            td.rank { (RecordLine::cell(&row.rank)) }
            td.team {
                (logo(ctx, "team-logo", row.team.logo.as_deref(), name))
                span.team-name { (name) }
            }
            td { (RecordLine::cell(&row.all.played)) }
            td { (RecordLine::cell(&row.all.win)) }
            td { (RecordLine::cell(&row.all.draw)) }
            td { (RecordLine::cell(&row.all.lose)) }
            td { (RecordLine::cell(&row.all.goals.scored)) }
            td { (RecordLine::cell(&row.all.goals.against)) }
            (render_goal_difference(row.goals_diff))
            td.points { (RecordLine::cell(&row.points)) }
            td { (render_form(ctx, row.form.as_deref().unwrap_or_default())) }
        }
    }
}

fn render_table(ctx: &ViewContext<'_>, rows: &[StandingRow]) -> Markup {
    let columns = [
        "played_short",
        "wins_short",
        "draws_short",
        "loses_short",
        "goals_for_short",
        "goals_against_short",
        "goal_difference_short",
        "points",
    ];
    html! {
        table.standings-table {
            thead {
                tr {
                    th { (ctx.t("rank")) }
                    th { (ctx.t("team")) }
                    @for key in columns {
                        th { (ctx.t(key)) }
                    }
                    th.form-header {}
                }
            }
            tbody {
                @for row in rows {
                    (render_row(ctx, row))
                }
            }
        }
    }
}

/// One entry per zone class, with the first description seen for it
fn legend(groups: &[Vec<StandingRow>]) -> Vec<(&'static str, &str)> {
    let mut entries: Vec<(&'static str, &str)> = Vec::new();
    for description in groups.iter().flatten().filter_map(|r| r.description.as_deref()) {
        if let Some(zone) = zone_class(description) {
            if !entries.iter().any(|(z, _)| *z == zone) {
                entries.push((zone, description));
            }
        }
    }
    entries
}

fn render_league(ctx: &ViewContext<'_>, league: &LeagueRef) -> Markup {
    let groups = &league.standings;
    let name = league.name.as_deref().unwrap_or_default();
    html! {
        div.standings-header {
            (logo(ctx, "league-logo", league.logo.as_deref(), name))
            div.league-info {
                h3.league-name { (name) }
                @if let Some(country) = &league.country {
                    span.league-country { (ctx.i18n.translate_country(country)) }
                }
                @if let Some(season) = &league.season {
                    span.league-season { (ctx.t("season")) " " (season.as_str()) }
                }
            }
        }
        @for (index, rows) in groups.iter().enumerate() {
            div.standings-group {
                @if groups.len() > 1 {
                    h4.group-title { (ctx.t("group")) " " (group_letter(index).to_string()) }
                }
                (render_table(ctx, rows))
            }
        }
        @let entries = legend(groups);
        @if !entries.is_empty() {
            div.standings-legend {
                @for (zone, description) in entries {
                    div.legend-item {
                        span class=(format!("legend-color {}", zone)) {}
                        span.legend-label { (description) }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl View for StandingsView {
    fn tag(&self) -> &'static str {
        "standing-component"
    }

    async fn load(&mut self, ctx: &ViewContext<'_>) {
        let query = Query::new()
            .with("league", self.league.as_str())
            .with_opt("season", self.season.as_deref());
        debug!("VIEW: standings fetching {:?}", query.pairs());

        self.table = match ctx.data.standings(&query).await {
            Ok(entries) => match entries.into_iter().next() {
                Some(entry) if !entry.league.standings.is_empty() => Load::Loaded(entry.league),
                _ => Load::Empty,
            },
            Err(e) => {
                error!("VIEW: Failed to load standings for league {}: {}", self.league, e);
                Load::Failed
            }
        };
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Markup {
        html! {
            div.standing-component {
                @match &self.table {
                    Load::Loading => { (loading(ctx)) }
                    Load::Empty => { div.error-message { (ctx.t("no_standings_available")) } }
                    Load::Failed => { div.error-message { (ctx.t("error_loading_standings")) } }
                    Load::Loaded(league) => { (render_league(ctx, league)) }
                }
            }
        }
    }

    async fn interact(&mut self, _ctx: &ViewContext<'_>, interaction: Interaction) -> Vec<WidgetEvent> {
        let Interaction::SelectTeam(team_id) = interaction else {
            return Vec::new();
        };
        match self.find_row(&team_id) {
            Some(row) => vec![WidgetEvent::OpenTeamDetail {
                team_name: row.team.name.clone().unwrap_or_default(),
                team_id,
            }],
            None => Vec::new(),
        }
    }
}
