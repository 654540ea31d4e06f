/// Leagues list, optionally restricted to a country
use async_trait::async_trait;
use maud::{html, Markup};
use tracing::error;

use super::common::{empty_result, error as error_message, loading, logo};
use super::{Interaction, Load, View, ViewContext};
use crate::data_provider::Query;
use crate::events::WidgetEvent;
use crate::models::LeagueEntry;

#[derive(Default)]
pub struct LeaguesView {
    leagues: Load<Vec<LeagueEntry>>,
}

impl LeaguesView {
    pub fn new() -> Self {
        Self::default()
    }
}

fn render_league(ctx: &ViewContext<'_>, entry: &LeagueEntry) -> Markup {
    let league = &entry.league;
    let name = league.name.as_deref().unwrap_or_default();
    let country = entry
        .country
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .or(league.country.as_deref());
    html! {
        li.league-item data-league-id=(league.id.as_ref().map(|id| id.as_str()).unwrap_or_default()) {
            (logo(ctx, "league-logo", league.logo.as_deref(), name))
            span.league-name { (name) }
            @if let Some(country) = country {
                span.league-country { (ctx.i18n.translate_country(country)) }
            }
        }
    }
}

#[async_trait]
impl View for LeaguesView {
    fn tag(&self) -> &'static str {
        "leagues-list"
    }

    async fn load(&mut self, ctx: &ViewContext<'_>) {
        let country = Some(ctx.options.country.as_str());
        let query = Query::new().with_opt("country", country);

        self.leagues = match ctx.data.leagues(&query).await {
            Ok(leagues) if leagues.is_empty() => Load::Empty,
            Ok(leagues) => Load::Loaded(leagues),
            Err(e) => {
                error!("VIEW: Failed to load leagues: {}", e);
                Load::Failed
            }
        };
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Markup {
        html! {
            div.leagues-list {
                h3.leagues-title { (ctx.t("leagues")) }
                @match &self.leagues {
                    Load::Loading => { (loading(ctx)) }
                    Load::Empty => { (empty_result(&ctx.t("no_leagues_available"))) }
                    Load::Failed => { (error_message(&ctx.t("error_loading_leagues"))) }
                    Load::Loaded(leagues) => {
                        ul.leagues {
                            @for entry in leagues {
                                (render_league(ctx, entry))
                            }
                        }
                    }
                }
            }
        }
    }

    async fn interact(&mut self, _ctx: &ViewContext<'_>, interaction: Interaction) -> Vec<WidgetEvent> {
        match interaction {
            Interaction::SelectLeague(value) => vec![WidgetEvent::SelectionChanged { value }],
            _ => Vec::new(),
        }
    }
}
