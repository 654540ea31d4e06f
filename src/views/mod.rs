/// Views mounted by a widget
///
/// A view owns its fetched data and any local UI state (status filter, selected tab).
/// `load` fetches and stores; `render` is pure and produces HTML. Views never return
/// errors: a failed fetch is logged and rendered as a localized message.
use async_trait::async_trait;
use maud::Markup;

use crate::data_provider::DataAccess;
use crate::events::WidgetEvent;
use crate::i18n::Translator;
use crate::types::Sport;
use crate::widget::dispatch::ViewSpec;
use crate::widget::normalize::WidgetOptions;
use crate::widget::state::{DateState, RefreshRequest};

pub mod common;
pub mod favorite_star;
pub mod game_detail;
pub mod games;
pub mod identity;
pub mod leagues;
pub mod standings;
pub mod team_detail;

pub use favorite_star::FavoriteStar;
pub use game_detail::GameDetailView;
pub use games::{GameFilter, GamesView};
pub use identity::{DriverDetailView, FighterPlaceholder, PlayerDetailView};
pub use leagues::LeaguesView;
pub use standings::StandingsView;
pub use team_detail::TeamDetailView;

/// Everything a view may read while loading or rendering
pub struct ViewContext<'a> {
    pub data: &'a DataAccess,
    pub i18n: &'a Translator,
    pub options: &'a WidgetOptions,
    pub dates: &'a DateState,
    pub sport: Sport,
}

impl ViewContext<'_> {
    pub fn t(&self, key: &str) -> String {
        self.i18n.translate(key)
    }
}

/// State of a fetch
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Load<T> {
    #[default]
    Loading,
    Loaded(T),
    /// The request succeeded with no data
    Empty,
    /// The request failed; the cause has been logged
    Failed,
}

impl<T> Load<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Load::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// User input routed to a mounted view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    PreviousDay,
    NextDay,
    Today,
    SetDate(String),
    Filter(GameFilter),
    /// A game row was clicked
    SelectGame(String),
    /// A tab of a detail view was clicked
    SelectTab(String),
    /// A standings row was clicked
    SelectTeam(String),
    SelectLeague(String),
    Search(String),
    ToggleFavorite,
}

#[async_trait]
pub trait View: Send {
    /// Element name of the view, e.g. `games-list`
    fn tag(&self) -> &'static str;

    /// Fetch the view's data
    async fn load(&mut self, ctx: &ViewContext<'_>);

    fn render(&self, ctx: &ViewContext<'_>) -> Markup;

    /// Whether date changes refetch this view
    fn is_refreshable(&self) -> bool {
        false
    }

    /// Refetch in place, keeping local state
    async fn refresh(&mut self, _ctx: &ViewContext<'_>, _request: RefreshRequest) {}

    /// Handle an interaction; returns the events to emit
    async fn interact(
        &mut self,
        _ctx: &ViewContext<'_>,
        _interaction: Interaction,
    ) -> Vec<WidgetEvent> {
        Vec::new()
    }
}

/// Build the view described by `spec`
pub fn mount(spec: &ViewSpec, options: &WidgetOptions) -> Box<dyn View> {
    match spec {
        ViewSpec::Games(params) => Box::new(GamesView::new(params.clone(), options)),
        ViewSpec::GameDetail { game_id } => {
            Box::new(GameDetailView::new(game_id.clone(), options))
        }
        ViewSpec::Standings { league, season } => {
            Box::new(StandingsView::new(league.clone(), season.clone()))
        }
        ViewSpec::Leagues => Box::new(LeaguesView::new()),
        ViewSpec::TeamDetail { team_id } => {
            Box::new(TeamDetailView::new(team_id.clone(), options))
        }
        ViewSpec::PlayerDetail { player_id } => Box::new(PlayerDetailView::new(player_id.clone())),
        ViewSpec::DriverDetail { driver_id } => Box::new(DriverDetailView::new(driver_id.clone())),
        ViewSpec::FighterPlaceholder => Box::new(FighterPlaceholder),
    }
}
