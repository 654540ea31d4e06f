/// Routing from widget type to view
///
/// One exhaustive match over `WidgetType`. Each arm checks its precondition and either
/// describes the view to mount or returns the message shown in place of the widget.
use thiserror::Error;

use super::state::DateState;
use super::WidgetConfig;
use crate::types::{Sport, WidgetType};

/// Failed precondition of a widget type; nothing is mounted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("League parameter is required for standings widget.")]
    MissingLeague,

    #[error("Leagues widget is not available for {0}.")]
    LeaguesUnavailable(Sport),

    #[error("Team ID parameter is required for team widget.")]
    MissingTeamId,

    #[error("Player ID parameter is required for player widget.")]
    MissingPlayerId,

    #[error("Driver widget is only available for F1.")]
    DriverRequiresF1,

    #[error("Driver ID parameter is required for driver widget.")]
    MissingDriverId,

    #[error("Fighter widget is only available for MMA.")]
    FighterRequiresMma,

    #[error("Fights widget is only available for MMA.")]
    FightsRequiresMma,

    #[error("Races widget is only available for F1.")]
    RacesRequiresF1,
}

/// What the games list is keyed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GamesMode {
    /// A calendar date, `YYYY-MM-DD`
    Date(String),
    /// A season, for races and fights; `None` follows the current year
    Season(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamesParams {
    pub widget_type: WidgetType,
    pub mode: GamesMode,
}

/// The view to mount, with its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSpec {
    Games(GamesParams),
    GameDetail { game_id: Option<String> },
    Standings { league: String, season: Option<String> },
    Leagues,
    TeamDetail { team_id: String },
    PlayerDetail { player_id: String },
    DriverDetail { driver_id: String },
    FighterPlaceholder,
}

pub fn dispatch(config: &WidgetConfig, dates: &DateState) -> Result<ViewSpec, PreconditionError> {
    let options = &config.options;
    let sport = config.sport;

    match config.widget_type {
        WidgetType::Games | WidgetType::League | WidgetType::H2h => {
            Ok(ViewSpec::Games(GamesParams {
                widget_type: config.widget_type,
                mode: GamesMode::Date(dates.current_date().to_string()),
            }))
        }
        WidgetType::Fights => {
            if sport != Sport::Mma {
                return Err(PreconditionError::FightsRequiresMma);
            }
            Ok(ViewSpec::Games(GamesParams {
                widget_type: WidgetType::Fights,
                mode: GamesMode::Season(options.season.clone()),
            }))
        }
        WidgetType::Races => {
            if sport != Sport::F1 {
                return Err(PreconditionError::RacesRequiresF1);
            }
            Ok(ViewSpec::Games(GamesParams {
                widget_type: WidgetType::Races,
                mode: GamesMode::Season(options.season.clone()),
            }))
        }
        WidgetType::Game | WidgetType::Race | WidgetType::Fight => Ok(ViewSpec::GameDetail {
            game_id: options.detail_id().map(str::to_string),
        }),
        WidgetType::Standings => match options.league.as_deref() {
            Some(league) => Ok(ViewSpec::Standings {
                league: league.to_string(),
                season: options.season.clone(),
            }),
            None => Err(PreconditionError::MissingLeague),
        },
        WidgetType::Leagues => {
            if !sport.has_leagues() {
                return Err(PreconditionError::LeaguesUnavailable(sport));
            }
            Ok(ViewSpec::Leagues)
        }
        WidgetType::Team => options
            .team_id
            .as_ref()
            .map(|id| ViewSpec::TeamDetail {
                team_id: id.clone(),
            })
            .ok_or(PreconditionError::MissingTeamId),
        WidgetType::Player => options
            .player_id
            .as_ref()
            .map(|id| ViewSpec::PlayerDetail {
                player_id: id.clone(),
            })
            .ok_or(PreconditionError::MissingPlayerId),
        WidgetType::Driver => {
            if sport != Sport::F1 {
                return Err(PreconditionError::DriverRequiresF1);
            }
            options
                .driver_id
                .as_ref()
                .map(|id| ViewSpec::DriverDetail {
                    driver_id: id.clone(),
                })
                .ok_or(PreconditionError::MissingDriverId)
        }
        WidgetType::Fighter => {
            if sport != Sport::Mma {
                return Err(PreconditionError::FighterRequiresMma);
            }
            Ok(ViewSpec::FighterPlaceholder)
        }
    }
}
