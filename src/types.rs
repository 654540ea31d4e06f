/// Shared domain types
///
/// `Sport` and `WidgetType` are the two enumerations every widget is routed on.
/// Parsing is exact and case-sensitive, matching the declarative attribute surface.
use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Custom element tag used when rendering a widget root
pub const WIDGET_TAG: &str = "sports-widget";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Football,
    Basketball,
    Baseball,
    F1,
    Mma,
    Handball,
    Volleyball,
    Rugby,
    Hockey,
    Afl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    Games,
    Standings,
    Game,
    Leagues,
    League,
    H2h,
    Team,
    Player,
    Driver,
    Fighter,
    Fights,
    Races,
    Race,
    Fight,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

static SPORTS: phf::Map<&'static str, Sport> = phf_map! {
    "football" => Sport::Football,
    "basketball" => Sport::Basketball,
    "baseball" => Sport::Baseball,
    "f1" => Sport::F1,
    "mma" => Sport::Mma,
    "handball" => Sport::Handball,
    "volleyball" => Sport::Volleyball,
    "rugby" => Sport::Rugby,
    "hockey" => Sport::Hockey,
    "afl" => Sport::Afl,
};

static WIDGET_TYPES: phf::Map<&'static str, WidgetType> = phf_map! {
    "games" => WidgetType::Games,
    "standings" => WidgetType::Standings,
    "game" => WidgetType::Game,
    "leagues" => WidgetType::Leagues,
    "league" => WidgetType::League,
    "h2h" => WidgetType::H2h,
    "team" => WidgetType::Team,
    "player" => WidgetType::Player,
    "driver" => WidgetType::Driver,
    "fighter" => WidgetType::Fighter,
    "fights" => WidgetType::Fights,
    "races" => WidgetType::Races,
    "race" => WidgetType::Race,
    "fight" => WidgetType::Fight,
};

impl Sport {
    pub const ALL: [Sport; 10] = [
        Sport::Football,
        Sport::Basketball,
        Sport::Baseball,
        Sport::F1,
        Sport::Mma,
        Sport::Handball,
        Sport::Volleyball,
        Sport::Rugby,
        Sport::Hockey,
        Sport::Afl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Basketball => "basketball",
            Sport::Baseball => "baseball",
            Sport::F1 => "f1",
            Sport::Mma => "mma",
            Sport::Handball => "handball",
            Sport::Volleyball => "volleyball",
            Sport::Rugby => "rugby",
            Sport::Hockey => "hockey",
            Sport::Afl => "afl",
        }
    }

    /// Widget type substituted when the declared one is missing or unsupported
    pub fn default_widget_type(self) -> WidgetType {
        match self {
            Sport::F1 => WidgetType::Races,
            Sport::Mma => WidgetType::Fights,
            _ => WidgetType::Games,
        }
    }

    /// Whether the leagues listing exists for this sport
    pub fn has_leagues(self) -> bool {
        !matches!(self, Sport::Afl | Sport::F1 | Sport::Mma)
    }

    /// Attribute carrying a per-sport base URL override, e.g. `url-hockey`
    pub fn url_attribute(self) -> String {
        format!("url-{}", self.as_str())
    }
}

impl WidgetType {
    pub const ALL: [WidgetType; 14] = [
        WidgetType::Games,
        WidgetType::Standings,
        WidgetType::Game,
        WidgetType::Leagues,
        WidgetType::League,
        WidgetType::H2h,
        WidgetType::Team,
        WidgetType::Player,
        WidgetType::Driver,
        WidgetType::Fighter,
        WidgetType::Fights,
        WidgetType::Races,
        WidgetType::Race,
        WidgetType::Fight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::Games => "games",
            WidgetType::Standings => "standings",
            WidgetType::Game => "game",
            WidgetType::Leagues => "leagues",
            WidgetType::League => "league",
            WidgetType::H2h => "h2h",
            WidgetType::Team => "team",
            WidgetType::Player => "player",
            WidgetType::Driver => "driver",
            WidgetType::Fighter => "fighter",
            WidgetType::Fights => "fights",
            WidgetType::Races => "races",
            WidgetType::Race => "race",
            WidgetType::Fight => "fight",
        }
    }
}

impl FromStr for Sport {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SPORTS.get(s).copied().ok_or_else(|| ParseEnumError {
            kind: "sport",
            value: s.to_string(),
        })
    }
}

impl FromStr for WidgetType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WIDGET_TYPES.get(s).copied().ok_or_else(|| ParseEnumError {
            kind: "widget type",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
