/// Host-integration events emitted by widgets
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    DateChanged { date: String },
    FavoriteToggled { favorite: bool },
    GameSelected { game: Value },
    OpenGameDetail { game: Value },
    OpenTeamDetail { team_id: String, team_name: String },
    TabSelected { tab: String },
    SearchChanged { query: String },
    SelectionChanged { value: String },
}

impl WidgetEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetEvent::DateChanged { .. } => "date-changed",
            WidgetEvent::FavoriteToggled { .. } => "favorite-toggled",
            WidgetEvent::GameSelected { .. } => "game-selected",
            WidgetEvent::OpenGameDetail { .. } => "open-game-detail",
            WidgetEvent::OpenTeamDetail { .. } => "open-team-detail",
            WidgetEvent::TabSelected { .. } => "tab-selected",
            WidgetEvent::SearchChanged { .. } => "search-changed",
            WidgetEvent::SelectionChanged { .. } => "selection-changed",
        }
    }

    /// Every widget event bubbles to the host
    pub fn bubbles(&self) -> bool {
        true
    }

    pub fn detail(&self) -> Value {
        match self {
            WidgetEvent::DateChanged { date } => json!({ "date": date }),
            WidgetEvent::FavoriteToggled { favorite } => json!({ "favorite": favorite }),
            WidgetEvent::GameSelected { game } => json!({ "game": game }),
            WidgetEvent::OpenGameDetail { game } => json!({ "game": game }),
            WidgetEvent::OpenTeamDetail { team_id, team_name } => {
                json!({ "teamId": team_id, "teamName": team_name })
            }
            WidgetEvent::TabSelected { tab } => json!({ "tab": tab }),
            WidgetEvent::SearchChanged { query } => json!({ "query": query }),
            WidgetEvent::SelectionChanged { value } => json!({ "value": value }),
        }
    }

    /// `{"type": ..., "bubbles": ..., "detail": ...}` as delivered to the host
    pub fn to_json(&self) -> Value {
        json!({
            "type": self.name(),
            "bubbles": self.bubbles(),
            "detail": self.detail(),
        })
    }
}
